//! PPTX slide layout reader.
//!
//! Reads `ppt/slideLayouts/slideLayoutN.xml` parts and describes each layout
//! as a [`RawLayout`], so PPTX files and JSON descriptions go through the
//! same extraction step.

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use slide_match_core::raw::{
    RawDimension, RawImage, RawLayout, RawLayoutProperties, RawPageElement, RawPlaceholder,
    RawShape, RawSize, RawTransform,
};
use slide_match_core::{extract_templates, Error, RawPresentation, Result, TemplateSet};
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Part every OOXML package carries.
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Directory holding layout parts inside the archive.
const LAYOUTS_DIR: &str = "ppt/slideLayouts/";

/// OOXML offsets and extents are always EMU.
const EMU: &str = "EMU";

/// Placeholder type implied when `<p:ph>` has no `type` attribute.
const DEFAULT_PLACEHOLDER_TYPE: &str = "obj";

/// Reader for the slide layouts of PPTX (Office Open XML) files.
pub struct PptxLayoutParser;

impl PptxLayoutParser {
    /// Create a new layout parser.
    pub fn new() -> Self {
        Self
    }

    /// Read the layouts of a PPTX file into a raw presentation description.
    ///
    /// `filename` names the presentation. An archive without layout parts
    /// yields a presentation with no layouts.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<RawPresentation> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        if !archive.file_names().any(|name| name == CONTENT_TYPES_PART) {
            return Err(Error::PptxParseError(format!(
                "'{}' has no {} part",
                filename, CONTENT_TYPES_PART
            )));
        }

        let mut presentation = RawPresentation {
            title: Some(filename.to_string()),
            ..RawPresentation::default()
        };

        for path in layout_paths(&archive) {
            let content = match read_file_from_archive(&mut archive, &path) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Skipping unreadable layout '{}': {}", path, e);
                    continue;
                }
            };
            let layout = self.parse_layout(&content, &layout_id(&path))?;
            presentation.layouts.push(layout);
        }

        log::debug!(
            "Read {} slide layouts from '{}'",
            presentation.layouts.len(),
            filename
        );
        Ok(presentation)
    }

    /// Read the layouts of a PPTX file and extract templates from them.
    pub fn extract<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<TemplateSet> {
        let presentation = self.parse(reader, filename)?;
        Ok(extract_templates(&presentation))
    }

    /// Parse one layout part.
    fn parse_layout(&self, xml_content: &str, id: &str) -> Result<RawLayout> {
        let mut reader = Reader::from_str(xml_content);
        reader.trim_text(true);

        let mut properties = RawLayoutProperties::default();
        let mut elements = Vec::new();
        let mut current_shape: Option<ShapeInfo> = None;
        let mut in_xfrm = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    match local_name(e.name().as_ref()) {
                        b"sldLayout" => {
                            properties.name = attribute(e, b"type");
                        }
                        b"cSld" => {
                            properties.display_name = attribute(e, b"name");
                        }
                        b"sp" => current_shape = Some(ShapeInfo::new(ShapeKind::Shape)),
                        b"pic" => current_shape = Some(ShapeInfo::new(ShapeKind::Picture)),
                        b"xfrm" => in_xfrm = true,
                        _ => {}
                    }
                    if let Some(shape) = current_shape.as_mut() {
                        shape.apply(e, in_xfrm);
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    if let Some(shape) = current_shape.as_mut() {
                        shape.apply(e, in_xfrm);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" | b"pic" => {
                        if let Some(shape) = current_shape.take() {
                            if let Some(element) = shape.into_element(id) {
                                elements.push(element);
                            }
                        }
                        in_xfrm = false;
                    }
                    b"xfrm" => in_xfrm = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing layout '{}': {}",
                        id, e
                    )));
                }
                _ => {}
            }
        }

        if properties.display_name.is_none() && properties.name.is_none() {
            log::debug!("Layout '{}' has no name", id);
        }

        Ok(RawLayout {
            object_id: Some(id.to_string()),
            layout_properties: Some(properties),
            page_elements: elements,
        })
    }
}

impl Default for PptxLayoutParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeKind {
    Shape,
    Picture,
}

/// What was collected about a shape while walking its XML.
#[derive(Debug)]
struct ShapeInfo {
    kind: ShapeKind,
    shape_id: Option<String>,
    placeholder: Option<RawPlaceholder>,
    offset: Option<(f64, f64)>,
    extent: Option<(f64, f64)>,
}

impl ShapeInfo {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            shape_id: None,
            placeholder: None,
            offset: None,
            extent: None,
        }
    }

    /// Record what an element inside the shape declares.
    fn apply(&mut self, e: &BytesStart<'_>, in_xfrm: bool) {
        match local_name(e.name().as_ref()) {
            b"cNvPr" if self.shape_id.is_none() => {
                self.shape_id = attribute(e, b"id");
            }
            b"ph" => {
                let kind = attribute(e, b"type")
                    .unwrap_or_else(|| DEFAULT_PLACEHOLDER_TYPE.to_string());
                self.placeholder = Some(RawPlaceholder {
                    kind: Some(kind),
                    index: attribute(e, b"idx").and_then(|v| v.parse().ok()),
                    parent_object_id: None,
                });
            }
            b"off" if in_xfrm => {
                self.offset = number_pair(e, b"x", b"y");
            }
            b"ext" if in_xfrm => {
                self.extent = number_pair(e, b"cx", b"cy");
            }
            _ => {}
        }
    }

    /// Turn the shape into a page element. Shapes that are not
    /// placeholders are dropped.
    fn into_element(self, layout_id: &str) -> Option<RawPageElement> {
        let placeholder = self.placeholder?;
        let object_id = self
            .shape_id
            .map(|shape_id| format!("{}-sp{}", layout_id, shape_id));

        let (size, transform) = match (self.offset, self.extent) {
            (Some((x, y)), Some((cx, cy))) => (
                Some(RawSize {
                    width: Some(RawDimension::new(cx, EMU)),
                    height: Some(RawDimension::new(cy, EMU)),
                }),
                Some(RawTransform {
                    scale_x: Some(1.0),
                    scale_y: Some(1.0),
                    translate_x: Some(x),
                    translate_y: Some(y),
                    unit: Some(EMU.to_string()),
                    ..RawTransform::default()
                }),
            ),
            _ => (None, None),
        };

        let mut element = RawPageElement {
            object_id,
            size,
            transform,
            ..RawPageElement::default()
        };
        match self.kind {
            ShapeKind::Shape => {
                element.shape = Some(RawShape {
                    shape_type: None,
                    placeholder: Some(placeholder),
                });
            }
            ShapeKind::Picture => {
                element.image = Some(RawImage {
                    content_url: None,
                    placeholder: Some(placeholder),
                });
            }
        }
        Some(element)
    }
}

/// Layout part paths, ordered by layout number.
fn layout_paths<R: Read + Seek>(archive: &ZipArchive<R>) -> Vec<String> {
    let mut paths: Vec<String> = archive
        .file_names()
        .filter(|name| {
            name.starts_with(LAYOUTS_DIR)
                && name.ends_with(".xml")
                && !name[LAYOUTS_DIR.len()..].contains('/')
        })
        .map(str::to_string)
        .collect();

    paths.sort_by(|a, b| match (extract_layout_number(a), extract_layout_number(b)) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    });
    paths
}

/// Layout id derived from the part name, e.g. `slideLayout3`.
fn layout_id(path: &str) -> String {
    path.rsplit('/')
        .next()
        .unwrap_or(path)
        .trim_end_matches(".xml")
        .to_string()
}

/// Read a file from the ZIP archive.
fn read_file_from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Value of an unprefixed attribute, unescaped.
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| attribute_value(&attr))
}

fn attribute_value(attr: &Attribute<'_>) -> String {
    attr.unescape_value()
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string())
}

/// Two numeric attributes, present together.
fn number_pair(e: &BytesStart<'_>, a: &[u8], b: &[u8]) -> Option<(f64, f64)> {
    let first = attribute(e, a)?.parse::<f64>().ok()?;
    let second = attribute(e, b)?.parse::<f64>().ok()?;
    Some((first, second))
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a layout number from a path like "ppt/slideLayouts/slideLayout3.xml".
fn extract_layout_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
