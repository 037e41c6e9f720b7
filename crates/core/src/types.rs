//! Domain types for extracted slide templates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::categorize::categorize;

/// The format of a templates source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// A JSON presentation description (layouts with page elements).
    Json,
    /// A PPTX (Office Open XML) file whose slide layouts are read directly.
    Pptx,
}

impl SourceFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pptx" | "potx" => Some(Self::Pptx),
            _ => None,
        }
    }

    /// Detect format from the leading bytes of the file.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // JSON documents start with an object or array after optional whitespace/BOM
        let text = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
        match text.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') | Some(b'[') => Some(Self::Json),
            _ => None,
        }
    }
}

/// The role a placeholder plays within its template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderRole {
    Title,
    /// Body or generic content slot.
    Body,
    Subtitle,
    Image,
    /// Anything else: dates, footers, slide numbers, charts, tables.
    Other,
}

impl PlaceholderRole {
    /// Map a declared placeholder type to a role.
    ///
    /// Understands both the Slides API vocabulary (`TITLE`, `CENTERED_TITLE`,
    /// `BODY`, `OBJECT`, `PICTURE`, ...) and the OOXML one (`title`, `ctrTitle`,
    /// `body`, `obj`, `pic`, ...). Matching ignores case and separators.
    pub fn from_type_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "title" | "centeredtitle" | "ctrtitle" => Self::Title,
            "body" | "obj" | "object" | "content" => Self::Body,
            "subtitle" => Self::Subtitle,
            "pic" | "picture" | "image" | "clipart" => Self::Image,
            _ => Self::Other,
        }
    }

    /// Lowercase name used in logs and reasoning text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::Subtitle => "subtitle",
            Self::Image => "image",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PlaceholderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position and size of a placeholder on the slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Left offset.
    pub x: f64,
    /// Top offset.
    pub y: f64,
    /// Rendered width (size scaled by the transform).
    pub width: f64,
    /// Rendered height (size scaled by the transform).
    pub height: f64,
    /// Unit of all four values, e.g. `EMU` or `PT`.
    pub unit: String,
}

/// A typed slot within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Identifier of the page element declaring the placeholder.
    pub id: String,

    /// Role of the slot.
    pub role: PlaceholderRole,

    /// 0-based position among the template's placeholders.
    pub index: usize,

    /// Geometry, when both size and transform were declared.
    pub geometry: Option<Geometry>,
}

impl Placeholder {
    /// Create a placeholder without geometry.
    pub fn new(id: impl Into<String>, role: PlaceholderRole, index: usize) -> Self {
        Self {
            id: id.into(),
            role,
            index,
            geometry: None,
        }
    }

    /// Attach geometry to the placeholder.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

/// Structural category of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    TitleOnly,
    TitleAndBody,
    TitleAndTwoColumns,
    SectionHeader,
    Blank,
    Other,
}

impl TemplateCategory {
    /// Every category, in declaration order.
    pub const ALL: [TemplateCategory; 6] = [
        Self::TitleOnly,
        Self::TitleAndBody,
        Self::TitleAndTwoColumns,
        Self::SectionHeader,
        Self::Blank,
        Self::Other,
    ];

    /// Kebab-case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TitleOnly => "title-only",
            Self::TitleAndBody => "title-and-body",
            Self::TitleAndTwoColumns => "title-and-two-columns",
            Self::SectionHeader => "section-header",
            Self::Blank => "blank",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reusable slide structure extracted from a presentation layout.
///
/// The category is derived once on construction from the display name and
/// placeholder roles, and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    id: String,
    display_name: String,
    placeholders: Vec<Placeholder>,
    category: TemplateCategory,
}

impl Template {
    /// Create a template and derive its category.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        placeholders: Vec<Placeholder>,
    ) -> Self {
        let display_name = display_name.into();
        let category = categorize(&display_name, &placeholders);
        Self {
            id: id.into(),
            display_name,
            placeholders,
            category,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Placeholders in extraction order.
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn category(&self) -> TemplateCategory {
        self.category
    }

    /// Whether the template exposes at least one placeholder with `role`.
    pub fn has_role(&self, role: PlaceholderRole) -> bool {
        self.placeholders.iter().any(|p| p.role == role)
    }

    /// Placeholders with `role`, in extraction order.
    pub fn placeholders_with_role(&self, role: PlaceholderRole) -> impl Iterator<Item = &Placeholder> {
        self.placeholders.iter().filter(move |p| p.role == role)
    }
}

/// An ordered collection of templates from a single source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSet {
    /// Name of the source collection (presentation id or title).
    pub source: String,

    /// Templates in extraction order.
    pub templates: Vec<Template>,
}

impl TemplateSet {
    /// Create an empty set for the named source.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            templates: Vec::new(),
        }
    }

    /// Add a template to the end of the set.
    pub fn push(&mut self, template: Template) {
        self.templates.push(template);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id() == id)
    }
}

impl<'a> IntoIterator for &'a TemplateSet {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

/// A template together with the score it received in one matching run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTemplate {
    pub template: Template,
    /// Compatibility score in `0..=100`.
    pub score: u32,
}
