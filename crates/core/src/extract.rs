//! Template extraction from a raw presentation description.
//!
//! Extraction never fails. Missing or malformed input produces an empty
//! [`TemplateSet`]; having no templates is data, not an error.

use crate::raw::{RawLayout, RawPageElement, RawPresentation};
use crate::types::{Geometry, Placeholder, PlaceholderRole, Template, TemplateSet};

/// Source name used when a presentation carries neither id nor title.
const DEFAULT_SOURCE: &str = "presentation";

/// Unit assumed when neither size nor transform declares one.
const DEFAULT_UNIT: &str = "EMU";

/// Extract templates from a presentation, preserving layout order.
pub fn extract_templates(presentation: &RawPresentation) -> TemplateSet {
    let source = non_blank(&presentation.presentation_id)
        .or_else(|| non_blank(&presentation.title))
        .unwrap_or(DEFAULT_SOURCE);

    let mut set = TemplateSet::new(source);
    for (idx, layout) in presentation.layouts.iter().enumerate() {
        set.push(extract_layout(layout, idx));
    }

    log::debug!("Extracted {} templates from '{}'", set.len(), set.source);
    set
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Extract templates from JSON text.
///
/// Accepts either a presentation object or a bare array of layouts.
/// Anything that does not decode yields an empty set.
pub fn extract_templates_from_json(json: &str) -> TemplateSet {
    match parse_presentation(json) {
        Ok(presentation) => extract_templates(&presentation),
        Err(e) => {
            log::warn!("Ignoring malformed presentation description: {}", e);
            TemplateSet::new(DEFAULT_SOURCE)
        }
    }
}

fn parse_presentation(json: &str) -> serde_json::Result<RawPresentation> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        Ok(RawPresentation {
            layouts: serde_json::from_value(value)?,
            ..RawPresentation::default()
        })
    } else {
        serde_json::from_value(value)
    }
}

/// Build a template from one layout entry.
fn extract_layout(layout: &RawLayout, position: usize) -> Template {
    let id = layout
        .object_id
        .clone()
        .unwrap_or_else(|| format!("layout-{}", position + 1));

    let display_name = layout
        .layout_properties
        .as_ref()
        .and_then(|p| p.display_name.as_deref().or(p.name.as_deref()))
        .unwrap_or(id.as_str())
        .to_string();

    let mut placeholders = Vec::new();
    collect_placeholders(&layout.page_elements, &id, &mut placeholders);

    Template::new(id, display_name, placeholders)
}

/// Walk page elements (descending into groups) and collect placeholders.
fn collect_placeholders(elements: &[RawPageElement], layout_id: &str, out: &mut Vec<Placeholder>) {
    for element in elements {
        if let Some(group) = &element.element_group {
            collect_placeholders(&group.children, layout_id, out);
            continue;
        }

        let Some(declared) = element.placeholder() else {
            continue;
        };

        let index = out.len();
        let role = declared
            .kind
            .as_deref()
            .map(PlaceholderRole::from_type_name)
            .unwrap_or(PlaceholderRole::Other);
        let id = element
            .object_id
            .clone()
            .unwrap_or_else(|| format!("{}_ph{}", layout_id, index));

        let mut placeholder = Placeholder::new(id, role, index);
        if let Some(geometry) = element_geometry(element) {
            placeholder = placeholder.with_geometry(geometry);
        }
        out.push(placeholder);
    }
}

/// Geometry is captured only when both size and transform are present.
fn element_geometry(element: &RawPageElement) -> Option<Geometry> {
    let size = element.size.as_ref()?;
    let transform = element.transform.as_ref()?;
    let width = size.width.as_ref()?;
    let height = size.height.as_ref()?;

    let unit = transform
        .unit
        .as_deref()
        .or(width.unit.as_deref())
        .unwrap_or(DEFAULT_UNIT)
        .to_string();

    Some(Geometry {
        x: transform.translate_x.unwrap_or(0.0),
        y: transform.translate_y.unwrap_or(0.0),
        width: width.magnitude? * transform.scale_x.unwrap_or(1.0),
        height: height.magnitude? * transform.scale_y.unwrap_or(1.0),
        unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TemplateCategory;

    const DECK: &str = r#"{
        "presentationId": "deck-1",
        "title": "Quarterly",
        "layouts": [
            {
                "objectId": "l-title",
                "layoutProperties": {"name": "TITLE_ONLY", "displayName": "Title only"},
                "pageElements": [
                    {
                        "objectId": "t1",
                        "size": {"width": {"magnitude": 3000000, "unit": "EMU"}, "height": {"magnitude": 500000, "unit": "EMU"}},
                        "transform": {"scaleX": 2, "scaleY": 1, "translateX": 100, "translateY": 200, "unit": "EMU"},
                        "shape": {"shapeType": "TEXT_BOX", "placeholder": {"type": "TITLE", "index": 0}}
                    },
                    {"objectId": "deco", "shape": {"shapeType": "RECTANGLE"}},
                    {"objectId": "num", "shape": {"placeholder": {"type": "SLIDE_NUMBER"}}}
                ]
            },
            {
                "objectId": "l-custom",
                "layoutProperties": {"name": "CUSTOM_1"},
                "pageElements": [
                    {"objectId": "t2", "size": {"width": {"magnitude": 10}, "height": {"magnitude": 5}}, "shape": {"placeholder": {"type": "TITLE"}}},
                    {"elementGroup": {"children": [
                        {"objectId": "b1", "shape": {"placeholder": {"type": "BODY", "index": 0}}},
                        {"objectId": "b2", "shape": {"placeholder": {"type": "BODY", "index": 1}}}
                    ]}},
                    {"objectId": "p1", "image": {"placeholder": {"type": "PICTURE"}}}
                ]
            },
            {"objectId": "l-empty", "layoutProperties": {"displayName": "Nothing here"}}
        ]
    }"#;

    #[test]
    fn test_extract_preserves_order_and_names() {
        let set = extract_templates_from_json(DECK);
        assert_eq!(set.source, "deck-1");

        let ids: Vec<&str> = set.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["l-title", "l-custom", "l-empty"]);
        assert_eq!(set.templates[0].display_name(), "Title only");
        assert_eq!(set.templates[1].display_name(), "CUSTOM_1");
    }

    #[test]
    fn test_extract_ignores_non_placeholder_elements() {
        let set = extract_templates_from_json(DECK);
        let title_layout = &set.templates[0];

        let roles: Vec<PlaceholderRole> = title_layout.placeholders().iter().map(|p| p.role).collect();
        assert_eq!(roles, vec![PlaceholderRole::Title, PlaceholderRole::Other]);
        assert_eq!(title_layout.category(), TemplateCategory::TitleOnly);
    }

    #[test]
    fn test_extract_geometry_requires_size_and_transform() {
        let set = extract_templates_from_json(DECK);

        let geometry = set.templates[0].placeholders()[0].geometry.clone().unwrap();
        assert_eq!(geometry.x, 100.0);
        assert_eq!(geometry.y, 200.0);
        assert_eq!(geometry.width, 6_000_000.0);
        assert_eq!(geometry.height, 500_000.0);
        assert_eq!(geometry.unit, "EMU");

        // Size without transform
        assert!(set.templates[1].placeholders()[0].geometry.is_none());
    }

    #[test]
    fn test_extract_descends_into_groups() {
        let set = extract_templates_from_json(DECK);
        let custom = &set.templates[1];

        let ids: Vec<&str> = custom.placeholders().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "b1", "b2", "p1"]);
        let indices: Vec<usize> = custom.placeholders().iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(custom.placeholders()[3].role, PlaceholderRole::Image);
        assert_eq!(custom.category(), TemplateCategory::TitleAndTwoColumns);
    }

    #[test]
    fn test_extract_layout_without_elements() {
        let set = extract_templates_from_json(DECK);
        let empty = &set.templates[2];
        assert!(empty.placeholders().is_empty());
        assert_eq!(empty.category(), TemplateCategory::Blank);
    }

    #[test]
    fn test_extract_zero_layouts_is_empty() {
        let set = extract_templates_from_json(r#"{"presentationId": "p", "layouts": []}"#);
        assert!(set.is_empty());
        assert_eq!(set.source, "p");
    }

    #[test]
    fn test_source_skips_blank_id() {
        let set = extract_templates_from_json(r#"{"presentationId": "  ", "title": "Quarterly"}"#);
        assert_eq!(set.source, "Quarterly");

        let set = extract_templates_from_json(r#"{"presentationId": "", "title": " "}"#);
        assert_eq!(set.source, "presentation");
    }

    #[test]
    fn test_extract_malformed_input_is_empty() {
        assert!(extract_templates_from_json("not json").is_empty());
        assert!(extract_templates_from_json(r#"{"layouts": 5}"#).is_empty());
        assert!(extract_templates_from_json("").is_empty());
        assert!(extract_templates(&RawPresentation::default()).is_empty());
    }

    #[test]
    fn test_extract_bare_layout_array() {
        let set = extract_templates_from_json(r#"[{"pageElements": []}, {}]"#);
        assert_eq!(set.len(), 2);
        assert_eq!(set.source, "presentation");
        assert_eq!(set.templates[0].id(), "layout-1");
        assert_eq!(set.templates[1].display_name(), "layout-2");
    }

    #[test]
    fn test_extract_is_idempotent() {
        assert_eq!(extract_templates_from_json(DECK), extract_templates_from_json(DECK));
    }

    #[test]
    fn test_missing_placeholder_ids_are_generated() {
        let set = extract_templates_from_json(
            r#"[{"objectId": "L", "pageElements": [{"shape": {"placeholder": {"type": "TITLE"}}}]}]"#,
        );
        assert_eq!(set.templates[0].placeholders()[0].id, "L_ph0");
    }
}
