//! Raw presentation description, as delivered by a presentation service.
//!
//! Field names follow the Slides REST representation (camelCase). Every
//! field is optional so that partial descriptions still deserialize.

use serde::{Deserialize, Serialize};

/// A presentation with its layout definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPresentation {
    pub presentation_id: Option<String>,
    pub title: Option<String>,
    pub layouts: Vec<RawLayout>,
}

/// One layout (template) entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLayout {
    pub object_id: Option<String>,
    pub layout_properties: Option<RawLayoutProperties>,
    pub page_elements: Vec<RawPageElement>,
}

/// Name metadata of a layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLayoutProperties {
    /// Predefined layout name, e.g. `TITLE_AND_BODY`.
    pub name: Option<String>,
    /// Human-readable name shown in the editor.
    pub display_name: Option<String>,
    pub master_object_id: Option<String>,
}

/// An element placed on a layout page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPageElement {
    pub object_id: Option<String>,
    pub size: Option<RawSize>,
    pub transform: Option<RawTransform>,
    pub shape: Option<RawShape>,
    pub image: Option<RawImage>,
    pub element_group: Option<RawElementGroup>,
}

impl RawPageElement {
    /// The placeholder declared by this element, if any.
    pub fn placeholder(&self) -> Option<&RawPlaceholder> {
        self.shape
            .as_ref()
            .and_then(|s| s.placeholder.as_ref())
            .or_else(|| self.image.as_ref().and_then(|i| i.placeholder.as_ref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawShape {
    pub shape_type: Option<String>,
    pub placeholder: Option<RawPlaceholder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawImage {
    pub content_url: Option<String>,
    pub placeholder: Option<RawPlaceholder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawElementGroup {
    pub children: Vec<RawPageElement>,
}

/// Placeholder declaration on a page element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPlaceholder {
    /// Declared type, e.g. `TITLE`, `BODY`, or OOXML `ctrTitle`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub index: Option<u32>,
    pub parent_object_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSize {
    pub width: Option<RawDimension>,
    pub height: Option<RawDimension>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawDimension {
    pub magnitude: Option<f64>,
    pub unit: Option<String>,
}

impl RawDimension {
    pub fn new(magnitude: f64, unit: impl Into<String>) -> Self {
        Self {
            magnitude: Some(magnitude),
            unit: Some(unit.into()),
        }
    }
}

/// Affine transform of a page element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTransform {
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub shear_x: Option<f64>,
    pub shear_y: Option<f64>,
    pub translate_x: Option<f64>,
    pub translate_y: Option<f64>,
    pub unit: Option<String>,
}
