//! Draft slide content supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::normalize::{clean_list, clean_optional};

/// Draft content for a single slide.
///
/// Every field is optional. Absent values default to "not present": no
/// title, no body, no image, no bullets, no columns, not a comparison.
/// Call [`Content::normalized`] once at the boundary so that blank strings
/// and blank list items count as absent too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Content {
    /// Slide title.
    pub title: Option<String>,

    /// Subtitle shown under the title.
    pub subtitle: Option<String>,

    /// Body text.
    pub body: Option<String>,

    /// Primary image reference (URL).
    pub image_url: Option<String>,

    /// Additional image references.
    pub images: Vec<String>,

    /// Bullet list items.
    pub bullets: Vec<String>,

    /// Text for side-by-side columns, left to right.
    pub columns: Vec<String>,

    /// Explicit request for a comparison layout.
    pub comparison: bool,

    /// Formatting to apply to inserted text.
    pub formatting: Option<Formatting>,
}

/// Formatting directives for inserted text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Formatting {
    pub bold: bool,
    pub italic: bool,
    /// Font size in points.
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    /// Paragraph alignment, e.g. `start`, `center`, `end`.
    pub alignment: Option<String>,
}

impl Formatting {
    /// Whether any directive is set.
    pub fn is_empty(&self) -> bool {
        !self.bold
            && !self.italic
            && self.font_size.is_none()
            && self.font_family.is_none()
            && self.alignment.is_none()
    }
}

impl Content {
    /// Create content with just a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Decode content from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidContent(e.to_string()))
    }

    /// Return a cleaned copy: text trimmed with whitespace collapsed, blank
    /// strings turned into `None`, blank list items dropped, and empty
    /// formatting removed.
    pub fn normalized(&self) -> Self {
        Self {
            title: clean_optional(self.title.as_deref()),
            subtitle: clean_optional(self.subtitle.as_deref()),
            body: clean_optional(self.body.as_deref()),
            image_url: clean_optional(self.image_url.as_deref()),
            images: clean_list(&self.images),
            bullets: clean_list(&self.bullets),
            columns: clean_list(&self.columns),
            comparison: self.comparison,
            formatting: self.formatting.clone().filter(|f| !f.is_empty()),
        }
    }

    /// All image references, primary first.
    pub fn image_refs(&self) -> impl Iterator<Item = &str> {
        self.image_url
            .as_deref()
            .into_iter()
            .chain(self.images.iter().map(String::as_str))
    }
}
