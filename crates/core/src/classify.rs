//! Rule-based content classification.
//!
//! Derives a [`ContentProfile`] from draft [`Content`]. Every rule is a plain
//! case-insensitive substring or count test so that a classification can
//! always be explained.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::Content;
use crate::normalize::fold;

/// Body length bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LengthBucket {
    Short,
    Medium,
    Long,
}

/// Classification tag assigned to content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentTag {
    Agenda,
    Quote,
    Section,
    ImageFocused,
    ListHeavy,
    Comparison,
    Closing,
    General,
}

impl ContentTag {
    /// Every tag, in rule priority order.
    pub const ALL: [ContentTag; 8] = [
        Self::Agenda,
        Self::Quote,
        Self::Section,
        Self::ImageFocused,
        Self::ListHeavy,
        Self::Comparison,
        Self::Closing,
        Self::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agenda => "agenda",
            Self::Quote => "quote",
            Self::Section => "section",
            Self::ImageFocused => "image-focused",
            Self::ListHeavy => "list-heavy",
            Self::Comparison => "comparison",
            Self::Closing => "closing",
            Self::General => "general",
        }
    }
}

impl fmt::Display for ContentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of the signals found in a content object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentProfile {
    pub has_title: bool,
    pub has_subtitle: bool,
    pub has_body: bool,
    pub has_image: bool,
    pub has_bullets: bool,
    /// Two or more columns were supplied.
    pub has_multiple_columns: bool,
    pub length: LengthBucket,
    pub tag: ContentTag,
    pub image_count: usize,
    pub bullet_count: usize,
    /// Body length in characters.
    pub body_chars: usize,
}

/// Thresholds used when classifying content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierThresholds {
    /// Bodies longer than this many characters are long.
    pub long_body_chars: usize,
    /// Bodies longer than this (and not long) are medium.
    pub medium_body_chars: usize,
    /// More bullets than this makes content list-heavy.
    pub list_heavy_bullets: usize,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            long_body_chars: 500,
            medium_body_chars: 150,
            list_heavy_bullets: 5,
        }
    }
}

/// Quotation marks that mark a body as a quote.
const QUOTE_MARKS: &[char] = &['"', '\u{201C}', '\u{201D}', '\u{201E}', '«', '»'];

/// Content classifier.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    thresholds: ClassifierThresholds,
}

impl Classifier {
    /// Create a classifier with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom thresholds.
    pub fn with_thresholds(mut self, thresholds: ClassifierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Derive a profile from content.
    ///
    /// Expects content that went through [`Content::normalized`]; blank
    /// strings are otherwise counted as present.
    pub fn classify(&self, content: &Content) -> ContentProfile {
        let body_chars = content.body.as_deref().map_or(0, |b| b.chars().count());
        let image_count = content.image_refs().count();

        let profile = ContentProfile {
            has_title: content.title.is_some(),
            has_subtitle: content.subtitle.is_some(),
            has_body: content.body.is_some(),
            has_image: image_count > 0,
            has_bullets: !content.bullets.is_empty(),
            has_multiple_columns: content.columns.len() >= 2,
            length: self.length_bucket(body_chars),
            tag: self.tag(content),
            image_count,
            bullet_count: content.bullets.len(),
            body_chars,
        };

        log::debug!(
            "Classified content as {} ({:?}, {} chars, {} bullets, {} images)",
            profile.tag,
            profile.length,
            profile.body_chars,
            profile.bullet_count,
            profile.image_count
        );

        profile
    }

    fn length_bucket(&self, body_chars: usize) -> LengthBucket {
        if body_chars > self.thresholds.long_body_chars {
            LengthBucket::Long
        } else if body_chars > self.thresholds.medium_body_chars {
            LengthBucket::Medium
        } else {
            LengthBucket::Short
        }
    }

    /// First matching rule wins.
    fn tag(&self, content: &Content) -> ContentTag {
        let title = content.title.as_deref().map(fold).unwrap_or_default();
        let body = content.body.as_deref().map(fold).unwrap_or_default();

        if title.contains("agenda") || body.contains("agenda") {
            ContentTag::Agenda
        } else if title.contains("quote") || body.contains(QUOTE_MARKS) {
            ContentTag::Quote
        } else if title.contains("section") || title.contains("chapter") {
            ContentTag::Section
        } else if content.image_refs().next().is_some() && body.is_empty() {
            ContentTag::ImageFocused
        } else if content.bullets.len() > self.thresholds.list_heavy_bullets {
            ContentTag::ListHeavy
        // Plain substring: "devs" or "canvas" also match
        } else if content.comparison || title.contains("vs") || title.contains("versus") {
            ContentTag::Comparison
        } else if title.contains("thank") || title.contains("conclusion") {
            ContentTag::Closing
        } else {
            ContentTag::General
        }
    }
}

/// Classify content with the default thresholds.
pub fn classify(content: &Content) -> ContentProfile {
    Classifier::new().classify(content)
}
