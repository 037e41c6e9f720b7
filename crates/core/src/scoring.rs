//! Additive, table-driven template scoring.
//!
//! A score is built from four parts:
//!
//! 1. A base score looked up in the [`ScoreTable`] by content tag and
//!    template category.
//! 2. Bonuses when content aligns with a placeholder the template exposes.
//! 3. Penalties when the template reserves a placeholder the content
//!    cannot fill.
//! 4. Length friction between long content and sparse layouts (and the
//!    reverse).
//!
//! The sum is clamped to `0..=100`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::{ContentProfile, ContentTag, LengthBucket};
use crate::types::{PlaceholderRole, Template, TemplateCategory};

/// Highest possible score.
pub const MAX_SCORE: u32 = 100;

/// Base scores keyed by content tag, then template category.
///
/// A tag with no row falls back to the `general` row; a category missing
/// from the row scores 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    rows: BTreeMap<ContentTag, BTreeMap<TemplateCategory, i32>>,
}

impl ScoreTable {
    /// An empty table. Every lookup scores 0.
    pub fn empty() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// Set one cell of the table.
    pub fn with(mut self, tag: ContentTag, category: TemplateCategory, score: i32) -> Self {
        self.set(tag, category, score);
        self
    }

    /// Set one cell of the table.
    pub fn set(&mut self, tag: ContentTag, category: TemplateCategory, score: i32) {
        self.rows.entry(tag).or_default().insert(category, score);
    }

    /// Remove a whole row so the tag falls back to `general`.
    pub fn remove_row(&mut self, tag: ContentTag) {
        self.rows.remove(&tag);
    }

    /// Overlay every cell of `other` onto this table.
    pub fn merge(&mut self, other: &ScoreTable) {
        for (tag, row) in &other.rows {
            for (category, score) in row {
                self.set(*tag, *category, *score);
            }
        }
    }

    /// Base score for a tag against a category.
    pub fn base(&self, tag: ContentTag, category: TemplateCategory) -> i32 {
        self.rows
            .get(&tag)
            .or_else(|| self.rows.get(&ContentTag::General))
            .and_then(|row| row.get(&category))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        use ContentTag as T;
        use TemplateCategory as C;

        Self::empty()
            .with(T::Agenda, C::TitleAndBody, 40)
            .with(T::Agenda, C::TitleAndTwoColumns, 25)
            .with(T::Agenda, C::TitleOnly, 10)
            .with(T::Quote, C::Blank, 35)
            .with(T::Quote, C::TitleOnly, 30)
            .with(T::Quote, C::SectionHeader, 25)
            .with(T::Quote, C::TitleAndBody, 15)
            .with(T::Section, C::SectionHeader, 40)
            .with(T::Section, C::TitleOnly, 35)
            .with(T::Section, C::TitleAndBody, 10)
            .with(T::ImageFocused, C::Blank, 40)
            .with(T::ImageFocused, C::TitleOnly, 35)
            .with(T::ImageFocused, C::TitleAndBody, 15)
            .with(T::ListHeavy, C::TitleAndBody, 40)
            .with(T::ListHeavy, C::TitleAndTwoColumns, 35)
            .with(T::Comparison, C::TitleAndTwoColumns, 40)
            .with(T::Comparison, C::TitleAndBody, 25)
            .with(T::Comparison, C::Blank, 20)
            .with(T::Closing, C::TitleOnly, 40)
            .with(T::Closing, C::SectionHeader, 35)
            .with(T::Closing, C::Blank, 20)
            .with(T::General, C::TitleAndBody, 35)
            .with(T::General, C::TitleOnly, 20)
            .with(T::General, C::TitleAndTwoColumns, 15)
            .with(T::General, C::SectionHeader, 10)
            .with(T::General, C::Blank, 5)
    }
}

/// Bonus and penalty weights applied on top of the base score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringWeights {
    /// Content has a title and the template has a title placeholder.
    pub title_bonus: i32,
    /// Content has a body and the template has a body placeholder.
    pub body_bonus: i32,
    /// Content has an image and the template has an image placeholder.
    pub image_bonus: i32,
    /// Content has no title but the template reserves one.
    pub missing_title_penalty: i32,
    /// Content has no body but the template reserves one.
    pub missing_body_penalty: i32,
    /// Long content against a title-only layout.
    pub long_on_title_only_penalty: i32,
    /// Short content against a two-column layout.
    pub short_on_two_columns_penalty: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            title_bonus: 20,
            body_bonus: 15,
            image_bonus: 10,
            missing_title_penalty: 5,
            missing_body_penalty: 5,
            long_on_title_only_penalty: 15,
            short_on_two_columns_penalty: 10,
        }
    }
}

/// Complete scoring configuration.
///
/// Deserializes from partial JSON: omitted weights keep their defaults and
/// table cells are overlaid onto the default table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub table: ScoreTable,
    pub weights: ScoringWeights,
}

impl<'de> Deserialize<'de> for ScoringConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        struct Overrides {
            table: ScoreTable,
            weights: ScoringWeights,
        }

        impl Default for Overrides {
            fn default() -> Self {
                Self {
                    table: ScoreTable::empty(),
                    weights: ScoringWeights::default(),
                }
            }
        }

        let overrides = Overrides::deserialize(deserializer)?;
        let mut table = ScoreTable::default();
        table.merge(&overrides.table);

        Ok(Self {
            table,
            weights: overrides.weights,
        })
    }
}

/// Scores content profiles against templates.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    /// Create a scorer with the default table and weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with explicit configuration.
    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compute the compatibility score of a template for a profile.
    pub fn score(&self, profile: &ContentProfile, template: &Template) -> u32 {
        let weights = &self.config.weights;
        let category = template.category();
        let has_title_slot = template.has_role(PlaceholderRole::Title);
        let has_body_slot = template.has_role(PlaceholderRole::Body);
        let has_image_slot = template.has_role(PlaceholderRole::Image);

        // Configured values may be arbitrarily large
        let mut score = self.config.table.base(profile.tag, category);

        if profile.has_title && has_title_slot {
            score = score.saturating_add(weights.title_bonus);
        }
        if profile.has_body && has_body_slot {
            score = score.saturating_add(weights.body_bonus);
        }
        if profile.has_image && has_image_slot {
            score = score.saturating_add(weights.image_bonus);
        }

        if !profile.has_title && has_title_slot {
            score = score.saturating_sub(weights.missing_title_penalty);
        }
        if !profile.has_body && has_body_slot {
            score = score.saturating_sub(weights.missing_body_penalty);
        }

        match (profile.length, category) {
            (LengthBucket::Long, TemplateCategory::TitleOnly) => {
                score = score.saturating_sub(weights.long_on_title_only_penalty);
            }
            (LengthBucket::Short, TemplateCategory::TitleAndTwoColumns) => {
                score = score.saturating_sub(weights.short_on_two_columns_penalty);
            }
            _ => {}
        }

        let clamped = score.clamp(0, MAX_SCORE as i32) as u32;
        log::debug!(
            "Scored template '{}' ({}) for {} content: {}",
            template.id(),
            category,
            profile.tag,
            clamped
        );
        clamped
    }
}
