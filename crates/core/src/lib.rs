//! Core engine for matching draft slide content to presentation templates:
//! template extraction and categorization, rule-based content
//! classification, table-driven scoring, selection with explanation, and
//! placeholder edit planning.

pub mod categorize;
pub mod classify;
pub mod content;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod normalize;
pub mod plan;
pub mod raw;
pub mod scoring;
pub mod types;

pub use categorize::categorize;
pub use classify::{classify, Classifier, ClassifierThresholds, ContentProfile, ContentTag, LengthBucket};
pub use content::{Content, Formatting};
pub use error::{Error, Result};
pub use extract::{extract_templates, extract_templates_from_json};
pub use matcher::{explain, find_best_template, MatchResult, TemplateMatcher, MAX_ALTERNATIVES};
pub use plan::{plan_edits, EditAction, EditPlan, PlaceholderEdit, UnplacedContent};
pub use raw::RawPresentation;
pub use scoring::{ScoreTable, Scorer, ScoringConfig, ScoringWeights, MAX_SCORE};
pub use types::{
    Geometry, Placeholder, PlaceholderRole, ScoredTemplate, SourceFormat, Template,
    TemplateCategory, TemplateSet,
};
