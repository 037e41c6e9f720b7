//! Template selection and match explanation.

use serde::Serialize;

use crate::classify::{Classifier, ContentProfile, ContentTag};
use crate::content::Content;
use crate::error::{Error, Result};
use crate::plan::{plan_edits, EditPlan};
use crate::scoring::Scorer;
use crate::types::{PlaceholderRole, ScoredTemplate, Template, TemplateSet};

/// Maximum number of runner-up templates in a result.
pub const MAX_ALTERNATIVES: usize = 2;

/// The outcome of one matching run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Highest-scoring template.
    pub best: ScoredTemplate,

    /// Up to [`MAX_ALTERNATIVES`] runners-up, best first.
    pub alternatives: Vec<ScoredTemplate>,

    /// Profile of the matched content.
    pub profile: ContentProfile,

    /// Human-readable explanation of the choice.
    pub reasoning: String,

    /// Placeholder edits that render the content into the best template.
    pub edit_plan: EditPlan,
}

/// Classifies content, scores every candidate and picks the best.
#[derive(Debug, Clone, Default)]
pub struct TemplateMatcher {
    classifier: Classifier,
    scorer: Scorer,
}

impl TemplateMatcher {
    /// Create a matcher with default thresholds and weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom classifier.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Use a custom scorer.
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Find the best template in a set.
    pub fn find_best(&self, content: &Content, templates: &TemplateSet) -> Result<MatchResult> {
        self.find_best_in(content, &templates.source, &templates.templates)
    }

    /// Find the best template in a slice, naming the collection for errors.
    pub fn find_best_in(
        &self,
        content: &Content,
        collection: &str,
        templates: &[Template],
    ) -> Result<MatchResult> {
        if templates.is_empty() {
            return Err(Error::empty_candidates(collection));
        }

        let content = content.normalized();
        let profile = self.classifier.classify(&content);
        let mut ranked = self.rank_profile(&profile, templates).into_iter();

        // Non-empty input always ranks at least one template
        let best = ranked
            .next()
            .ok_or_else(|| Error::empty_candidates(collection))?;
        let alternatives: Vec<ScoredTemplate> = ranked.take(MAX_ALTERNATIVES).collect();

        let reasoning = explain(&profile, &best);
        let edit_plan = plan_edits(&content, &best.template);

        log::debug!(
            "Selected '{}' ({}) from '{}' with score {}",
            best.template.id(),
            best.template.category(),
            collection,
            best.score
        );

        Ok(MatchResult {
            best,
            alternatives,
            profile,
            reasoning,
            edit_plan,
        })
    }

    /// Score every template, best first.
    ///
    /// Ties keep extraction order.
    pub fn rank(&self, content: &Content, templates: &[Template]) -> Vec<ScoredTemplate> {
        let profile = self.classifier.classify(&content.normalized());
        self.rank_profile(&profile, templates)
    }

    fn rank_profile(&self, profile: &ContentProfile, templates: &[Template]) -> Vec<ScoredTemplate> {
        let mut scored: Vec<ScoredTemplate> = templates
            .iter()
            .map(|template| ScoredTemplate {
                score: self.scorer.score(profile, template),
                template: template.clone(),
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }
}

/// Find the best template for content with the default configuration.
///
/// Fails with [`Error::EmptyCandidateSet`] when `templates` is empty.
pub fn find_best_template(content: &Content, templates: &TemplateSet) -> Result<MatchResult> {
    TemplateMatcher::new().find_best(content, templates)
}

/// Render the reasoning trace for a scored template.
///
/// Sentences, in order: the tag-to-category relation (skipped for general
/// content), placeholder alignment, image presence, and the score.
pub fn explain(profile: &ContentProfile, scored: &ScoredTemplate) -> String {
    let template = &scored.template;
    let mut parts = Vec::new();

    if profile.tag != ContentTag::General {
        parts.push(format!(
            "{} content matches the {} layout '{}'",
            capitalize(profile.tag.as_str()),
            template.category(),
            template.display_name()
        ));
    }

    let title_aligned = profile.has_title && template.has_role(PlaceholderRole::Title);
    let body_aligned = profile.has_body && template.has_role(PlaceholderRole::Body);
    match (title_aligned, body_aligned) {
        (true, true) => parts.push("Title and body fill matching placeholders".to_string()),
        (true, false) => parts.push("Title fills the title placeholder".to_string()),
        (false, true) => parts.push("Body fills the body placeholder".to_string()),
        (false, false) => {}
    }

    if profile.has_image {
        if template.has_role(PlaceholderRole::Image) {
            parts.push("Image fills an image placeholder".to_string());
        } else {
            parts.push(format!("Content includes {} image(s)", profile.image_count));
        }
    }

    parts.push(format!("Score: {}/100", scored.score));
    parts.join(". ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
