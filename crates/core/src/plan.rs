//! Placeholder-level edit planning.
//!
//! Works out which placeholder of the chosen template receives which piece
//! of content. The plan is declarative: a collaborator turns each
//! [`PlaceholderEdit`] into concrete insert/replace requests against the
//! presentation service.

use serde::Serialize;

use crate::content::{Content, Formatting};
use crate::types::{Placeholder, PlaceholderRole, Template};

/// What to do with a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EditAction {
    /// Insert text into an empty placeholder.
    InsertText { text: String },
    /// Insert a bullet list into an empty placeholder.
    InsertBullets { items: Vec<String> },
    /// Append bullet paragraphs after text inserted by an earlier edit.
    AppendBullets { items: Vec<String> },
    /// Fill an image placeholder from a URL.
    ReplaceImage { url: String },
}

/// A single edit against one placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderEdit {
    pub placeholder_id: String,
    pub role: PlaceholderRole,
    /// Content field the edit draws from, e.g. `title` or `columns[1]`.
    pub field: String,
    pub action: EditAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<Formatting>,
}

/// Content that no placeholder could receive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedContent {
    pub field: String,
    pub reason: String,
}

/// All edits needed to render content into a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPlan {
    pub template_id: String,
    /// Edits in application order.
    pub edits: Vec<PlaceholderEdit>,
    pub unplaced: Vec<UnplacedContent>,
    /// Content placeholders (title, body, subtitle, image) left empty.
    pub unused_placeholders: Vec<String>,
}

impl EditPlan {
    /// Whether every piece of content found a placeholder.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Free placeholders of one role, consumed front to back.
struct Slots<'a> {
    free: Vec<&'a Placeholder>,
}

impl<'a> Slots<'a> {
    fn of(template: &'a Template, role: PlaceholderRole) -> Self {
        Self {
            free: template.placeholders_with_role(role).collect(),
        }
    }

    /// Body slots read left to right when every one has geometry, else by index.
    fn body(template: &'a Template) -> Self {
        let mut slots = Self::of(template, PlaceholderRole::Body);
        if slots.free.iter().all(|p| p.geometry.is_some()) {
            slots.free.sort_by(|a, b| {
                let ax = a.geometry.as_ref().map_or(0.0, |g| g.x);
                let bx = b.geometry.as_ref().map_or(0.0, |g| g.x);
                ax.partial_cmp(&bx)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.index.cmp(&b.index))
            });
        }
        slots
    }

    fn take(&mut self) -> Option<&'a Placeholder> {
        if self.free.is_empty() {
            None
        } else {
            Some(self.free.remove(0))
        }
    }
}

/// Builds an [`EditPlan`] for one content/template pair.
struct Planner<'a> {
    template: &'a Template,
    formatting: Option<Formatting>,
    plan: EditPlan,
}

impl<'a> Planner<'a> {
    fn edit(&mut self, placeholder: &Placeholder, field: impl Into<String>, action: EditAction) {
        let formatting = match action {
            EditAction::ReplaceImage { .. } => None,
            _ => self.formatting.clone(),
        };
        self.plan.edits.push(PlaceholderEdit {
            placeholder_id: placeholder.id.clone(),
            role: placeholder.role,
            field: field.into(),
            action,
            formatting,
        });
    }

    fn unplaced(&mut self, field: impl Into<String>, role: PlaceholderRole) {
        let reason = format!(
            "template '{}' has no free {} placeholder",
            self.template.id(),
            role
        );
        self.plan.unplaced.push(UnplacedContent {
            field: field.into(),
            reason,
        });
    }

    fn place(
        &mut self,
        slots: &mut Slots<'a>,
        role: PlaceholderRole,
        field: impl Into<String>,
        action: EditAction,
    ) -> bool {
        match slots.take() {
            Some(placeholder) => {
                self.edit(placeholder, field, action);
                true
            }
            None => {
                self.unplaced(field, role);
                false
            }
        }
    }
}

/// Plan the placeholder edits that render `content` into `template`.
///
/// Expects normalized content (see [`Content::normalized`]).
pub fn plan_edits(content: &Content, template: &Template) -> EditPlan {
    let mut titles = Slots::of(template, PlaceholderRole::Title);
    let mut subtitles = Slots::of(template, PlaceholderRole::Subtitle);
    let mut bodies = Slots::body(template);
    let mut images = Slots::of(template, PlaceholderRole::Image);

    let mut planner = Planner {
        template,
        formatting: content.formatting.clone(),
        plan: EditPlan {
            template_id: template.id().to_string(),
            edits: Vec::new(),
            unplaced: Vec::new(),
            unused_placeholders: Vec::new(),
        },
    };

    if let Some(title) = &content.title {
        let action = EditAction::InsertText { text: title.clone() };
        planner.place(&mut titles, PlaceholderRole::Title, "title", action);
    }

    if let Some(subtitle) = &content.subtitle {
        let action = EditAction::InsertText { text: subtitle.clone() };
        planner.place(&mut subtitles, PlaceholderRole::Subtitle, "subtitle", action);
    }

    if content.columns.len() >= 2 {
        for (i, column) in content.columns.iter().enumerate() {
            let action = EditAction::InsertText { text: column.clone() };
            planner.place(&mut bodies, PlaceholderRole::Body, format!("columns[{}]", i), action);
        }
    }

    let mut body_target: Option<&Placeholder> = None;
    if let Some(body) = &content.body {
        body_target = bodies.take();
        match body_target {
            Some(placeholder) => {
                planner.edit(placeholder, "body", EditAction::InsertText { text: body.clone() })
            }
            None => planner.unplaced("body", PlaceholderRole::Body),
        }
    }

    if !content.bullets.is_empty() {
        let items = content.bullets.clone();
        if let Some(placeholder) = bodies.take() {
            planner.edit(placeholder, "bullets", EditAction::InsertBullets { items });
        } else if let Some(placeholder) = body_target {
            planner.edit(placeholder, "bullets", EditAction::AppendBullets { items });
        } else {
            planner.unplaced("bullets", PlaceholderRole::Body);
        }
    }

    // A lone column is ordinary body text
    if content.columns.len() == 1 {
        let action = EditAction::InsertText {
            text: content.columns[0].clone(),
        };
        planner.place(&mut bodies, PlaceholderRole::Body, "columns[0]", action);
    }

    if let Some(url) = &content.image_url {
        let action = EditAction::ReplaceImage { url: url.clone() };
        planner.place(&mut images, PlaceholderRole::Image, "imageUrl", action);
    }
    for (i, url) in content.images.iter().enumerate() {
        let action = EditAction::ReplaceImage { url: url.clone() };
        planner.place(&mut images, PlaceholderRole::Image, format!("images[{}]", i), action);
    }

    let mut plan = planner.plan;
    plan.unused_placeholders = [titles, subtitles, bodies, images]
        .into_iter()
        .flat_map(|slots| slots.free)
        .map(|p| p.id.clone())
        .collect();

    log::debug!(
        "Planned {} edits for template '{}' ({} unplaced)",
        plan.edits.len(),
        plan.template_id,
        plan.unplaced.len()
    );

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Geometry;

    fn at_x(placeholder: Placeholder, x: f64) -> Placeholder {
        placeholder.with_geometry(Geometry {
            x,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            unit: "EMU".to_string(),
        })
    }

    fn title_and_body() -> Template {
        Template::new(
            "tb",
            "Title and body",
            vec![
                Placeholder::new("title", PlaceholderRole::Title, 0),
                Placeholder::new("body", PlaceholderRole::Body, 1),
            ],
        )
    }

    #[test]
    fn test_title_and_body_edits() {
        let content = Content {
            title: Some("Roadmap".to_string()),
            body: Some("Ship the beta".to_string()),
            ..Content::default()
        };

        let plan = plan_edits(&content, &title_and_body());
        assert_eq!(plan.template_id, "tb");
        assert_eq!(plan.edits.len(), 2);
        assert_eq!(plan.edits[0].placeholder_id, "title");
        assert_eq!(
            plan.edits[0].action,
            EditAction::InsertText {
                text: "Roadmap".to_string()
            }
        );
        assert_eq!(plan.edits[1].placeholder_id, "body");
        assert_eq!(plan.edits[1].field, "body");
        assert!(plan.is_complete());
        assert!(plan.unused_placeholders.is_empty());
    }

    #[test]
    fn test_bullets_append_to_body_when_no_free_slot() {
        let content = Content {
            title: Some("Roadmap".to_string()),
            body: Some("Highlights".to_string()),
            bullets: vec!["A".to_string(), "B".to_string()],
            ..Content::default()
        };

        let plan = plan_edits(&content, &title_and_body());
        assert_eq!(plan.edits.len(), 3);
        assert_eq!(plan.edits[2].placeholder_id, "body");
        assert_eq!(
            plan.edits[2].action,
            EditAction::AppendBullets {
                items: vec!["A".to_string(), "B".to_string()]
            }
        );
        assert!(plan.is_complete());
    }

    #[test]
    fn test_bullets_without_body_fill_body_slot() {
        let content = Content {
            bullets: vec!["A".to_string()],
            ..Content::default()
        };

        let plan = plan_edits(&content, &title_and_body());
        assert_eq!(plan.edits.len(), 1);
        assert!(matches!(plan.edits[0].action, EditAction::InsertBullets { .. }));
        assert_eq!(plan.unused_placeholders, vec!["title"]);
    }

    #[test]
    fn test_columns_fill_body_slots_left_to_right() {
        let template = Template::new(
            "two",
            "Two columns",
            vec![
                Placeholder::new("title", PlaceholderRole::Title, 0),
                at_x(Placeholder::new("right", PlaceholderRole::Body, 1), 500.0),
                at_x(Placeholder::new("left", PlaceholderRole::Body, 2), 10.0),
            ],
        );
        let content = Content {
            title: Some("Build vs Buy".to_string()),
            columns: vec!["Build".to_string(), "Buy".to_string()],
            ..Content::default()
        };

        let plan = plan_edits(&content, &template);
        let targets: Vec<(&str, &str)> = plan
            .edits
            .iter()
            .map(|e| (e.field.as_str(), e.placeholder_id.as_str()))
            .collect();
        assert_eq!(
            targets,
            vec![("title", "title"), ("columns[0]", "left"), ("columns[1]", "right")]
        );
    }

    #[test]
    fn test_unplaced_content_is_reported() {
        let blank = Template::new("blank", "Blank", vec![]);
        let content = Content {
            title: Some("Hello".to_string()),
            image_url: Some("https://img/1.png".to_string()),
            ..Content::default()
        };

        let plan = plan_edits(&content, &blank);
        assert!(plan.edits.is_empty());
        assert!(!plan.is_complete());
        let fields: Vec<&str> = plan.unplaced.iter().map(|u| u.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "imageUrl"]);
        assert_eq!(
            plan.unplaced[1].reason,
            "template 'blank' has no free image placeholder"
        );
    }

    #[test]
    fn test_images_fill_image_slots_in_order() {
        let template = Template::new(
            "pics",
            "Pictures",
            vec![
                Placeholder::new("p1", PlaceholderRole::Image, 0),
                Placeholder::new("p2", PlaceholderRole::Image, 1),
            ],
        );
        let content = Content {
            image_url: Some("a.png".to_string()),
            images: vec!["b.png".to_string(), "c.png".to_string()],
            ..Content::default()
        };

        let plan = plan_edits(&content, &template);
        assert_eq!(plan.edits.len(), 2);
        assert_eq!(
            plan.edits[1].action,
            EditAction::ReplaceImage {
                url: "b.png".to_string()
            }
        );
        assert_eq!(plan.unplaced.len(), 1);
        assert_eq!(plan.unplaced[0].field, "images[1]");
    }

    #[test]
    fn test_formatting_applies_to_text_edits_only() {
        let template = Template::new(
            "t",
            "Custom",
            vec![
                Placeholder::new("title", PlaceholderRole::Title, 0),
                Placeholder::new("pic", PlaceholderRole::Image, 1),
            ],
        );
        let formatting = Formatting {
            bold: true,
            ..Formatting::default()
        };
        let content = Content {
            title: Some("Hello".to_string()),
            image_url: Some("a.png".to_string()),
            formatting: Some(formatting.clone()),
            ..Content::default()
        };

        let plan = plan_edits(&content, &template);
        assert_eq!(plan.edits[0].formatting, Some(formatting));
        assert_eq!(plan.edits[1].formatting, None);
    }

    #[test]
    fn test_other_placeholders_never_listed_unused() {
        let template = Template::new(
            "t",
            "Custom",
            vec![
                Placeholder::new("title", PlaceholderRole::Title, 0),
                Placeholder::new("footer", PlaceholderRole::Other, 1),
            ],
        );
        let plan = plan_edits(&Content::default(), &template);
        assert_eq!(plan.unused_placeholders, vec!["title"]);
    }
}
