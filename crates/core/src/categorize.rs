//! Template categorization from layout names and placeholder composition.
//!
//! An authored layout name wins over structural inference: names like
//! "Title only" or "SECTION_HEADER" are matched first, and only when no
//! token is found are the placeholder roles counted.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{Placeholder, PlaceholderRole, TemplateCategory};

/// Category tokens recognised in display names, in priority order.
/// Words may be separated by spaces, underscores or hyphens.
static NAME_TOKENS: LazyLock<Vec<(Regex, TemplateCategory)>> = LazyLock::new(|| {
    [
        (r"(?i)title[\s_-]*only", TemplateCategory::TitleOnly),
        (r"(?i)section[\s_-]*header", TemplateCategory::SectionHeader),
        (r"(?i)two[\s_-]*columns?", TemplateCategory::TitleAndTwoColumns),
        (r"(?i)blank", TemplateCategory::Blank),
    ]
    .into_iter()
    .map(|(pattern, category)| (Regex::new(pattern).unwrap(), category))
    .collect()
});

/// Assign a template to exactly one category.
///
/// Pure function of the display name and the placeholder roles.
pub fn categorize(display_name: &str, placeholders: &[Placeholder]) -> TemplateCategory {
    if let Some(category) = category_from_name(display_name) {
        log::debug!("Layout '{}' categorized by name as {}", display_name, category);
        return category;
    }

    let category = category_from_roles(placeholders.iter().map(|p| p.role));
    log::debug!(
        "Layout '{}' categorized from {} placeholders as {}",
        display_name,
        placeholders.len(),
        category
    );
    category
}

/// Look for a category token in a display name.
fn category_from_name(display_name: &str) -> Option<TemplateCategory> {
    NAME_TOKENS
        .iter()
        .find(|(regex, _)| regex.is_match(display_name))
        .map(|(_, category)| *category)
}

/// Infer a category from placeholder roles.
///
/// `Other` roles (dates, footers, slide numbers) are decoration and do not
/// count against "title alone", but any placeholder at all keeps a layout
/// from being blank.
fn category_from_roles(roles: impl Iterator<Item = PlaceholderRole>) -> TemplateCategory {
    let mut total = 0;
    let mut titles = 0;
    let mut bodies = 0;
    let mut subtitles = 0;
    let mut images = 0;

    for role in roles {
        total += 1;
        match role {
            PlaceholderRole::Title => titles += 1,
            PlaceholderRole::Body => bodies += 1,
            PlaceholderRole::Subtitle => subtitles += 1,
            PlaceholderRole::Image => images += 1,
            PlaceholderRole::Other => {}
        }
    }

    if total == 0 {
        return TemplateCategory::Blank;
    }
    if titles == 0 {
        return TemplateCategory::Other;
    }

    if bodies == 0 && subtitles == 0 && images == 0 {
        TemplateCategory::TitleOnly
    } else if bodies + subtitles == 1 {
        TemplateCategory::TitleAndBody
    } else if bodies >= 2 {
        TemplateCategory::TitleAndTwoColumns
    } else if subtitles > 0 {
        TemplateCategory::SectionHeader
    } else {
        TemplateCategory::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(roles: &[PlaceholderRole]) -> Vec<Placeholder> {
        roles
            .iter()
            .enumerate()
            .map(|(i, role)| Placeholder::new(format!("ph{}", i), *role, i))
            .collect()
    }

    use PlaceholderRole::{Body, Image, Other, Subtitle, Title};

    #[test]
    fn test_name_tokens_win_over_structure() {
        // Structurally this is title-and-body, but the author called it "Title only"
        let phs = placeholders(&[Title, Body]);
        assert_eq!(categorize("Title Only (custom)", &phs), TemplateCategory::TitleOnly);
    }

    #[test]
    fn test_name_tokens_case_and_separators() {
        assert_eq!(categorize("TITLE_ONLY", &[]), TemplateCategory::TitleOnly);
        assert_eq!(categorize("Section header", &[]), TemplateCategory::SectionHeader);
        assert_eq!(
            categorize("TITLE_AND_TWO_COLUMNS", &[]),
            TemplateCategory::TitleAndTwoColumns
        );
        assert_eq!(categorize("two-column compare", &[]), TemplateCategory::TitleAndTwoColumns);
        assert_eq!(categorize("BLANK", &placeholders(&[Title])), TemplateCategory::Blank);
    }

    #[test]
    fn test_name_token_priority() {
        // "title only" is checked before "blank"
        assert_eq!(categorize("Blank title only", &[]), TemplateCategory::TitleOnly);
    }

    #[test]
    fn test_structure_title_alone() {
        assert_eq!(categorize("Custom", &placeholders(&[Title])), TemplateCategory::TitleOnly);
        assert_eq!(
            categorize("Custom", &placeholders(&[Title, Other, Other])),
            TemplateCategory::TitleOnly
        );
    }

    #[test]
    fn test_structure_title_and_body() {
        assert_eq!(
            categorize("Custom", &placeholders(&[Title, Body])),
            TemplateCategory::TitleAndBody
        );
        assert_eq!(
            categorize("Custom", &placeholders(&[Title, Subtitle])),
            TemplateCategory::TitleAndBody
        );
    }

    #[test]
    fn test_structure_two_columns() {
        assert_eq!(
            categorize("Custom", &placeholders(&[Title, Body, Body])),
            TemplateCategory::TitleAndTwoColumns
        );
    }

    #[test]
    fn test_structure_section_header() {
        assert_eq!(
            categorize("Custom", &placeholders(&[Title, Subtitle, Body])),
            TemplateCategory::SectionHeader
        );
    }

    #[test]
    fn test_structure_blank_and_other() {
        assert_eq!(categorize("Custom", &[]), TemplateCategory::Blank);
        assert_eq!(categorize("Custom", &placeholders(&[Body])), TemplateCategory::Other);
        assert_eq!(categorize("Custom", &placeholders(&[Other])), TemplateCategory::Other);
        assert_eq!(
            categorize("Custom", &placeholders(&[Title, Image])),
            TemplateCategory::Other
        );
    }

    #[test]
    fn test_categorize_is_deterministic() {
        let phs = placeholders(&[Title, Body, Body, Image]);
        let first = categorize("Layout 7", &phs);
        for _ in 0..10 {
            assert_eq!(categorize("Layout 7", &phs), first);
        }
    }
}
