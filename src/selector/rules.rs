//! Default rule sets for the registry search form and result pages.
//!
//! Each list is ordered from the most specific pattern to the most generic.
//! These are only defaults; [`crate::Options`] carries the lists actually used.

use super::SelectorRule;

/// Rules for the document-title query field.
#[must_use]
pub fn title_field() -> Vec<SelectorRule> {
    vec![
        SelectorRule::attribute("input", &["id", "name"], "docname"),
        SelectorRule::attribute("input", &["placeholder"], "назван"),
        SelectorRule::attribute("input", &["id", "name", "placeholder"], "title"),
        SelectorRule::kind("input", Some("text")),
    ]
}

/// Rules for the authors query field.
///
/// There is no generic text-input fallback here: on a form with a single
/// text box it would overwrite the title term.
#[must_use]
pub fn authors_field() -> Vec<SelectorRule> {
    vec![
        SelectorRule::attribute("input", &["id", "name"], "author"),
        SelectorRule::attribute("input", &["placeholder"], "автор"),
        SelectorRule::attribute("input", &["placeholder"], "author"),
    ]
}

/// Rules for a query field that has no configured rule set.
#[must_use]
pub fn generic_field(name: &str) -> Vec<SelectorRule> {
    vec![
        SelectorRule::attribute("input", &["id", "name"], name),
        SelectorRule::attribute("textarea", &["id", "name"], name),
        SelectorRule::attribute("input", &["placeholder", "aria-label"], name),
    ]
}

const INPUT_BUTTON: &str = r#"input[type="button"]"#;

/// Rules for the control that submits the search form.
///
/// Plain `<input type="button">` controls count too; text inputs never do.
#[must_use]
pub fn submit_control() -> Vec<SelectorRule> {
    vec![
        SelectorRule::text("button", "найти"),
        SelectorRule::text("button", "поиск"),
        SelectorRule::text("button", "search"),
        SelectorRule::text(INPUT_BUTTON, "найти"),
        SelectorRule::text(INPUT_BUTTON, "поиск"),
        SelectorRule::text(INPUT_BUTTON, "search"),
        SelectorRule::css(r#"input[type="submit"]"#),
        SelectorRule::css(r#"input[type="image"]"#),
        SelectorRule::css(r#"button[type="submit"]"#),
        SelectorRule::attribute("button", &["id", "name", "class", "value"], "search"),
        SelectorRule::attribute(INPUT_BUTTON, &["id", "name", "class"], "search"),
        SelectorRule::attribute("a", &["id", "class"], "search"),
    ]
}

/// Rules for hyperlinks that reference a registry document.
#[must_use]
pub fn document_links() -> Vec<SelectorRule> {
    vec![
        SelectorRule::css(r#"a[href*="document"]"#),
        SelectorRule::css(r#"a[href*="id="]"#),
        SelectorRule::css(r#"a[href*="search_result"]"#),
        SelectorRule::text("a", "патент"),
        SelectorRule::text("a", "заявка"),
    ]
}

/// Rules for hyperlinks that show a page is a result listing.
///
/// Narrower than [`document_links`]: only the target matters, so a menu
/// entry whose text mentions patents is not taken as a result.
#[must_use]
pub fn result_links() -> Vec<SelectorRule> {
    vec![
        SelectorRule::css(r#"a[href*="document"]"#),
        SelectorRule::css(r#"a[href*="id="]"#),
    ]
}
