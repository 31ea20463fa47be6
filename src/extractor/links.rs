//! Link strategy.
//!
//! Collects hyperlinks that look like registry document references, in rule
//! order, deduplicated by resolved URL and restricted to the repository
//! domain. Each link keeps its visible text plus the text of its immediate
//! container, which the normalizer uses to enrich empty or numeric titles.

use std::collections::HashSet;

use dom_query::{Document, Selection};
use tracing::{debug, warn};

use super::ExtractContext;
use crate::dom;
use crate::error::ItemError;
use crate::patterns::normalize_whitespace;
use crate::result::RawCandidate;
use crate::selector::select_any;

/// Longest container text kept for title enrichment, in characters.
const MAX_CONTEXT_CHARS: usize = 200;

/// Raw candidates from document links, capped at `link_cap` then `max_records`.
#[must_use]
pub fn extract_links(doc: &Document, ctx: &ExtractContext) -> Vec<RawCandidate> {
    let root = doc.select("html");
    let cap = ctx.options.link_cap.min(ctx.max_records);

    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for link in select_any(&root, &ctx.options.document_link_rules) {
        if out.len() >= cap {
            break;
        }

        let href = match link_href(&link, ctx) {
            Ok(href) => href,
            Err(err) => {
                warn!(error = %err, "skipping document link");
                continue;
            }
        };
        if !seen.insert(href.clone()) {
            continue;
        }

        out.push(RawCandidate::Link {
            text: dom::clean_text(&link),
            href,
            position: out.len() + 1,
            context: container_text(&link),
        });
    }

    debug!(candidates = out.len(), "link strategy finished");
    out
}

fn link_href(link: &Selection, ctx: &ExtractContext) -> Result<String, ItemError> {
    let href = dom::get_attribute(link, "href").ok_or(ItemError::MissingHref)?;
    ctx.resolver.document_link(&href).map(|url| url.to_string())
}

/// Text of the link's parent element with the link's own text removed.
fn container_text(link: &Selection) -> Option<String> {
    let parent = dom::parent(link);
    if !parent.exists() || dom::tag_name(&parent).as_deref() == Some("body") {
        return None;
    }

    let own = dom::clean_text(link);
    let full = dom::clean_text(&parent);
    let rest = if own.is_empty() {
        full
    } else {
        full.replacen(&own, " ", 1)
    };

    let rest = normalize_whitespace(&rest);
    let rest = rest.trim_matches(|c: char| c.is_whitespace() || "-–—:|,;.".contains(c));
    if rest.is_empty() {
        return None;
    }
    Some(rest.chars().take(MAX_CONTEXT_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    fn run_with(html: &str, options: &Options) -> Vec<RawCandidate> {
        let ctx = ExtractContext::new(options, Some("https://www.fips.ru/iiss/search.xhtml"));
        extract_links(&dom::parse(html), &ctx)
    }

    fn run(html: &str) -> Vec<RawCandidate> {
        run_with(html, &Options::default())
    }

    #[test]
    fn test_links_deduplicated_by_url() {
        let raw = run(
            r#"<a href="document.xhtml?id=1">A</a>
               <a href="/iiss/document.xhtml?id=1">A again</a>
               <a href="document.xhtml?id=2">B</a>"#,
        );
        assert_eq!(raw.len(), 2);
        assert!(matches!(&raw[1], RawCandidate::Link { position: 2, text, .. } if text == "B"));
    }

    #[test]
    fn test_foreign_and_script_links_skipped() {
        let raw = run(
            r#"<a href="https://example.com/document?id=1">Foreign</a>
               <a href="javascript:openDocument(3)">Script</a>
               <a href="document.xhtml?id=5">Ours</a>"#,
        );
        assert_eq!(raw.len(), 1);
        assert!(matches!(&raw[0], RawCandidate::Link { position: 1, .. }));
    }

    #[test]
    fn test_container_context_captured() {
        let raw = run(
            r#"<div class="item"><a href="document.xhtml?id=9">2745100</a> - Способ сварки труб</div>"#,
        );
        assert!(matches!(
            &raw[0],
            RawCandidate::Link { context: Some(c), .. } if c == "Способ сварки труб"
        ));
    }

    #[test]
    fn test_link_cap_applies_before_max_records() {
        let mut html = String::new();
        for i in 0..10 {
            html.push_str(&format!(r#"<p><a href="document.xhtml?id={i}">Doc {i}</a></p>"#));
        }
        let options = Options {
            link_cap: 3,
            ..Options::default()
        };
        assert_eq!(run_with(&html, &options).len(), 3);
    }
}
