//! Text strategy.
//!
//! Last resort for pages without tables or recognizable links. The visible
//! page text is scanned line by line; a line containing a document indicator
//! opens a new record, and the lines that follow feed its `Authors` and
//! `RegistrationNumber` fields by keyword until the next indicator line.

use dom_query::Document;
use tracing::debug;

use super::ExtractContext;
use crate::dom;
use crate::normalize::Identities;
use crate::patterns::strip_label;
use crate::result::RawCandidate;

/// Unique raw candidates from the page's visible text, capped at `max_records`.
#[must_use]
pub fn extract_text(doc: &Document, ctx: &ExtractContext) -> Vec<RawCandidate> {
    let options = ctx.options;
    let indicators = lowercase_all(&options.document_indicators);
    let author_keywords = lowercase_all(&options.author_keywords);
    let registration_keywords = lowercase_all(&options.registration_keywords);

    let mut out = Vec::new();
    let mut seen = Identities::default();
    let mut current: Option<TextBlock> = None;

    let mut flush = |block: TextBlock, out: &mut Vec<RawCandidate>| {
        let candidate = block.finish();
        if seen.insert_candidate(&candidate) {
            out.push(candidate);
        }
    };

    for line in dom::page_lines(doc) {
        let lower = line.to_lowercase();

        if contains_any(&lower, &indicators) {
            if let Some(block) = current.take() {
                flush(block, &mut out);
            }
            if out.len() >= ctx.max_records {
                break;
            }
            current = Some(TextBlock::new(line));
        } else if let Some(block) = current.as_mut() {
            if contains_any(&lower, &author_keywords) {
                block.authors.push(strip_label(&line).to_string());
            } else if contains_any(&lower, &registration_keywords) {
                block.registration.push(strip_label(&line).to_string());
            }
        }
    }
    if let Some(block) = current {
        flush(block, &mut out);
    }

    out.truncate(ctx.max_records);
    debug!(candidates = out.len(), "text strategy finished");
    out
}

struct TextBlock {
    title: String,
    authors: Vec<String>,
    registration: Vec<String>,
}

impl TextBlock {
    fn new(title: String) -> Self {
        Self {
            title,
            authors: Vec::new(),
            registration: Vec::new(),
        }
    }

    fn finish(self) -> RawCandidate {
        RawCandidate::TextBlock {
            title: self.title,
            authors: self.authors,
            registration: self.registration,
        }
    }
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    fn run(html: &str) -> Vec<RawCandidate> {
        let options = Options::default();
        extract_text(&dom::parse(html), &ExtractContext::new(&options, None))
    }

    #[test]
    fn test_blocks_split_on_indicator_lines() {
        let raw = run(
            r#"<body>
                <p>Результаты поиска</p>
                <p>Патент RU 2745100 Способ сварки</p>
                <p>Авторы: Иванов И.И.</p>
                <p>Номер регистрации: 2745100</p>
                <p>Заявка 2020123456 Турбина</p>
                <p>Автор: Петров П.П.</p>
                <p>Автор: Сидоров С.С.</p>
            </body>"#,
        );
        assert_eq!(
            raw,
            vec![
                RawCandidate::TextBlock {
                    title: "Патент RU 2745100 Способ сварки".into(),
                    authors: vec!["Иванов И.И.".into()],
                    registration: vec!["2745100".into()],
                },
                RawCandidate::TextBlock {
                    title: "Заявка 2020123456 Турбина".into(),
                    authors: vec!["Петров П.П.".into(), "Сидоров С.С.".into()],
                    registration: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_lines_before_first_indicator_ignored() {
        let raw = run("<body><p>Автор: Никто</p><p>Патент 1</p></body>");
        assert_eq!(raw.len(), 1);
        assert!(matches!(&raw[0], RawCandidate::TextBlock { authors, .. } if authors.is_empty()));
    }

    #[test]
    fn test_no_indicator_yields_nothing() {
        assert!(run("<body><p>Главная</p><p>Контакты</p></body>").is_empty());
    }

    #[test]
    fn test_repeated_blocks_do_not_use_up_the_cap() {
        let mut html = String::from("<body>");
        for _ in 0..12 {
            html.push_str("<p>Патент RU 1</p>");
        }
        html.push_str("<p>Патент RU 2</p><p>Патент RU 3</p></body>");
        assert_eq!(run(&html).len(), 3);
    }

    #[test]
    fn test_truncates_to_max_records() {
        let mut html = String::from("<body>");
        for i in 0..15 {
            html.push_str(&format!("<p>Патент {i}</p>"));
        }
        html.push_str("</body>");
        assert_eq!(run(&html).len(), 10);
    }
}
