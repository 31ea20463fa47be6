//! Extraction chain.
//!
//! Strategies run strictly in [`STRATEGIES`] order. The first one returning a
//! non-empty candidate list wins; later strategies are not run at all.

use dom_query::Document;
use tracing::{debug, info};

use super::links::extract_links;
use super::table::extract_tables;
use super::text::extract_text;
use super::ExtractContext;
use crate::normalize::normalize;
use crate::result::{RawCandidate, ResultSet, StrategyKind};

/// An extraction strategy over one parsed snapshot.
pub type Strategy = fn(&Document, &ExtractContext) -> Vec<RawCandidate>;

/// Strategies in priority order.
pub const STRATEGIES: [(StrategyKind, Strategy); 3] = [
    (StrategyKind::Table, extract_tables as Strategy),
    (StrategyKind::Link, extract_links as Strategy),
    (StrategyKind::Text, extract_text as Strategy),
];

/// Outcome of one chain run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    pub result: ResultSet,
    /// Strategies that actually ran, in order.
    pub attempted: Vec<StrategyKind>,
}

/// Run the default strategy chain over `doc`.
#[must_use]
pub fn run_chain(doc: &Document, ctx: &ExtractContext) -> ChainReport {
    run_strategies(doc, ctx, &STRATEGIES)
}

/// Run `strategies` in order until one yields candidates.
#[must_use]
pub fn run_strategies(
    doc: &Document,
    ctx: &ExtractContext,
    strategies: &[(StrategyKind, Strategy)],
) -> ChainReport {
    let mut attempted = Vec::with_capacity(strategies.len());

    let winner = strategies.iter().find_map(|(kind, strategy)| {
        attempted.push(*kind);
        let mut raw = strategy(doc, ctx);
        raw.truncate(ctx.max_records);
        if raw.is_empty() {
            debug!(strategy = %kind, "strategy found nothing; falling back");
            None
        } else {
            Some((*kind, raw))
        }
    });

    let result = match winner {
        Some((kind, raw)) => {
            let records = normalize(&raw, kind);
            info!(strategy = %kind, candidates = raw.len(), records = records.len(), "extraction succeeded");
            ResultSet {
                strategy: Some(kind),
                records,
            }
        }
        None => {
            info!("no extraction strategy produced records");
            ResultSet::default()
        }
    };

    ChainReport { result, attempted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::Options;

    fn never(_: &Document, _: &ExtractContext) -> Vec<RawCandidate> {
        Vec::new()
    }

    fn one_link(_: &Document, _: &ExtractContext) -> Vec<RawCandidate> {
        vec![RawCandidate::Link {
            text: "Doc".into(),
            href: "https://www.fips.ru/document?id=1".into(),
            position: 1,
            context: None,
        }]
    }

    #[test]
    fn test_first_non_empty_strategy_wins() {
        let options = Options::default();
        let ctx = ExtractContext::new(&options, None);
        let doc = dom::parse("<p></p>");
        let report = run_strategies(
            &doc,
            &ctx,
            &[
                (StrategyKind::Table, never as Strategy),
                (StrategyKind::Link, one_link as Strategy),
                (StrategyKind::Text, never as Strategy),
            ],
        );
        assert_eq!(report.attempted, vec![StrategyKind::Table, StrategyKind::Link]);
        assert_eq!(report.result.strategy, Some(StrategyKind::Link));
        assert_eq!(report.result.len(), 1);
    }

    #[test]
    fn test_all_empty() {
        let options = Options::default();
        let ctx = ExtractContext::new(&options, None);
        let report = run_chain(&dom::parse("<p>nothing</p>"), &ctx);
        assert_eq!(report.attempted.len(), 3);
        assert!(report.result.is_empty());
        assert_eq!(report.result.strategy, None);
    }
}
