//! Bounded waits for asynchronous page loads.
//!
//! A settle wait polls a [`SettleCondition`] until it holds or the timeout
//! elapses, in which case it fails with [`Error::LoadTimeout`]. The condition
//! is always checked at least once, even with a zero-length budget left.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::page::Page;
use crate::selector::SelectorRule;
use crate::Options;

/// What "settled" means for a particular wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleCondition {
    /// The page reports it has finished loading.
    Ready,
    /// The page is ready and an element matching the rule exists.
    Element(SelectorRule),
    /// The page is ready and its visible text contains the phrase
    /// (case-insensitive).
    Text(String),
    /// Any of the conditions holds.
    Any(Vec<SettleCondition>),
}

impl SettleCondition {
    /// Condition for the result page after a submission: the configured
    /// results marker or any negative phrase, or plain readiness when no
    /// marker is configured.
    #[must_use]
    pub fn after_submit(options: &Options) -> Self {
        match &options.results_marker {
            Some(marker) => {
                let mut any = vec![Self::Element(marker.clone())];
                any.extend(options.negative_phrases.iter().cloned().map(Self::Text));
                Self::Any(any)
            }
            None => Self::Ready,
        }
    }

    fn holds<P: Page + ?Sized>(&self, page: &P) -> Result<bool> {
        match self {
            Self::Ready => page.is_ready(),
            Self::Element(rule) => {
                Ok(page.is_ready()? && !page.find_all(rule, None)?.is_empty())
            }
            Self::Text(phrase) => Ok(page.is_ready()?
                && page.text()?.to_lowercase().contains(&phrase.to_lowercase())),
            Self::Any(conditions) => {
                for condition in conditions {
                    if condition.holds(page)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

/// Timing of settle waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub min_delay: Duration,
}

impl SettlePolicy {
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            timeout: options.settle_timeout(),
            poll_interval: options.poll_interval(),
            min_delay: options.min_settle_delay(),
        }
    }
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

/// Block until `condition` holds on `page`, or fail after `policy.timeout`.
///
/// Errors raised by the page while polling count as "not settled yet".
pub fn wait_for<P: Page + ?Sized>(
    page: &P,
    condition: &SettleCondition,
    policy: &SettlePolicy,
) -> Result<()> {
    if !policy.min_delay.is_zero() {
        thread::sleep(policy.min_delay);
    }

    let started = Instant::now();
    let mut polls = 0u32;
    loop {
        polls += 1;
        match condition.holds(page) {
            Ok(true) => {
                debug!(polls, elapsed = ?started.elapsed(), "page settled");
                return Ok(());
            }
            Ok(false) => trace!(polls, "page not settled"),
            Err(err) => trace!(polls, error = %err, "settle check failed"),
        }

        let elapsed = started.elapsed();
        if elapsed >= policy.timeout {
            warn!(polls, timeout = ?policy.timeout, "page did not settle");
            return Err(Error::LoadTimeout(policy.timeout));
        }
        thread::sleep(policy.poll_interval.min(policy.timeout - elapsed));
    }
}
