//! Ranking, deduplication and the clarification fallback gate
//!
//! The selector answers "which handlers are relevant", not "which
//! entries matched": after scoring every manifest entry it keeps only
//! the best-scoring entry per handler, so the result never routes the
//! same specialist twice even when several of its entries matched.
//!
//! Selection policy:
//!
//! 1. score every entry, drop scores strictly below `min_score`
//!    (a score exactly at the threshold is kept)
//! 2. stable-sort by score descending — ties keep manifest order, so
//!    the first-declared entry wins
//! 3. walk the sorted list keeping one entry per distinct handler,
//!    stopping at `top_n` handlers
//!
//! When nothing clears the threshold the selector does not guess: it
//! returns [`RouteOutcome::NeedsClarification`], a hard stop that asks
//! the caller to gather more information. The two outcomes are a tagged
//! enum so callers can never confuse "no opinion" with an empty match
//! list.

use crate::manifest::{Manifest, RegistryEntry};
use crate::scorer::{score, ScoringWeights};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Default minimum score an entry must reach to be routable
pub const DEFAULT_MIN_SCORE: f64 = 5.0;

/// Default number of distinct handlers to return
pub const DEFAULT_TOP_N: usize = 1;

/// Wording of the clarification sentinel; a request for more
/// information, never phrased as an error
pub const CLARIFICATION_MESSAGE: &str =
    "No specialist matched this request. Please provide more detail about what you need.";

/// Knobs for one selection call
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOptions {
    /// Maximum number of distinct handlers to return
    pub top_n: usize,

    /// Minimum score an entry must reach (inclusive)
    pub min_score: f64,

    /// Scoring weights applied to every entry
    pub weights: ScoringWeights,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_score: DEFAULT_MIN_SCORE,
            weights: ScoringWeights::default(),
        }
    }
}

/// One ranked match: the selected entry and the score that earned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(flatten)]
    pub entry: RegistryEntry,

    /// The computed score, kept so every decision is attributable
    pub score: f64,
}

/// Outcome of a routing call
///
/// Tagged so the two shapes are trivially distinguishable downstream:
/// a ranked handler list carries different meaning than "ask a
/// clarifying question", and neither is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// At least one entry cleared the threshold; most relevant first
    Matched { matches: Vec<RankedMatch> },

    /// Nothing cleared the threshold; ask instead of guessing
    NeedsClarification { message: String },
}

impl RouteOutcome {
    /// The ranked matches, if any entry cleared the threshold
    pub fn matches(&self) -> Option<&[RankedMatch]> {
        match self {
            Self::Matched { matches } => Some(matches),
            Self::NeedsClarification { .. } => None,
        }
    }

    /// Whether this is the clarification sentinel
    pub fn needs_clarification(&self) -> bool {
        matches!(self, Self::NeedsClarification { .. })
    }
}

/// Route a prompt against a manifest
///
/// Pure and deterministic: identical `(prompt, manifest, options)`
/// always yield an identical ordered outcome. The manifest is read-only
/// input; nothing persists between calls.
pub fn select(prompt: &str, manifest: &Manifest, options: &SelectOptions) -> RouteOutcome {
    // Score everything first; sorting and tie-breaking happen only after
    // all scores are known, so scoring order can never change a winner.
    let mut scored: Vec<RankedMatch> = manifest
        .entries
        .iter()
        .map(|entry| RankedMatch {
            entry: entry.clone(),
            score: score(prompt, entry, &options.weights),
        })
        .filter(|m| m.score >= options.min_score)
        .collect();

    // Stable sort: equal scores keep manifest order, first-declared wins
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut seen_handlers = HashSet::new();
    let mut matches = Vec::new();
    for m in scored {
        if !seen_handlers.insert(m.entry.handler.clone()) {
            continue;
        }
        matches.push(m);
        if matches.len() >= options.top_n {
            break;
        }
    }

    debug!(
        prompt_len = prompt.len(),
        candidates = manifest.len(),
        selected = matches.len(),
        "Selection complete"
    );

    if matches.is_empty() {
        RouteOutcome::NeedsClarification {
            message: CLARIFICATION_MESSAGE.to_string(),
        }
    } else {
        RouteOutcome::Matched { matches }
    }
}
