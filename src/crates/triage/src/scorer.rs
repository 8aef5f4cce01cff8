//! Match-strength scoring between a prompt and one registry entry
//!
//! The scorer is a deliberately shallow, explainable heuristic: every
//! point in a score is attributable to a specific phrase hit, a pattern
//! hit, or the entry's static priority. It is a pure function of its
//! inputs — no side effects, no state, and no failure path (a malformed
//! activation pattern contributes zero instead of raising).
//!
//! Scoring terms, with default weights:
//!
//! - each activation phrase found as a case-insensitive substring of the
//!   prompt adds the phrase weight (10.0); phrases accumulate
//!   independently
//! - a case-insensitive match of the activation pattern adds the pattern
//!   weight (20.0) — double the phrase weight, since a structured
//!   pattern is a stronger signal than a literal phrase
//! - `priority / priority_divisor` (divisor 100.0) is added as a
//!   tie-break nudge; under default weights priority alone can never
//!   out-rank a genuine content match

use crate::manifest::RegistryEntry;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default score added per matching activation phrase
pub const DEFAULT_PHRASE_WEIGHT: f64 = 10.0;

/// Default score added for a matching activation pattern
pub const DEFAULT_PATTERN_WEIGHT: f64 = 20.0;

/// Default divisor applied to an entry's priority
pub const DEFAULT_PRIORITY_DIVISOR: f64 = 100.0;

/// Weights applied by [`score`]
///
/// The reference values are defaults, not hard constants; deployments
/// may tune them through the `[routing]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Score added per matching phrase
    pub phrase: f64,

    /// Score added for a matching pattern
    pub pattern: f64,

    /// Divisor applied to entry priority for the tie-break term
    pub priority_divisor: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            phrase: DEFAULT_PHRASE_WEIGHT,
            pattern: DEFAULT_PATTERN_WEIGHT,
            priority_divisor: DEFAULT_PRIORITY_DIVISOR,
        }
    }
}

/// Compute the match strength between a prompt and one registry entry
///
/// Deterministic for identical inputs and never panics; pattern compile
/// failures are scoped to the entry and logged at debug level.
pub fn score(prompt: &str, entry: &RegistryEntry, weights: &ScoringWeights) -> f64 {
    let normalized = prompt.to_lowercase();
    let mut total = 0.0;

    // Phrase matching: each phrase counts independently, overlap included
    for phrase in &entry.activation.phrases {
        if normalized.contains(&phrase.to_lowercase()) {
            total += weights.phrase;
        }
    }

    // Pattern matching against the raw prompt
    if let Some(pattern) = &entry.activation.pattern {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => {
                if re.is_match(prompt) {
                    total += weights.pattern;
                }
            }
            Err(e) => {
                debug!(
                    entry = %entry.name,
                    error = %e,
                    "Ignoring malformed activation pattern"
                );
            }
        }
    }

    total + entry.priority as f64 / weights.priority_divisor
}
