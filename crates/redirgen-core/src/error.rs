//! Core capability errors (path validation, rule validation, cycle refusal).
//!
//! These are bounded and stable: they represent domain/refusal states, not
//! library implementation details.

use thiserror::Error;

/// Invalid path string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("path `{raw}` is invalid: {reason}")]
pub struct InvalidPath {
    pub raw: String,
    pub reason: String,
}

/// Invalid rule (currently only self-loops).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid rule: {reason}")]
pub struct InvalidRule {
    pub reason: String,
}

/// A candidate rule whose destination chain resolves back to its source.
///
/// Inserting it would make the rule set cyclic, so it is refused before
/// any state is touched.
// Not derived via `thiserror` because a field named `source` would be
// inferred as the error source, and `String` is not an `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WouldCycle {
    pub source: String,
    pub destination: String,
    pub root: String,
}

impl core::fmt::Display for WouldCycle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "rule {} -> {} would close a cycle (chain resolves to {})",
            self.source, self.destination, self.root
        )
    }
}

impl std::error::Error for WouldCycle {}

/// Invalid generation parameters, rejected before any sampling happens.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum InvalidParams {
    #[error("target count must be greater than zero")]
    ZeroTargetCount,
    #[error("max depth must be greater than zero")]
    ZeroMaxDepth,
    #[error("prefix probability {value} is outside 0.0..=1.0")]
    ProbabilityOutOfRange { value: f64 },
    #[error("vocabulary must contain at least one segment")]
    EmptyVocabulary,
    #[error("vocabulary segment `{raw}` is invalid: {reason}")]
    InvalidSegment { raw: String, reason: String },
}
