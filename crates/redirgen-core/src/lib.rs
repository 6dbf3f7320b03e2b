//! Core domain for redirgen: synthetic redirect-rule generation.
//!
//! Module hierarchy follows type dependency order:
//! - error: refusal/domain error types
//! - path: RulePath atom
//! - vocab: Vocabulary segment pool
//! - rule: Rule, NoCycleProof, AcyclicRule
//! - resolve: ResolutionMap (resolve-with-compression, cycle checks)
//! - sample: randomized path sampling
//! - progress: reporting boundary
//! - builder: acceptance protocol and the generation loop
//!
//! The crate does no I/O: randomness is injected, vocabulary is an explicit
//! value, and progress is reported through a sink trait.

#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod path;
pub mod progress;
pub mod resolve;
pub mod rule;
pub mod sample;
pub mod vocab;

pub use builder::{AbortReason, Generated, Params, RuleSetBuilder, generate};
pub use error::{InvalidParams, InvalidPath, InvalidRule, WouldCycle};
pub use path::RulePath;
pub use progress::{NullSink, ProgressSink};
pub use resolve::ResolutionMap;
pub use rule::{AcyclicRule, NoCycleProof, Rule};
pub use sample::{sample_path, sample_path_with_prefix};
pub use vocab::Vocabulary;
