//! Rule-set construction: acceptance protocol and the generation loop.
//!
//! `RuleSetBuilder` owns the three pieces of state a run needs — the rule
//! set, the used-source set, and the resolution map — and keeps them
//! consistent: a rule only gets in through a cycle check, and every
//! accepted rule updates all three together.

use std::collections::{BTreeSet, HashSet};

use rand::Rng;

use crate::error::{InvalidParams, WouldCycle};
use crate::path::RulePath;
use crate::progress::ProgressSink;
use crate::resolve::ResolutionMap;
use crate::rule::{AcyclicRule, Rule};
use crate::sample::{sample_path, sample_path_with_prefix};
use crate::vocab::Vocabulary;

/// Destination candidates tried per source before the slot counts as barren.
const DEST_ATTEMPTS_PER_SOURCE: usize = 50;

/// Minimum source-sampling attempts before exhaustion aborts a run, so the
/// proportional cap (2 × target) only bites early on large requests.
const SOURCE_ATTEMPT_FLOOR: u64 = 1000;

/// Consecutive barren sources tolerated before the run aborts. Guarantees
/// termination in namespaces where every remaining edge closes a cycle.
const MAX_BARREN_SOURCES: u32 = 25;

/// Warn when the requested count exceeds this share of the namespace.
const NEAR_EXHAUSTION_RATIO: f64 = 0.9;

/// Generation parameters, validated before any sampling happens.
#[derive(Clone, Debug)]
pub struct Params {
    pub target_count: u64,
    pub max_depth: usize,
    /// Probability that a destination candidate shares a prefix with its
    /// source (applies only to sources with at least two segments).
    pub prefix_probability: f64,
    pub vocabulary: Vocabulary,
}

impl Params {
    pub fn validate(&self) -> Result<(), InvalidParams> {
        if self.target_count == 0 {
            return Err(InvalidParams::ZeroTargetCount);
        }
        if self.max_depth == 0 {
            return Err(InvalidParams::ZeroMaxDepth);
        }
        if !(0.0..=1.0).contains(&self.prefix_probability) {
            return Err(InvalidParams::ProbabilityOutOfRange {
                value: self.prefix_probability,
            });
        }
        // Vocabulary construction already forbids empty.
        Ok(())
    }
}

/// Why a run stopped before reaching its target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AbortReason {
    /// No unused source path found within the attempt budget.
    SourceExhausted { attempts: u64 },
    /// Too many consecutive sources had no acceptable destination.
    DestinationExhausted { barren_sources: u32 },
}

/// Result of a generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
    /// Accepted rules, ordered (source, destination) — the render order.
    pub rules: BTreeSet<Rule>,
    pub generated: u64,
    pub aborted: bool,
}

/// Incrementally grows a duplicate-free, acyclic rule set.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: BTreeSet<Rule>,
    used_sources: HashSet<RulePath>,
    resolution: ResolutionMap,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> u64 {
        self.rules.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Source-uniqueness check; candidates with a used source never reach
    /// the destination search.
    pub fn is_used_source(&self, path: &RulePath) -> bool {
        self.used_sources.contains(path)
    }

    /// Run the acceptance check for a candidate rule against current state.
    ///
    /// Self-loops were already rejected at `Rule` construction; this
    /// resolves the destination's chain and refuses the rule if the chain's
    /// root is the candidate's source.
    pub fn check_rule(&mut self, rule: Rule) -> Result<AcyclicRule, WouldCycle> {
        self.resolution.check_rule(rule)
    }

    /// Insert a checked rule, updating the rule set, the used-source set,
    /// and the resolution map together.
    pub fn insert(&mut self, rule: AcyclicRule) {
        self.resolution.record(&rule);
        let rule = rule.into_rule();
        self.used_sources.insert(rule.source().clone());
        tracing::trace!(rule = %rule, "accepted");
        self.rules.insert(rule);
    }

    pub fn into_rules(self) -> BTreeSet<Rule> {
        self.rules
    }
}

/// Generate an acyclic, duplicate-free rule set of `params.target_count`
/// rules, or fewer with `aborted = true` if the namespace runs out.
///
/// Deterministic for a fixed `rng` state. The sink receives an acceptance
/// event per rule, an optional up-front near-exhaustion advisory, and the
/// abort notice if one happens.
pub fn generate<R: Rng>(
    params: &Params,
    rng: &mut R,
    sink: &mut dyn ProgressSink,
) -> Result<Generated, InvalidParams> {
    params.validate()?;

    let possible = params.vocabulary.possible_paths(params.max_depth);
    if params.target_count as f64 > possible as f64 * NEAR_EXHAUSTION_RATIO {
        sink.near_exhaustion(params.target_count, possible);
    }

    let source_attempt_cap = params
        .target_count
        .saturating_mul(2)
        .max(SOURCE_ATTEMPT_FLOOR);

    let mut builder = RuleSetBuilder::new();
    let mut barren_sources = 0u32;

    while builder.len() < params.target_count {
        let source = match sample_unused_source(&builder, params, source_attempt_cap, rng) {
            Some(source) => source,
            None => {
                let reason = AbortReason::SourceExhausted {
                    attempts: source_attempt_cap,
                };
                return Ok(abort(builder, reason, params, sink));
            }
        };

        if try_destinations(&mut builder, &source, params, rng) {
            barren_sources = 0;
            sink.accepted(builder.len(), params.target_count);
        } else {
            barren_sources += 1;
            tracing::debug!(source = %source, barren_sources, "no acceptable destination");
            if barren_sources >= MAX_BARREN_SOURCES {
                let reason = AbortReason::DestinationExhausted { barren_sources };
                return Ok(abort(builder, reason, params, sink));
            }
        }
    }

    Ok(Generated {
        generated: builder.len(),
        rules: builder.into_rules(),
        aborted: false,
    })
}

fn sample_unused_source<R: Rng>(
    builder: &RuleSetBuilder,
    params: &Params,
    attempt_cap: u64,
    rng: &mut R,
) -> Option<RulePath> {
    let mut attempts = 0u64;
    loop {
        let candidate = sample_path(&params.vocabulary, params.max_depth, rng);
        if !builder.is_used_source(&candidate) {
            return Some(candidate);
        }
        attempts += 1;
        if attempts >= attempt_cap {
            return None;
        }
    }
}

/// Try up to [`DEST_ATTEMPTS_PER_SOURCE`] destination candidates for
/// `source`; insert and report success on the first acceptable one.
fn try_destinations<R: Rng>(
    builder: &mut RuleSetBuilder,
    source: &RulePath,
    params: &Params,
    rng: &mut R,
) -> bool {
    for _ in 0..DEST_ATTEMPTS_PER_SOURCE {
        let prefix_biased =
            source.depth() > 1 && rng.random::<f64>() < params.prefix_probability;
        let destination = if prefix_biased {
            sample_path_with_prefix(&params.vocabulary, source, params.max_depth, rng)
        } else {
            sample_path(&params.vocabulary, params.max_depth, rng)
        };

        let Ok(rule) = Rule::new(source.clone(), destination) else {
            continue; // self-loop, next candidate
        };
        match builder.check_rule(rule) {
            Ok(checked) => {
                builder.insert(checked);
                return true;
            }
            Err(cycle) => {
                tracing::trace!(%cycle, "rejected candidate");
            }
        }
    }
    false
}

fn abort(
    builder: RuleSetBuilder,
    reason: AbortReason,
    params: &Params,
    sink: &mut dyn ProgressSink,
) -> Generated {
    let generated = builder.len();
    sink.aborted(&reason, generated, params.target_count);
    Generated {
        generated,
        rules: builder.into_rules(),
        aborted: true,
    }
}
