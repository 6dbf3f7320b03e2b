//! Redirect rules and the acyclicity proof token.
//!
//! `Rule`: a directed edge from source to destination, self-loops rejected
//! at construction.
//! `AcyclicRule`: a rule that passed the cycle check; only constructible
//! with a `NoCycleProof`, which only the resolution map can mint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidRule;
use crate::path::RulePath;

/// An ordered (source, destination) pair with source ≠ destination.
///
/// Ordering is by source first, then destination, which matches the
/// lexicographic order of the rendered `source destination` line because
/// paths cannot contain whitespace.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rule {
    source: RulePath,
    destination: RulePath,
}

impl Rule {
    /// Returns an error if `source == destination` (self-loop).
    pub fn new(source: RulePath, destination: RulePath) -> Result<Self, InvalidRule> {
        if source == destination {
            return Err(InvalidRule {
                reason: format!("{source} redirects to itself"),
            });
        }
        Ok(Self {
            source,
            destination,
        })
    }

    pub fn source(&self) -> &RulePath {
        &self.source
    }

    pub fn destination(&self) -> &RulePath {
        &self.destination
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.destination)
    }
}

/// Proof token that a rule does not close a resolution cycle.
///
/// Only constructible by [`ResolutionMap::check_no_cycle`].
///
/// [`ResolutionMap::check_no_cycle`]: crate::resolve::ResolutionMap::check_no_cycle
#[derive(Debug)]
pub struct NoCycleProof {
    _private: (),
}

impl NoCycleProof {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// A rule carrying its cycle-check proof.
///
/// [`RuleSetBuilder::insert`] takes this type instead of `Rule`, so a rule
/// cannot reach the set without having been checked against the resolution
/// state that existed at check time.
///
/// [`RuleSetBuilder::insert`]: crate::builder::RuleSetBuilder::insert
#[derive(Debug)]
pub struct AcyclicRule {
    rule: Rule,
}

impl AcyclicRule {
    pub fn new(rule: Rule, _proof: NoCycleProof) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn into_rule(self) -> Rule {
        self.rule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> RulePath {
        RulePath::parse(s).unwrap()
    }

    #[test]
    fn new_rejects_self_loop() {
        let err = Rule::new(path("/a"), path("/a")).unwrap_err();
        assert!(err.reason.contains("itself"));
    }

    #[test]
    fn display_is_space_separated() {
        let rule = Rule::new(path("/a"), path("/b/c")).unwrap();
        assert_eq!(rule.to_string(), "/a /b/c");
    }

    #[test]
    fn ordering_matches_rendered_line_order() {
        let a = Rule::new(path("/a"), path("/z")).unwrap();
        let ab = Rule::new(path("/a/b"), path("/a")).unwrap();
        let b = Rule::new(path("/b"), path("/a")).unwrap();
        let mut rules = vec![b.clone(), ab.clone(), a.clone()];
        rules.sort();
        let mut lines: Vec<String> = rules.iter().map(Rule::to_string).collect();
        let sorted_lines = {
            let mut l = lines.clone();
            l.sort();
            l
        };
        assert_eq!(lines, sorted_lines);
        lines.dedup();
        assert_eq!(lines.len(), 3);
    }
}
