//! Destination-resolution map with path compression.
//!
//! One entry per rule source, pointing at its immediate destination. This
//! is the structure cycle checks walk: a candidate edge source → destination
//! is safe iff the destination's chain does not resolve back to the source.
//!
//! The compression step mirrors union-find `find`, but the relation is
//! directed and asymmetric: every node has at most one outgoing edge, and
//! there is no rank/union half.

use std::collections::HashMap;

use crate::error::WouldCycle;
use crate::path::RulePath;
use crate::rule::{AcyclicRule, NoCycleProof, Rule};

/// Map from rule source to its immediate destination.
///
/// Entries are created when a rule is accepted, rewritten (compressed)
/// during resolution walks, and never deleted. The map invariant — every
/// chain terminates — holds because `record` only accepts rules that
/// carry a [`NoCycleProof`] minted against the current state.
#[derive(Debug, Default)]
pub struct ResolutionMap {
    next_hop: HashMap<RulePath, RulePath>,
}

impl ResolutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.next_hop.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next_hop.is_empty()
    }

    /// Immediate next hop for `path`, if it is currently a rule source.
    ///
    /// After a `resolve_ultimate` walk through `path` this is the chain
    /// root, not necessarily the destination originally recorded.
    pub fn next_hop(&self, path: &RulePath) -> Option<&RulePath> {
        self.next_hop.get(path)
    }

    /// Follow the chain from `path` to its root (a path with no entry),
    /// then rewrite every visited node to point directly at the root.
    ///
    /// Iterative on purpose: the first walk over a long uncompressed chain
    /// must not recurse chain-length deep. Termination is bounded by the
    /// current chain length, which the no-cycle invariant keeps finite.
    pub fn resolve_ultimate(&mut self, path: &RulePath) -> RulePath {
        let mut visited = Vec::new();
        let mut root = path.clone();
        while let Some(next) = self.next_hop.get(&root) {
            visited.push(root);
            root = next.clone();
        }
        for node in visited {
            self.next_hop.insert(node, root.clone());
        }
        root
    }

    /// Check that the edge `source -> destination` would not close a cycle.
    ///
    /// Only the destination's resolution needs checking: each source has
    /// exactly one outgoing edge, so the only cycle the new edge can create
    /// is destination ⇝ source ⇝ destination.
    pub fn check_no_cycle(
        &mut self,
        source: &RulePath,
        destination: &RulePath,
    ) -> Result<NoCycleProof, WouldCycle> {
        let root = self.resolve_ultimate(destination);
        if &root == source {
            return Err(WouldCycle {
                source: source.to_string(),
                destination: destination.to_string(),
                root: root.to_string(),
            });
        }
        Ok(NoCycleProof::new())
    }

    /// Convert a raw rule into a proof-carrying one against current state.
    pub fn check_rule(&mut self, rule: Rule) -> Result<AcyclicRule, WouldCycle> {
        let proof = self.check_no_cycle(rule.source(), rule.destination())?;
        Ok(AcyclicRule::new(rule, proof))
    }

    /// Record an accepted rule's edge.
    pub fn record(&mut self, rule: &AcyclicRule) {
        self.next_hop.insert(
            rule.rule().source().clone(),
            rule.rule().destination().clone(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn path(s: &str) -> RulePath {
        RulePath::parse(s).unwrap()
    }

    fn accept(map: &mut ResolutionMap, source: &str, destination: &str) {
        let rule = Rule::new(path(source), path(destination)).unwrap();
        let checked = map.check_rule(rule).expect("edge should be acyclic");
        map.record(&checked);
    }

    /// Chain-follow without compression, for cross-checking.
    fn naive_root(edges: &HashMap<RulePath, RulePath>, start: &RulePath) -> RulePath {
        let mut current = start.clone();
        let mut steps = 0usize;
        while let Some(next) = edges.get(&current) {
            current = next.clone();
            steps += 1;
            assert!(steps <= edges.len(), "cycle in naive walk");
        }
        current
    }

    #[test]
    fn resolve_of_unknown_path_is_identity() {
        let mut map = ResolutionMap::new();
        assert_eq!(map.resolve_ultimate(&path("/x")), path("/x"));
        assert!(map.is_empty());
    }

    #[test]
    fn resolve_compresses_the_walked_chain() {
        let mut map = ResolutionMap::new();
        accept(&mut map, "/a", "/b");
        accept(&mut map, "/b", "/c");
        accept(&mut map, "/c", "/d");

        assert_eq!(map.resolve_ultimate(&path("/a")), path("/d"));
        // Every intermediate hop now points straight at the root.
        assert_eq!(map.next_hop(&path("/a")), Some(&path("/d")));
        assert_eq!(map.next_hop(&path("/b")), Some(&path("/d")));
        assert_eq!(map.next_hop(&path("/c")), Some(&path("/d")));
    }

    #[test]
    fn resolve_is_idempotent_under_compression() {
        let mut map = ResolutionMap::new();
        accept(&mut map, "/a", "/b");
        accept(&mut map, "/b", "/c");
        let first = map.resolve_ultimate(&path("/a"));
        let second = map.resolve_ultimate(&path("/a"));
        assert_eq!(first, second);
        assert_eq!(first, path("/c"));
    }

    #[test]
    fn two_cycle_is_rejected() {
        // The depth-1 boundary condition: after /a -> /b, the reverse edge
        // must be refused because /a already resolves to /b.
        let mut map = ResolutionMap::new();
        accept(&mut map, "/a", "/b");

        let rule = Rule::new(path("/b"), path("/a")).unwrap();
        let err = map.check_rule(rule).unwrap_err();
        assert_eq!(err.root, "/b");
        assert_eq!(err.source, "/b");
    }

    #[test]
    fn long_cycle_is_rejected() {
        let mut map = ResolutionMap::new();
        accept(&mut map, "/a", "/b");
        accept(&mut map, "/b", "/c");
        accept(&mut map, "/c", "/d");
        let rule = Rule::new(path("/d"), path("/a")).unwrap();
        assert!(map.check_rule(rule).is_err());
    }

    #[test]
    fn edge_into_an_existing_chain_is_fine() {
        let mut map = ResolutionMap::new();
        accept(&mut map, "/a", "/b");
        accept(&mut map, "/b", "/c");
        // /x joins the chain mid-way; no cycle.
        accept(&mut map, "/x", "/b");
        assert_eq!(map.resolve_ultimate(&path("/x")), path("/c"));
    }

    proptest! {
        /// Compressed resolution always agrees with naive chain-following,
        /// and the accepted edge set never contains a cycle.
        #[test]
        fn compression_agrees_with_naive_resolution(
            edges in proptest::collection::vec((0u8..12, 0u8..12), 0..40)
        ) {
            let mut map = ResolutionMap::new();
            // Uncompressed mirror of accepted edges.
            let mut accepted: HashMap<RulePath, RulePath> = HashMap::new();

            for (from, to) in edges {
                let source = path(&format!("/p{from}"));
                let destination = path(&format!("/p{to}"));
                let Ok(rule) = Rule::new(source.clone(), destination.clone()) else {
                    continue;
                };
                if accepted.contains_key(&source) {
                    continue; // one outgoing edge per source
                }
                if let Ok(checked) = map.check_rule(rule) {
                    map.record(&checked);
                    accepted.insert(source, destination);
                }
            }

            for start in accepted.keys() {
                let naive = naive_root(&accepted, start);
                prop_assert_eq!(map.resolve_ultimate(start), naive);
            }
        }
    }
}
