//! `Vocabulary`: the segment pool paths are sampled from.
//!
//! Deduplicated, sorted, validated once at construction so sampling can
//! index into it without re-checking anything.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::InvalidParams;
use crate::path::check_segment;

/// Nouns for realistic-looking demo paths.
const NOUNS: &[&str] = &[
    "article",
    "product",
    "blog",
    "user",
    "category",
    "item",
    "service",
    "document",
    "guide",
    "tutorial",
    "news",
    "event",
    "gallery",
    "portfolio",
    "team",
    "contact",
    "about",
    "faq",
    "help",
    "support",
    "download",
    "resource",
    "case-study",
    "whitepaper",
    "report",
    "press-release",
    "feature",
    "integration",
    "partner",
    "testimonial",
    "review",
    "pricing",
    "plan",
    "offer",
    "promotion",
    "coupon",
    "api",
    "developer",
    "sdk",
    "reference",
    "changelog",
    "release-notes",
    "webinar",
    "conference",
    "workshop",
    "meetup",
    "career",
    "job",
    "opening",
    "internship",
    "newsletter",
    "subscription",
    "membership",
    "account",
    "profile",
    "dashboard",
    "settings",
    "preferences",
    "forum",
    "community",
    "discussion",
    "thread",
    "comment",
    "ebook",
    "brochure",
    "datasheet",
    "specification",
    "manual",
    "announcement",
    "update",
    "alert",
    "notification",
    "demo",
    "example",
    "sample",
    "template",
    "snippet",
];

const ADJECTIVES: &[&str] = &[
    "new",
    "featured",
    "popular",
    "latest",
    "archived",
    "updated",
    "important",
    "technical",
    "creative",
    "business",
    "marketing",
    "sales",
    "engineering",
];

const ACTIONS: &[&str] = &[
    "view", "edit", "create", "list", "details", "overview", "summary", "index",
];

/// A non-empty, deduplicated, sorted set of path segments.
///
/// Sorted storage makes sampling deterministic for a fixed RNG seed: the
/// word order never depends on input order or hash state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    pub fn new<I, S>(words: I) -> Result<Self, InvalidParams>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.into();
            if let Err(reason) = check_segment(&word) {
                return Err(InvalidParams::InvalidSegment { raw: word, reason });
            }
            set.insert(word);
        }
        if set.is_empty() {
            return Err(InvalidParams::EmptyVocabulary);
        }
        Ok(Self {
            words: set.into_iter().collect(),
        })
    }

    /// The bundled word lists (nouns ∪ adjectives ∪ actions).
    pub fn default_words() -> Self {
        let all = NOUNS
            .iter()
            .chain(ADJECTIVES.iter())
            .chain(ACTIONS.iter())
            .copied();
        Self::new(all).expect("bundled word lists are valid")
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction forbids empty, but keep the pair for callers.
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub(crate) fn word(&self, index: usize) -> &str {
        &self.words[index]
    }

    /// Upper bound on distinct paths: sum over depths 1..=max_depth of
    /// `len()^depth`. Saturates instead of overflowing for deep namespaces.
    pub fn possible_paths(&self, max_depth: usize) -> u128 {
        let n = self.words.len() as u128;
        let mut total: u128 = 0;
        let mut pow: u128 = 1;
        for _ in 0..max_depth {
            pow = match pow.checked_mul(n) {
                Some(p) => p,
                None => return u128::MAX,
            };
            total = match total.checked_add(pow) {
                Some(t) => t,
                None => return u128::MAX,
            };
        }
        total
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = InvalidParams;
    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        Vocabulary::new(words)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Vec<String> {
        vocab.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_words_are_nonempty_and_deduplicated() {
        let vocab = Vocabulary::default_words();
        assert_eq!(vocab.len(), NOUNS.len() + ADJECTIVES.len() + ACTIONS.len());
        let mut sorted = vocab.words().to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), vocab.len());
    }

    #[test]
    fn new_deduplicates_and_sorts() {
        let vocab = Vocabulary::new(["b", "a", "b"]).unwrap();
        assert_eq!(vocab.words(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn new_rejects_empty_input() {
        let err = Vocabulary::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, InvalidParams::EmptyVocabulary);
    }

    #[test]
    fn new_rejects_invalid_segments() {
        assert!(Vocabulary::new(["ok", "not ok"]).is_err());
        assert!(Vocabulary::new(["a/b"]).is_err());
        assert!(Vocabulary::new([""]).is_err());
    }

    #[test]
    fn possible_paths_sums_powers() {
        let vocab = Vocabulary::new(["a", "b"]).unwrap();
        // 2 + 4 + 8
        assert_eq!(vocab.possible_paths(3), 14);
        assert_eq!(vocab.possible_paths(1), 2);
    }

    #[test]
    fn possible_paths_saturates() {
        let vocab = Vocabulary::default_words();
        assert_eq!(vocab.possible_paths(64), u128::MAX);
    }
}
