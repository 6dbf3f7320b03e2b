//! `RulePath`: validated slash-delimited path atoms.
//!
//! Paths are opaque keys for the rule builder; equality is exact string
//! equality and ordering is plain lexicographic ordering, which is what the
//! sorted output format relies on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidPath;

/// A URL path: `/`-prefixed, one or more non-empty segments.
///
/// Segments may not contain `/`, whitespace, or `#` (the rule-file comment
/// marker). No percent-decoding happens anywhere; the raw string is the key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RulePath(String);

impl RulePath {
    pub fn parse(s: impl Into<String>) -> Result<Self, InvalidPath> {
        let s = s.into();
        let Some(rest) = s.strip_prefix('/') else {
            return Err(InvalidPath {
                raw: s,
                reason: "must start with `/`".into(),
            });
        };
        if rest.is_empty() {
            return Err(InvalidPath {
                raw: s,
                reason: "must have at least one segment".into(),
            });
        }
        for segment in rest.split('/') {
            if let Err(reason) = check_segment(segment) {
                return Err(InvalidPath { raw: s, reason });
            }
        }
        Ok(Self(s))
    }

    /// Build a path from pre-validated segments.
    ///
    /// Sampling goes through here; segments come from a [`Vocabulary`],
    /// which validated them on construction.
    ///
    /// [`Vocabulary`]: crate::vocab::Vocabulary
    pub fn from_segments<I, S>(segments: I) -> Result<Self, InvalidPath>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for segment in segments {
            out.push('/');
            out.push_str(segment.as_ref());
        }
        Self::parse(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0[1..].split('/')
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }
}

pub(crate) fn check_segment(segment: &str) -> Result<(), String> {
    if segment.is_empty() {
        return Err("empty segment".into());
    }
    if segment.contains(|c: char| c.is_whitespace()) {
        return Err("segment contains whitespace".into());
    }
    if segment.contains(['/', '#']) {
        return Err("segment contains `/` or `#`".into());
    }
    Ok(())
}

impl fmt::Debug for RulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RulePath({:?})", self.0)
    }
}

impl fmt::Display for RulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RulePath {
    type Error = InvalidPath;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        RulePath::parse(s)
    }
}

impl From<RulePath> for String {
    fn from(path: RulePath) -> String {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_nested_paths() {
        let path = RulePath::parse("/product/new/details").unwrap();
        assert_eq!(path.depth(), 3);
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec!["product", "new", "details"]
        );
    }

    #[test]
    fn parse_rejects_relative_paths() {
        let err = RulePath::parse("product/new").unwrap_err();
        assert!(err.reason.contains("start with"));
    }

    #[test]
    fn parse_rejects_empty_segments() {
        assert!(RulePath::parse("/").is_err());
        assert!(RulePath::parse("/a//b").is_err());
        assert!(RulePath::parse("/a/").is_err());
    }

    #[test]
    fn parse_rejects_whitespace_and_comment_marker() {
        assert!(RulePath::parse("/a b").is_err());
        assert!(RulePath::parse("/a#frag").is_err());
    }

    #[test]
    fn from_segments_round_trips() {
        let path = RulePath::from_segments(["blog", "archived"]).unwrap();
        assert_eq!(path.as_str(), "/blog/archived");
    }

    #[test]
    fn ordering_is_lexicographic_on_the_raw_string() {
        let a = RulePath::parse("/a").unwrap();
        let ab = RulePath::parse("/a/b").unwrap();
        let b = RulePath::parse("/b").unwrap();
        assert!(a < ab);
        assert!(ab < b);
    }
}
