//! Rule-file verification.
//!
//! Parses `source destination` lines (blank lines and `#` comments
//! skipped), then reports everything a redirect processor would choke on:
//! malformed lines, self-loops, duplicate sources, and loops across rules.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use redirgen_core::RulePath;

#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Rules that parsed cleanly (last occurrence wins for dup sources).
    pub rules: usize,
    pub problems: Vec<Problem>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub struct Problem {
    /// 1-based line number; 0 for whole-file problems (loops).
    pub line_no: usize,
    pub kind: ProblemKind,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProblemKind {
    InvalidLine { line: String, reason: String },
    SelfLoop { path: String },
    DuplicateSource { source: String, first_line: usize },
    Loop { chain: Vec<String> },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ProblemKind::InvalidLine { line, reason } => {
                write!(f, "line {}: {reason} (\"{line}\")", self.line_no)
            }
            ProblemKind::SelfLoop { path } => {
                write!(f, "line {}: {path} redirects to itself", self.line_no)
            }
            ProblemKind::DuplicateSource { source, first_line } => {
                write!(
                    f,
                    "line {}: duplicate source {source} (first on line {first_line})",
                    self.line_no
                )
            }
            ProblemKind::Loop { chain } => {
                write!(f, "loop: {} -> {}", chain.join(" -> "), chain[0])
            }
        }
    }
}

/// Check rule-file contents. Pure; the caller does the file I/O.
pub fn check_rules(contents: &str) -> CheckReport {
    let mut problems = Vec::new();
    let mut next_hop: BTreeMap<RulePath, RulePath> = BTreeMap::new();
    let mut first_seen: HashMap<RulePath, usize> = HashMap::new();

    for (index, raw_line) in contents.lines().enumerate() {
        let line_no = index + 1;
        // Strip inline comments.
        let rule_part = raw_line.split('#').next().unwrap_or("").trim();
        if rule_part.is_empty() {
            continue;
        }

        match parse_line(rule_part) {
            Ok((source, destination)) => {
                if source == destination {
                    problems.push(Problem {
                        line_no,
                        kind: ProblemKind::SelfLoop {
                            path: source.to_string(),
                        },
                    });
                    continue;
                }
                if let Some(&first_line) = first_seen.get(&source) {
                    problems.push(Problem {
                        line_no,
                        kind: ProblemKind::DuplicateSource {
                            source: source.to_string(),
                            first_line,
                        },
                    });
                } else {
                    first_seen.insert(source.clone(), line_no);
                }
                next_hop.insert(source, destination);
            }
            Err(reason) => problems.push(Problem {
                line_no,
                kind: ProblemKind::InvalidLine {
                    line: raw_line.to_string(),
                    reason,
                },
            }),
        }
    }

    for chain in find_loops(&next_hop) {
        problems.push(Problem {
            line_no: 0,
            kind: ProblemKind::Loop {
                chain: chain.iter().map(RulePath::to_string).collect(),
            },
        });
    }

    CheckReport {
        rules: next_hop.len(),
        problems,
    }
}

fn parse_line(rule_part: &str) -> Result<(RulePath, RulePath), String> {
    let parts: Vec<&str> = rule_part.split_whitespace().collect();
    match parts.as_slice() {
        [source, destination] => {
            let source = RulePath::parse(*source).map_err(|e| e.to_string())?;
            let destination = RulePath::parse(*destination).map_err(|e| e.to_string())?;
            Ok((source, destination))
        }
        [_] => Err("missing destination".into()),
        parts => Err(format!(
            "expected exactly two whitespace-separated parts, found {}",
            parts.len()
        )),
    }
}

/// Find loops by chain-walking from every source; each loop is reported
/// once, rotated so the smallest member comes first.
fn find_loops(next_hop: &BTreeMap<RulePath, RulePath>) -> Vec<Vec<RulePath>> {
    let mut seen: std::collections::BTreeSet<Vec<RulePath>> = std::collections::BTreeSet::new();

    for start in next_hop.keys() {
        let mut position: HashMap<&RulePath, usize> = HashMap::new();
        let mut walked: Vec<&RulePath> = Vec::new();
        let mut current = start;

        loop {
            if let Some(&pos) = position.get(current) {
                let cycle: Vec<RulePath> = walked[pos..].iter().map(|p| (*p).clone()).collect();
                seen.insert(normalize_cycle(cycle));
                break;
            }
            position.insert(current, walked.len());
            walked.push(current);
            match next_hop.get(current) {
                Some(next) => current = next,
                None => break,
            }
        }
    }

    seen.into_iter().collect()
}

/// Rotate a cycle so its smallest node leads, for stable dedup.
fn normalize_cycle(cycle: Vec<RulePath>) -> Vec<RulePath> {
    let Some(min_index) = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, path)| *path)
        .map(|(i, _)| i)
    else {
        return cycle;
    };
    let mut rotated = cycle[min_index..].to_vec();
    rotated.extend_from_slice(&cycle[..min_index]);
    rotated
}
