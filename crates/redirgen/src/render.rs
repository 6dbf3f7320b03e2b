//! Output rendering for generation runs.
//!
//! Text: one `source destination` line per rule, lexicographically sorted
//! by the full line. Rendering the same set twice is byte-identical.
//! JSON: the whole outcome (rules + counters) for scripting.

use std::collections::BTreeSet;
use std::io::Write;

use serde::Serialize;

use redirgen_core::{Generated, Rule};

/// Write sorted `source destination` lines.
///
/// `BTreeSet<Rule>` iteration order equals sorted-line order (rule ordering
/// is source-then-destination and paths cannot contain whitespace), so no
/// extra sort pass is needed.
pub fn write_rules(out: &mut impl Write, rules: &BTreeSet<Rule>) -> std::io::Result<()> {
    for rule in rules {
        writeln!(out, "{rule}")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct GeneratedJson<'a> {
    rules: Vec<RuleJson<'a>>,
    generated: u64,
    aborted: bool,
}

#[derive(Serialize)]
struct RuleJson<'a> {
    source: &'a str,
    destination: &'a str,
}

/// Write the outcome as a single JSON document.
pub fn write_json(out: &mut impl Write, generated: &Generated) -> std::io::Result<()> {
    let doc = GeneratedJson {
        rules: generated
            .rules
            .iter()
            .map(|rule| RuleJson {
                source: rule.source().as_str(),
                destination: rule.destination().as_str(),
            })
            .collect(),
        generated: generated.generated,
        aborted: generated.aborted,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}
