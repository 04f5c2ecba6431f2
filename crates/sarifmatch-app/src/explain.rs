//! The `explain` use case: what a check or code means and how a report gets past it.

use sarifmatch_types::explain::{self, Explanation};
use sarifmatch_types::ids;

/// Which namespace an identifier was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    Check,
    Code,
}

/// A resolved identifier with its place in the check/code hierarchy.
#[derive(Clone, Debug)]
pub struct ExplainedIdentifier {
    pub identifier: String,
    pub kind: IdentifierKind,
    pub explanation: Explanation,
    /// Codes raised by a check, or the single check that raises a code.
    pub related: Vec<&'static str>,
}

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(ExplainedIdentifier),
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    let Some(explanation) = explain::lookup_explanation(identifier) else {
        return ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        };
    };

    let (kind, related) = match ids::check_for_code(identifier) {
        Some(check) => (IdentifierKind::Code, vec![check]),
        None => (
            IdentifierKind::Check,
            ids::codes_for_check(identifier).to_vec(),
        ),
    };

    ExplainOutput::Found(ExplainedIdentifier {
        identifier: identifier.to_string(),
        kind,
        explanation,
        related,
    })
}

/// Terminal rendering: header, hierarchy, guidance, then the example as a diff
/// from what a stale report carries to what a matching one carries.
pub fn format_explanation(found: &ExplainedIdentifier) -> String {
    let exp = &found.explanation;
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.chars().count()));
    out.push_str("\n\n");

    match found.kind {
        IdentifierKind::Check => {
            out.push_str(&format!("check_id: {}\n", found.identifier));
            out.push_str(&format!("codes:    {}\n\n", found.related.join(", ")));
        }
        IdentifierKind::Code => {
            out.push_str(&format!("code:     {}\n", found.identifier));
            out.push_str(&format!("check_id: {}\n\n", found.related.join(", ")));
        }
    }

    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Example (- stale report, + matching report)\n");
    out.push_str("```diff\n");
    for line in exp.examples.before.lines() {
        out.push_str(&format!("- {line}\n"));
    }
    for line in exp.examples.after.lines() {
        out.push_str(&format!("+ {line}\n"));
    }
    out.push_str("```\n");

    out
}

pub fn format_not_found(
    identifier: &str,
    check_ids: &[&'static str],
    codes: &[&'static str],
) -> String {
    let mut out = format!("Unknown check_id or code: {identifier}\n\n");
    out.push_str("Available check_ids:\n");
    for check in check_ids {
        out.push_str(&format!("  - {check}\n"));
        for code in ids::codes_for_check(check) {
            out.push_str(&format!("      {code}\n"));
        }
    }
    let ungrouped: Vec<_> = codes
        .iter()
        .filter(|code| ids::check_for_code(code).is_none())
        .collect();
    if !ungrouped.is_empty() {
        out.push_str("\nOther codes:\n");
        for code in ungrouped {
            out.push_str(&format!("  - {code}\n"));
        }
    }

    out
}
