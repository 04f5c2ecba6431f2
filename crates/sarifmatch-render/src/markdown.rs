use crate::{RenderableReport, RenderableVerdict};
use sarifmatch_types::format_snippet_line;

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Sarifmatch report\n\n");
    let verdict = match report.verdict {
        RenderableVerdict::Match => "MATCH",
        RenderableVerdict::Mismatch => "MISMATCH",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Locations: {} (resolved) / {} (total)\n- Findings: {} (emitted) / {} (total)\n\n",
        verdict,
        report.data.snippets_resolved,
        report.data.locations_total,
        report.data.findings_emitted,
        report.data.findings_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
    } else {
        out.push_str("## Findings\n\n");
        for f in &report.findings {
            let message = one_line(&f.message);
            match &f.location {
                Some(loc) => out.push_str(&format!(
                    "- `{}` / `{}`: {} (`{}`:{})\n",
                    f.check_id,
                    f.code,
                    message,
                    loc.path,
                    loc.line.unwrap_or(0)
                )),
                None => out.push_str(&format!("- `{}` / `{}`: {}\n", f.check_id, f.code, message)),
            }
        }
    }

    if !report.snippets.is_empty() {
        out.push_str("\n## Snippets\n\n");
        for s in &report.snippets {
            let line = format_snippet_line(
                &s.path,
                s.start_line,
                s.end_line,
                s.start_column,
                s.end_column,
                &one_line(&s.text),
            );
            out.push_str(&format!("- `{}`\n", line.replace('`', "'")));
        }
    }

    out
}

/// Markdown list items cannot hold raw newlines or tabs.
fn one_line(s: &str) -> String {
    s.replace('\r', "\\r").replace('\n', "\\n").replace('\t', "\\t")
}
