use crate::RenderableReport;
use sarifmatch_types::format_snippet_line;

/// One `<path>::<startLine>::<endLine> <startColumn-1>-><endColumn> = <text>` line per snippet.
pub fn render_snippet_lines(report: &RenderableReport) -> Vec<String> {
    report
        .snippets
        .iter()
        .map(|s| {
            format_snippet_line(
                &s.path,
                s.start_line,
                s.end_line,
                s.start_column,
                s.end_column,
                &s.text,
            )
        })
        .collect()
}
