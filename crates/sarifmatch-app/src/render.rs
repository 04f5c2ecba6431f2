//! Render use cases: snippet listing, markdown and GitHub annotations from receipts.

use sarifmatch_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    sarifmatch_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    sarifmatch_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

pub fn render_snippet_lines(report: &RenderableReport) -> Vec<String> {
    sarifmatch_render::render_snippet_lines(report)
}
