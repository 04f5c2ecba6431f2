//! Rendering utilities for terminals and CI surfaces (snippet listing, Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod text;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSnippet,
    RenderableVerdict,
};
pub use text::render_snippet_lines;
