use crate::model::Region;
use sarifmatch_types::{RepoPath, SnippetRecord, format_snippet_line};

/// The exact text a region denotes, plus where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSnippet {
    path: RepoPath,
    region: Region,
    text: String,
}

impl ResolvedSnippet {
    pub fn new(path: RepoPath, region: Region, text: String) -> Self {
        Self { path, region, text }
    }

    pub fn path(&self) -> &RepoPath {
        &self.path
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn to_record(&self) -> SnippetRecord {
        SnippetRecord {
            path: self.path.clone(),
            start_line: self.region.start_line(),
            end_line: self.region.end_line(),
            start_column: self.region.start_column(),
            end_column: self.region.end_column(),
            text: self.text.clone(),
        }
    }
}

impl std::fmt::Display for ResolvedSnippet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_snippet_line(
            self.path.as_str(),
            self.region.start_line(),
            self.region.end_line(),
            self.region.start_column(),
            self.region.end_column(),
            &self.text,
        ))
    }
}
