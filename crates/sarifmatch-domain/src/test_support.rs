use crate::engine::SourceTree;
use crate::model::{Region, SourceLocation};
use sarifmatch_types::RepoPath;
use std::collections::HashMap;
use std::sync::Arc;

const STARTUP_LISTENER: &str = include_str!(
    "../../../tests/fixtures/project/src/com/ibm/security/appscan/altoromutual/listener/StartupListener.java"
);

/// Split like a text reader: every line keeps its `\n`.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

pub fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|l| l.to_string()).collect()
}

pub fn startup_listener_lines() -> Vec<String> {
    split_lines(STARTUP_LISTENER)
}

pub fn location(path: &str, sl: u32, el: u32, sc: u32, ec: u32) -> SourceLocation {
    SourceLocation::new(
        RepoPath::new(path),
        Region::new(sl, el, sc, ec).expect("valid region"),
    )
}

/// In-memory project tree keyed by repo-relative path.
#[derive(Debug, Default)]
pub struct MemoryTree {
    files: HashMap<String, Arc<[String]>>,
}

impl MemoryTree {
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files
            .insert(path.to_string(), split_lines(content).into());
        self
    }
}

impl SourceTree for MemoryTree {
    fn read_lines(&self, path: &RepoPath) -> std::io::Result<Arc<[String]>> {
        self.files.get(path.as_str()).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file: {path}"),
            )
        })
    }
}
