use crate::lines::read_lines_from_file;
use camino::{Utf8Path, Utf8PathBuf};
use sarifmatch_domain::SourceTree;
use sarifmatch_types::RepoPath;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::trace;

/// A project checked out on disk.
///
/// With caching enabled each file is read once per tree; otherwise every
/// location re-reads its file.
#[derive(Debug)]
pub struct FsSourceTree {
    root: Utf8PathBuf,
    cache: Option<RwLock<HashMap<RepoPath, Arc<[String]>>>>,
}

impl FsSourceTree {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: None,
        }
    }

    pub fn cached(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Some(RwLock::new(HashMap::new())),
        }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Number of files currently held in the cache (0 when caching is off).
    pub fn cached_files(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|c| c.read().ok().map(|m| m.len()))
            .unwrap_or(0)
    }
}

impl SourceTree for FsSourceTree {
    fn read_lines(&self, path: &RepoPath) -> std::io::Result<Arc<[String]>> {
        let abs = path.under(&self.root);
        let Some(cache) = &self.cache else {
            return read_lines_from_file(&abs).map(Arc::from);
        };

        if let Some(hit) = cache.read().ok().and_then(|m| m.get(path).cloned()) {
            trace!(path = %path, "line cache hit");
            return Ok(hit);
        }

        let lines: Arc<[String]> = read_lines_from_file(&abs)?.into();
        trace!(path = %path, lines = lines.len(), "line cache fill");
        if let Ok(mut map) = cache.write() {
            map.insert(path.clone(), Arc::clone(&lines));
        }
        Ok(lines)
    }
}
