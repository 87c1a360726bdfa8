use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{load_or_empty, LoadOutcome};

/// Identity of a data source: where it lives and what it looked like on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKey {
    pub path: PathBuf,
    /// `None` when the file could not be stat'ed (e.g. it does not exist).
    pub modified: Option<SystemTime>,
    pub len: Option<u64>,
}

impl SourceKey {
    pub fn of(path: &Path) -> Self {
        let meta = std::fs::metadata(path).ok();
        SourceKey {
            path: path.to_path_buf(),
            modified: meta.as_ref().and_then(|m| m.modified().ok()),
            len: meta.map(|m| m.len()),
        }
    }
}

/// Memoized load result. Loading is idempotent for a given [`SourceKey`], so
/// a hit hands back the same shared outcome; a changed file (or a different
/// path) produces a new key and triggers a reload.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<(SourceKey, Arc<LoadOutcome>)>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, path: &Path) -> Arc<LoadOutcome> {
        let key = SourceKey::of(path);
        if let Some((cached_key, outcome)) = &self.entry {
            if *cached_key == key {
                log::debug!("Dataset cache hit for {}", path.display());
                return Arc::clone(outcome);
            }
        }

        log::info!("Loading dataset from {}", path.display());
        let outcome = Arc::new(load_or_empty(path));
        self.entry = Some((key, Arc::clone(&outcome)));
        outcome
    }

    /// Forget the memoized table; the next request reloads from disk.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn reload(&mut self, path: &Path) -> Arc<LoadOutcome> {
        self.invalidate();
        self.get_or_load(path)
    }
}
