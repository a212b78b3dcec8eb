//! Canonical path collection and final ordering.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::domain::model::QualifiedFile;

/// Matching files keyed by canonical path.
#[derive(Debug, Default)]
pub struct ResolvedFiles {
    files: HashSet<QualifiedFile>,
}

impl ResolvedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `path` and add it. Returns `false` when it was already present or could not be
    /// resolved.
    pub fn insert(&mut self, path: &Path) -> bool {
        match fs::canonicalize(path) {
            Ok(canonical) => self.files.insert(QualifiedFile::new(canonical)),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping ...");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in byte-wise lexicographic order of their canonical paths.
    pub fn into_sorted(self) -> Vec<QualifiedFile> {
        let mut files: Vec<_> = self.files.into_iter().collect();
        files.sort_by(|a, b| a.path().as_os_str().cmp(b.path().as_os_str()));
        files
    }
}
