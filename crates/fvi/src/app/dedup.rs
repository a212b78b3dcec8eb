//! Dropping candidates that name an already-seen file (same device and inode).

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::model::{Candidate, FileIdentity};

/// Tracks seen identities across a stream of candidates.
#[derive(Debug, Default)]
pub struct DuplicateEliminator {
    seen: HashSet<FileIdentity>,
    ignored: Vec<PathBuf>,
}

impl DuplicateEliminator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` for the first candidate with a given identity. Candidates that cannot be
    /// stat'd are dropped like duplicates.
    pub fn admit(&mut self, candidate: &Candidate) -> bool {
        match identity(&candidate.path) {
            Ok(id) if self.seen.insert(id) => true,
            Ok(_) => {
                self.ignored.push(candidate.path.clone());
                false
            }
            Err(err) => {
                tracing::warn!(path = %candidate.path.display(), error = %err, "skipping");
                self.ignored.push(candidate.path.clone());
                false
            }
        }
    }

    /// Paths dropped so far, in input order.
    #[cfg(test)]
    fn ignored(&self) -> &[PathBuf] {
        &self.ignored
    }

    /// Emit one consolidated warning for everything that was dropped.
    pub fn finish(self) {
        if self.ignored.is_empty() {
            return;
        }
        let listing: Vec<_> = self
            .ignored
            .iter()
            .map(|path| format!("    {}", path.display()))
            .collect();
        tracing::warn!("ignoring duplicate files:\n{}", listing.join("\n"));
    }

    /// Deduplicate a whole sequence, preserving order.
    #[cfg(test)]
    fn eliminate(candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
        let mut eliminator = Self::new();
        let kept = candidates
            .into_iter()
            .filter(|candidate| eliminator.admit(candidate))
            .collect();
        eliminator.finish();
        kept
    }
}

#[cfg(unix)]
fn identity(path: &Path) -> io::Result<FileIdentity> {
    use std::os::unix::fs::MetadataExt;

    let meta = fs::metadata(path)?;
    Ok(FileIdentity {
        device: meta.dev(),
        inode: meta.ino(),
    })
}

/// Without inode numbers the canonical path stands in for the file's identity.
#[cfg(not(unix))]
fn identity(path: &Path) -> io::Result<FileIdentity> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fs::metadata(path)?;
    let mut hasher = DefaultHasher::new();
    fs::canonicalize(path)?.hash(&mut hasher);
    Ok(FileIdentity {
        device: 0,
        inode: hasher.finish(),
    })
}
