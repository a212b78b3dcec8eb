//! Domain models for candidates and qualified files.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// A path that was supplied on the command line or discovered by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Base file name used by the glob filter. Paths without a final component (`/`, `..`)
    /// yield an empty name.
    /// Not required to be UTF-8.
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identity of the underlying file: device id plus inode number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileIdentity {
    pub device: u64,
    pub inode: u64,
}

/// A candidate that passed every filter, stored under its canonical absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedFile {
    path: PathBuf,
}

impl QualifiedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
