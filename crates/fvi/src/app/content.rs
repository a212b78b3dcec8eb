//! Reading each candidate and keeping the ones that contain the pattern.

use std::path::Path;

use crate::app::search::SearchSpec;
use crate::domain::errors::ReadFailure;
use crate::domain::model::Candidate;
use crate::infra::fs::{self, DecodeMode};

/// Result of inspecting one candidate.
#[derive(Debug)]
pub enum Inspection {
    Match,
    NoMatch,
    Unreadable(ReadFailure),
}

/// Content filter over a compiled [`SearchSpec`].
#[derive(Debug, Clone)]
pub struct ContentFilter<'a> {
    spec: &'a SearchSpec,
    mode: DecodeMode,
}

impl<'a> ContentFilter<'a> {
    /// With `allow_binary`, undecodable bytes are dropped instead of skipping the file.
    pub fn new(spec: &'a SearchSpec, allow_binary: bool) -> Self {
        let mode = if allow_binary {
            DecodeMode::Lenient
        } else {
            DecodeMode::Strict
        };
        Self { spec, mode }
    }

    pub fn inspect(&self, path: &Path) -> Inspection {
        match fs::read_text(path, self.mode) {
            Ok(text) if self.spec.is_match(&text) => Inspection::Match,
            Ok(_) => Inspection::NoMatch,
            Err(failure) => Inspection::Unreadable(failure),
        }
    }

    /// Whether the candidate contains the pattern. Unreadable files are reported and rejected.
    pub fn accepts(&self, candidate: &Candidate) -> bool {
        match self.inspect(&candidate.path) {
            Inspection::Match => true,
            Inspection::NoMatch => false,
            Inspection::Unreadable(failure) => {
                report(&candidate.path, &failure);
                false
            }
        }
    }
}

fn report(path: &Path, failure: &ReadFailure) {
    match failure {
        ReadFailure::Decode(err) => tracing::warn!(
            path = %path.display(),
            "is a binary file, skipping ...\n    {err}\n    {}\n    {}",
            err.context_line(),
            err.marker_line()
        ),
        other => tracing::warn!(path = %path.display(), error = %other, "skipping ..."),
    }
}
