//! Candidate enumeration: explicit paths or a recursive walk.

use std::path::PathBuf;

use ignore::WalkBuilder;

use crate::domain::model::Candidate;

/// Where candidates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    /// Paths given by the caller, used as-is (directories are not descended into).
    Explicit(Vec<PathBuf>),
    /// Every non-directory entry below `root`.
    Walk { root: PathBuf, include_hidden: bool },
}

impl CandidateSource {
    /// Walk the current directory when no paths were supplied.
    pub fn from_args(files: Vec<PathBuf>, include_hidden: bool) -> Self {
        if files.is_empty() {
            CandidateSource::Walk {
                root: PathBuf::from("."),
                include_hidden,
            }
        } else {
            CandidateSource::Explicit(files)
        }
    }

    /// Lazily produce candidates. `stop` is polled before every path and every walk entry,
    /// including directories that never become candidates; once it returns `true` the
    /// sequence ends.
    pub fn into_candidates<'a>(
        self,
        stop: &'a dyn Fn() -> bool,
    ) -> Box<dyn Iterator<Item = Candidate> + 'a> {
        match self {
            CandidateSource::Explicit(files) => Box::new(
                files
                    .into_iter()
                    .take_while(move |_| !stop())
                    .map(Candidate::new),
            ),
            CandidateSource::Walk {
                root,
                include_hidden,
            } => Box::new(walk(root, include_hidden, stop)),
        }
    }
}

fn walk<'a>(
    root: PathBuf,
    include_hidden: bool,
    stop: &'a dyn Fn() -> bool,
) -> impl Iterator<Item = Candidate> + 'a {
    let mut builder = WalkBuilder::new(root);
    // Ignore files are not consulted; only dotfiles are filtered.
    builder.standard_filters(false).hidden(!include_hidden);

    builder
        .build()
        .take_while(move |_| !stop())
        .filter_map(|result| match result {
            Ok(entry) => {
                let is_dir = entry.file_type().is_some_and(|kind| kind.is_dir());
                (entry.depth() > 0 && !is_dir).then(|| Candidate::new(entry.into_path()))
            }
            Err(err) => {
                tracing::warn!(error = %err, "walk error");
                None
            }
        })
}
