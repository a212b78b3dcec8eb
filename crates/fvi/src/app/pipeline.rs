//! End-to-end run: enumerate, deduplicate, filter, resolve, then hand off to the editor.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::app::candidates::CandidateSource;
use crate::app::content::ContentFilter;
use crate::app::dedup::DuplicateEliminator;
use crate::app::editor::{EditorCommand, EditorKind, editor_base};
use crate::app::glob_filter::GlobFilter;
use crate::app::resolve::ResolvedFiles;
use crate::app::search::{SearchOptions, SearchSpec};
use crate::domain::model::QualifiedFile;
use crate::infra::config::Settings;
use crate::infra::process;

/// Everything one invocation asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub pattern: String,
    /// Explicit files; empty means walk the current directory.
    pub files: Vec<PathBuf>,
    pub options: SearchOptions,
    pub only: Option<String>,
    pub exclude: Option<String>,
    pub include_hidden: bool,
    pub allow_binary: bool,
    /// Overrides the configured editor flavour.
    pub editor: Option<EditorKind>,
}

/// Result of the scan phase.
#[derive(Debug, PartialEq, Eq)]
pub enum Scan {
    Complete(Vec<QualifiedFile>),
    Interrupted,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NotFound,
    Interrupted,
    /// The editor ran and exited with this code.
    Edited(i32),
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::NotFound | Outcome::Interrupted => 0,
            Outcome::Edited(code) => u8::try_from(*code).unwrap_or(1),
        }
    }
}

/// Scan the candidates and return the matching files in canonical, sorted form.
///
/// `interrupted` is polled before each path and walk entry; once it fires the scan ends
/// without reporting partial results.
pub fn find_files(
    request: &SearchRequest,
    spec: &SearchSpec,
    interrupted: impl Fn() -> bool,
) -> Result<Scan> {
    let globs = GlobFilter::new(request.only.as_deref(), request.exclude.as_deref())?;
    let content = ContentFilter::new(spec, request.allow_binary);
    let source = CandidateSource::from_args(request.files.clone(), request.include_hidden);

    let mut duplicates = DuplicateEliminator::new();
    let mut resolved = ResolvedFiles::new();
    for candidate in source.into_candidates(&interrupted) {
        if !duplicates.admit(&candidate) || !globs.accepts(&candidate) {
            continue;
        }
        if content.accepts(&candidate) {
            resolved.insert(&candidate.path);
        }
    }
    if interrupted() {
        return Ok(Scan::Interrupted);
    }
    duplicates.finish();

    tracing::debug!(matches = resolved.len(), "scan complete");
    Ok(Scan::Complete(resolved.into_sorted()))
}

/// Run a full invocation. Setup errors surface before any file is read.
pub fn run(
    request: SearchRequest,
    settings: &Settings,
    interrupted: impl Fn() -> bool,
) -> Result<Outcome> {
    let kind = EditorKind::resolve(request.editor, settings);
    let base = editor_base(settings, kind)?;
    let spec = SearchSpec::new(&request.pattern, request.options)
        .context("failed to compile search pattern")?;

    match find_files(&request, &spec, interrupted)? {
        Scan::Interrupted => Ok(Outcome::Interrupted),
        Scan::Complete(files) if files.is_empty() => Ok(Outcome::NotFound),
        Scan::Complete(files) => {
            let command = EditorCommand::new(base, &spec, files);
            let code = process::run_editor(&command)?;
            Ok(Outcome::Edited(code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn request(pattern: &str, files: &[&Path]) -> SearchRequest {
        SearchRequest {
            pattern: pattern.to_owned(),
            files: files.iter().map(|path| path.to_path_buf()).collect(),
            ..SearchRequest::default()
        }
    }

    fn scan(request: &SearchRequest) -> Vec<QualifiedFile> {
        let spec = SearchSpec::new(&request.pattern, request.options).unwrap();
        match find_files(request, &spec, || false).unwrap() {
            Scan::Complete(files) => files,
            Scan::Interrupted => panic!("unexpected interruption"),
        }
    }

    fn settings(program: &str) -> Settings {
        Settings {
            vim: vec![program.to_owned()],
            gvim: vec![program.to_owned()],
            gui: false,
        }
    }

    #[test]
    fn selects_matching_files_in_sorted_order() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let b = temp.path().join("b.txt");
        let a = temp.path().join("a.txt");
        let c = temp.path().join("c.txt");
        fs::write(&b, "the cat")?;
        fs::write(&a, "a cat too")?;
        fs::write(&c, "a dog")?;

        let files = scan(&request("cat", &[&b, &a, &c]));
        let expected = vec![
            QualifiedFile::new(fs::canonicalize(&a)?),
            QualifiedFile::new(fs::canonicalize(&b)?),
        ];
        assert_eq!(files, expected);
        Ok(())
    }

    #[test]
    fn hard_links_appear_once() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let original = temp.path().join("one.txt");
        let link = temp.path().join("two.txt");
        fs::write(&original, "needle")?;
        fs::hard_link(&original, &link)?;

        let files = scan(&request("needle", &[&original, &link]));
        assert_eq!(files.len(), 1);
        Ok(())
    }

    #[test]
    fn flags_and_globs_shape_the_result() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let word = temp.path().join("word.py");
        let sub = temp.path().join("sub.py");
        let skipped = temp.path().join("test_word.py");
        let other = temp.path().join("word.rs");
        fs::write(&word, "my Cat here")?;
        fs::write(&sub, "category")?;
        fs::write(&skipped, "cat")?;
        fs::write(&other, "cat")?;

        let mut req = request("cat", &[&word, &sub, &skipped, &other]);
        req.options = SearchOptions {
            ignore_case: true,
            whole_word: true,
        };
        req.only = Some("*.{py,txt}".into());
        req.exclude = Some("test_*".into());

        let files = scan(&req);
        assert_eq!(files, vec![QualifiedFile::new(fs::canonicalize(&word)?)]);
        Ok(())
    }

    #[test]
    fn bad_files_do_not_stop_the_scan() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let binary = temp.path().join("blob.bin");
        let good = temp.path().join("good.txt");
        fs::write(&binary, b"needle\xff")?;
        fs::write(&good, "needle")?;
        let missing = temp.path().join("missing.txt");

        let mut req = request("needle", &[&missing, temp.path(), &binary, &good]);
        assert_eq!(scan(&req).len(), 1);

        req.allow_binary = true;
        assert_eq!(scan(&req).len(), 2);
        Ok(())
    }

    #[test]
    fn interruption_stops_the_scan() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("a.txt");
        fs::write(&file, "needle")?;

        let req = request("needle", &[&file]);
        let spec = SearchSpec::new("needle", SearchOptions::default())?;
        assert_eq!(find_files(&req, &spec, || true)?, Scan::Interrupted);
        assert_eq!(run(req, &settings("true"), || true)?, Outcome::Interrupted);
        Ok(())
    }

    #[test]
    fn interruption_after_some_files_discards_them() -> Result<()> {
        use std::cell::Cell;

        let temp = tempfile::tempdir()?;
        let first = temp.path().join("a.txt");
        let second = temp.path().join("b.txt");
        fs::write(&first, "needle")?;
        fs::write(&second, "needle")?;

        let polls = Cell::new(0);
        let interrupted = || {
            polls.set(polls.get() + 1);
            polls.get() > 1
        };
        let req = request("needle", &[&first, &second]);
        let spec = SearchSpec::new("needle", SearchOptions::default())?;
        assert_eq!(find_files(&req, &spec, interrupted)?, Scan::Interrupted);
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn excluded_non_utf8_name_never_survives() -> Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir()?;
        let file = temp.path().join(OsStr::from_bytes(b"caf\xe9.bin"));
        fs::write(&file, "needle")?;

        let mut req = request("needle", &[&file]);
        req.exclude = Some("*.bin".into());
        assert!(scan(&req).is_empty());

        req.exclude = None;
        req.only = Some("*.bin".into());
        assert_eq!(scan(&req).len(), 1);
        Ok(())
    }

    #[test]
    fn no_matches_skips_the_editor() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("a.txt");
        fs::write(&file, "nothing here")?;

        // The editor program does not exist, so reaching it would fail the run.
        let outcome = run(
            request("needle", &[&file]),
            &settings("fvi-no-such-editor-binary"),
            || false,
        )?;
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(outcome.exit_code(), 0);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn editor_status_is_propagated() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("a.txt");
        fs::write(&file, "needle")?;

        let ok = run(request("needle", &[&file]), &settings("true"), || false)?;
        assert_eq!(ok, Outcome::Edited(0));

        let failed = run(request("needle", &[&file]), &settings("false"), || false)?;
        assert_eq!(failed.exit_code(), 1);
        Ok(())
    }

    #[test]
    fn empty_editor_command_fails_before_scanning() {
        let mut broken = settings("true");
        broken.vim.clear();
        let result = run(request("needle", &[]), &broken, || false);
        assert!(result.is_err());
    }
}
