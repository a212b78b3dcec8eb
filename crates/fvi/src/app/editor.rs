//! Building the Vim command line: editor selection, the `+` option string, and file list.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::app::search::SearchSpec;
use crate::domain::model::QualifiedFile;
use crate::infra::config::Settings;

/// Enable autowrite and disable folding.
const VIM_SETTINGS: &str = "set aw nofen";
/// Ctrl-N jumps to the first match in the next file and echoes its name.
const NEXT_FILE_MAP: &str = "map <C-N> :silent next +//<CR> :file<CR>";
/// Ctrl-P does the same for the previous file.
const PREV_FILE_MAP: &str = "map <C-P> :silent previous +//<CR> :file<CR>";

/// Terminal or graphical editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    Terminal,
    Graphical,
}

impl EditorKind {
    /// An explicit choice wins over the configured default.
    pub fn resolve(choice: Option<EditorKind>, settings: &Settings) -> Self {
        choice.unwrap_or(if settings.gui {
            EditorKind::Graphical
        } else {
            EditorKind::Terminal
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditorKind::Terminal => "vim",
            EditorKind::Graphical => "gvim",
        }
    }
}

/// Program and base arguments for `kind`; an empty command is fatal.
pub fn editor_base(settings: &Settings, kind: EditorKind) -> Result<Vec<String>> {
    let base = match kind {
        EditorKind::Terminal => &settings.vim,
        EditorKind::Graphical => &settings.gvim,
    };
    if base.is_empty() {
        bail!("no command configured for the '{}' editor", kind.as_str());
    }
    Ok(base.clone())
}

/// The combined `+cmd|cmd|...` argument that configures Vim and runs the initial search.
pub fn option_string(spec: &SearchSpec) -> String {
    let search = format!("silent /{}", spec.vim_pattern());
    let commands = [VIM_SETTINGS, NEXT_FILE_MAP, PREV_FILE_MAP, search.as_str()];
    format!("+{}", commands.join("|"))
}

/// Complete argument vector for one editor launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    base: Vec<String>,
    options: String,
    files: Vec<PathBuf>,
}

impl EditorCommand {
    pub fn new(base: Vec<String>, spec: &SearchSpec, files: Vec<QualifiedFile>) -> Self {
        Self {
            base,
            options: option_string(spec),
            files: files.into_iter().map(QualifiedFile::into_path).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(base: Vec<String>, options: String, files: Vec<PathBuf>) -> Self {
        Self {
            base,
            options,
            files,
        }
    }

    pub fn options(&self) -> &str {
        &self.options
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// `<base...> <options> <files...>`
    pub fn argv(&self) -> Vec<OsString> {
        self.base
            .iter()
            .map(OsString::from)
            .chain(std::iter::once(OsString::from(&self.options)))
            .chain(self.files.iter().map(OsString::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::search::SearchOptions;

    fn settings(gui: bool) -> Settings {
        Settings {
            vim: vec!["vim".into(), "-p".into()],
            gvim: vec!["gvim".into(), "-f".into()],
            gui,
        }
    }

    #[test]
    fn explicit_choice_overrides_settings() {
        assert_eq!(
            EditorKind::resolve(None, &settings(true)),
            EditorKind::Graphical
        );
        assert_eq!(
            EditorKind::resolve(None, &settings(false)),
            EditorKind::Terminal
        );
        assert_eq!(
            EditorKind::resolve(Some(EditorKind::Terminal), &settings(true)),
            EditorKind::Terminal
        );
        assert_eq!(
            EditorKind::resolve(Some(EditorKind::Graphical), &settings(false)),
            EditorKind::Graphical
        );
    }

    #[test]
    fn empty_editor_command_is_fatal() {
        let mut broken = settings(false);
        broken.vim.clear();
        assert!(editor_base(&broken, EditorKind::Terminal).is_err());
        assert_eq!(
            editor_base(&broken, EditorKind::Graphical).unwrap(),
            vec!["gvim", "-f"]
        );
    }

    #[test]
    fn option_string_has_one_search_directive() {
        let spec = SearchSpec::new("a.b", SearchOptions::default()).unwrap();
        let options = option_string(&spec);
        assert!(options.starts_with("+set aw nofen|"));
        assert_eq!(options.matches("silent /").count(), 1);
        assert!(options.ends_with(r"|silent /\Va.b"));
    }

    #[test]
    fn argv_places_options_before_files() {
        let spec = SearchSpec::new("needle", SearchOptions::default()).unwrap();
        let files = vec![
            QualifiedFile::new("/tmp/a.txt"),
            QualifiedFile::new("/tmp/b.txt"),
        ];
        let command = EditorCommand::new(vec!["vim".into(), "-p".into()], &spec, files);
        let argv = command.argv();

        assert_eq!(argv.len(), 5);
        assert_eq!(argv[0], "vim");
        assert_eq!(argv[1], "-p");
        assert_eq!(argv[2], OsString::from(command.options()));
        assert_eq!(argv[3], "/tmp/a.txt");
        assert_eq!(argv[4], "/tmp/b.txt");
    }
}
