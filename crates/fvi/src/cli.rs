//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

use crate::app::editor::EditorKind;
use crate::app::pipeline::SearchRequest;
use crate::app::search::SearchOptions;

const LONG_ABOUT: &str = "\
Search a set of files for a literal string and open every file that contains it in Vim.

Vim opens the first matching file with the cursor on the first occurrence. Use n to go to the
next occurrence, Ctrl-N to jump to the next file and Ctrl-P to jump back to the previous one.
Autowrite is enabled, so changes are saved when moving between files.

The pattern is literal text; regular expressions are not supported. Without FILE arguments
every file below the current directory is searched.

Use -- to end the options, e.g. `fvi -- -pattern` to search for text starting with a dash.

Settings are read from ~/.config/fvi/settings.toml (or $FVI_CONFIG) with the keys `vim`,
`gvim` and `gui`; FVI_VIM, FVI_GVIM and FVI_GUI override them.";

/// Find files containing a pattern and edit them in Vim.
#[derive(Parser, Debug)]
#[command(name = "fvi", version, long_about = LONG_ABOUT)]
pub struct Cli {
    /// Literal text to search for.
    pub pattern: String,

    /// Files to search (default: every file below the current directory).
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Ignore case.
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Match whole words only.
    #[arg(short = 'w', long)]
    pub word: bool,

    /// Only search files whose name matches GLOB; braces expand to several globs.
    #[arg(short = 'o', long, value_name = "GLOB")]
    pub only: Option<String>,

    /// Skip files whose name matches GLOB; braces expand to several globs.
    #[arg(short = 'e', long, value_name = "GLOB")]
    pub exclude: Option<String>,

    /// Include hidden files.
    #[arg(short = 'H', long)]
    pub hidden: bool,

    /// Search binary files instead of skipping them (anything that is not valid UTF-8).
    #[arg(short = 'b', long)]
    pub binary: bool,

    /// Open files in gvim rather than vim.
    #[arg(short = 'g', long, overrides_with = "vim")]
    pub gvim: bool,

    /// Open files in vim rather than gvim.
    #[arg(short = 'v', long, overrides_with = "gvim")]
    pub vim: bool,

    /// Show warnings about directories, unreadable and binary files.
    #[arg(short = 'W', long)]
    pub warn: bool,
}

impl Cli {
    /// The explicit editor choice, if any. The last of --vim/--gvim wins.
    pub fn editor(&self) -> Option<EditorKind> {
        if self.gvim {
            Some(EditorKind::Graphical)
        } else if self.vim {
            Some(EditorKind::Terminal)
        } else {
            None
        }
    }

    pub fn into_request(self) -> SearchRequest {
        let editor = self.editor();
        SearchRequest {
            pattern: self.pattern,
            files: self.files,
            options: SearchOptions {
                ignore_case: self.ignore_case,
                whole_word: self.word,
            },
            only: self.only,
            exclude: self.exclude,
            include_hidden: self.hidden,
            allow_binary: self.binary,
            editor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fvi").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags_into_request() {
        let request = parse(&["-iw", "-o", "*.{py,rst}", "-e", "test_*", "-Hb", "cat", "a.py"])
            .into_request();
        assert_eq!(request.pattern, "cat");
        assert_eq!(request.files, vec![PathBuf::from("a.py")]);
        assert!(request.options.ignore_case);
        assert!(request.options.whole_word);
        assert_eq!(request.only.as_deref(), Some("*.{py,rst}"));
        assert_eq!(request.exclude.as_deref(), Some("test_*"));
        assert!(request.include_hidden);
        assert!(request.allow_binary);
        assert_eq!(request.editor, None);
    }

    #[test]
    fn double_dash_allows_leading_dash_pattern() {
        let cli = parse(&["--", "-x", "-file"]);
        assert_eq!(cli.pattern, "-x");
        assert_eq!(cli.files, vec![PathBuf::from("-file")]);
    }

    #[test]
    fn last_editor_flag_wins() {
        assert_eq!(parse(&["-g", "-v", "p"]).editor(), Some(EditorKind::Terminal));
        assert_eq!(parse(&["-v", "-g", "p"]).editor(), Some(EditorKind::Graphical));
        assert_eq!(parse(&["p"]).editor(), None);
    }

    #[test]
    fn pattern_is_required() {
        assert!(Cli::try_parse_from(["fvi"]).is_err());
    }
}
