//! Literal pattern compiled for the file filter and for Vim's search command.

use regex::{Regex, RegexBuilder};

/// Flags shared by both pattern encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub ignore_case: bool,
    pub whole_word: bool,
}

/// One literal pattern in two dialects that select the same matches: a [`Regex`] used to
/// filter files and a very-nomagic Vim pattern used to place the cursor.
///
/// Whole-word matching uses `\b` in the regex and `\<`/`\>` in Vim. The two agree when the
/// pattern starts and ends with word characters. At a non-word edge, `\b` demands a word
/// character on the other side, so `(cat` only qualifies a file as in `x(cat`.
#[derive(Debug, Clone)]
pub struct SearchSpec {
    regex: Regex,
    vim_pattern: String,
}

impl SearchSpec {
    pub fn new(literal: &str, options: SearchOptions) -> Result<Self, regex::Error> {
        let mut pattern = regex::escape(literal);
        let mut vim_pattern = vim_escape(literal);

        if options.ignore_case {
            vim_pattern = format!(r"\c{vim_pattern}");
        }
        if options.whole_word {
            pattern = format!(r"\b{pattern}\b");
            vim_pattern = format!(r"\<{vim_pattern}\>");
        }

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(options.ignore_case)
            .build()?;

        Ok(Self {
            regex,
            vim_pattern,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Pattern for Vim's `/` command.
    pub fn vim_pattern(&self) -> &str {
        &self.vim_pattern
    }
}

/// `\V` switches Vim to very-nomagic mode, where only `\` and the search delimiter are
/// special.
fn vim_escape(literal: &str) -> String {
    format!(r"\V{}", literal.replace('\\', r"\\").replace('/', r"\/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(pattern: &str, ignore_case: bool, whole_word: bool) -> SearchSpec {
        SearchSpec::new(
            pattern,
            SearchOptions {
                ignore_case,
                whole_word,
            },
        )
        .expect("pattern compiles")
    }

    #[test]
    fn whole_word_rejects_substrings() {
        let word = spec("cat", false, true);
        assert!(!word.is_match("a category of things"));
        assert!(word.is_match("the cat sat"));
        assert!(word.is_match("cat"));
        assert!(word.is_match("(cat)"));

        let substring = spec("cat", false, false);
        assert!(substring.is_match("a category of things"));
    }

    #[test]
    fn whole_word_at_non_word_edge_needs_word_neighbour() {
        let paren = spec("(cat", false, true);
        assert!(paren.is_match("x(cat y"));
        assert!(!paren.is_match("x (cat y"));
        assert!(!paren.is_match("(cat"));
        assert!(!paren.is_match("x(cats"));
        assert_eq!(paren.vim_pattern(), r"\<\V(cat\>");
    }

    #[test]
    fn ignore_case_controls_matching() {
        assert!(spec("Foo", true, false).is_match("only foo here"));
        assert!(!spec("Foo", false, false).is_match("only foo here"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let dotted = spec("a.b*(c)", false, false);
        assert!(dotted.is_match("x a.b*(c) y"));
        assert!(!dotted.is_match("axbbbc"));
    }

    #[test]
    fn vim_pattern_escapes_backslash_and_slash() {
        let spec = spec(r"a\b/c", false, false);
        assert_eq!(spec.vim_pattern(), r"\Va\\b\/c");
    }

    #[test]
    fn vim_pattern_carries_flags() {
        assert_eq!(spec("cat", true, false).vim_pattern(), r"\c\Vcat");
        assert_eq!(spec("cat", false, true).vim_pattern(), r"\<\Vcat\>");
        assert_eq!(spec("cat", true, true).vim_pattern(), r"\<\c\Vcat\>");
    }
}
