//! Include/exclude filtering on base file names with brace-expanded shell globs.

use std::ffi::OsStr;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::domain::errors::GlobError;
use crate::domain::model::Candidate;

/// Which base names a rule selects.
#[derive(Debug, Clone)]
pub enum NameMatcher {
    All,
    Nothing,
    Globs(GlobSet),
}

impl NameMatcher {
    /// Names are matched as bytes, so they need not be UTF-8.
    pub fn matches(&self, name: &OsStr) -> bool {
        match self {
            NameMatcher::All => true,
            NameMatcher::Nothing => false,
            NameMatcher::Globs(set) => set.is_match(name),
        }
    }

    /// Compile `expr`, or return `fallback` when no expression was given.
    fn compile(expr: Option<&str>, fallback: NameMatcher) -> Result<Self, GlobError> {
        match expr.filter(|expr| !expr.is_empty()) {
            None => Ok(fallback),
            Some(expr) => {
                let mut builder = GlobSetBuilder::new();
                for pattern in brace_expand(expr)? {
                    let glob = GlobBuilder::new(&shell_glob(&pattern))
                        .backslash_escape(false)
                        .build()
                        .map_err(|source| GlobError::Invalid {
                            pattern: pattern.clone(),
                            source,
                        })?;
                    builder.add(glob);
                }
                let set = builder.build().map_err(|source| GlobError::Invalid {
                    pattern: expr.to_owned(),
                    source,
                })?;
                Ok(NameMatcher::Globs(set))
            }
        }
    }
}

/// Keeps candidates whose base name is included and not excluded.
#[derive(Debug, Clone)]
pub struct GlobFilter {
    include: NameMatcher,
    exclude: NameMatcher,
}

impl Default for GlobFilter {
    fn default() -> Self {
        Self {
            include: NameMatcher::All,
            exclude: NameMatcher::Nothing,
        }
    }
}

impl GlobFilter {
    /// An absent or empty expression leaves that side of the filter open.
    pub fn new(only: Option<&str>, exclude: Option<&str>) -> Result<Self, GlobError> {
        Ok(Self {
            include: NameMatcher::compile(only, NameMatcher::All)?,
            exclude: NameMatcher::compile(exclude, NameMatcher::Nothing)?,
        })
    }

    /// Exclusion wins over inclusion.
    pub fn accepts(&self, candidate: &Candidate) -> bool {
        let name = candidate.file_name();
        self.include.matches(name) && !self.exclude.matches(name)
    }
}

/// Expand `{a,b}` alternations into separate patterns, left to right, nesting allowed.
/// Groups without a top-level comma are kept literally and `\` escapes the next character.
pub fn brace_expand(expr: &str) -> Result<Vec<String>, GlobError> {
    let Some((open, close, alternatives)) = find_group(expr)? else {
        return Ok(vec![expr.to_owned()]);
    };

    let prefix = &expr[..open];
    let suffix = &expr[close + 1..];
    let mut expanded = Vec::new();
    for alternative in alternatives {
        expanded.extend(brace_expand(&format!("{prefix}{alternative}{suffix}"))?);
    }
    Ok(expanded)
}

/// Locate the first brace group that has at least one top-level comma.
fn find_group(expr: &str) -> Result<Option<(usize, usize, Vec<&str>)>, GlobError> {
    let bytes = expr.as_bytes();
    let mut start = 0;

    while let Some(open) = next_unescaped(bytes, start, b'{') {
        let mut depth = 0usize;
        let mut commas = Vec::new();
        let mut close = None;
        let mut i = open;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        break;
                    }
                }
                b',' if depth == 1 => commas.push(i),
                _ => {}
            }
            i += 1;
        }

        let Some(close) = close else {
            return Err(GlobError::UnbalancedBraces(expr.to_owned()));
        };
        if commas.is_empty() {
            start = open + 1;
            continue;
        }

        let mut alternatives = Vec::with_capacity(commas.len() + 1);
        let mut from = open + 1;
        for comma in commas {
            alternatives.push(&expr[from..comma]);
            from = comma + 1;
        }
        alternatives.push(&expr[from..close]);
        return Ok(Some((open, close, alternatives)));
    }

    Ok(None)
}

/// Rewrite one expanded pattern for globset so only `*`, `?` and `[...]` are special.
/// Braces left over from expansion become literal and `\x` stands for a literal `x`.
fn shell_glob(pattern: &str) -> String {
    let mut glob = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        if in_class {
            glob.push(c);
            in_class = c != ']';
            continue;
        }
        match c {
            '\\' => match chars.next() {
                Some(escaped) => push_literal(&mut glob, escaped),
                None => glob.push('\\'),
            },
            '{' | '}' => push_literal(&mut glob, c),
            '[' => {
                glob.push('[');
                if let Some(negate) = chars.next_if(|next| matches!(next, '!' | '^')) {
                    glob.push(negate);
                }
                // A leading `]` is a member of the class.
                if let Some(bracket) = chars.next_if_eq(&']') {
                    glob.push(bracket);
                }
                in_class = true;
            }
            _ => glob.push(c),
        }
    }
    glob
}

fn push_literal(glob: &mut String, c: char) {
    if matches!(c, '*' | '?' | '[' | ']' | '{' | '}') {
        glob.push('[');
        glob.push(c);
        glob.push(']');
    } else {
        glob.push(c);
    }
}

fn next_unescaped(bytes: &[u8], mut from: usize, target: u8) -> Option<usize> {
    while from < bytes.len() {
        match bytes[from] {
            b'\\' => from += 2,
            byte if byte == target => return Some(from),
            _ => from += 1,
        }
    }
    None
}
