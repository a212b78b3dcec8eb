//! Domain-specific errors.

use std::io;

use thiserror::Error;

/// Why a candidate could not be read as text.
#[derive(Debug, Error)]
pub enum ReadFailure {
    #[error("no such file or directory")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("is a directory")]
    IsDirectory,
    #[error("is a binary file")]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for ReadFailure {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ReadFailure::NotFound,
            io::ErrorKind::PermissionDenied => ReadFailure::PermissionDenied,
            io::ErrorKind::IsADirectory => ReadFailure::IsDirectory,
            _ => ReadFailure::Io(err),
        }
    }
}

/// Invalid UTF-8 found while decoding a file, with the bytes surrounding the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid utf-8 sequence of {len} byte(s) at offset {offset}")]
pub struct DecodeError {
    /// Byte offset of the first invalid byte.
    pub offset: usize,
    /// Length of the invalid span.
    pub len: usize,
    /// Up to [`DecodeError::CONTEXT`] bytes before the span, the span itself, and up to
    /// [`DecodeError::CONTEXT`] bytes after it.
    pub window: Vec<u8>,
    /// Offset of the invalid span inside `window`.
    pub window_offset: usize,
}

impl DecodeError {
    pub const CONTEXT: usize = 25;

    /// Build the error for an invalid span `offset..offset + len` in `bytes`.
    pub fn new(bytes: &[u8], offset: usize, len: usize) -> Self {
        let begin = offset.saturating_sub(Self::CONTEXT);
        let end = (offset + len + Self::CONTEXT).min(bytes.len());
        Self {
            offset,
            len,
            window: bytes[begin..end].to_vec(),
            window_offset: offset - begin,
        }
    }

    /// The context line with non-printable bytes escaped.
    pub fn context_line(&self) -> String {
        escape(&self.window)
    }

    /// A line of spaces and carets aligned with [`DecodeError::context_line`] that marks the
    /// invalid span.
    pub fn marker_line(&self) -> String {
        let lead = escape(&self.window[..self.window_offset]).chars().count();
        let span_end = (self.window_offset + self.len).min(self.window.len());
        let width = escape(&self.window[self.window_offset..span_end])
            .chars()
            .count();
        format!("{}{}", " ".repeat(lead), "^".repeat(width.max(1)))
    }
}

fn escape(bytes: &[u8]) -> String {
    bytes.escape_ascii().to_string()
}

/// Failure to compile an include or exclude glob.
#[derive(Debug, Error)]
pub enum GlobError {
    #[error("unbalanced braces in glob '{0}'")]
    UnbalancedBraces(String),
    #[error("invalid glob '{pattern}': {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
