//! Reading candidate files as UTF-8 text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::errors::{DecodeError, ReadFailure};

/// How undecodable bytes are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Any invalid UTF-8 fails the read.
    #[default]
    Strict,
    /// Invalid bytes are dropped and the remaining text is returned.
    Lenient,
}

/// Read the whole file and decode it. The handle is closed before returning on every path.
pub fn read_text(path: &Path, mode: DecodeMode) -> Result<String, ReadFailure> {
    let mut bytes = Vec::new();
    {
        let mut file = File::open(path)?;
        file.read_to_end(&mut bytes)?;
    }
    Ok(decode(bytes, mode)?)
}

/// Decode raw bytes as UTF-8 according to `mode`.
pub fn decode(bytes: Vec<u8>, mode: DecodeMode) -> Result<String, DecodeError> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => match mode {
            DecodeMode::Lenient => Ok(err
                .as_bytes()
                .utf8_chunks()
                .map(|chunk| chunk.valid())
                .collect()),
            DecodeMode::Strict => {
                let utf8 = err.utf8_error();
                let offset = utf8.valid_up_to();
                let bytes = err.as_bytes();
                // A truncated sequence at end of input has no error length.
                let len = utf8.error_len().unwrap_or(bytes.len() - offset);
                Err(DecodeError::new(bytes, offset, len))
            }
        },
    }
}
