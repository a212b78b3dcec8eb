//! Infrastructure adapters for settings, file IO, logging, signals, and the editor process.

pub mod config;
pub mod fs;
pub mod logging;
pub mod process;
pub mod signal;
