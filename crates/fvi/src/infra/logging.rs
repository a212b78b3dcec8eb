//! Diagnostic output through `tracing`.

use std::io::{self, IsTerminal};

use tracing::Level;

/// Install the stderr subscriber. Warnings are shown only when `show_warnings` is set;
/// errors are always shown.
pub fn init(show_warnings: bool) {
    let level = if show_warnings {
        Level::WARN
    } else {
        Level::ERROR
    };

    // A second initialization (e.g. from tests sharing a process) is not an error.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
