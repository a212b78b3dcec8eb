//! Running the editor as a child process.

use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

use crate::app::editor::EditorCommand;

/// Spawn the editor, wait for it, and translate its status into an exit code.
pub fn run_editor(command: &EditorCommand) -> Result<i32> {
    let argv = command.argv();
    let (program, args) = argv
        .split_first()
        .context("editor command missing program")?;

    let name = program.to_string_lossy();
    tracing::debug!(program = %name, files = command.files().len(), "launching editor");
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("failed to launch editor: {name}"))?;
    Ok(exit_code(status))
}

/// The child's exit code, or 1 when it was terminated by a signal.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
