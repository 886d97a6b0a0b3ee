//! System command execution over `std::process`.

use std::process::Command;

use tracing::debug;
use wktest_core::ports::{ExecError, Executive};

/// `Executive` implementation that runs commands on the local system,
/// blocking until they exit and capturing their output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutive;

impl SystemExecutive {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Executive for SystemExecutive {
    fn run_command(&self, argv: &[String]) -> Result<String, ExecError> {
        let command_line = argv.join(" ");
        let (program, args) = argv.split_first().ok_or_else(|| ExecError::SpawnFailed {
            command: command_line.clone(),
            reason: "empty command".to_string(),
        })?;

        debug!(command = %command_line, "running external command");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| ExecError::SpawnFailed {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ExecError::CommandFailed {
                command: command_line,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
