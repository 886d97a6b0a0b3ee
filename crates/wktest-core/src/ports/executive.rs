//! Command-execution port.
//!
//! The port layer never spawns processes itself; it asks an `Executive`.
//! Implementations live in adapters (e.g., wktest-runtime). Probes that
//! must not fail the caller use the error-ignoring mode.

use thiserror::Error;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The command could not be started at all.
    #[error("Failed to run {command}: {reason}")]
    SpawnFailed { command: String, reason: String },

    /// The command ran and exited unsuccessfully.
    #[error("{command} exited with status {code}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// Synchronous command execution.
///
/// `run_command` blocks until the command exits and returns its stdout.
/// No timeout or cancellation is handled at this layer; that is the
/// implementation's concern.
pub trait Executive: Send + Sync {
    /// Run `argv` and return captured stdout on success.
    fn run_command(&self, argv: &[String]) -> Result<String, ExecError>;

    /// Run `argv`, swallowing every failure. Returns captured stdout, or
    /// an empty string when the command could not run or exited badly.
    fn run_command_ignoring_errors(&self, argv: &[String]) -> String {
        self.run_command(argv).unwrap_or_default()
    }
}
