//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No process or filesystem implementation details in signatures
//! - Synchronous throughout: the port layer has no suspension points
//! - Probes that must not fail the caller use the error-ignoring mode

pub mod crash_log;
pub mod executive;
pub mod platform_port;

pub use crash_log::CrashLogGenerator;
pub use executive::{ExecError, Executive};
pub use platform_port::{
    PlatformPort, base_build_webkit_command, base_check_sys_deps, base_run_webkit_tests_command,
    script_shell_command,
};
