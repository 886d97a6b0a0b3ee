//! Process execution and OS-level port implementations for wktest.
//!
//! Everything here implements a `wktest-core` port against the local
//! system: command execution, build-tool wrapper detection, display
//! driver selection, crash-log generation, and the Qt platform port
//! itself. The CLI crate wires these together.

pub mod crash_log;
pub mod driver;
pub mod executive;
pub mod jhbuild;
pub mod port;

// Re-export the main implementations
pub use crash_log::GdbCrashLogGenerator;
pub use driver::{DriverKind, USE_NATIVE_XDISPLAY};
pub use executive::SystemExecutive;
pub use jhbuild::JhbuildWrapper;
pub use port::{DEFAULT_TOOL_VERSION, PORT_FLAG, QtPort, TESTFONTS_ENV};
