//! Core domain types and port definitions for the wktest port layer.
//!
//! This crate is pure: no process spawning, no terminal I/O. It defines
//! what a platform port answers to the test orchestrator (the
//! [`ports::PlatformPort`] trait and its base behavior), the domain
//! types those answers are made of, and the path resolution for the
//! engine checkout and build tree. Implementations live in
//! `wktest-runtime`; wiring happens in `wktest-cli`.

pub mod domain;
pub mod environ;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    ALL_VERSIONS, Configuration, PortIdentity, PortOptions, QT_PORT_NAME, TestConfiguration,
    all_test_configurations,
};
pub use environ::{BASE_SERVER_VARIABLES, HostEnv, base_server_environment, copy_value_if_set};
pub use paths::{
    BUILD_DIR_ENV, EXPECTATIONS_FILENAME, PathError, ResolvedLayout, SOURCE_ROOT_ENV,
};
pub use ports::{CrashLogGenerator, ExecError, Executive, PlatformPort};
