//! Option bag handed to a port by the orchestrator.
//!
//! All fields carry defaults so partially specified invocations work;
//! the port reads these instead of the ambient process environment.

use serde::{Deserialize, Serialize};

/// Build configuration a port resolves paths and commands against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Configuration {
    #[default]
    Debug,
    Release,
}

impl Configuration {
    /// Directory name used under the build tree, e.g. `WebKitBuild/Debug`.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }

    /// Flag understood by the build and run scripts.
    #[must_use]
    pub const fn build_flag(self) -> &'static str {
        match self {
            Self::Debug => "--debug",
            Self::Release => "--release",
        }
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Options the orchestrator passes to a port at construction time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PortOptions {
    /// Use the out-of-process test runner architecture (paths and command
    /// flags change with it).
    pub webkit_test_runner: bool,

    /// Build configuration to resolve output paths against.
    pub configuration: Configuration,

    /// Wrapper command prefixed to driver invocations (e.g. `valgrind`).
    /// A detected build-tool wrapper is merged in front of this.
    pub wrapper: Option<String>,
}

impl PortOptions {
    /// Options for a legacy in-process run against a debug build.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            webkit_test_runner: false,
            configuration: Configuration::Debug,
            wrapper: None,
        }
    }

    /// Enable the out-of-process runner.
    #[must_use]
    pub const fn with_webkit_test_runner(mut self, enabled: bool) -> Self {
        self.webkit_test_runner = enabled;
        self
    }

    /// Select the build configuration.
    #[must_use]
    pub const fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }
}
