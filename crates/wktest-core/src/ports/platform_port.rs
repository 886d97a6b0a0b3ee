//! The framework-facing contract a platform port fulfills.
//!
//! Default method bodies supply the base framework's behavior; a
//! concrete port overrides where its platform deviates. Overrides that
//! extend (rather than replace) base behavior call the `base_*` free
//! functions this module exports.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::domain::{Configuration, PortOptions};
use crate::environ::{self, HostEnv};
use crate::paths::{self, ResolvedLayout};

/// The base framework's build command: the build script plus the
/// configuration flag. Ports append their platform flags to this.
#[must_use]
pub fn base_build_webkit_command(source_root: &Path, style: Configuration) -> Vec<String> {
    let mut command = script_shell_command(source_root, "build-webkit");
    command.push(style.build_flag().to_string());
    command
}

/// The base framework's test-run command. Ports append their platform
/// flags to this.
#[must_use]
pub fn base_run_webkit_tests_command(source_root: &Path) -> Vec<String> {
    script_shell_command(source_root, "run-webkit-tests")
}

/// The base framework's dependency check. Nothing generic to verify at
/// this layer; ports add their platform preconditions on top.
#[must_use]
pub const fn base_check_sys_deps() -> bool {
    true
}

/// Shell command invoking a named harness script.
#[must_use]
pub fn script_shell_command(source_root: &Path, script_name: &str) -> Vec<String> {
    vec![
        "perl".to_string(),
        paths::script_path(source_root, script_name)
            .display()
            .to_string(),
    ]
}

/// A platform port: the adapter binding the generic test framework to
/// one platform/build configuration.
///
/// Operations are independent; none has preconditions beyond a
/// constructed instance. Single-threaded by contract - memoized values
/// are per-instance and unguarded.
pub trait PlatformPort {
    /// Full port name, e.g. `qt-linux`.
    fn port_name(&self) -> &str;

    /// OS variant parsed at construction time.
    fn operating_system(&self) -> &str;

    /// Options the orchestrator constructed this port with.
    fn options(&self) -> &PortOptions;

    /// Ambient-environment snapshot taken at the composition root.
    fn host_env(&self) -> &HostEnv;

    /// Engine checkout root.
    fn source_root(&self) -> &Path;

    /// Build-output root for the selected configuration.
    fn build_root(&self) -> &Path;

    /// Version string of the platform toolkit, probed once and cached.
    fn tool_version(&self) -> String;

    /// Baseline fallback directories, most specific first.
    fn baseline_search_path(&self) -> Vec<PathBuf>;

    /// Expectations manifests, least specific first (the last listed
    /// directory's expectations override earlier ones).
    fn expectations_files(&self) -> Vec<PathBuf>;

    /// Crash report for a dead driver process.
    fn crash_log(
        &self,
        process_name: &str,
        pid: u32,
        stdout: &str,
        stderr: &str,
        newer_than: Option<SystemTime>,
    ) -> String;

    /// Name of the driver binary for the selected runner architecture.
    fn driver_name(&self) -> &'static str {
        if self.options().webkit_test_runner {
            "WebKitTestRunner"
        } else {
            "DumpRenderTree"
        }
    }

    /// Built driver binary.
    fn path_to_driver(&self) -> PathBuf {
        paths::bin_dir(self.build_root()).join(self.driver_name())
    }

    /// Built image comparison helper.
    fn path_to_image_diff(&self) -> PathBuf {
        paths::bin_dir(self.build_root()).join("ImageDiff")
    }

    /// Fresh environment for a server subprocess. The base framework
    /// copies a fixed allow-list out of the snapshot; ports layer their
    /// platform variables on top.
    fn setup_environ_for_server(&self, server_name: Option<&str>) -> BTreeMap<String, String> {
        let _ = server_name;
        environ::base_server_environment(self.host_env())
    }

    /// Verify the system can run this port's tests. `false` tells the
    /// caller to halt the run; remediation is logged, not raised.
    fn check_sys_deps(&self) -> bool {
        base_check_sys_deps()
    }

    /// Default worker count for test sharding.
    fn default_child_processes(&self) -> usize {
        num_cpus::get()
    }

    /// Command line for building the engine and its test driver.
    fn build_webkit_command(&self, build_style: Option<Configuration>) -> Vec<String> {
        let style = build_style.unwrap_or(self.options().configuration);
        base_build_webkit_command(self.source_root(), style)
    }

    /// Command line for launching the test harness.
    fn run_webkit_tests_command(&self) -> Vec<String> {
        base_run_webkit_tests_command(self.source_root())
    }

    /// Whether the harness may apply a per-test timeout.
    fn supports_per_test_timeout(&self) -> bool {
        false
    }

    /// Whether the main build step already produces the driver (so the
    /// harness must not try to build it separately).
    fn builds_driver_during_build(&self) -> bool {
        false
    }

    /// Everything this port resolved, captured in one call.
    fn resolved_layout(&self) -> ResolvedLayout {
        ResolvedLayout {
            source_root: self.source_root().to_path_buf(),
            build_root: self.build_root().to_path_buf(),
            driver_path: self.path_to_driver(),
            image_diff_path: self.path_to_image_diff(),
            baseline_search_path: self.baseline_search_path(),
            expectations_files: self.expectations_files(),
        }
    }
}
