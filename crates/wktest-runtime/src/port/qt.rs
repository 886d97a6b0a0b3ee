//! Qt platform port.
//!
//! Binds the generic layout-test orchestrator to the Qt build of the
//! engine: baseline fallback ladder, expectations layering, driver
//! subprocess environment, platform flags for the harness scripts, and
//! crash-log generation. Everything external goes through the injected
//! `Executive` and the `HostEnv` snapshot.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use std::time::SystemTime;

use regex::Regex;
use tracing::{error, warn};

use wktest_core::domain::{
    Configuration, PortIdentity, PortOptions, QT_PORT_NAME, TestConfiguration,
    all_test_configurations,
};
use wktest_core::environ::{self, HostEnv};
use wktest_core::paths::{self, EXPECTATIONS_FILENAME, PathError};
use wktest_core::ports::{self, CrashLogGenerator, Executive, PlatformPort};

use crate::crash_log::GdbCrashLogGenerator;
use crate::driver::DriverKind;
use crate::jhbuild::JhbuildWrapper;

/// Flag the harness scripts take to select this port.
pub const PORT_FLAG: &str = "--qt";

/// Version assumed when the toolkit probe cannot run at all.
pub const DEFAULT_TOOL_VERSION: &str = "5.0";

/// Environment variable naming the test font checkout; required to run.
pub const TESTFONTS_ENV: &str = "WEBKIT_TESTFONTS";

/// Variables copied from the snapshot into every server environment,
/// on top of the base allow-list.
const COPIED_SERVER_VARIABLES: [&str; 7] = [
    "QT_DRT_WEBVIEW_MODE",
    "DYLD_IMAGE_SUFFIX",
    "QT_WEBKIT_LOG",
    "DISABLE_NI_WARNING",
    "QT_WEBKIT_PAUSE_UI_PROCESS",
    "QT_QPA_PLATFORM_PLUGIN_PATH",
    "QT_WEBKIT_DISABLE_UIPROCESS_DUMPPIXELS",
];

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Qt\s+version\s+(?P<version>\d+\.\d+)").expect("version pattern compiles")
});

/// The Qt port adapter.
///
/// Single-threaded by contract: the memoized probe results are
/// per-instance and unguarded.
pub struct QtPort {
    identity: PortIdentity,
    options: PortOptions,
    host_env: HostEnv,
    executive: Arc<dyn Executive>,
    source_root: PathBuf,
    build_root: PathBuf,
    driver_kind: DriverKind,
    jhbuild: Option<JhbuildWrapper>,
    tool_version: OnceCell<String>,
    image_diff_path: OnceCell<PathBuf>,
}

impl QtPort {
    /// Construct against the checkout found from the current directory
    /// (or the snapshot's override).
    pub fn new(
        host_env: HostEnv,
        options: PortOptions,
        executive: Arc<dyn Executive>,
        requested_name: Option<&str>,
    ) -> Result<Self, PathError> {
        let source_root = paths::source_root(&host_env)?;
        Ok(Self::with_source_root(
            host_env,
            options,
            executive,
            source_root,
            requested_name,
        ))
    }

    /// Construct against an explicit checkout root.
    #[must_use]
    pub fn with_source_root(
        host_env: HostEnv,
        mut options: PortOptions,
        executive: Arc<dyn Executive>,
        source_root: PathBuf,
        requested_name: Option<&str>,
    ) -> Self {
        let full_name = PortIdentity::determine_full_name(Self::host_os_name(), requested_name);
        let identity = PortIdentity::parse(&full_name);
        let build_root = paths::build_root(&host_env, &source_root, options.configuration);
        let driver_kind = DriverKind::select(&host_env);

        // A jhbuild-managed checkout forces its wrapper in front of any
        // user-supplied one.
        let jhbuild = JhbuildWrapper::detect(&source_root);
        if let Some(jhbuild) = &jhbuild {
            options.wrapper = Some(match options.wrapper.take() {
                Some(user_wrapper) => format!("{} {user_wrapper}", jhbuild.shell_prefix()),
                None => jhbuild.shell_prefix(),
            });
        }

        Self {
            identity,
            options,
            host_env,
            executive,
            source_root,
            build_root,
            driver_kind,
            jhbuild,
            tool_version: OnceCell::new(),
            image_diff_path: OnceCell::new(),
        }
    }

    /// OS name of the machine the port runs on (not the variant the
    /// port was asked for).
    #[must_use]
    pub const fn host_os_name() -> &'static str {
        if cfg!(target_os = "macos") {
            "mac"
        } else if cfg!(target_os = "windows") {
            "win"
        } else {
            "linux"
        }
    }

    #[must_use]
    pub fn identity(&self) -> &PortIdentity {
        &self.identity
    }

    #[must_use]
    pub const fn driver_kind(&self) -> DriverKind {
        self.driver_kind
    }

    #[must_use]
    pub const fn jhbuild_wrapper(&self) -> Option<&JhbuildWrapper> {
        self.jhbuild.as_ref()
    }

    /// Toolkit version, probed once per instance.
    ///
    /// Runs `qmake -v` (through the build-tool wrapper when one is
    /// active) and extracts the `major.minor` pair. A probe that cannot
    /// run yields [`DEFAULT_TOOL_VERSION`]; subsequent calls never
    /// re-invoke the command.
    pub fn toolkit_version(&self) -> &str {
        self.tool_version.get_or_init(|| self.probe_tool_version())
    }

    fn probe_tool_version(&self) -> String {
        let argv = self.wrapped(&["qmake", "-v"]);
        match self.executive.run_command(&argv) {
            Ok(output) => output
                .lines()
                .find_map(|line| {
                    VERSION_PATTERN
                        .captures(line)
                        .map(|captures| captures["version"].to_string())
                })
                .unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "toolkit version probe failed, assuming {DEFAULT_TOOL_VERSION}");
                DEFAULT_TOOL_VERSION.to_string()
            }
        }
    }

    fn wrapped(&self, argv: &[&str]) -> Vec<String> {
        self.jhbuild.as_ref().map_or_else(
            || argv.iter().map(ToString::to_string).collect(),
            |jhbuild| jhbuild.wrap(argv),
        )
    }

    /// Directory-name ladder shared by baseline fallback and
    /// expectations layering. Most specific first: the runner-mode
    /// entry (mac gets an extra one in wk2 mode), the version-named
    /// entry, family-os, family.
    fn search_paths(&self) -> Vec<String> {
        let mut search_paths = Vec::new();
        if self.options.webkit_test_runner {
            if self.identity.operating_system() == "mac" {
                search_paths.push("qt-mac-wk2".to_string());
            }
            search_paths.push("qt-wk2".to_string());
        } else {
            search_paths.push("qt-wk1".to_string());
        }
        search_paths.push(format!("qt-{}", self.toolkit_version()));
        search_paths.push(format!(
            "{QT_PORT_NAME}-{}",
            self.identity.operating_system()
        ));
        search_paths.push(QT_PORT_NAME.to_string());
        search_paths
    }

    /// Every version x build-type configuration this port can be asked
    /// about.
    #[must_use]
    pub fn all_test_configurations(&self) -> Vec<TestConfiguration> {
        all_test_configurations()
    }

    /// The built engine library symbols are read from.
    #[must_use]
    pub fn path_to_webcore_library(&self) -> PathBuf {
        let lib_dir = paths::lib_dir(&self.build_root);
        if self.identity.operating_system() == "mac" {
            lib_dir
                .join("QtWebKitWidgets.framework")
                .join("QtWebKitWidgets")
        } else {
            lib_dir.join("libQt5WebKitWidgets.so")
        }
    }

    /// Every built module worth scanning for symbols. The build may
    /// split the engine across many libraries, so all of them count.
    #[must_use]
    pub fn modules_to_search_for_symbols(&self) -> Vec<PathBuf> {
        let lib_dir = paths::lib_dir(&self.build_root);
        let Ok(entries) = std::fs::read_dir(&lib_dir) else {
            return Vec::new();
        };

        let os = self.identity.operating_system().to_string();
        let mut modules: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if os == "mac" {
                    // The binary inside a framework bundle is named
                    // after the bundle.
                    let stem = name.strip_suffix(".framework")?;
                    Some(entry.path().join(stem))
                } else {
                    let suffix = if os == "win" { ".dll" } else { ".so" };
                    (name.starts_with("lib") && name.ends_with(suffix)).then(|| entry.path())
                }
            })
            .collect();
        modules.sort();
        modules
    }

    /// Command opening a results page in the bundled browser.
    #[must_use]
    pub fn show_results_command(&self, results_path: &Path) -> Vec<String> {
        let mut command = ports::script_shell_command(&self.source_root, "run-minibrowser");
        command.push(format!("file://{}", results_path.display()));
        if self.options.webkit_test_runner {
            command.push("-2".to_string());
        }
        command
    }

    fn make_args(&self) -> String {
        format!("--makeargs=-j{}", num_cpus::get())
    }
}

impl PlatformPort for QtPort {
    fn port_name(&self) -> &str {
        self.identity.full_name()
    }

    fn operating_system(&self) -> &str {
        self.identity.operating_system()
    }

    fn options(&self) -> &PortOptions {
        &self.options
    }

    fn host_env(&self) -> &HostEnv {
        &self.host_env
    }

    fn source_root(&self) -> &Path {
        &self.source_root
    }

    fn build_root(&self) -> &Path {
        &self.build_root
    }

    fn tool_version(&self) -> String {
        self.toolkit_version().to_string()
    }

    fn path_to_image_diff(&self) -> PathBuf {
        self.image_diff_path
            .get_or_init(|| paths::bin_dir(&self.build_root).join("ImageDiff"))
            .clone()
    }

    fn baseline_search_path(&self) -> Vec<PathBuf> {
        let layout_tests = paths::layout_tests_dir(&self.source_root);
        self.search_paths()
            .iter()
            .map(|name| paths::baseline_path(&layout_tests, name))
            .collect()
    }

    fn expectations_files(&self) -> Vec<PathBuf> {
        let layout_tests = paths::layout_tests_dir(&self.source_root);
        let mut names = self.search_paths();
        if self.options.webkit_test_runner {
            names.push("wk2".to_string());
        }

        // Consumed in reverse: the last directory listed here is the
        // most specific, and its expectations override earlier ones.
        let mut files: Vec<PathBuf> = names
            .iter()
            .map(|name| paths::baseline_path(&layout_tests, name).join(EXPECTATIONS_FILENAME))
            .collect();
        files.reverse();
        files
    }

    fn setup_environ_for_server(&self, server_name: Option<&str>) -> BTreeMap<String, String> {
        let _ = server_name;
        let mut clean_env = environ::base_server_environment(&self.host_env);
        clean_env.insert(
            "QTWEBKIT_PLUGIN_PATH".to_string(),
            paths::lib_dir(&self.build_root).display().to_string(),
        );
        for name in COPIED_SERVER_VARIABLES {
            environ::copy_value_if_set(&mut clean_env, &self.host_env, name);
        }

        if self.driver_kind.is_software_rendering() {
            if let Some(jhbuild) = &self.jhbuild {
                let llvmpipe_path = self
                    .executive
                    .run_command_ignoring_errors(&jhbuild.wrap(&["printenv", "LLVMPIPE_LIBGL_PATH"]));
                let llvmpipe_path = llvmpipe_path.trim();
                if !llvmpipe_path.is_empty()
                    && Path::new(llvmpipe_path).join("libGL.so").exists()
                {
                    // Force the Gallium llvmpipe software rasterizer.
                    let mut value = llvmpipe_path.to_string();
                    if let Some(ambient) = self.host_env.get("LD_LIBRARY_PATH") {
                        value.push(':');
                        value.push_str(ambient);
                    }
                    clean_env.insert("LD_LIBRARY_PATH".to_string(), value);
                } else {
                    warn!("Gallium llvmpipe driver not found; leaving LD_LIBRARY_PATH unchanged");
                }
            }
        }
        clean_env
    }

    fn check_sys_deps(&self) -> bool {
        let result = ports::base_check_sys_deps();
        if !self.host_env.contains(TESTFONTS_ENV) {
            error!("The {TESTFONTS_ENV} environment variable is not defined or not set properly.");
            error!(
                "You must set it before running the tests; fetch the fonts from \
                 https://github.com/carewolf/qtwebkit-testfonts.git"
            );
            return false;
        }
        result
    }

    // Not ready for parallel testing; run everything in one worker.
    fn default_child_processes(&self) -> usize {
        1
    }

    fn build_webkit_command(&self, build_style: Option<Configuration>) -> Vec<String> {
        let style = build_style.unwrap_or(self.options.configuration);
        let mut command = ports::base_build_webkit_command(&self.source_root, style);
        command.push(PORT_FLAG.to_string());
        if !self.options.webkit_test_runner {
            command.push("--no-webkit2".to_string());
        }
        command.push(self.make_args());
        command
    }

    fn run_webkit_tests_command(&self) -> Vec<String> {
        let mut command = ports::base_run_webkit_tests_command(&self.source_root);
        command.push(PORT_FLAG.to_string());
        if self.options.webkit_test_runner {
            command.push("-2".to_string());
        }
        command
    }

    fn supports_per_test_timeout(&self) -> bool {
        true
    }

    // The driver is produced by the main build step.
    fn builds_driver_during_build(&self) -> bool {
        true
    }

    fn crash_log(
        &self,
        process_name: &str,
        pid: u32,
        stdout: &str,
        stderr: &str,
        newer_than: Option<SystemTime>,
    ) -> String {
        GdbCrashLogGenerator::new(
            Arc::clone(&self.executive),
            process_name,
            pid,
            newer_than,
            self.path_to_driver(),
            self.identity.full_name(),
            self.options.configuration,
        )
        .generate_crash_log(stdout, stderr)
    }
}
