//! GDB-based crash log generation.
//!
//! Locates the newest core file the dead driver left behind, asks gdb
//! for a batch backtrace against the driver binary, and assembles a
//! report. Every step degrades into a notice inside the report; the
//! caller always gets a log back.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::warn;
use wktest_core::domain::Configuration;
use wktest_core::ports::{CrashLogGenerator, Executive};

/// Crash-log generator for platforms where crashed drivers dump core.
pub struct GdbCrashLogGenerator {
    executive: Arc<dyn Executive>,
    process_name: String,
    pid: u32,
    newer_than: Option<SystemTime>,
    driver_path: PathBuf,
    port_name: String,
    configuration: Configuration,
}

impl GdbCrashLogGenerator {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        executive: Arc<dyn Executive>,
        process_name: &str,
        pid: u32,
        newer_than: Option<SystemTime>,
        driver_path: PathBuf,
        port_name: &str,
        configuration: Configuration,
    ) -> Self {
        Self {
            executive,
            process_name: process_name.to_string(),
            pid,
            newer_than,
            driver_path,
            port_name: port_name.to_string(),
            configuration,
        }
    }

    /// Directory core files land in, derived from the kernel's core
    /// pattern. An unreadable or relative pattern means the kernel
    /// dumps into the crashed process's working directory.
    fn coredump_directory() -> PathBuf {
        if let Ok(pattern) = std::fs::read_to_string("/proc/sys/kernel/core_pattern") {
            let pattern = pattern.trim();
            if pattern.starts_with('/') {
                if let Some(parent) = Path::new(pattern).parent() {
                    return parent.to_path_buf();
                }
            }
        }
        PathBuf::from(".")
    }

    /// Newest `core*` file in `dir` not older than the crash.
    fn find_coredump(&self, dir: &Path) -> Option<PathBuf> {
        let entries = std::fs::read_dir(dir).ok()?;
        let mut candidates: Vec<(SystemTime, PathBuf)> = entries
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("core")
            })
            .filter_map(|entry| {
                let metadata = entry.metadata().ok()?;
                if !metadata.is_file() {
                    return None;
                }
                let modified = metadata.modified().ok()?;
                if let Some(newer_than) = self.newer_than {
                    if modified < newer_than {
                        return None;
                    }
                }
                Some((modified, entry.path()))
            })
            .collect();

        candidates.sort_by(|a, b| b.0.cmp(&a.0));
        candidates.into_iter().next().map(|(_, path)| path)
    }

    /// Batch backtrace from gdb, or `None` when gdb or the core file
    /// cannot be used.
    fn gdb_backtrace(&self, coredump: &Path) -> Option<String> {
        let argv = vec![
            "gdb".to_string(),
            "--batch".to_string(),
            "-ex".to_string(),
            "thread apply all bt 1024".to_string(),
            self.driver_path.display().to_string(),
            coredump.display().to_string(),
        ];
        match self.executive.run_command(&argv) {
            Ok(output) => Some(output),
            Err(e) => {
                warn!(error = %e, "gdb backtrace failed");
                None
            }
        }
    }
}

impl CrashLogGenerator for GdbCrashLogGenerator {
    fn generate_crash_log(&self, stdout: &str, stderr: &str) -> String {
        let mut log = format!(
            "Crash log for {} (pid {}), {} port, {} configuration\n",
            self.process_name, self.pid, self.port_name, self.configuration
        );

        let backtrace = self
            .find_coredump(&Self::coredump_directory())
            .and_then(|coredump| self.gdb_backtrace(&coredump));
        match backtrace {
            Some(backtrace) => {
                log.push_str(&backtrace);
                if !backtrace.ends_with('\n') {
                    log.push('\n');
                }
            }
            None => {
                log.push_str(&format!(
                    "No usable core file found for {}:{}; core dumps may be disabled.\n",
                    self.process_name, self.pid
                ));
            }
        }

        log.push_str("STDOUT:\n");
        log.push_str(stdout);
        if !stdout.ends_with('\n') {
            log.push('\n');
        }
        log.push_str("STDERR:\n");
        log.push_str(stderr);
        if !stderr.is_empty() && !stderr.ends_with('\n') {
            log.push('\n');
        }
        log
    }
}
