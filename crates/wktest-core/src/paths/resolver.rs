//! One-call layout snapshot for CLI introspection and parity tests.

use std::path::PathBuf;

use serde::Serialize;

/// Everything the port resolved, captured in a single struct.
///
/// This is the "golden truth" for path resolution - use it for:
/// - Tests asserting the resolution is deterministic
/// - The `wktest paths` command output
/// - Debugging baseline-fallback issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLayout {
    /// Engine checkout root.
    pub source_root: PathBuf,
    /// Build-output root for the selected configuration.
    pub build_root: PathBuf,
    /// Driver binary the tests run under.
    pub driver_path: PathBuf,
    /// Image comparison helper.
    pub image_diff_path: PathBuf,
    /// Baseline fallback directories, most specific first.
    pub baseline_search_path: Vec<PathBuf>,
    /// Expectations manifests, least specific first (later overrides).
    pub expectations_files: Vec<PathBuf>,
}

impl std::fmt::Display for ResolvedLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "source_root = {}", self.source_root.display())?;
        writeln!(f, "build_root = {}", self.build_root.display())?;
        writeln!(f, "driver_path = {}", self.driver_path.display())?;
        writeln!(f, "image_diff_path = {}", self.image_diff_path.display())?;
        for (index, path) in self.baseline_search_path.iter().enumerate() {
            writeln!(f, "baseline_search_path[{index}] = {}", path.display())?;
        }
        for (index, path) in self.expectations_files.iter().enumerate() {
            writeln!(f, "expectations_files[{index}] = {}", path.display())?;
        }
        Ok(())
    }
}
