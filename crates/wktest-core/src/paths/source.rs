//! Engine checkout detection and fixed locations inside it.

use std::path::{Path, PathBuf};

use super::error::PathError;
use crate::environ::HostEnv;

/// Environment override naming the engine checkout root.
pub const SOURCE_ROOT_ENV: &str = "WKTEST_SOURCE_ROOT";

/// Environment override naming the build output directory.
pub const BUILD_DIR_ENV: &str = "WKTEST_BUILD_DIR";

/// File name of the per-directory expectations manifest.
pub const EXPECTATIONS_FILENAME: &str = "TestExpectations";

/// A directory is a checkout root when it carries both the script tree
/// and the layout-test tree.
fn looks_like_checkout(dir: &Path) -> bool {
    dir.join("Tools").join("Scripts").is_dir() && dir.join("LayoutTests").is_dir()
}

/// Locate the engine checkout root.
///
/// Resolution order:
/// 1. `WKTEST_SOURCE_ROOT` from the snapshot (highest priority)
/// 2. Upward search from the current directory for a checkout
pub fn source_root(env: &HostEnv) -> Result<PathBuf, PathError> {
    let cwd = std::env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))?;
    source_root_from(env, &cwd)
}

/// Same as [`source_root`], searching upward from an explicit start
/// directory. Split out so tests can resolve against a fixture tree.
pub fn source_root_from(env: &HostEnv, start: &Path) -> Result<PathBuf, PathError> {
    // 1. Runtime override (highest priority)
    if let Some(path) = env.get(SOURCE_ROOT_ENV) {
        let root = PathBuf::from(path);
        if root.is_dir() {
            return Ok(root);
        }
        return Err(PathError::NotADirectory(root));
    }

    // 2. Walk up from the start directory
    let mut candidate = Some(start);
    while let Some(dir) = candidate {
        if looks_like_checkout(dir) {
            return Ok(dir.to_path_buf());
        }
        candidate = dir.parent();
    }

    Err(PathError::NoSourceRoot {
        searched_from: start.to_path_buf(),
        override_var: SOURCE_ROOT_ENV,
    })
}

/// The layout-test tree under the checkout.
#[must_use]
pub fn layout_tests_dir(source_root: &Path) -> PathBuf {
    source_root.join("LayoutTests")
}

/// The harness script directory under the checkout.
#[must_use]
pub fn scripts_dir(source_root: &Path) -> PathBuf {
    source_root.join("Tools").join("Scripts")
}

/// Full path of a named harness script.
#[must_use]
pub fn script_path(source_root: &Path, name: &str) -> PathBuf {
    scripts_dir(source_root).join(name)
}

/// The build-tool wrapper shipped with the checkout.
#[must_use]
pub fn jhbuild_wrapper_path(source_root: &Path) -> PathBuf {
    source_root
        .join("Tools")
        .join("jhbuild")
        .join("jhbuild-wrapper")
}

/// Baseline directory for one ladder entry, e.g. `platform/qt-linux`.
#[must_use]
pub fn baseline_path(layout_tests_dir: &Path, name: &str) -> PathBuf {
    layout_tests_dir.join("platform").join(name)
}
