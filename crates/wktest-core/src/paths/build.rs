//! Build-output locations for a configuration.

use std::path::{Path, PathBuf};

use super::source::BUILD_DIR_ENV;
use crate::domain::Configuration;
use crate::environ::HostEnv;

/// Root of the build outputs the port resolves binaries against.
///
/// Resolution order:
/// 1. `WKTEST_BUILD_DIR` from the snapshot
/// 2. `<source_root>/WebKitBuild/<Debug|Release>`
#[must_use]
pub fn build_root(env: &HostEnv, source_root: &Path, configuration: Configuration) -> PathBuf {
    if let Some(path) = env.get(BUILD_DIR_ENV) {
        return PathBuf::from(path);
    }
    source_root
        .join("WebKitBuild")
        .join(configuration.dir_name())
}

/// Directory holding built executables (driver, ImageDiff).
#[must_use]
pub fn bin_dir(build_root: &Path) -> PathBuf {
    build_root.join("bin")
}

/// Directory holding built libraries and plugins.
#[must_use]
pub fn lib_dir(build_root: &Path) -> PathBuf {
    build_root.join("lib")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_follows_configuration() {
        let root = build_root(
            &HostEnv::empty(),
            Path::new("/checkout"),
            Configuration::Release,
        );
        assert_eq!(root, Path::new("/checkout/WebKitBuild/Release"));
        assert_eq!(bin_dir(&root), Path::new("/checkout/WebKitBuild/Release/bin"));
        assert_eq!(lib_dir(&root), Path::new("/checkout/WebKitBuild/Release/lib"));
    }

    #[test]
    fn env_override_replaces_the_whole_root() {
        let env = HostEnv::from_pairs([(BUILD_DIR_ENV, "/fast-ssd/build")]);
        let root = build_root(&env, Path::new("/checkout"), Configuration::Debug);
        assert_eq!(root, Path::new("/fast-ssd/build"));
    }
}
