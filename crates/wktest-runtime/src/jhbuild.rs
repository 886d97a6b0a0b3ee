//! Build-tool wrapper detection.
//!
//! Checkouts built through jhbuild ship a wrapper script that must
//! prefix every command touching the built libraries. Detection is a
//! file probe; once detected, the wrapper is fixed for the port's
//! lifetime.

use std::path::Path;

use wktest_core::paths;

/// A detected jhbuild wrapper, ready to prefix commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JhbuildWrapper {
    prefix: Vec<String>,
}

impl JhbuildWrapper {
    /// Probe the checkout for the wrapper script. `None` means the
    /// checkout is not jhbuild-managed and commands run bare.
    #[must_use]
    pub fn detect(source_root: &Path) -> Option<Self> {
        let wrapper = paths::jhbuild_wrapper_path(source_root);
        if wrapper.is_file() {
            Some(Self {
                prefix: vec![
                    wrapper.display().to_string(),
                    "--qt".to_string(),
                    "run".to_string(),
                ],
            })
        } else {
            None
        }
    }

    /// The wrapper command itself.
    #[must_use]
    pub fn command(&self) -> &[String] {
        &self.prefix
    }

    /// Prefix `argv` with the wrapper.
    #[must_use]
    pub fn wrap(&self, argv: &[&str]) -> Vec<String> {
        let mut command = self.prefix.clone();
        command.extend(argv.iter().map(ToString::to_string));
        command
    }

    /// The wrapper as a single shell-style prefix, for merging in front
    /// of a user-supplied wrapper option.
    #[must_use]
    pub fn shell_prefix(&self) -> String {
        self.prefix.join(" ")
    }
}
