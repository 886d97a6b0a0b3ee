//! Path-related error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during checkout and build-tree resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// No engine checkout found above the starting directory.
    #[error(
        "No engine checkout found above {searched_from} (expected Tools/Scripts and LayoutTests); set {override_var}"
    )]
    NoSourceRoot {
        searched_from: PathBuf,
        override_var: &'static str,
    },

    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDirError(String),
}
