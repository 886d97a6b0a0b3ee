//! Path resolution for the engine checkout and its build tree.
//!
//! This module provides the canonical path resolution the port layer
//! relies on:
//! - Locating the engine checkout (source root)
//! - Locating build outputs for a configuration
//! - Baseline and expectations directories under the layout-test tree
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user output separately
//! - Environment overrides are read from the injected `HostEnv` snapshot,
//!   never from the ambient process environment

mod build;
mod error;
mod resolver;
mod source;

// Error type
pub use error::PathError;

// Checkout layout
pub use source::{
    BUILD_DIR_ENV, EXPECTATIONS_FILENAME, SOURCE_ROOT_ENV, baseline_path, jhbuild_wrapper_path,
    layout_tests_dir, script_path, scripts_dir, source_root, source_root_from,
};

// Build outputs
pub use build::{bin_dir, build_root, lib_dir};

// One-call snapshot for CLI introspection and parity tests
pub use resolver::ResolvedLayout;
