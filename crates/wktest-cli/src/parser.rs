//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Command-line interface definition for the Qt port layer tool.
///
/// This is the top-level parser that handles global options and
/// dispatches to subcommands.
#[derive(Parser)]
#[command(name = "wktest")]
#[command(about = "Qt platform port layer for the layout-test harness")]
#[command(version)]
pub struct Cli {
    /// Use the out-of-process test runner (changes paths and flags)
    #[arg(long = "wk2", global = true)]
    pub wk2: bool,

    /// Resolve paths against a release build (default is debug)
    #[arg(long = "release", global = true)]
    pub release: bool,

    /// Override the engine checkout root for this invocation
    #[arg(long = "source-root", global = true, env = "WKTEST_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// Fully qualified port name to act as (e.g. qt-mac)
    #[arg(long = "platform", global = true)]
    pub platform: Option<String>,

    /// Wrapper command prefixed to driver invocations (e.g. valgrind)
    #[arg(long = "wrapper", global = true)]
    pub wrapper: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
