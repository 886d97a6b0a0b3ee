//! Subcommand definitions.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Print every path the port resolved (baselines, expectations, binaries)
    Paths {
        /// Emit machine-readable JSON instead of key = value lines
        #[arg(long)]
        json: bool,
    },

    /// Check the system dependencies required to run layout tests
    CheckDeps,

    /// Print the environment a server subprocess would receive
    Env {
        /// Server the environment is built for (informational)
        #[arg(long)]
        server: Option<String>,
    },

    /// Print the engine build command for this port
    Build,

    /// Print the layout-test run command for this port
    Run,

    /// Print the probed toolkit version
    Version,
}
