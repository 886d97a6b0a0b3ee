//! CLI entry point - the composition root.
//!
//! This is the only place where infrastructure is wired together via
//! bootstrap. Command dispatch routes to handlers which delegate to the
//! port.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wktest_cli::{Cli, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    // A checkout-local .env may carry WKTEST_* overrides and the font path.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let context = bootstrap(&cli)?;
    match &cli.command {
        Commands::Paths { json } => handlers::paths::execute(&context.port, *json),
        Commands::CheckDeps => handlers::check_deps::execute(&context.port),
        Commands::Env { server } => handlers::env::execute(&context.port, server.as_deref()),
        Commands::Build => handlers::harness::execute_build(&context.port),
        Commands::Run => handlers::harness::execute_run(&context.port),
        Commands::Version => handlers::version::execute(&context.port),
    }
}
