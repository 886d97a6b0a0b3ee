//! Composition root: the one place infrastructure is wired together.

use std::sync::Arc;

use anyhow::{Context, Result};

use wktest_core::domain::{Configuration, PortOptions};
use wktest_core::environ::HostEnv;
use wktest_core::paths::SOURCE_ROOT_ENV;
use wktest_runtime::{QtPort, SystemExecutive};

use crate::parser::Cli;

/// Everything a handler needs, built once per invocation.
pub struct CliContext {
    pub port: QtPort,
}

/// Snapshot the ambient environment, fold in the CLI overrides, and
/// construct the port against the local system executive.
pub fn bootstrap(cli: &Cli) -> Result<CliContext> {
    let mut host_env = HostEnv::from_ambient();
    if let Some(root) = &cli.source_root {
        host_env.insert(SOURCE_ROOT_ENV, root.display().to_string());
    }

    let configuration = if cli.release {
        Configuration::Release
    } else {
        Configuration::Debug
    };
    let options = PortOptions {
        webkit_test_runner: cli.wk2,
        configuration,
        wrapper: cli.wrapper.clone(),
    };

    let port = QtPort::new(
        host_env,
        options,
        Arc::new(SystemExecutive::new()),
        cli.platform.as_deref(),
    )
    .context("locating the engine checkout")?;

    Ok(CliContext { port })
}
