//! Print the assembled harness command lines.
//!
//! The port contributes flags and paths; actually invoking the build
//! or the harness is the harness's own business.

use anyhow::Result;
use wktest_core::ports::PlatformPort;
use wktest_runtime::QtPort;

pub fn execute_build(port: &QtPort) -> Result<()> {
    println!("{}", port.build_webkit_command(None).join(" "));
    Ok(())
}

pub fn execute_run(port: &QtPort) -> Result<()> {
    println!("{}", port.run_webkit_tests_command().join(" "));
    Ok(())
}
