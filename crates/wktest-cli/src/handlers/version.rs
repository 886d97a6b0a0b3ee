//! Print the probed toolkit version.

use anyhow::Result;
use wktest_core::ports::PlatformPort;
use wktest_runtime::QtPort;

pub fn execute(port: &QtPort) -> Result<()> {
    println!("Qt version: {}", port.tool_version());
    Ok(())
}
