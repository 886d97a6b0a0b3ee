//! Print the server subprocess environment.

use anyhow::Result;
use wktest_core::ports::PlatformPort;
use wktest_runtime::QtPort;

pub fn execute(port: &QtPort, server: Option<&str>) -> Result<()> {
    let environment = port.setup_environ_for_server(server);
    for (name, value) in &environment {
        println!("{name}={value}");
    }
    Ok(())
}
