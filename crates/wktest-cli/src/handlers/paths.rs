//! Print the resolved layout.

use anyhow::Result;
use wktest_core::ports::PlatformPort;
use wktest_runtime::QtPort;

pub fn execute(port: &QtPort, json: bool) -> Result<()> {
    let layout = port.resolved_layout();
    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        print!("{layout}");
    }
    Ok(())
}
