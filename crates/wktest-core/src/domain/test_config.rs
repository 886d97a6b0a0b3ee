//! Test-configuration matrix advertised by the port.

use serde::{Deserialize, Serialize};

use super::options::Configuration;

/// Operating-system variants this port family is built for.
pub const ALL_VERSIONS: [&str; 3] = ["linux", "win", "mac"];

/// One cell of the version x build-type matrix the orchestrator can
/// address expectations at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfiguration {
    pub version: String,
    pub architecture: String,
    pub build_type: Configuration,
}

/// Every configuration the port supports. The architecture is fixed;
/// only the OS variant and build type vary.
#[must_use]
pub fn all_test_configurations() -> Vec<TestConfiguration> {
    let mut configurations = Vec::new();
    for version in ALL_VERSIONS {
        for build_type in [Configuration::Debug, Configuration::Release] {
            configurations.push(TestConfiguration {
                version: version.to_string(),
                architecture: "x86".to_string(),
                build_type,
            });
        }
    }
    configurations
}
