//! Port identity: the logical platform name a port answers to.
//!
//! A full port name is the family name plus an operating-system variant,
//! combined as `qt-mac`. The orchestrator may pass a bare family name;
//! in that case the host OS name is appended.

use serde::{Deserialize, Serialize};

/// Family name of the Qt port.
pub const QT_PORT_NAME: &str = "qt";

/// A parsed port identity, immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortIdentity {
    full_name: String,
    operating_system: String,
}

impl PortIdentity {
    /// Resolve the full port name from what the caller requested.
    ///
    /// A requested name that is already fully qualified (non-empty and not
    /// the bare family name) is returned unchanged. Otherwise the host's
    /// OS name is appended to the family name.
    pub fn determine_full_name(host_os_name: &str, requested: Option<&str>) -> String {
        match requested {
            Some(name) if !name.is_empty() && name != QT_PORT_NAME => name.to_string(),
            _ => format!("{QT_PORT_NAME}-{host_os_name}"),
        }
    }

    /// Parse a full port name like `qt-mac` into an identity.
    ///
    /// The operating-system variant is everything after the family prefix;
    /// a bare family name yields itself as the variant (matching how the
    /// orchestrator treats unqualified names it failed to expand).
    pub fn parse(full_name: &str) -> Self {
        let operating_system = full_name
            .strip_prefix("qt-")
            .unwrap_or(full_name)
            .to_string();
        Self {
            full_name: full_name.to_string(),
            operating_system,
        }
    }

    /// The full port name, e.g. `qt-linux`.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The operating-system variant parsed at construction, e.g. `linux`.
    #[must_use]
    pub fn operating_system(&self) -> &str {
        &self.operating_system
    }

    /// The name the out-of-process runner variant of this port answers to.
    #[must_use]
    pub fn wk2_name(&self) -> String {
        format!("{QT_PORT_NAME}-wk2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_family_name_gains_host_os() {
        assert_eq!(
            PortIdentity::determine_full_name("linux", Some("qt")),
            "qt-linux"
        );
        assert_eq!(PortIdentity::determine_full_name("mac", None), "qt-mac");
        assert_eq!(PortIdentity::determine_full_name("win", Some("")), "qt-win");
    }

    #[test]
    fn qualified_name_is_returned_unchanged() {
        assert_eq!(
            PortIdentity::determine_full_name("linux", Some("qt-mac")),
            "qt-mac"
        );
        assert_eq!(
            PortIdentity::determine_full_name("mac", Some("qt-wk2")),
            "qt-wk2"
        );
    }

    #[test]
    fn parse_extracts_operating_system() {
        let identity = PortIdentity::parse("qt-mac");
        assert_eq!(identity.full_name(), "qt-mac");
        assert_eq!(identity.operating_system(), "mac");
    }

    #[test]
    fn wk2_name_is_fixed() {
        assert_eq!(PortIdentity::parse("qt-linux").wk2_name(), "qt-wk2");
    }
}
