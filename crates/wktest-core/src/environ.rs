//! Ambient-environment snapshot and clean child-environment construction.
//!
//! Ports never read `std::env` directly for test-visible behavior: the
//! composition root snapshots the ambient environment once into a
//! [`HostEnv`] and passes it in. Child environments are always built
//! fresh from an allow-list copy, so the ambient environment is never
//! mutated and never leaks wholesale into driver subprocesses.

use std::collections::BTreeMap;

/// Variables every server subprocess inherits from the ambient
/// environment, regardless of port.
pub const BASE_SERVER_VARIABLES: [&str; 9] = [
    "PATH",
    "HOME",
    "USER",
    "LANG",
    "LC_ALL",
    "DISPLAY",
    "XAUTHORITY",
    "LD_LIBRARY_PATH",
    "WEBKIT_TESTFONTS",
];

/// Immutable snapshot of the ambient process environment.
#[derive(Debug, Clone, Default)]
pub struct HostEnv {
    vars: BTreeMap<String, String>,
}

impl HostEnv {
    /// Snapshot the ambient environment. Call once, at the composition
    /// root; everything downstream works off the snapshot.
    #[must_use]
    pub fn from_ambient() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit pairs. This is how tests inject an
    /// environment without touching the real one.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// An empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Override one entry of the snapshot (composition-root use only).
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

/// Copy `name` from the snapshot into `clean_env` if it is set.
pub fn copy_value_if_set(clean_env: &mut BTreeMap<String, String>, host: &HostEnv, name: &str) {
    if let Some(value) = host.get(name) {
        clean_env.insert(name.to_string(), value.to_string());
    }
}

/// The base framework's server environment: a fresh mapping holding only
/// the allow-listed variables present in the snapshot. Ports layer their
/// own entries on top of this.
#[must_use]
pub fn base_server_environment(host: &HostEnv) -> BTreeMap<String, String> {
    let mut clean_env = BTreeMap::new();
    for name in BASE_SERVER_VARIABLES {
        copy_value_if_set(&mut clean_env, host, name);
    }
    clean_env
}
