//! Deployment environment capability.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Read-only view of the deployment environment.
///
/// The resolver only ever asks two things of its surroundings: where the
/// configuration home is, and what a legacy deployment property is set to.
/// Keeping both behind this trait keeps the resolution policy free of
/// process globals and trivially mockable.
pub trait Environment {
    /// Directory holding the deployment's configuration files.
    fn config_home(&self) -> &Path;

    /// Look up one legacy deployment property.
    fn property(&self, name: &str) -> Option<&str>;
}

/// Environment backed by a directory and an in-memory property namespace.
///
/// The surrounding system loads the legacy property file however it likes
/// and hands the flat map over; this crate never parses property files
/// itself.
#[derive(Debug, Default, Clone)]
pub struct DeploymentEnvironment {
    home: PathBuf,
    properties: HashMap<String, String>,
}

impl DeploymentEnvironment {
    /// Create a new [`DeploymentEnvironment`] rooted at `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            properties: HashMap::new(),
        }
    }

    /// Add one legacy property.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Replace the whole legacy property namespace.
    pub fn with_properties(
        mut self,
        properties: HashMap<String, String>,
    ) -> Self {
        self.properties = properties;
        self
    }
}

impl Environment for DeploymentEnvironment {
    fn config_home(&self) -> &Path {
        &self.home
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_lookup() {
        let env = DeploymentEnvironment::new("/etc/dirauth")
            .with_property("ldap-hostname", "ldap.example.com");

        assert_eq!(env.config_home(), Path::new("/etc/dirauth"));
        assert_eq!(env.property("ldap-hostname"), Some("ldap.example.com"));
        assert_eq!(env.property("ldap-port"), None);
    }
}
