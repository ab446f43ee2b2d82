//! Resolution policy for directory configuration sources.

use crate::document;
use crate::environment::Environment;
use crate::error::{ConfigError, Result};
use crate::legacy;
use crate::profile::ProfileSequence;

/// Resolves the ordered list of directory server profiles for a deployment.
///
/// Exactly one configuration source is consulted per call: the multi-server
/// document takes absolute precedence when it exists, and the legacy
/// properties are read only in its absence. The two are never merged.
#[derive(Debug, Clone)]
pub struct Resolver<E> {
    env: E,
}

impl<E: Environment> Resolver<E> {
    /// Create a new [`Resolver`] over a deployment environment.
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Resolve the ordered profile sequence.
    ///
    /// If multiple profiles are returned, each should be tried in order
    /// until a successful directory connection is established. A document
    /// that exists but cannot be read or parsed is a hard failure; falling
    /// back to the legacy properties would mask the misconfiguration.
    pub fn resolve(&self) -> Result<ProfileSequence> {
        let path = self.env.config_home().join(document::SERVERS_FILE);

        if path.exists() {
            tracing::debug!(
                path = %path.display(),
                "reading directory configuration from multi-server document"
            );

            let profiles = match document::read(&path) {
                Ok(profiles) => profiles,
                Err(err) => {
                    tracing::error!(
                        path = %path.display(),
                        error = %err,
                        "multi-server document could not be read/parsed"
                    );
                    return Err(err);
                },
            };

            return ProfileSequence::new(profiles)
                .ok_or(ConfigError::NoServers { path });
        }

        tracing::debug!(
            "reading directory configuration from deployment properties"
        );
        Ok(ProfileSequence::single(legacy::from_environment(&self.env)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DeploymentEnvironment;
    use crate::profile::Encryption;

    use std::fs;

    use tempfile::TempDir;

    fn home() -> TempDir {
        tempfile::tempdir().expect("cannot create temporary config home")
    }

    fn write_document(home: &TempDir, content: &str) {
        fs::write(home.path().join(document::SERVERS_FILE), content)
            .expect("cannot write ldap-servers.yml");
    }

    #[test]
    fn absent_document_resolves_one_legacy_profile() {
        let home = home();
        let env = DeploymentEnvironment::new(home.path())
            .with_property("ldap-hostname", "ldap.example.com")
            .with_property("ldap-port", "389")
            .with_property("ldap-encryption", "none");

        let sequence = Resolver::new(env).resolve().unwrap();

        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence.first().hostname, "ldap.example.com");
        assert_eq!(sequence.first().port, 389);
        assert_eq!(sequence.first().encryption, Encryption::None);
        // Unset parameters come back defaulted, not missing.
        assert_eq!(sequence.first().user_attribute, "uid");
        assert_eq!(sequence.first().max_search_results, 1000);
    }

    #[test]
    fn document_order_is_trial_order() {
        let home = home();
        write_document(&home, "- hostname: dc1\n- hostname: dc2\n");

        let sequence = Resolver::new(DeploymentEnvironment::new(home.path()))
            .resolve()
            .unwrap();

        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence[0].hostname, "dc1");
        assert_eq!(sequence[1].hostname, "dc2");

        // Reordering the document reorders the sequence identically.
        write_document(&home, "- hostname: dc2\n- hostname: dc1\n");
        let reordered =
            Resolver::new(DeploymentEnvironment::new(home.path()))
                .resolve()
                .unwrap();
        assert_eq!(reordered[0].hostname, "dc2");
        assert_eq!(reordered[1].hostname, "dc1");
    }

    #[test]
    fn document_takes_precedence_over_properties() {
        let home = home();
        write_document(&home, "- hostname: from-document\n");

        let env = DeploymentEnvironment::new(home.path())
            .with_property("ldap-hostname", "from-properties");

        let sequence = Resolver::new(env).resolve().unwrap();

        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence.first().hostname, "from-document");
    }

    #[test]
    fn invalid_document_never_falls_back_to_properties() {
        let home = home();
        write_document(&home, "");

        // Perfectly valid legacy configuration, which must stay unread.
        let env = DeploymentEnvironment::new(home.path())
            .with_property("ldap-hostname", "ldap.example.com");

        assert!(matches!(
            Resolver::new(env).resolve(),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn empty_server_list_is_an_error() {
        let home = home();
        write_document(&home, "[]");

        assert!(matches!(
            Resolver::new(DeploymentEnvironment::new(home.path())).resolve(),
            Err(ConfigError::NoServers { .. })
        ));
    }

    #[test]
    fn resolution_is_idempotent() {
        let home = home();
        write_document(&home, "- hostname: dc1\n- hostname: dc2\n");

        let resolver =
            Resolver::new(DeploymentEnvironment::new(home.path()));

        assert_eq!(resolver.resolve().unwrap(), resolver.resolve().unwrap());
    }

    #[test]
    fn legacy_resolution_is_idempotent() {
        let home = home();
        let resolver = Resolver::new(
            DeploymentEnvironment::new(home.path())
                .with_property("ldap-hostname", "ldap.example.com"),
        );

        assert_eq!(resolver.resolve().unwrap(), resolver.resolve().unwrap());
    }
}
