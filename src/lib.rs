//! Deterministic directory-server configuration resolution with ordered
//! failover.
//!
//! A deployment describes its directory servers either through a
//! multi-server YAML document (`ldap-servers.yml` under the configuration
//! home) or through the legacy flat `ldap-*` properties. [`Resolver`] picks
//! exactly one of the two, validates and defaults every field, and hands the
//! authentication engine an ordered [`ProfileSequence`] to try server by
//! server until one connection succeeds.

#![forbid(unsafe_code)]

pub mod document;
pub mod environment;
pub mod error;
pub mod legacy;
pub mod profile;
pub mod resolver;

pub use environment::{DeploymentEnvironment, Environment};
pub use error::{ConfigError, Result};
pub use profile::{
    DirectoryProfile, Encryption, ProfileRecord, ProfileSequence,
};
pub use resolver::Resolver;
