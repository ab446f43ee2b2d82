//! Error handler for dirauth.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Enum representing configuration resolution errors.
///
/// Every failure here is fatal to the resolution call. A document that
/// exists is authoritative: a bad one must be fixed by the operator, never
/// silently replaced by the legacy properties.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no directory server is configured in \"{path}\"")]
    NoServers { path: PathBuf },

    #[error("cannot read directory configuration from \"{path}\"")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse directory configuration from \"{path}\"")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value `{value}` for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}
