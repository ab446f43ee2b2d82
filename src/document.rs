//! Multi-server document source.

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::profile::{DirectoryProfile, ProfileRecord};

/// The name of the file within the configuration home that defines each
/// available directory server (if not using the legacy properties).
pub const SERVERS_FILE: &str = "ldap-servers.yml";

/// Parse a multi-server document into profiles.
///
/// The document is a YAML sequence of server records. Record order is the
/// failover trial order and is preserved verbatim: no sorting, no
/// deduplication. `path` only decorates error messages.
pub fn parse(content: &str, path: &Path) -> Result<Vec<DirectoryProfile>> {
    let records: Vec<ProfileRecord> = serde_yaml::from_str(content)
        .map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    records.into_iter().map(ProfileRecord::finish).collect()
}

/// Read and parse the multi-server document at `path`.
pub fn read(path: &Path) -> Result<Vec<DirectoryProfile>> {
    let content =
        fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    parse(&content, path)
}
