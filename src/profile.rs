//! Directory server connection profiles.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Standard directory port without transport encryption.
pub const DEFAULT_PORT: u16 = 389;

/// Standard directory port for SSL ("ldaps").
pub const DEFAULT_SSL_PORT: u16 = 636;

const DEFAULT_HOSTNAME: &str = "localhost";
const DEFAULT_USER_ATTRIBUTE: &str = "uid";
const DEFAULT_GROUP_ATTRIBUTE: &str = "cn";
const DEFAULT_MEMBER_ATTRIBUTE: &str = "member";
const DEFAULT_FILTER: &str = "(objectClass=*)";
const DEFAULT_MAX_REFERRAL_HOPS: u32 = 5;
const DEFAULT_MAX_SEARCH_RESULTS: u32 = 1000;
const DEFAULT_NETWORK_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 30;

/// Transport encryption for a directory connection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encryption {
    /// Unencrypted connection.
    #[default]
    None,
    /// TLS from the first byte, on the dedicated "ldaps" port.
    Ssl,
    /// Plain connection upgraded in-band via StartTLS.
    Starttls,
}

impl Encryption {
    /// Standard port for this encryption mode.
    pub fn default_port(self) -> u16 {
        match self {
            Encryption::Ssl => DEFAULT_SSL_PORT,
            Encryption::None | Encryption::Starttls => DEFAULT_PORT,
        }
    }

    /// Parse the configuration spelling of an encryption mode.
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Encryption::None),
            "ssl" => Some(Encryption::Ssl),
            "starttls" => Some(Encryption::Starttls),
            _ => None,
        }
    }
}

/// One server record as written by the operator, before defaulting.
///
/// Both configuration sources produce this shape: the multi-server document
/// deserializes straight into it, and the legacy properties are collected
/// into it field by field. Running every record through [`finish`] is what
/// guarantees the two sources resolve identically.
///
/// [`finish`]: ProfileRecord::finish
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProfileRecord {
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub encryption: Option<Encryption>,
    pub base_dn: Option<String>,
    pub bind_dn: Option<String>,
    pub bind_password: Option<String>,
    pub user_attribute: Option<String>,
    pub user_filter: Option<String>,
    pub group_base_dn: Option<String>,
    pub group_attribute: Option<String>,
    pub member_attribute: Option<String>,
    pub group_filter: Option<String>,
    pub follow_referrals: Option<bool>,
    pub max_referral_hops: Option<u32>,
    pub max_search_results: Option<u32>,
    /// Milliseconds allowed to establish the connection.
    pub network_timeout: Option<u64>,
    /// Seconds allowed per directory operation.
    pub operation_timeout: Option<u64>,
}

impl ProfileRecord {
    /// Apply per-field defaults and produce an immutable profile.
    pub fn finish(self) -> Result<DirectoryProfile> {
        let encryption = self.encryption.unwrap_or_default();

        let port = match self.port {
            Some(0) => {
                return Err(ConfigError::InvalidValue {
                    field: "port",
                    value: "0".to_owned(),
                    reason: "port must be between 1 and 65535".to_owned(),
                });
            },
            Some(port) => port,
            None => encryption.default_port(),
        };

        Ok(DirectoryProfile {
            hostname: self
                .hostname
                .unwrap_or_else(|| DEFAULT_HOSTNAME.to_owned()),
            port,
            encryption,
            base_dn: self.base_dn.unwrap_or_default(),
            bind_dn: self.bind_dn,
            bind_password: self.bind_password,
            user_attribute: self
                .user_attribute
                .unwrap_or_else(|| DEFAULT_USER_ATTRIBUTE.to_owned()),
            user_filter: self
                .user_filter
                .unwrap_or_else(|| DEFAULT_FILTER.to_owned()),
            group_base_dn: self.group_base_dn,
            group_attribute: self
                .group_attribute
                .unwrap_or_else(|| DEFAULT_GROUP_ATTRIBUTE.to_owned()),
            member_attribute: self
                .member_attribute
                .unwrap_or_else(|| DEFAULT_MEMBER_ATTRIBUTE.to_owned()),
            group_filter: self
                .group_filter
                .unwrap_or_else(|| DEFAULT_FILTER.to_owned()),
            follow_referrals: self.follow_referrals.unwrap_or(false),
            max_referral_hops: self
                .max_referral_hops
                .unwrap_or(DEFAULT_MAX_REFERRAL_HOPS),
            max_search_results: self
                .max_search_results
                .unwrap_or(DEFAULT_MAX_SEARCH_RESULTS),
            network_timeout: Duration::from_millis(
                self.network_timeout.unwrap_or(DEFAULT_NETWORK_TIMEOUT_MS),
            ),
            operation_timeout: Duration::from_secs(
                self.operation_timeout
                    .unwrap_or(DEFAULT_OPERATION_TIMEOUT_SECS),
            ),
        })
    }
}

/// Everything needed to attempt one connection to one directory server.
///
/// Profiles are immutable once constructed and carry no implicit dependency
/// on their siblings in a [`ProfileSequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryProfile {
    /// Hostname or address of the directory server.
    pub hostname: String,
    pub port: u16,
    pub encryption: Encryption,
    /// DN every search starts from. Empty means the directory root.
    pub base_dn: String,
    /// DN to bind with before searching. `None` binds anonymously.
    pub bind_dn: Option<String>,
    pub bind_password: Option<String>,
    /// Attribute holding the login name of a user entry.
    pub user_attribute: String,
    pub user_filter: String,
    /// Useful for organization unit (OU) holding groups.
    pub group_base_dn: Option<String>,
    pub group_attribute: String,
    /// Attribute of a group entry listing its members.
    pub member_attribute: String,
    pub group_filter: String,
    pub follow_referrals: bool,
    pub max_referral_hops: u32,
    pub max_search_results: u32,
    pub network_timeout: Duration,
    pub operation_timeout: Duration,
}

impl DirectoryProfile {
    /// Connection URL for this server.
    pub fn url(&self) -> String {
        let scheme = match self.encryption {
            Encryption::Ssl => "ldaps",
            Encryption::None | Encryption::Starttls => "ldap",
        };

        format!("{scheme}://{}:{}", self.hostname, self.port)
    }
}

/// Ordered failover sequence of directory profiles.
///
/// Insertion order is trial order: the authentication engine attempts each
/// profile in turn and stops at the first server that accepts a connection.
/// Non-empty by construction, never mutated after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSequence(Vec<DirectoryProfile>);

impl ProfileSequence {
    /// Wrap parsed profiles, refusing an empty sequence.
    pub(crate) fn new(profiles: Vec<DirectoryProfile>) -> Option<Self> {
        if profiles.is_empty() {
            None
        } else {
            Some(Self(profiles))
        }
    }

    /// Sequence holding a single profile.
    pub(crate) fn single(profile: DirectoryProfile) -> Self {
        Self(vec![profile])
    }

    /// Number of configured servers, always at least one.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First profile to try.
    pub fn first(&self) -> &DirectoryProfile {
        // Non-empty by construction.
        &self.0[0]
    }

    /// Profiles in trial order.
    pub fn iter(&self) -> std::slice::Iter<'_, DirectoryProfile> {
        self.0.iter()
    }
}

impl IntoIterator for ProfileSequence {
    type Item = DirectoryProfile;
    type IntoIter = std::vec::IntoIter<DirectoryProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProfileSequence {
    type Item = &'a DirectoryProfile;
    type IntoIter = std::slice::Iter<'a, DirectoryProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for ProfileSequence {
    type Output = DirectoryProfile;

    fn index(&self, index: usize) -> &DirectoryProfile {
        &self.0[index]
    }
}
