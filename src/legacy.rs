//! Legacy deployment-properties source.
//!
//! The original flat configuration style describes exactly one directory
//! server through a fixed set of `ldap-*` properties. Values collected here
//! go through the same [`ProfileRecord::finish`] defaulting as document
//! records, so a deployment migrating a single server from properties to
//! the multi-server document resolves to an identical profile.

use std::fmt::Display;
use std::str::FromStr;

use crate::environment::Environment;
use crate::error::{ConfigError, Result};
use crate::profile::{DirectoryProfile, Encryption, ProfileRecord};

const HOSTNAME: &str = "ldap-hostname";
const PORT: &str = "ldap-port";
const ENCRYPTION: &str = "ldap-encryption";
const BASE_DN: &str = "ldap-base-dn";
const BIND_DN: &str = "ldap-bind-dn";
const BIND_PASSWORD: &str = "ldap-bind-password";
const USER_ATTRIBUTE: &str = "ldap-user-attribute";
const USER_FILTER: &str = "ldap-user-filter";
const GROUP_BASE_DN: &str = "ldap-group-base-dn";
const GROUP_ATTRIBUTE: &str = "ldap-group-attribute";
const MEMBER_ATTRIBUTE: &str = "ldap-member-attribute";
const GROUP_FILTER: &str = "ldap-group-filter";
const FOLLOW_REFERRALS: &str = "ldap-follow-referrals";
const MAX_REFERRAL_HOPS: &str = "ldap-max-referral-hops";
const MAX_SEARCH_RESULTS: &str = "ldap-max-search-results";
const NETWORK_TIMEOUT: &str = "ldap-network-timeout";
const OPERATION_TIMEOUT: &str = "ldap-operation-timeout";

/// Build the single legacy profile from deployment properties.
///
/// Every property is optional; an entirely unset namespace resolves to the
/// all-defaults profile.
pub fn from_environment(env: &impl Environment) -> Result<DirectoryProfile> {
    let record = ProfileRecord {
        hostname: string(env, HOSTNAME),
        port: parsed(env, PORT)?,
        encryption: encryption(env, ENCRYPTION)?,
        base_dn: string(env, BASE_DN),
        bind_dn: string(env, BIND_DN),
        bind_password: string(env, BIND_PASSWORD),
        user_attribute: string(env, USER_ATTRIBUTE),
        user_filter: string(env, USER_FILTER),
        group_base_dn: string(env, GROUP_BASE_DN),
        group_attribute: string(env, GROUP_ATTRIBUTE),
        member_attribute: string(env, MEMBER_ATTRIBUTE),
        group_filter: string(env, GROUP_FILTER),
        follow_referrals: parsed(env, FOLLOW_REFERRALS)?,
        max_referral_hops: parsed(env, MAX_REFERRAL_HOPS)?,
        max_search_results: parsed(env, MAX_SEARCH_RESULTS)?,
        network_timeout: parsed(env, NETWORK_TIMEOUT)?,
        operation_timeout: parsed(env, OPERATION_TIMEOUT)?,
    };

    record.finish()
}

fn string(env: &impl Environment, name: &str) -> Option<String> {
    env.property(name).map(str::to_owned)
}

/// Parse a typed property, surfacing the offending key on failure.
fn parsed<T>(env: &impl Environment, name: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    env.property(name)
        .map(|raw| {
            raw.trim().parse().map_err(|err: T::Err| {
                ConfigError::InvalidValue {
                    field: name,
                    value: raw.to_owned(),
                    reason: err.to_string(),
                }
            })
        })
        .transpose()
}

fn encryption(
    env: &impl Environment,
    name: &'static str,
) -> Result<Option<Encryption>> {
    env.property(name)
        .map(|raw| {
            Encryption::parse(raw.trim()).ok_or_else(|| {
                ConfigError::InvalidValue {
                    field: name,
                    value: raw.to_owned(),
                    reason: "expected one of `none`, `ssl`, `starttls`"
                        .to_owned(),
                }
            })
        })
        .transpose()
}
