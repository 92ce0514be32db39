//! Tenancy configuration.
//!
//! Limits and creation policy for universities, course groups and
//! enrollments. Loaded from environment variables with defaults that match
//! the production portal.

use campus_rbac::UniversityRole;
use serde::{Deserialize, Serialize};

use crate::error::{OrgError, OrgResult};

/// Tenancy limits and policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenancyConfig {
    /// Maximum memberships per university.
    pub membership_limit: u32,

    /// Maximum course groups per university.
    pub maximum_course_groups: u32,

    /// Let any authenticated user create a university.
    pub allow_user_to_create_university: bool,

    /// Role given to the creator of a new university.
    pub creator_role: UniversityRole,

    /// Days an admission offer stays valid.
    pub offer_validity_days: u32,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            membership_limit: 10_000,
            maximum_course_groups: 500,
            allow_user_to_create_university: false,
            creator_role: UniversityRole::Registrar,
            offer_validity_days: 7,
        }
    }
}

impl TenancyConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CAMPUS_MEMBERSHIP_LIMIT` (default: 10000)
    /// - `CAMPUS_MAX_COURSE_GROUPS` (default: 500)
    /// - `CAMPUS_ALLOW_USER_CREATE_UNIVERSITY` (default: false)
    /// - `CAMPUS_CREATOR_ROLE` (default: registrar)
    /// - `CAMPUS_OFFER_VALIDITY_DAYS` (default: 7)
    pub fn from_env() -> OrgResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> OrgResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let config = Self {
            membership_limit: parse_number(&lookup, "CAMPUS_MEMBERSHIP_LIMIT")?
                .unwrap_or(default.membership_limit),
            maximum_course_groups: parse_number(&lookup, "CAMPUS_MAX_COURSE_GROUPS")?
                .unwrap_or(default.maximum_course_groups),
            allow_user_to_create_university: lookup("CAMPUS_ALLOW_USER_CREATE_UNIVERSITY")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(default.allow_user_to_create_university),
            creator_role: match lookup("CAMPUS_CREATOR_ROLE") {
                Some(raw) => UniversityRole::parse(&raw).ok_or_else(|| {
                    OrgError::Config(format!("CAMPUS_CREATOR_ROLE: unknown role '{raw}'"))
                })?,
                None => default.creator_role,
            },
            offer_validity_days: parse_number(&lookup, "CAMPUS_OFFER_VALIDITY_DAYS")?
                .unwrap_or(default.offer_validity_days),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make the portal unusable.
    pub fn validate(&self) -> OrgResult<()> {
        if self.membership_limit == 0 {
            return Err(OrgError::Config("membership_limit must be positive".to_string()));
        }
        if self.maximum_course_groups == 0 {
            return Err(OrgError::Config(
                "maximum_course_groups must be positive".to_string(),
            ));
        }
        if self.offer_validity_days == 0 {
            return Err(OrgError::Config(
                "offer_validity_days must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_number<F>(lookup: &F, key: &str) -> OrgResult<Option<u32>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| OrgError::Config(format!("{key}: '{raw}' is not a number")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TenancyConfig::default();
        assert_eq!(config.membership_limit, 10_000);
        assert_eq!(config.maximum_course_groups, 500);
        assert!(!config.allow_user_to_create_university);
        assert_eq!(config.creator_role, UniversityRole::Registrar);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_lookup_yields_defaults() {
        let config = TenancyConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, TenancyConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = TenancyConfig::from_lookup(lookup(&[
            ("CAMPUS_MEMBERSHIP_LIMIT", "250"),
            ("CAMPUS_MAX_COURSE_GROUPS", " 12 "),
            ("CAMPUS_ALLOW_USER_CREATE_UNIVERSITY", "true"),
            ("CAMPUS_CREATOR_ROLE", "dean"),
        ]))
        .unwrap();

        assert_eq!(config.membership_limit, 250);
        assert_eq!(config.maximum_course_groups, 12);
        assert!(config.allow_user_to_create_university);
        assert_eq!(config.creator_role, UniversityRole::Dean);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = TenancyConfig::from_lookup(lookup(&[("CAMPUS_MEMBERSHIP_LIMIT", "lots")]))
            .unwrap_err();
        assert!(matches!(err, OrgError::Config(_)));

        let err = TenancyConfig::from_lookup(lookup(&[("CAMPUS_CREATOR_ROLE", "janitor")]))
            .unwrap_err();
        assert!(err.to_string().contains("janitor"));

        let err = TenancyConfig::from_lookup(lookup(&[("CAMPUS_MAX_COURSE_GROUPS", "0")]))
            .unwrap_err();
        assert!(matches!(err, OrgError::Config(_)));
    }
}
