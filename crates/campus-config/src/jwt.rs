//! JWT signing configuration.
//!
//! - `JWT_SECRET`: HMAC secret (development fallback when unset)
//! - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default 3600)
//! - `JWT_REFRESH_EXPIRY`: refresh token lifetime in seconds (default 604800)

use crate::{from_process_env, parse_or};

pub const DEV_SECRET: &str = "campus-dev-secret-change-me";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(from_process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            secret: lookup("JWT_SECRET")
                .filter(|secret| !secret.trim().is_empty())
                .unwrap_or(defaults.secret),
            access_token_expiry: parse_or(&lookup, "JWT_ACCESS_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: parse_or(
                &lookup,
                "JWT_REFRESH_EXPIRY",
                defaults.refresh_token_expiry,
            ),
        }
    }

    /// True when no secret was configured.
    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = JwtConfig::from_lookup(lookup(&[]));
        assert!(config.uses_dev_secret());
        assert_eq!(config.access_token_expiry, 3600);
        assert_eq!(config.refresh_token_expiry, 604800);
    }

    #[test]
    fn test_reads_values() {
        let config = JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "abc"),
            ("JWT_ACCESS_EXPIRY", "60"),
            ("JWT_REFRESH_EXPIRY", "120"),
        ]));
        assert_eq!(config.secret, "abc");
        assert_eq!(config.access_token_expiry, 60);
        assert_eq!(config.refresh_token_expiry, 120);
        assert!(!config.uses_dev_secret());
    }

    #[test]
    fn test_blank_secret_and_bad_numbers_fall_back() {
        let config = JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "  "),
            ("JWT_ACCESS_EXPIRY", "soon"),
        ]));
        assert!(config.uses_dev_secret());
        assert_eq!(config.access_token_expiry, 3600);
    }
}
