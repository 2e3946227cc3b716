//! Rate limiting for the login endpoints.
//!
//! Every portal exposes `/auth/login` and `/auth/access-token` without a
//! bearer token, so those routes are throttled per client IP with a token
//! bucket (Governor).
//!
//! - `RATE_LIMIT_ENABLED`: set to `false` to disable throttling (default `true`)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: seconds per replenished token (default 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket size (default 5)
//!
//! The client IP is read from `X-Forwarded-For`, `X-Real-Ip` or `Forwarded`
//! before falling back to the peer address, so the service can sit behind a
//! reverse proxy.

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

use crate::{from_process_env, parse_or};

pub type AuthGovernorConfig =
    GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub auth_per_second: u64,
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(from_process_env)
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            enabled: parse_or(&lookup, "RATE_LIMIT_ENABLED", defaults.enabled),
            auth_per_second: parse_or(&lookup, "RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: parse_or(&lookup, "RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    /// Throttling switched off, for tests and local tooling.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Governor configuration for the auth routes, or `None` when disabled
    /// or when the configured values are zero.
    #[must_use]
    pub fn auth_governor_config(&self) -> Option<AuthGovernorConfig> {
        if !self.enabled {
            return None;
        }

        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }
}
