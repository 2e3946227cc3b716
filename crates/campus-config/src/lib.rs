//! # Campus Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetimes
//! - [`cors`]: allowed origins
//! - [`rate_limit`]: login endpoint throttling
//! - [`server`]: bind address, environment and log directory
//!
//! Every struct exposes `from_env()`, which falls back to development
//! defaults when a variable is missing or unparsable.
//!
//! # Example
//!
//! ```ignore
//! use campus_config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};
//!
//! dotenvy::dotenv().ok();
//! let server = ServerConfig::from_env();
//! let jwt = JwtConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::{Environment, ServerConfig};

/// Looks a variable up in the process environment.
pub(crate) fn from_process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Reads and parses a variable through `lookup`, falling back to `default`.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
