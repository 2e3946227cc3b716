//! Application configuration.
//!
//! The structs live in the `campus-config` crate so the CLI can share them;
//! they are re-exported here under the paths the server code uses.
//!
//! See each type for the environment variables it reads.

pub use campus_config::{
    CorsConfig, Environment, JwtConfig, RateLimitConfig, ServerConfig, cors, jwt, rate_limit,
    server,
};
