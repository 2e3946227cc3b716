//! # Campus Auth
//!
//! Portal roles, token claims and JWT utilities.
//!
//! - [`role`]: [`PortalRole`] and the authenticated [`Principal`]
//! - [`claims`]: the [`Claims`] carried by access and refresh tokens
//! - [`jwt`]: token creation and verification

pub mod claims;
pub mod jwt;
pub mod role;

pub use claims::{Claims, TokenKind};
pub use jwt::{create_access_token, create_refresh_token, verify_refresh_token, verify_token};
pub use role::{PortalRole, Principal};
