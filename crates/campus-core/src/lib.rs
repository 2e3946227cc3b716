//! # Campus Core
//!
//! Core types shared by every Campus crate:
//!
//! - [`errors`]: [`AppError`] and its rendering as the response envelope
//! - [`response`]: the `{status, data, message, apiVersion}` envelope
//! - [`filter`]: the query-filter composer used by list endpoints
//! - [`pagination`]: `currentPage` / `itemsPerPage` to `LIMIT` / `OFFSET`
//! - [`normalize`]: lenient parsing of raw query parameters
//! - [`value`]: typed SQL parameters for generic inserts and updates
//! - [`password`]: bcrypt hashing
//!
//! # Example
//!
//! ```ignore
//! use campus_core::filter::{Filter, SearchColumn, like_if_value};
//! use campus_core::pagination::PageRequest;
//!
//! let mut filter = Filter::new();
//! like_if_value(&mut filter, &[SearchColumn::Single("name")], params.search_text.as_deref());
//!
//! let page = PageRequest::new(Some("2"), Some("10"));
//! assert_eq!(page.offset(), 10);
//! ```

pub mod errors;
pub mod filter;
pub mod normalize;
pub mod pagination;
pub mod password;
pub mod response;
pub mod value;

pub use errors::AppError;
pub use filter::{Filter, Predicate, Relation, SearchColumn};
pub use pagination::PageRequest;
pub use password::{hash_password, verify_password};
pub use response::ApiResponse;
pub use value::{Columns, SqlValue};
