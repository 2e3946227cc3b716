//! Pagination composer.
//!
//! List endpoints accept `currentPage` and `itemsPerPage` as query
//! parameters and translate them into a SQL `LIMIT`/`OFFSET` pair:
//!
//! - `itemsPerPage` defaults to 15 when absent, non-numeric or not positive,
//!   and is capped at 100
//! - `currentPage` defaults to 1 under the same conditions
//! - `offset = (page - 1) * limit`
//!
//! # Example
//!
//! ```
//! use campus_core::pagination::PageRequest;
//!
//! let request = PageRequest::new(Some("2"), Some("10"));
//! assert_eq!(request.limit(), 10);
//! assert_eq!(request.offset(), 10);
//!
//! let defaults = PageRequest::default();
//! assert_eq!(defaults.limit(), 15);
//! assert_eq!(defaults.offset(), 0);
//! ```

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::normalize::int_or_none;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 15;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw pagination parameters as they arrive in the query string.
///
/// Kept as text so that invalid input degrades to the defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Page number (1-indexed, default: 1)
    #[serde(default)]
    pub current_page: Option<String>,
    /// Items per page (1-100, default: 15)
    #[serde(default)]
    pub items_per_page: Option<String>,
}

impl PageRequest {
    pub fn new(current_page: Option<&str>, items_per_page: Option<&str>) -> Self {
        Self {
            current_page: current_page.map(str::to_string),
            items_per_page: items_per_page.map(str::to_string),
        }
    }

    /// Effective page number, at least 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        positive(self.current_page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    /// Effective page size, within `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn limit(&self) -> i64 {
        positive(self.items_per_page.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

fn positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(int_or_none).filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 15);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_defaults_when_not_numeric() {
        let request = PageRequest::new(Some("two"), Some("ten"));
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 15);
    }

    #[test]
    fn test_defaults_when_zero_or_negative() {
        let request = PageRequest::new(Some("0"), Some("-5"));
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 15);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_defaults_when_empty_strings() {
        let request = PageRequest::new(Some(""), Some(""));
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 15);
    }

    #[test]
    fn test_offset_from_page_and_size() {
        let request = PageRequest::new(Some("2"), Some("10"));
        assert_eq!(request.limit(), 10);
        assert_eq!(request.offset(), 10);

        let request = PageRequest::new(Some("5"), Some("20"));
        assert_eq!(request.offset(), 80);
    }

    #[test]
    fn test_page_only_uses_default_size() {
        let request = PageRequest::new(Some("3"), None);
        assert_eq!(request.limit(), 15);
        assert_eq!(request.offset(), 30);
    }

    #[test]
    fn test_size_is_capped() {
        let request = PageRequest::new(Some("1"), Some("500"));
        assert_eq!(request.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let request = PageRequest::new(Some(&i64::MAX.to_string()), Some("100"));
        assert_eq!(request.offset(), i64::MAX);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"currentPage":"4","itemsPerPage":"25"}"#;
        let request: PageRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.page(), 4);
        assert_eq!(request.limit(), 25);
        assert_eq!(request.offset(), 75);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let request: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, PageRequest::default());
    }
}
