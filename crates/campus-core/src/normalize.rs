//! Normalizers for raw request parameters.
//!
//! Query strings arrive as untyped text. These helpers turn them into typed
//! values or `None`, and never fail: anything unusable is treated as absent.

use serde::{Deserialize, Deserializer};

/// Parses a non-negative integer. Surrounding whitespace is ignored.
///
/// ```
/// use campus_core::normalize::int_or_none;
///
/// assert_eq!(int_or_none("12"), Some(12));
/// assert_eq!(int_or_none(" 7 "), Some(7));
/// assert_eq!(int_or_none("-1"), None);
/// assert_eq!(int_or_none("12abc"), None);
/// ```
pub fn int_or_none(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|value| *value >= 0)
}

/// Trimmed, non-empty text.
pub fn string_or_none(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A value that may be read as a `0`/`1` boolean flag.
pub trait FlagValue {
    fn as_flag(&self) -> Option<bool>;
}

impl FlagValue for str {
    fn as_flag(&self) -> Option<bool> {
        match self {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        }
    }
}

impl FlagValue for String {
    fn as_flag(&self) -> Option<bool> {
        self.as_str().as_flag()
    }
}

impl FlagValue for i64 {
    fn as_flag(&self) -> Option<bool> {
        match self {
            1 => Some(true),
            0 => Some(false),
            _ => None,
        }
    }
}

impl<T: FlagValue + ?Sized> FlagValue for &T {
    fn as_flag(&self) -> Option<bool> {
        (**self).as_flag()
    }
}

/// Deserializes an optional string, treating empty input as `None`.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| string_or_none(&s)))
}

/// Deserializes a required string with surrounding whitespace removed, so
/// length rules see the value that gets stored.
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}
