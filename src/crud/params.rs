use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use campus_core::{AppError, PageRequest};
use campus_core::normalize::{FlagValue, int_or_none};

/// Raw query parameters of a list request.
///
/// Every value stays text until a resource reads it, so a malformed filter
/// is ignored instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ListParams(HashMap<String, String>);

impl ListParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(int_or_none)
    }

    /// A mandatory id parameter; missing or malformed values reject with `message`.
    pub fn require_int(&self, key: &str, message: &str) -> Result<i64, AppError> {
        self.int(key)
            .ok_or_else(|| AppError::rejected(message.to_string()))
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|raw| raw.as_flag())
    }

    pub fn search_text(&self) -> Option<&str> {
        self.get("searchText")
    }

    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.get("currentPage"), self.get("itemsPerPage"))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ListParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// One page of rows, serialized under the resource's own keys.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub list_key: &'static str,
    pub count_key: &'static str,
    pub items: Vec<T>,
    pub count: i64,
}

impl<T: Serialize> Serialize for Listing<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.list_key, &self.items)?;
        map.serialize_entry(self.count_key, &self.count)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavedId {
    pub id: i64,
}
