//! The three portals and their principal tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PortalRole {
    Admin,
    Teacher,
    Student,
}

impl PortalRole {
    pub const ALL: [PortalRole; 3] = [PortalRole::Admin, PortalRole::Teacher, PortalRole::Student];

    pub fn as_str(self) -> &'static str {
        match self {
            PortalRole::Admin => "admin",
            PortalRole::Teacher => "teacher",
            PortalRole::Student => "student",
        }
    }

    /// Table holding the principals that may sign in to this portal.
    pub fn table(self) -> &'static str {
        match self {
            PortalRole::Admin => "admins",
            PortalRole::Teacher => "teachers",
            PortalRole::Student => "students",
        }
    }
}

impl fmt::Display for PortalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortalRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(PortalRole::Admin),
            "teacher" => Ok(PortalRole::Teacher),
            "student" => Ok(PortalRole::Student),
            other => Err(format!("Unknown portal role: {other}")),
        }
    }
}

/// The authenticated record attached to a request by the role middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub role: PortalRole,
    pub email: String,
}
