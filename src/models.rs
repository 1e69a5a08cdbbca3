use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account status of a user
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
    Blacklisted,
    /// Anything the API sends that we don't recognize (e.g. "Pending")
    #[default]
    #[serde(other)]
    Unknown,
}

impl UserStatus {
    pub const ALL: [UserStatus; 4] = [
        UserStatus::Active,
        UserStatus::Inactive,
        UserStatus::Blacklisted,
        UserStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Blacklisted => "Blacklisted",
            UserStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    /// Case-insensitive, used by the filter form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        UserStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

/// One user as listed by the admin API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub organization: String,
    pub date_joined: DateTime<Utc>,
    #[serde(default)]
    pub status: UserStatus,
}

/// Authentication sent with API requests
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    None,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
}
