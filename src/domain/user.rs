//! Signed-in user record
//!
//! Owned by the authentication flow; the core only stores and clears it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            last_login: None,
        }
    }

    /// Returns a copy stamped with the given login time
    pub fn logged_in_at(&self, at: DateTime<Utc>) -> Self {
        Self {
            last_login: Some(at),
            ..self.clone()
        }
    }
}
