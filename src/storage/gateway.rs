//! Persistence gateway
//!
//! Encodes the list and the user record as JSON under fixed keys. This is the
//! only code that reads or writes the durable store. It never interprets list
//! semantics: no dedup, no ordering, no validation beyond the JSON shape.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::kv::{KeyValueStore, StoreError};
use crate::domain::{Item, ShoppingList, UserRecord};

/// Key holding the JSON array of items
pub const LIST_KEY: &str = "shoppingList";

/// Key holding the signed-in user record
pub const USER_KEY: &str = "user";

/// Key holding the opaque session marker
pub const SESSION_TOKEN_KEY: &str = "userToken";

/// Why a present value could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Stored value under '{key}' is corrupt: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Typed access to the durable store
#[derive(Debug)]
pub struct Gateway<S> {
    store: S,
}

impl<S: KeyValueStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the list; `None` means nothing has been stored yet
    pub fn read_list(&self) -> Result<Option<ShoppingList>, GatewayError> {
        self.read_json(LIST_KEY)
    }

    /// Replaces the stored list
    pub fn write_list(&self, items: &[Item]) -> Result<(), GatewayError> {
        self.write_json(LIST_KEY, items)
    }

    pub fn remove_list(&self) -> Result<(), GatewayError> {
        self.remove(LIST_KEY)
    }

    pub fn read_user(&self) -> Result<Option<UserRecord>, GatewayError> {
        self.read_json(USER_KEY)
    }

    pub fn write_user(&self, user: &UserRecord) -> Result<(), GatewayError> {
        self.write_json(USER_KEY, user)
    }

    /// Stamps the stored user with a login time
    ///
    /// Returns the updated record, or `None` if no user is stored.
    pub fn record_login(&self, at: DateTime<Utc>) -> Result<Option<UserRecord>, GatewayError> {
        let Some(user) = self.read_user()? else {
            return Ok(None);
        };
        let user = user.logged_in_at(at);
        self.write_user(&user)?;
        Ok(Some(user))
    }

    pub fn remove_user(&self) -> Result<(), GatewayError> {
        self.remove(USER_KEY)
    }

    pub fn remove_session_token(&self) -> Result<(), GatewayError> {
        self.remove(SESSION_TOKEN_KEY)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, GatewayError> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "key absent");
                return Ok(None);
            }
            Err(StoreError::InvalidUtf8 { source, .. }) => {
                return Err(GatewayError::Corrupt {
                    key,
                    source: source.into(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let value = serde_json::from_str(&raw).map_err(|source| GatewayError::Corrupt {
            key,
            source: source.into(),
        })?;
        debug!(key, bytes = raw.len(), "read value");
        Ok(Some(value))
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> Result<(), GatewayError> {
        let raw = serde_json::to_string(value)
            .map_err(|source| GatewayError::Encode { key, source })?;
        self.store.set(key, &raw)?;
        debug!(key, bytes = raw.len(), "wrote value");
        Ok(())
    }

    fn remove(&self, key: &'static str) -> Result<(), GatewayError> {
        self.store.remove(key)?;
        debug!(key, "removed key");
        Ok(())
    }
}
