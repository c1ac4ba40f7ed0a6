//! # Storage Layer
//!
//! Durable key-value persistence and the typed gateway on top of it.
//!
//! ## Keys
//!
//! | Key | Value | Owner |
//! |-----|-------|-------|
//! | `shoppingList` | JSON array of items | list core |
//! | `user` | JSON object `{email, name, lastLogin?}` | authentication |
//! | `userToken` | opaque session marker | authentication, cleared on logout |
//!
//! ## Concurrency Safety
//!
//! - [`FileStore`] uses file locking (`fs2`) for concurrent access
//! - All file writes are atomic (temp file + rename)
//! - Read-modify-write sequences are serialized one level up, by the
//!   orchestrator's writer lock
//!
//! ## Key Types
//!
//! - [`KeyValueStore`] - The durable store capability
//! - [`FileStore`] - One JSON file per key in a directory
//! - [`MemoryStore`] - Non-durable store for tests and embedding
//! - [`Gateway`] - Typed list/user access, distinguishes absent from corrupt
//! - [`Config`] - User configuration

mod config;
mod file;
mod gateway;
mod kv;
mod memory;

pub use config::{Config, ConfigError, OutputFormat};
pub use file::FileStore;
pub use gateway::{DecodeError, Gateway, GatewayError, LIST_KEY, SESSION_TOKEN_KEY, USER_KEY};
pub use kv::{KeyValueStore, StoreError};
pub use memory::MemoryStore;
