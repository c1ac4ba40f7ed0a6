//! # Synchronization
//!
//! Keeps the in-memory [`ListState`](crate::domain::ListState) consistent
//! with the durable store across load, add, update, remove, toggle and
//! clear.
//!
//! ## Key Types
//!
//! - [`Orchestrator`] - Owns the state, serializes every mutation
//! - [`Synced`] - New state plus the [`Outcome`] that produced it
//! - [`SyncError`] - Validation, duplicate, index, corruption and storage failures

mod error;
mod orchestrator;
mod outcome;

pub use error::{ErrorKind, SyncError};
pub use orchestrator::{EditSession, Orchestrator};
pub use outcome::{Outcome, Synced};
