//! Shoplist - a local-first personal shopping list
//!
//! The list lives in memory while the program runs and in a durable
//! key-value store between runs. The [`sync::Orchestrator`] keeps the two
//! consistent: every mutation is validated, written to storage, and only
//! then applied to memory through the pure [`domain::reduce`] function.

pub mod cli;
pub mod domain;
pub mod storage;
pub mod sync;

pub use domain::{Item, ItemFields, ItemId, ListState};
pub use sync::{Orchestrator, Outcome, SyncError, Synced};
