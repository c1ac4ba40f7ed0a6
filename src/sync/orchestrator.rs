//! Synchronization orchestrator
//!
//! Sequences gateway calls and reducer dispatches for each mutation. Every
//! list operation follows the same steps:
//!
//! 1. take the writer lock and set `loading`
//! 2. read the durable list (or the in-memory one, for toggle)
//! 3. write the new durable list
//! 4. dispatch the matching [`Action`] and clear `loading`
//!
//! Validation and I/O failures abort before step 4, leaving the in-memory
//! state untouched. `loading` is cleared on every exit path by [`Busy`]'s
//! `Drop`.
//!
//! The writer lock funnels every read-modify-write of the list key through a
//! single writer, so two mutations issued back to back cannot lose each
//! other's update.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::error::SyncError;
use super::outcome::{Outcome, Synced};
use crate::domain::{
    contains_name, max_id, position_of, reduce, Action, ItemFields, ItemId, ListState,
};
use crate::storage::{Gateway, KeyValueStore};

/// An edit in progress, pinned to the item's id rather than its position
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    id: ItemId,
    index: usize,
    /// Field values to commit, pre-filled from the item
    pub draft: ItemFields,
}

impl EditSession {
    /// Id of the item being edited
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Position of the item when the edit began
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Owns the in-memory list state and the durable store behind it
#[derive(Debug)]
pub struct Orchestrator<S> {
    gateway: Gateway<S>,
    state: Mutex<ListState>,
    writer: Mutex<()>,
}

/// Marks an operation in flight; clears `loading` when dropped
struct Busy<'a, S: KeyValueStore> {
    orchestrator: &'a Orchestrator<S>,
    _writer: MutexGuard<'a, ()>,
    done: bool,
}

impl<S: KeyValueStore> Busy<'_, S> {
    fn settle(&mut self) {
        if !self.done {
            self.done = true;
            self.orchestrator.dispatch(Action::SetLoading(false));
        }
    }

    /// Clears `loading` and snapshots the state while still holding the writer
    fn finish(mut self, outcome: Outcome) -> Synced {
        self.settle();
        Synced {
            state: self.orchestrator.state(),
            outcome,
        }
    }
}

impl<S: KeyValueStore> Drop for Busy<'_, S> {
    fn drop(&mut self) {
        self.settle();
    }
}

impl<S: KeyValueStore> Orchestrator<S> {
    /// Creates an orchestrator with an empty, idle state
    pub fn new(store: S) -> Self {
        Self {
            gateway: Gateway::new(store),
            state: Mutex::new(ListState::new()),
            writer: Mutex::new(()),
        }
    }

    pub fn gateway(&self) -> &Gateway<S> {
        &self.gateway
    }

    /// Returns a snapshot of the in-memory state
    pub fn state(&self) -> ListState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).loading
    }

    fn dispatch(&self, action: Action) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(?action, "dispatch");
        *state = reduce(state.clone(), action);
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Busy<'_, S> {
        let writer = self.lock_writer();
        self.dispatch(Action::SetLoading(true));
        Busy {
            orchestrator: self,
            _writer: writer,
            done: false,
        }
    }

    fn run<F>(&self, op: &'static str, f: F) -> Result<Synced, SyncError>
    where
        F: FnOnce(&Self) -> Result<Outcome, SyncError>,
    {
        let busy = self.begin();
        match f(self) {
            Ok(outcome) => {
                info!(op, ?outcome, "operation completed");
                Ok(busy.finish(outcome))
            }
            Err(err) => {
                warn!(op, error = %err, "operation rejected");
                Err(err)
            }
        }
    }

    /// Reads the stored list into memory
    ///
    /// A corrupt stored value is reported as [`SyncError::Corruption`]; the
    /// in-memory list keeps its last known value and storage is left as is.
    pub fn load(&self) -> Result<Synced, SyncError> {
        self.run("load", |this| match this.gateway.read_list()? {
            None => {
                this.dispatch(Action::SetList(Vec::new()));
                Ok(Outcome::Empty)
            }
            Some(items) => {
                let count = items.len();
                this.dispatch(Action::SetList(items));
                Ok(Outcome::Loaded { count })
            }
        })
    }

    /// Appends a new item, rejecting blank and duplicate names
    pub fn add(&self, fields: &ItemFields) -> Result<Synced, SyncError> {
        self.run("add", |this| {
            let name = fields.name().ok_or(SyncError::Validation { field: "name" })?;

            let mut current = this.gateway.read_list()?.unwrap_or_default();
            if contains_name(&current, name) {
                return Err(SyncError::Duplicate {
                    name: name.to_string(),
                });
            }

            let newest = max_id(&current).max(max_id(&this.state().items));
            let id = ItemId::next_after(newest).ok_or(SyncError::IdsExhausted {
                max: ItemId::new(i64::MAX),
            })?;
            let item = fields
                .build(id, false)
                .ok_or(SyncError::Validation { field: "name" })?;

            current.push(item.clone());
            this.gateway.write_list(&current)?;
            this.dispatch(Action::AddItem(item.clone()));
            Ok(Outcome::Added { item })
        })
    }

    /// Replaces the item at `index` of the in-memory list
    ///
    /// The index only selects the target; the write itself is resolved by the
    /// item's id.
    pub fn update(&self, index: usize, fields: &ItemFields) -> Result<Synced, SyncError> {
        self.run("update", |this| {
            require_all(fields)?;
            let state = this.state();
            let target = state.items.get(index).ok_or(SyncError::Index {
                index,
                len: state.items.len(),
            })?;
            this.replace(target.id, fields)
        })
    }

    /// Starts editing the item at `index` of the in-memory list
    pub fn begin_edit(&self, index: usize) -> Result<EditSession, SyncError> {
        let state = self.state();
        let item = state.items.get(index).ok_or(SyncError::Index {
            index,
            len: state.items.len(),
        })?;
        Ok(EditSession {
            id: item.id,
            index,
            draft: ItemFields::from_item(item),
        })
    }

    /// Commits an edit to whichever position its item now occupies
    pub fn commit_edit(&self, session: &EditSession) -> Result<Synced, SyncError> {
        self.run("commit_edit", |this| {
            require_all(&session.draft)?;
            this.replace(session.id, &session.draft)
        })
    }

    fn replace(&self, id: ItemId, fields: &ItemFields) -> Result<Outcome, SyncError> {
        let index = position_of(&self.state().items, id).ok_or(SyncError::Missing { id })?;

        let mut current = self.gateway.read_list()?.unwrap_or_default();
        let slot = current
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(SyncError::Missing { id })?;

        let item = fields
            .build(id, slot.purchased)
            .ok_or(SyncError::Validation { field: "name" })?;
        *slot = item.clone();

        self.gateway.write_list(&current)?;
        self.dispatch(Action::UpdateItem {
            index,
            item: item.clone(),
        });
        Ok(Outcome::Updated { index, item })
    }

    /// Removes the item with `id`; an absent id is a successful no-op
    pub fn remove(&self, id: ItemId) -> Result<Synced, SyncError> {
        self.run("remove", |this| {
            let mut current = this.gateway.read_list()?.unwrap_or_default();
            let before = current.len();
            current.retain(|item| item.id != id);
            let existed = current.len() != before;

            if existed {
                this.gateway.write_list(&current)?;
            } else {
                debug!(%id, "remove target absent from storage");
            }

            this.dispatch(Action::RemoveItem(id));
            Ok(Outcome::Removed { id, existed })
        })
    }

    /// Flips `purchased` on the item with `id` and re-syncs the whole list
    pub fn toggle(&self, id: ItemId) -> Result<Synced, SyncError> {
        self.run("toggle", |this| {
            let mut items = this.state().items;
            let Some(index) = position_of(&items, id) else {
                debug!(%id, "toggle target absent");
                return Ok(Outcome::Unchanged);
            };

            let item = items[index].toggled();
            items[index] = item.clone();

            this.gateway.write_list(&items)?;
            this.dispatch(Action::SetList(items));
            Ok(Outcome::Toggled { item })
        })
    }

    /// Removes the list and the session token (logout)
    ///
    /// Does not touch `loading`, but still waits for any mutation in flight.
    pub fn clear_all(&self) -> Result<Synced, SyncError> {
        let _writer = self.lock_writer();

        self.gateway.remove_session_token()?;
        self.gateway.remove_list()?;
        self.dispatch(Action::SetList(Vec::new()));

        info!("cleared list and session");
        Ok(Synced {
            state: self.state(),
            outcome: Outcome::Cleared,
        })
    }
}

fn require_all(fields: &ItemFields) -> Result<(), SyncError> {
    match fields.first_blank() {
        Some(field) => Err(SyncError::Validation { field }),
        None => Ok(()),
    }
}
