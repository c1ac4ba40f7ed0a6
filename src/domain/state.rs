//! In-memory list state and its reducer
//!
//! [`reduce`] is the only way the in-memory state changes. It never touches
//! storage and never sorts; list order is insertion order.

use serde::Serialize;

use super::item::{Item, ItemId, ShoppingList};

/// The in-memory copy of the list plus the advisory loading flag
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListState {
    pub items: ShoppingList,
    pub loading: bool,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// State transitions understood by [`reduce`]
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the whole list
    SetList(ShoppingList),
    SetLoading(bool),
    /// Append to the end, no duplicate check
    AddItem(Item),
    /// Drop the item with this id, if any
    RemoveItem(ItemId),
    /// Replace the item at a position
    UpdateItem { index: usize, item: Item },
}

/// Computes the next state
///
/// # Panics
///
/// Panics if `UpdateItem` names an index outside the list. Callers resolve the
/// index from the current state first, so an out-of-bounds index is a bug.
pub fn reduce(mut state: ListState, action: Action) -> ListState {
    match action {
        Action::SetList(items) => state.items = items,
        Action::SetLoading(loading) => state.loading = loading,
        Action::AddItem(item) => state.items.push(item),
        Action::RemoveItem(id) => state.items.retain(|item| item.id != id),
        Action::UpdateItem { index, item } => {
            let len = state.items.len();
            match state.items.get_mut(index) {
                Some(slot) => *slot = item,
                None => panic!("UpdateItem index {index} out of bounds for list of {len}"),
            }
        }
    }
    state
}
