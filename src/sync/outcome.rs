//! Results of orchestrated operations

use serde::Serialize;

use crate::domain::{Item, ItemId, ListState};

/// What a successful operation did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A stored list was read
    Loaded { count: usize },
    /// Nothing stored yet
    Empty,
    Added { item: Item },
    Updated { index: usize, item: Item },
    Removed { id: ItemId, existed: bool },
    Toggled { item: Item },
    /// Target id was not on the list
    Unchanged,
    Cleared,
}

impl Outcome {
    /// Human-readable notice for the presentation layer
    pub fn message(&self) -> String {
        match self {
            Outcome::Loaded { count } => format!("Shopping list loaded ({count} items)"),
            Outcome::Empty => "It seems like your shopping list is empty.".to_string(),
            Outcome::Added { item } => format!("Added {} to the shopping list", item.name),
            Outcome::Updated { item, .. } => format!("Updated {}", item.name),
            Outcome::Removed { existed: true, id } => format!("Removed item {id}"),
            Outcome::Removed { existed: false, id } => format!("Item {id} was not on the list"),
            Outcome::Toggled { item } if item.purchased => {
                format!("{} marked as purchased", item.name)
            }
            Outcome::Toggled { item } => format!("{} unmarked as purchased", item.name),
            Outcome::Unchanged => "Nothing to change".to_string(),
            Outcome::Cleared => "Your data has been removed".to_string(),
        }
    }
}

/// New in-memory state paired with what produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Synced {
    pub state: ListState,
    pub outcome: Outcome,
}
