//! Shopping list item model
//!
//! Items are the only entity in a list. An item's `id` is assigned once at
//! creation and never changes; every other field may be edited.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Category used when none is supplied
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Ordered list of items, insertion order is display order
pub type ShoppingList = Vec<Item>;

/// Item identifier derived from creation time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the next id for a list whose largest id is `max_existing`
    ///
    /// Ids follow the wall clock but never go backwards, so two items created
    /// within the same millisecond still get distinct ids. Returns `None` once
    /// the largest id is `i64::MAX`.
    pub fn next_after(max_existing: Option<ItemId>) -> Option<Self> {
        let now = Utc::now().timestamp_millis();
        match max_existing {
            Some(ItemId(max)) if max >= now => max.checked_add(1).map(Self),
            _ => Some(Self(now)),
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single entry on the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,

    pub name: String,

    /// Always at least 1
    pub quantity: u32,

    pub category: String,

    /// Unit price, never negative
    pub price: f64,

    /// Lists written before an item was first toggled lack this field
    #[serde(default)]
    pub purchased: bool,
}

impl Item {
    /// Returns a copy with `purchased` flipped
    pub fn toggled(&self) -> Self {
        Self {
            purchased: !self.purchased,
            ..self.clone()
        }
    }
}

/// Returns the largest id in the list
pub fn max_id(items: &[Item]) -> Option<ItemId> {
    items.iter().map(|item| item.id).max()
}

/// Returns the position of the item with the given id
pub fn position_of(items: &[Item], id: ItemId) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

/// Returns true if any item carries exactly this name (case-sensitive)
pub fn contains_name(items: &[Item], name: &str) -> bool {
    items.iter().any(|item| item.name == name)
}
