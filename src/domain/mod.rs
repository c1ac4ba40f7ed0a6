//! Domain models for the shopping list
//!
//! Contains the item model, field defaulting and the pure reducer, without
//! any I/O concerns.

mod fields;
mod item;
mod state;
mod user;

pub use fields::{parse_category, parse_price, parse_quantity, ItemFields};
pub use item::{contains_name, max_id, position_of, Item, ItemId, ShoppingList, DEFAULT_CATEGORY};
pub use state::{reduce, Action, ListState};
pub use user::UserRecord;
