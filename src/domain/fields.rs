//! Raw field input and defaulting rules
//!
//! The presentation layer hands over whatever the user typed. Numeric fields
//! never reject input; they fall back to defaults instead.

use serde::{Deserialize, Serialize};

use super::item::{Item, ItemId, DEFAULT_CATEGORY};

/// Unvalidated field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    pub quantity: String,
    pub category: String,
    pub price: String,
}

impl ItemFields {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            category: category.into(),
            price: price.into(),
        }
    }

    /// Pre-fills the fields from an existing item
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity.to_string(),
            category: item.category.clone(),
            price: item.price.to_string(),
        }
    }

    /// Trimmed name, `None` if blank
    pub fn name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Returns the first field left blank, checking name, quantity, category, price
    pub fn first_blank(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("quantity", &self.quantity),
            ("category", &self.category),
            ("price", &self.price),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    /// Builds an item with the given id, applying every defaulting rule
    ///
    /// Returns `None` if the name is blank.
    pub fn build(&self, id: ItemId, purchased: bool) -> Option<Item> {
        let name = self.name()?;
        Some(Item {
            id,
            name: name.to_string(),
            quantity: parse_quantity(&self.quantity),
            category: parse_category(&self.category),
            price: parse_price(&self.price),
            purchased,
        })
    }
}

/// Parses the leading integer of `raw`; zero or garbage yields 1
pub fn parse_quantity(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>();

    match digits.parse::<u32>() {
        Ok(0) | Err(_) => 1,
        Ok(quantity) => quantity,
    }
}

/// Parses a non-negative finite price; anything else yields 0
pub fn parse_price(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => price,
        _ => 0.0,
    }
}

/// Trims the category, substituting the default when blank
pub fn parse_category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}
