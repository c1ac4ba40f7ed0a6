//! Shopping list commands
//!
//! Every command starts from a fresh `load()`, then runs one orchestrated
//! operation.

use anyhow::{Context, Result};
use tracing::warn;

use super::output::Output;
use crate::domain::{ItemFields, ItemId};
use crate::storage::KeyValueStore;
use crate::sync::{ErrorKind, Orchestrator, Synced};

/// Field overrides for `edit`; `None` keeps the current value
#[derive(Debug, Default)]
pub struct EditChanges {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
}

/// Loads the stored list, tolerating corruption so mutations can report it
fn startup<S: KeyValueStore>(orchestrator: &Orchestrator<S>, output: &Output) -> Result<()> {
    match orchestrator.load() {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::Corruption => {
            warn!(error = %err, "continuing with an empty list");
            output.warning(&format!("{err}. Run 'shoplist clear' to start over."));
            Ok(())
        }
        Err(err) => Err(err).context("Failed to load shopping list"),
    }
}

fn report(output: &Output, synced: &Synced) {
    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "message": synced.outcome.message(),
            "result": synced.outcome,
            "items": synced.state.items,
        }));
    } else {
        output.success(&synced.outcome.message());
    }
}

pub fn show<S: KeyValueStore>(orchestrator: &Orchestrator<S>, output: &Output) -> Result<()> {
    let synced = orchestrator
        .load()
        .context("Failed to load shopping list")?;

    if synced.state.is_empty() && !output.is_json() {
        println!("It seems like your shopping list is empty.");
        return Ok(());
    }

    output.items(&synced.state.items);

    if !output.is_json() {
        let total: f64 = synced
            .state
            .items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();
        let purchased = synced.state.items.iter().filter(|item| item.purchased).count();
        println!();
        println!(
            "{} item(s), {} purchased, total {:.2}",
            synced.state.items.len(),
            purchased,
            total
        );
    }

    Ok(())
}

pub fn add<S: KeyValueStore>(
    orchestrator: &Orchestrator<S>,
    output: &Output,
    name: String,
    quantity: String,
    category: String,
    price: String,
) -> Result<()> {
    startup(orchestrator, output)?;

    let fields = ItemFields {
        name,
        quantity,
        category,
        price,
    };
    let synced = orchestrator.add(&fields).context("Failed to add item")?;
    report(output, &synced);
    Ok(())
}

pub fn edit<S: KeyValueStore>(
    orchestrator: &Orchestrator<S>,
    output: &Output,
    index: usize,
    changes: EditChanges,
) -> Result<()> {
    startup(orchestrator, output)?;

    let mut session = orchestrator
        .begin_edit(index)
        .context("Failed to edit item")?;

    let draft = &mut session.draft;
    if let Some(name) = changes.name {
        draft.name = name;
    }
    if let Some(quantity) = changes.quantity {
        draft.quantity = quantity;
    }
    if let Some(category) = changes.category {
        draft.category = category;
    }
    if let Some(price) = changes.price {
        draft.price = price;
    }

    let synced = orchestrator
        .commit_edit(&session)
        .context("Failed to update item")?;
    report(output, &synced);
    Ok(())
}

pub fn remove<S: KeyValueStore>(
    orchestrator: &Orchestrator<S>,
    output: &Output,
    id: ItemId,
) -> Result<()> {
    startup(orchestrator, output)?;

    let synced = orchestrator
        .remove(id)
        .context("Failed to remove item")?;
    report(output, &synced);
    Ok(())
}

pub fn toggle<S: KeyValueStore>(
    orchestrator: &Orchestrator<S>,
    output: &Output,
    id: ItemId,
) -> Result<()> {
    startup(orchestrator, output)?;

    let synced = orchestrator
        .toggle(id)
        .context("Failed to update purchase status")?;
    report(output, &synced);
    Ok(())
}

pub fn clear<S: KeyValueStore>(orchestrator: &Orchestrator<S>, output: &Output) -> Result<()> {
    let synced = orchestrator
        .clear_all()
        .context("Failed to clear data")?;
    report(output, &synced);
    Ok(())
}
