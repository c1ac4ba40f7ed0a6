//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `list` | Show the list with totals |
//! | `add` | Add an item (name must be unique) |
//! | `edit` | Change fields of the item at a position |
//! | `remove` | Remove an item by ID |
//! | `toggle` | Flip an item's purchased mark |
//! | `clear` | Remove the list and session data |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr, or set `RUST_LOG`:
//! ```bash
//! shoplist --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod list;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
