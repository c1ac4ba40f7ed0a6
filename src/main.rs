//! Shoplist - local-first personal shopping list

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = shoplist::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
