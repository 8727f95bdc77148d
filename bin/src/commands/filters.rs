//! Filters command implementation.

use anyhow::Result;
use tsfold_lib::CATALOGUE;

/// Print the record filter catalogue.
pub(crate) fn list_filters() -> Result<()> {
    println!("{:<18} {:<5} {}", "NAME", "CODE", "DESCRIPTION");
    println!("{}", "-".repeat(60));

    for def in &CATALOGUE {
        println!(
            "{:<18} {:<5} {}",
            def.name,
            def.code.unwrap_or("-"),
            def.description
        );
    }

    println!("\nTotal: {} filters", CATALOGUE.len());
    Ok(())
}
