//! `alias add` and `alias list`.

use crate::{names::normalize_name, Result};
use std::path::PathBuf;

use super::common::CommandContext;

/// Handle `alias add`
pub fn handle_alias_add(db: Option<PathBuf>, alias: &str, canonical: &str) -> Result<()> {
    let mut ctx = CommandContext::open(db)?;
    ctx.store.save_rider_alias(alias, canonical)?;
    println!(
        "✓ \"{}\" will be shown as \"{}\"",
        normalize_name(alias),
        canonical.trim()
    );
    Ok(())
}

/// Handle `alias list`
pub fn handle_alias_list(db: Option<PathBuf>) -> Result<()> {
    let ctx = CommandContext::open(db)?;
    let aliases = ctx.store.load_rider_aliases()?;
    if aliases.is_empty() {
        println!("No rider aliases");
        return Ok(());
    }
    for (alias, canonical) in &aliases {
        println!("{} -> {}", alias, canonical);
    }
    Ok(())
}
