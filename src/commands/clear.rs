//! `clear`: remove every stored series record.

use crate::Result;
use std::path::PathBuf;
use tracing::warn;

use super::common::CommandContext;

/// Handle `clear`. Without `yes` nothing is deleted.
pub fn handle_clear(db: Option<PathBuf>, yes: bool) -> Result<()> {
    if !yes {
        eprintln!("Refusing to clear all series data without --yes");
        return Ok(());
    }
    let mut ctx = CommandContext::open(db)?;
    ctx.store.clear_all()?;
    warn!("all series data cleared");
    println!("✓ Series configuration, races and aliases cleared");
    Ok(())
}
