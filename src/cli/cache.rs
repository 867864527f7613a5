//! Cache management commands

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::resolve_cache_dir;
use crate::cache::{SNAPSHOT_FILE, SnapshotStore};
use crate::error::Result;

fn snapshot_store(opts: &GlobalOptions) -> Result<SnapshotStore> {
    Ok(SnapshotStore::at(resolve_cache_dir(opts)?.join(SNAPSHOT_FILE)))
}

/// Show where the snapshot and icons live
pub fn path(opts: &GlobalOptions) -> Result<()> {
    let dir = resolve_cache_dir(opts)?;

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "path": dir.display().to_string(),
                "snapshot": snapshot_store(opts)?.path().display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => println!("{}", dir.display()),
    }

    Ok(())
}

/// Delete the saved account snapshot. Icons are left in place.
pub fn clear(opts: &GlobalOptions) -> Result<()> {
    let removed = snapshot_store(opts)?.clear()?;

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "removed": removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            if removed {
                println!("{} Account snapshot cleared", "✓".green());
            } else {
                println!("{} No account snapshot to clear", "○".dimmed());
            }
        }
    }

    Ok(())
}
