//! Output directory reset.
//!
//! Every run starts from an empty output directory; stale artifacts from a
//! previous build must never end up in a release archive.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Create `dir` if needed, then delete everything inside it.
///
/// Individual deletion failures are reported and skipped; a stuck file must
/// not abort packaging.
pub fn reset_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        return Ok(());
    }

    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("failed to read an entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        // file_type() does not follow symlinks: a link to a directory is
        // unlinked, not recursed into.
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let removed = if is_dir {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        if let Err(e) = removed {
            warn!("failed to delete {}: {e}", path.display());
        }
    }
    Ok(())
}
