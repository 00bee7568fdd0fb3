use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::DB_FILENAME;
use crate::db::Database;

/// Create the workspace database. Existing data is left alone.
pub fn run_init(workspace: &Path) -> Result<PathBuf> {
    let workspace = workspace
        .canonicalize()
        .with_context(|| format!("Workspace path does not exist: {}", workspace.display()))?;

    let db_path = workspace.join(DB_FILENAME);
    Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    info!(path = %db_path.display(), "workspace initialized");

    Ok(db_path)
}
