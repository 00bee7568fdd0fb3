use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use super::{Content, Database, Website};
use crate::listing::{BulkAction, BulkOutcome, BulkRequest, DataSource, Mutator, Record};

impl DataSource<Content> for Database {
    fn fetch_all(&self) -> Result<Vec<Content>> {
        self.get_all_contents()
    }
}

impl DataSource<Website> for Database {
    fn fetch_all(&self) -> Result<Vec<Website>> {
        self.get_all_websites()
    }
}

impl Mutator<Content> for Database {
    fn apply(&mut self, request: &BulkRequest) -> Result<BulkOutcome> {
        let ids = &request.ids;
        let affected = match &request.action {
            BulkAction::StatusChange(status) => self.in_transaction(|db| {
                for id in ids {
                    db.set_content_status(id, status)?;
                }
                Ok(ids.len())
            })?,
            BulkAction::Delete => self.in_transaction(|db| {
                for id in ids {
                    db.delete_content(id)?;
                }
                Ok(ids.len())
            })?,
            BulkAction::Export(path) => export_records(&self.get_all_contents()?, ids, path)?,
        };
        info!(kind = request.action.kind(), affected, "applied bulk action to contents");
        Ok(BulkOutcome { affected })
    }
}

impl Mutator<Website> for Database {
    fn apply(&mut self, request: &BulkRequest) -> Result<BulkOutcome> {
        let ids = &request.ids;
        let affected = match &request.action {
            BulkAction::StatusChange(status) => self.in_transaction(|db| {
                for id in ids {
                    db.set_website_status(id, status)?;
                }
                Ok(ids.len())
            })?,
            BulkAction::Delete => self.in_transaction(|db| {
                for id in ids {
                    db.delete_website(id)?;
                }
                Ok(ids.len())
            })?,
            BulkAction::Export(path) => export_records(&self.get_all_websites()?, ids, path)?,
        };
        info!(kind = request.action.kind(), affected, "applied bulk action to websites");
        Ok(BulkOutcome { affected })
    }
}

/// Write the records named by `ids` to `path` as a JSON array, in listing order.
/// Nothing is written if any id is missing.
pub fn export_records<R: Record + Serialize>(records: &[R], ids: &[String], path: &Path) -> Result<usize> {
    let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let selected: Vec<&R> = records.iter().filter(|r| wanted.contains(r.id())).collect();

    if selected.len() != wanted.len() {
        let found: HashSet<&str> = selected.iter().map(|r| r.id()).collect();
        let missing: Vec<&str> = ids
            .iter()
            .map(String::as_str)
            .filter(|id| !found.contains(id))
            .collect();
        bail!("Cannot export missing records: {}", missing.join(", "));
    }

    let json = serde_json::to_string_pretty(&selected)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(selected.len())
}
