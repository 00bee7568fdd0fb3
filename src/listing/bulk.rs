use std::path::PathBuf;

use anyhow::Result;

use super::record::Record;

/// An operation applied to every selected record at once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAction {
    /// Move the records to a new status
    StatusChange(String),
    Delete,
    /// Write the records to a file
    Export(PathBuf),
}

impl BulkAction {
    pub fn kind(&self) -> &'static str {
        match self {
            BulkAction::StatusChange(_) => "status-change",
            BulkAction::Delete => "delete",
            BulkAction::Export(_) => "export",
        }
    }

    /// Export falls back to the visible records; everything else needs a selection
    pub fn requires_selection(&self) -> bool {
        !matches!(self, BulkAction::Export(_))
    }
}

/// What the mutation collaborator receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRequest {
    pub action: BulkAction,
    /// Target ids in list order
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub affected: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum BulkError {
    #[error("no records selected for {0}")]
    EmptySelection(&'static str),
    #[error("a {0} is already in progress")]
    InFlight(&'static str),
    #[error("list view was reset before the {0} finished")]
    Discarded(&'static str),
    #[error("{kind} failed")]
    Collaborator {
        kind: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// Supplies the full record collection for a list
pub trait DataSource<R: Record> {
    fn fetch_all(&self) -> Result<Vec<R>>;
}

/// Persists bulk changes. Must be all-or-nothing: an error means nothing was applied.
pub trait Mutator<R: Record> {
    fn apply(&mut self, request: &BulkRequest) -> Result<BulkOutcome>;
}

/// A bulk request that has left the view and not yet reported back
#[derive(Debug)]
pub struct PendingBulk {
    pub(super) request: BulkRequest,
    pub(super) generation: u64,
}

impl PendingBulk {
    pub fn request(&self) -> &BulkRequest {
        &self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kinds() {
        assert_eq!(BulkAction::StatusChange("draft".into()).kind(), "status-change");
        assert_eq!(BulkAction::Delete.kind(), "delete");
        assert_eq!(BulkAction::Export(PathBuf::from("out.json")).kind(), "export");
    }

    #[test]
    fn test_only_export_works_without_selection() {
        assert!(BulkAction::Delete.requires_selection());
        assert!(BulkAction::StatusChange("ready".into()).requires_selection());
        assert!(!BulkAction::Export(PathBuf::from("out.json")).requires_selection());
    }

    #[test]
    fn test_collaborator_cause_is_reported_once() {
        let err = BulkError::Collaborator {
            kind: "delete",
            source: anyhow::anyhow!("database is locked"),
        };
        assert_eq!(err.to_string(), "delete failed");

        let chained = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chained, "delete failed: database is locked");
    }

    #[test]
    fn test_pending_bulk_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<PendingBulk>();
    }
}
