mod bulk;
mod import;
mod init;
mod list;

use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::db::Database;
use crate::listing::{FilterState, Record};

pub use bulk::{run_bulk, BulkOptions, BulkReport, Selection};
pub use import::{run_import, Fixtures, ImportStats};
pub use init::run_init;
pub use list::{run_list, ListOptions, ListReport, ListRow};

/// Database filename stored in the workspace root
pub const DB_FILENAME: &str = ".pressdesk.db";

/// Which list a command works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListKind {
    Content,
    Websites,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Content => "content",
            ListKind::Websites => "websites",
        }
    }

    /// The other list
    pub fn toggle(&self) -> Self {
        match self {
            ListKind::Content => ListKind::Websites,
            ListKind::Websites => ListKind::Content,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open the workspace database, failing if `init` was never run
pub fn open_workspace(workspace: &Path) -> Result<Database> {
    let db_path = workspace.join(DB_FILENAME);
    if !db_path.exists() {
        bail!(
            "No database found at {}. Run 'pressdesk init' first.",
            workspace.display()
        );
    }
    Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))
}

/// Build a filter from `key=value` assignments and an optional search.
///
/// Keys must be dimensions of `R`. Values are not checked: an unknown
/// value is a valid filter that matches nothing.
pub fn parse_filters<R: Record>(assignments: &[String], search: Option<&str>) -> Result<FilterState> {
    let mut filter = FilterState::new();
    for assignment in assignments {
        let (key, value) = assignment
            .split_once('=')
            .with_context(|| format!("Invalid filter '{}': expected key=value", assignment))?;
        if R::dimension(key).is_none() {
            let known: Vec<&str> = R::DIMENSIONS.iter().map(|d| d.key).collect();
            bail!("Unknown filter '{}'. Available: {}", key, known.join(", "));
        }
        filter.set_dimension(key, value);
    }
    if let Some(search) = search {
        filter.set_search(search);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Content, Website};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_filters() {
        let filter =
            parse_filters::<Content>(&strings(&["status=draft", "type=video"]), Some("seo")).unwrap();

        assert_eq!(filter.dimension("status"), Some("draft"));
        assert_eq!(filter.dimension("type"), Some("video"));
        assert_eq!(filter.search(), "seo");
    }

    #[test]
    fn test_parse_filters_all_is_inactive() {
        let filter = parse_filters::<Website>(&strings(&["platform=all"]), None).unwrap();
        assert!(!filter.is_active());
    }

    #[test]
    fn test_parse_filters_rejects_unknown_key() {
        let err = parse_filters::<Website>(&strings(&["language=en"]), None).unwrap_err();
        assert!(err.to_string().contains("Unknown filter 'language'"));
    }

    #[test]
    fn test_parse_filters_rejects_missing_equals() {
        assert!(parse_filters::<Content>(&strings(&["status"]), None).is_err());
    }

    #[test]
    fn test_unknown_value_is_accepted() {
        let filter = parse_filters::<Content>(&strings(&["status=scheduled"]), None).unwrap();
        assert_eq!(filter.dimension("status"), Some("scheduled"));
    }

    #[test]
    fn test_open_workspace_without_init_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = open_workspace(temp.path()).err().unwrap();
        assert!(err.to_string().contains("pressdesk init"));
    }

    #[test]
    fn test_list_kind_toggle() {
        assert_eq!(ListKind::Content.toggle(), ListKind::Websites);
        assert_eq!(ListKind::Websites.to_string(), "websites");
    }
}
