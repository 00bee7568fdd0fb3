use std::path::Path;

use anyhow::Result;

use super::{open_workspace, parse_filters, ListKind};
use crate::db::{Content, Database, Website};
use crate::listing::{DataSource, ListStatus, ListSummary, ListView, Record};

/// Options for filtering a list
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub kind: ListKind,
    /// `key=value` dimension filters
    pub filters: Vec<String>,
    pub search: Option<String>,
}

/// One visible record for display
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: String,
    pub title: String,
    /// Dimension value labels, in dimension order
    pub fields: Vec<String>,
}

impl ListRow {
    pub fn from_record<R: Record>(record: &R) -> Self {
        Self {
            id: record.id().to_string(),
            title: record.title().to_string(),
            fields: R::DIMENSIONS
                .iter()
                .map(|d| record.field_label(d.key).unwrap_or_default())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListReport {
    pub rows: Vec<ListRow>,
    /// Active filter chip labels
    pub chips: Vec<String>,
    pub summary: ListSummary,
    pub status: ListStatus,
}

/// List the visible records of one kind under the given filters
pub fn run_list(workspace: &Path, options: &ListOptions) -> Result<ListReport> {
    let db = open_workspace(workspace)?;
    match options.kind {
        ListKind::Content => build_report::<Content>(&db, options),
        ListKind::Websites => build_report::<Website>(&db, options),
    }
}

fn build_report<R: Record>(db: &Database, options: &ListOptions) -> Result<ListReport>
where
    Database: DataSource<R>,
{
    let filter = parse_filters::<R>(&options.filters, options.search.as_deref())?;
    let mut view = ListView::<R>::new();
    view.refresh_from(db)?;
    view.update_filter(|f| *f = filter);

    Ok(ListReport {
        rows: view.visible().into_iter().map(ListRow::from_record).collect(),
        chips: view.chips().into_iter().map(|c| c.label).collect(),
        summary: view.summary(),
        status: view.status(),
    })
}
