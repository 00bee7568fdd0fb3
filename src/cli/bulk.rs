use std::path::Path;

use anyhow::{bail, Result};
use tracing::{instrument, warn};

use super::{open_workspace, parse_filters, ListKind};
use crate::db::{Content, Database, Website};
use crate::listing::{BulkAction, DataSource, ListView, Mutator, Record};

/// Which records to select before acting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Select-all over the filtered list
    All,
    /// Toggle these ids one by one
    Ids(Vec<String>),
    /// Nothing selected (export then covers the filtered list)
    Nothing,
}

#[derive(Debug, Clone)]
pub struct BulkOptions {
    pub kind: ListKind,
    pub filters: Vec<String>,
    pub search: Option<String>,
    pub selection: Selection,
    pub action: BulkAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    pub action: &'static str,
    pub affected: usize,
}

/// Filter, select and run one bulk action
#[instrument(skip_all, fields(kind = %options.kind, action = options.action.kind()))]
pub fn run_bulk(workspace: &Path, options: &BulkOptions) -> Result<BulkReport> {
    let mut db = open_workspace(workspace)?;
    match options.kind {
        ListKind::Content => dispatch::<Content>(&mut db, options),
        ListKind::Websites => dispatch::<Website>(&mut db, options),
    }
}

fn dispatch<R: Record>(db: &mut Database, options: &BulkOptions) -> Result<BulkReport>
where
    Database: DataSource<R> + Mutator<R>,
{
    let filter = parse_filters::<R>(&options.filters, options.search.as_deref())?;
    let mut view = ListView::<R>::new();
    view.refresh_from(&*db)?;
    view.update_filter(|f| *f = filter);

    match &options.selection {
        Selection::All => view.toggle_all(true),
        Selection::Ids(ids) => {
            for id in ids {
                if !view.visible_ids().contains(&id.as_str()) {
                    bail!("Record '{}' is not in the filtered {} list", id, options.kind);
                }
                if !view.toggle_one(id) {
                    warn!(id = %id, "id given twice, deselected");
                }
            }
        }
        Selection::Nothing => {}
    }

    match view.dispatch(options.action.clone(), db) {
        Ok(outcome) => Ok(BulkReport {
            action: options.action.kind(),
            affected: outcome.affected,
        }),
        Err(err) => {
            let remaining = view.selection().len();
            Err(anyhow::Error::new(err).context(format!(
                "Bulk action aborted, {} record(s) remain selected",
                remaining
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{run_init, DB_FILENAME};
    use crate::db::{content, website};
    use tempfile::TempDir;

    fn setup_workspace() -> TempDir {
        let temp = TempDir::new().unwrap();
        run_init(temp.path()).unwrap();

        let db = Database::open(&temp.path().join(DB_FILENAME)).unwrap();
        db.insert_content(&content("1", "SEO Guide", "draft", "article")).unwrap();
        db.insert_content(&content("2", "Marketing Tips", "published", "article")).unwrap();
        db.insert_content(&content("3", "Advanced SEO", "draft", "video")).unwrap();
        db.insert_content(&content("4", "Email Campaigns", "ready", "video")).unwrap();
        db.insert_website(&website("w1", "Tech Blog", "g1", "wordpress", "active")).unwrap();
        db.insert_website(&website("w2", "Food Blog", "g1", "blogger", "active")).unwrap();
        db.insert_website(&website("w3", "News", "g2", "custom", "active")).unwrap();

        temp
    }

    fn open(temp: &TempDir) -> Database {
        Database::open(&temp.path().join(DB_FILENAME)).unwrap()
    }

    fn options(kind: ListKind, filters: &[&str], selection: Selection, action: BulkAction) -> BulkOptions {
        BulkOptions {
            kind,
            filters: filters.iter().map(|s| s.to_string()).collect(),
            search: None,
            selection,
            action,
        }
    }

    fn ids(list: &[&str]) -> Selection {
        Selection::Ids(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_select_all_filtered_then_archive() {
        let temp = setup_workspace();

        let report = run_bulk(
            temp.path(),
            &options(
                ListKind::Content,
                &["status=draft"],
                Selection::All,
                BulkAction::StatusChange("archived".into()),
            ),
        )
        .unwrap();

        assert_eq!(report, BulkReport { action: "status-change", affected: 2 });
        let statuses: Vec<String> =
            open(&temp).get_all_contents().unwrap().into_iter().map(|c| c.status).collect();
        assert_eq!(statuses, vec!["archived", "published", "archived", "ready"]);
    }

    #[test]
    fn test_delete_individual_ids() {
        let temp = setup_workspace();

        run_bulk(
            temp.path(),
            &options(ListKind::Content, &[], ids(&["2", "4"]), BulkAction::Delete),
        )
        .unwrap();

        assert_eq!(open(&temp).count_contents().unwrap(), 2);
    }

    #[test]
    fn test_hidden_id_is_rejected() {
        let temp = setup_workspace();

        let err = run_bulk(
            temp.path(),
            &options(ListKind::Content, &["status=draft"], ids(&["2"]), BulkAction::Delete),
        )
        .unwrap_err();

        assert!(err.to_string().contains("not in the filtered content list"));
        assert_eq!(open(&temp).count_contents().unwrap(), 4);
    }

    #[test]
    fn test_delete_without_selection_fails() {
        let temp = setup_workspace();

        let err = run_bulk(
            temp.path(),
            &options(ListKind::Content, &[], Selection::Nothing, BulkAction::Delete),
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("no records selected for delete"));
        assert_eq!(open(&temp).count_contents().unwrap(), 4);
    }

    #[test]
    fn test_invalid_status_rolls_back_and_reports_selection() {
        let temp = setup_workspace();

        let err = run_bulk(
            temp.path(),
            &options(
                ListKind::Content,
                &[],
                ids(&["1", "3"]),
                BulkAction::StatusChange("scheduled".into()),
            ),
        )
        .unwrap_err();

        assert!(err.to_string().contains("2 record(s) remain selected"));
        let statuses: Vec<String> =
            open(&temp).get_all_contents().unwrap().into_iter().map(|c| c.status).collect();
        assert_eq!(statuses, vec!["draft", "published", "draft", "ready"]);
    }

    #[test]
    fn test_export_without_selection_covers_filtered_websites() {
        let temp = setup_workspace();
        let out = temp.path().join("sites.json");

        let report = run_bulk(
            temp.path(),
            &options(
                ListKind::Websites,
                &["group=g1"],
                Selection::Nothing,
                BulkAction::Export(out.clone()),
            ),
        )
        .unwrap();

        assert_eq!(report.affected, 2);
        let exported: Vec<Website> =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        let names: Vec<&str> = exported.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Tech Blog", "Food Blog"]);
    }

    #[test]
    fn test_deactivate_websites() {
        let temp = setup_workspace();

        run_bulk(
            temp.path(),
            &options(
                ListKind::Websites,
                &["platform=custom"],
                Selection::All,
                BulkAction::StatusChange("inactive".into()),
            ),
        )
        .unwrap();

        let sites = open(&temp).get_all_websites().unwrap();
        assert_eq!(sites[2].status, "inactive");
        assert_eq!(sites[0].status, "active");
    }
}
