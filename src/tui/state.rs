use std::path::PathBuf;

use anyhow::Result;
use ratatui::widgets::TableState;
use tracing::{debug, warn};

use crate::cli::ListKind;
use crate::listing::{BulkAction, BulkError, BulkOutcome, DataSource, ListView, Mutator, Record};

pub use super::dialogs::{DimensionChoice, FilterDialogState, SearchState, StatusMenuState};

/// Everything the terminal list view needs for one kind of record
pub struct AppState<R: Record> {
    pub kind: ListKind,
    pub workspace: PathBuf,
    pub view: ListView<R>,
    /// Row under the cursor, an index into the visible list
    pub cursor: usize,
    pub table_state: TableState,
    pub search: SearchState,
    pub filter_dialog: Option<FilterDialogState>,
    pub status_menu: Option<StatusMenuState>,
    /// Number of records awaiting delete confirmation
    pub confirm_delete: Option<usize>,
    pub show_help: bool,
    pub status_message: Option<String>,
    /// Whether `status_message` reports a failure
    pub status_is_error: bool,
}

impl<R: Record> AppState<R> {
    pub fn new<S: DataSource<R> + ?Sized>(kind: ListKind, workspace: PathBuf, source: &S) -> Result<Self> {
        let mut view = ListView::new();
        view.refresh_from(source)?;
        let mut state = Self {
            kind,
            workspace,
            view,
            cursor: 0,
            table_state: TableState::default(),
            search: SearchState::new(),
            filter_dialog: None,
            status_menu: None,
            confirm_delete: None,
            show_help: false,
            status_message: None,
            status_is_error: false,
        };
        state.clamp_cursor();
        Ok(state)
    }

    // ==================== Cursor ====================

    pub fn move_down(&mut self) {
        let len = self.view.visible().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
        self.clamp_cursor();
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.clamp_cursor();
    }

    /// Keep the cursor on a visible row after the list changed
    fn clamp_cursor(&mut self) {
        let len = self.view.visible().len();
        if len == 0 {
            self.cursor = 0;
            self.table_state.select(None);
        } else {
            self.cursor = self.cursor.min(len - 1);
            self.table_state.select(Some(self.cursor));
        }
    }

    pub fn current_id(&self) -> Option<String> {
        self.view
            .visible()
            .get(self.cursor)
            .map(|r| r.id().to_string())
    }

    // ==================== Selection ====================

    pub fn toggle_current(&mut self) {
        if let Some(id) = self.current_id() {
            self.view.toggle_one(&id);
        }
    }

    /// Header checkbox: select every visible row, or clear when all are already selected
    pub fn toggle_all(&mut self) {
        let checked = !self.view.is_all_selected();
        self.view.toggle_all(checked);
    }

    // ==================== Search ====================

    pub fn start_search(&mut self) {
        self.search.activate();
        self.view.set_search("");
        self.clamp_cursor();
    }

    pub fn search_char(&mut self, c: char) {
        self.search.push_char(c);
        self.view.set_search(&self.search.query);
        self.clamp_cursor();
    }

    pub fn search_backspace(&mut self) {
        self.search.pop_char();
        self.view.set_search(&self.search.query);
        self.clamp_cursor();
    }

    pub fn accept_search(&mut self) {
        self.search.accept();
    }

    pub fn cancel_search(&mut self) {
        self.search.deactivate();
        self.view.set_search("");
        self.clamp_cursor();
    }

    // ==================== Filters ====================

    pub fn open_filter_dialog(&mut self) {
        self.filter_dialog = Some(FilterDialogState::for_records(
            self.view.records(),
            self.view.filter(),
        ));
    }

    pub fn close_filter_dialog(&mut self) {
        self.filter_dialog = None;
    }

    pub fn filter_dialog_up(&mut self) {
        if let Some(ref mut dialog) = self.filter_dialog {
            dialog.focus_up();
        }
    }

    pub fn filter_dialog_down(&mut self) {
        if let Some(ref mut dialog) = self.filter_dialog {
            dialog.focus_down();
        }
    }

    /// Cycle the focused dimension and apply it immediately
    pub fn filter_dialog_cycle(&mut self, forward: bool) {
        let change = self.filter_dialog.as_mut().and_then(|dialog| {
            if forward {
                dialog.cycle_right()
            } else {
                dialog.cycle_left()
            }
        });
        if let Some((key, value)) = change {
            self.view.set_dimension(key, &value);
            self.clamp_cursor();
        }
    }

    /// Remove the nth chip (1-based, as shown on screen)
    pub fn remove_chip(&mut self, n: usize) {
        let chips = self.view.chips();
        if let Some(chip) = n.checked_sub(1).and_then(|i| chips.get(i)) {
            if chip.target == crate::listing::ChipTarget::Search {
                self.search.deactivate();
            }
            self.view.remove_chip(&chip.target);
            self.clamp_cursor();
        }
    }

    pub fn clear_filters(&mut self) {
        self.search.deactivate();
        self.view.clear_filters();
        if let Some(ref mut dialog) = self.filter_dialog {
            dialog.reset();
        }
        self.clamp_cursor();
    }

    // ==================== Bulk actions ====================

    pub fn open_status_menu(&mut self) {
        if self.view.selection().is_empty() {
            self.set_error("Select records first (Space or a)");
            return;
        }
        self.status_menu = StatusMenuState::for_records::<R>();
    }

    pub fn close_status_menu(&mut self) {
        self.status_menu = None;
    }

    pub fn status_menu_up(&mut self) {
        if let Some(ref mut menu) = self.status_menu {
            menu.move_up();
        }
    }

    pub fn status_menu_down(&mut self) {
        if let Some(ref mut menu) = self.status_menu {
            menu.move_down();
        }
    }

    /// Apply the highlighted status to the selection
    pub fn status_menu_select<S: DataSource<R> + Mutator<R>>(&mut self, store: &mut S) {
        let status = self.status_menu.take().and_then(|m| m.selected_status());
        if let Some(status) = status {
            self.run_bulk(BulkAction::StatusChange(status.to_string()), store);
        }
    }

    pub fn request_delete(&mut self) {
        let count = self.view.selection().len();
        if count == 0 {
            self.set_error("Select records first (Space or a)");
            return;
        }
        self.confirm_delete = Some(count);
    }

    pub fn confirm_delete<S: DataSource<R> + Mutator<R>>(&mut self, store: &mut S) {
        if self.confirm_delete.take().is_some() {
            self.run_bulk(BulkAction::Delete, store);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    /// Export the selection (or the whole filtered list) next to the database
    pub fn export<S: DataSource<R> + Mutator<R>>(&mut self, store: &mut S) {
        let path = self.export_path();
        self.run_bulk(BulkAction::Export(path), store);
    }

    pub fn export_path(&self) -> PathBuf {
        self.workspace.join(format!("export-{}.json", self.kind))
    }

    fn run_bulk<S: DataSource<R> + Mutator<R>>(&mut self, action: BulkAction, store: &mut S) {
        let message = describe_success(&action, self.kind);
        match self.view.dispatch(action, &mut *store) {
            Ok(BulkOutcome { affected }) => {
                self.set_message(format!("{} {} record(s)", message, affected));
                if let Err(err) = self.view.refresh_from(&*store) {
                    warn!(error = %err, "reload after bulk action failed");
                    self.set_error(format!("Reload failed: {:#}", err));
                }
                self.clamp_cursor();
            }
            Err(BulkError::Collaborator { kind, source }) => {
                let remaining = self.view.selection().len();
                self.set_error(format!("{} failed: {:#} ({} still selected)", kind, source, remaining));
            }
            Err(err) => {
                debug!(error = %err, "bulk action rejected");
                self.set_error(err.to_string());
            }
        }
    }

    // ==================== Status bar ====================

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = true;
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

fn describe_success(action: &BulkAction, kind: ListKind) -> String {
    match action {
        BulkAction::StatusChange(status) => format!("Set {} on", status),
        BulkAction::Delete => format!("Deleted {}:", kind),
        BulkAction::Export(path) => format!("Exported to {}:", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{content, Content, Database};
    use crate::listing::HeaderCheckbox;
    use tempfile::TempDir;

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_content(&content("1", "SEO Guide", "draft", "article")).unwrap();
        db.insert_content(&content("2", "Marketing Tips", "published", "article")).unwrap();
        db.insert_content(&content("3", "Advanced SEO", "draft", "video")).unwrap();
        db
    }

    fn state(db: &Database, workspace: &std::path::Path) -> AppState<Content> {
        AppState::new(ListKind::Content, workspace.to_path_buf(), db).unwrap()
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let db = seeded_db();
        let mut app = state(&db, std::path::Path::new("."));

        app.move_up();
        assert_eq!(app.cursor, 0);
        app.move_down();
        app.move_down();
        app.move_down();
        assert_eq!(app.cursor, 2);
        assert_eq!(app.table_state.selected(), Some(2));
    }

    #[test]
    fn test_live_search_clamps_cursor() {
        let db = seeded_db();
        let mut app = state(&db, std::path::Path::new("."));
        app.move_down();
        app.move_down();

        app.start_search();
        for c in "tips".chars() {
            app.search_char(c);
        }

        assert_eq!(app.view.visible_ids(), vec!["2"]);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.current_id().as_deref(), Some("2"));

        app.cancel_search();
        assert_eq!(app.view.visible().len(), 3);
    }

    #[test]
    fn test_toggle_all_flips_header() {
        let db = seeded_db();
        let mut app = state(&db, std::path::Path::new("."));

        app.toggle_all();
        assert_eq!(app.view.header_state(), HeaderCheckbox::Checked);
        app.toggle_all();
        assert_eq!(app.view.header_state(), HeaderCheckbox::Unchecked);
    }

    #[test]
    fn test_filter_dialog_applies_immediately() {
        let db = seeded_db();
        let mut app = state(&db, std::path::Path::new("."));
        app.toggle_all();

        app.open_filter_dialog();
        app.filter_dialog_cycle(true); // status: all -> draft

        assert_eq!(app.view.visible_ids(), vec!["1", "3"]);
        // Hidden row dropped from the selection
        assert_eq!(app.view.selected_ids(), vec!["1", "3"]);
    }

    #[test]
    fn test_remove_chip_by_number() {
        let db = seeded_db();
        let mut app = state(&db, std::path::Path::new("."));
        app.view.set_dimension("type", "video");
        app.view.set_search("seo");

        app.remove_chip(1); // search chip comes first
        assert_eq!(app.view.filter().search(), "");
        assert_eq!(app.view.chips().len(), 1);

        app.remove_chip(5);
        assert_eq!(app.view.chips().len(), 1);
    }

    #[test]
    fn test_delete_needs_confirmation_and_selection() {
        let mut db = seeded_db();
        let mut app = state(&db, std::path::Path::new("."));

        app.request_delete();
        assert!(app.confirm_delete.is_none());
        assert!(app.status_is_error);

        app.toggle_current();
        app.request_delete();
        assert_eq!(app.confirm_delete, Some(1));

        app.confirm_delete(&mut db);
        assert_eq!(db.count_contents().unwrap(), 2);
        assert_eq!(app.view.records().len(), 2);
        assert!(!app.status_is_error);
    }

    #[test]
    fn test_status_change_from_menu() {
        let mut db = seeded_db();
        let mut app = state(&db, std::path::Path::new("."));
        app.toggle_current();

        app.open_status_menu();
        app.status_menu_down(); // ready
        app.status_menu_select(&mut db);

        assert_eq!(db.get_all_contents().unwrap()[0].status, "ready");
        assert!(app.view.selection().is_empty());
        assert!(app.status_menu.is_none());
    }

    #[test]
    fn test_failed_bulk_keeps_selection_and_reports() {
        let mut db = seeded_db();
        let mut app = state(&db, std::path::Path::new("."));
        app.toggle_all();
        db.delete_content("3").unwrap();

        app.request_delete();
        app.confirm_delete(&mut db);

        assert!(app.status_is_error);
        let message = app.status_message.as_deref().unwrap_or_default();
        assert!(message.contains("delete failed: Content '3' not found"));
        assert!(message.contains("3 still selected"));
        assert_eq!(db.count_contents().unwrap(), 2);
    }

    #[test]
    fn test_export_writes_into_workspace() {
        let temp = TempDir::new().unwrap();
        let mut db = seeded_db();
        let mut app = state(&db, temp.path());
        app.view.set_dimension("status", "draft");

        app.export(&mut db);

        assert!(temp.path().join("export-content.json").exists());
        assert!(!app.status_is_error);
    }
}
