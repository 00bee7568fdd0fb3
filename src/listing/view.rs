use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use super::bulk::{BulkAction, BulkError, BulkOutcome, BulkRequest, DataSource, Mutator, PendingBulk};
use super::chips::{active_chips, remove_chip, ChipTarget, FilterChip};
use super::filter::{apply_filter, FilterState};
use super::record::Record;
use super::selection::{HeaderCheckbox, SelectionSet};

/// Which empty state (if any) a list should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// Records have not been supplied yet
    Loading,
    /// The collection itself is empty
    NoData,
    /// Records exist but none pass the filter
    NoMatches,
    Ready,
}

impl ListStatus {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ListStatus::Loading => Some("Loading..."),
            ListStatus::NoData => Some("No records yet"),
            ListStatus::NoMatches => Some("No results match the current filters"),
            ListStatus::Ready => None,
        }
    }
}

/// Visible vs total counts for the result line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    pub visible: usize,
    pub total: usize,
}

impl ListSummary {
    pub fn hidden(&self) -> usize {
        self.total.saturating_sub(self.visible)
    }
}

impl fmt::Display for ListSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} / {} results", self.visible, self.total)?;
        if self.hidden() > 0 {
            write!(f, " ({} filtered out)", self.hidden())?;
        }
        Ok(())
    }
}

/// Filter, selection and bulk state of one list view.
///
/// All mutation goes through the methods here; the selection is kept a
/// subset of the visible records after every filter or data change.
pub struct ListView<R: Record> {
    records: Option<Vec<R>>,
    filter: FilterState,
    selection: SelectionSet,
    in_flight: Option<&'static str>,
    generation: u64,
}

impl<R: Record> Default for ListView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ListView<R> {
    /// A view whose records are still loading
    pub fn new() -> Self {
        Self {
            records: None,
            filter: FilterState::default(),
            selection: SelectionSet::default(),
            in_flight: None,
            generation: 0,
        }
    }

    pub fn with_records(records: Vec<R>) -> Self {
        let mut view = Self::new();
        view.load(records);
        view
    }

    // ==================== Data ====================

    /// Replace the record collection
    pub fn load(&mut self, records: Vec<R>) {
        debug!(count = records.len(), "loading records into list view");
        self.records = Some(records);
        self.prune_selection();
    }

    /// Reload the collection from a data source
    pub fn refresh_from<S: DataSource<R> + ?Sized>(&mut self, source: &S) -> Result<()> {
        let records = source.fetch_all()?;
        self.load(records);
        Ok(())
    }

    /// All records (empty while loading)
    pub fn records(&self) -> &[R] {
        self.records.as_deref().unwrap_or_default()
    }

    pub fn visible(&self) -> Vec<&R> {
        apply_filter(self.records(), &self.filter)
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.visible().into_iter().map(Record::id).collect()
    }

    pub fn status(&self) -> ListStatus {
        match &self.records {
            None => ListStatus::Loading,
            Some(records) if records.is_empty() => ListStatus::NoData,
            Some(_) if self.visible().is_empty() => ListStatus::NoMatches,
            Some(_) => ListStatus::Ready,
        }
    }

    pub fn summary(&self) -> ListSummary {
        ListSummary {
            visible: self.visible().len(),
            total: self.records().len(),
        }
    }

    // ==================== Filters ====================

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn chips(&self) -> Vec<FilterChip> {
        active_chips(&self.filter, self.records())
    }

    /// Apply any number of filter edits as one update
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut FilterState)) {
        edit(&mut self.filter);
        debug!(filter = ?self.filter, "filter changed");
        self.prune_selection();
    }

    pub fn set_dimension(&mut self, key: &str, value: &str) {
        self.update_filter(|f| f.set_dimension(key, value));
    }

    pub fn set_search(&mut self, text: &str) {
        self.update_filter(|f| f.set_search(text));
    }

    pub fn remove_chip(&mut self, target: &ChipTarget) {
        self.update_filter(|f| remove_chip(f, target));
    }

    pub fn clear_filters(&mut self) {
        self.update_filter(FilterState::clear_all);
    }

    /// Drop selected ids the filter hides. Deferred while a bulk action is pending.
    fn prune_selection(&mut self) {
        if self.is_busy() {
            return;
        }
        let visible = apply_filter(self.records.as_deref().unwrap_or_default(), &self.filter);
        let dropped = self.selection.retain_visible(visible.iter().map(|r| r.id()));
        if dropped > 0 {
            debug!(dropped, "deselected records hidden by filter");
        }
    }

    // ==================== Selection ====================

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Flip one visible record. Ignored for unknown or hidden ids, and while a bulk action is pending.
    pub fn toggle_one(&mut self, id: &str) -> bool {
        if self.is_busy() || !self.visible_ids().contains(&id) {
            return self.selection.contains(id);
        }
        self.selection.toggle(id)
    }

    /// Select exactly the visible records, or nothing
    pub fn toggle_all(&mut self, checked: bool) {
        if self.is_busy() {
            return;
        }
        let visible = apply_filter(self.records.as_deref().unwrap_or_default(), &self.filter);
        self.selection
            .toggle_all(checked, visible.iter().map(|r| r.id()));
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(self.visible_ids())
    }

    pub fn header_state(&self) -> HeaderCheckbox {
        self.selection.header_state(self.visible_ids())
    }

    /// Selected ids in list order
    pub fn selected_ids(&self) -> Vec<String> {
        self.visible()
            .into_iter()
            .map(Record::id)
            .filter(|id| self.selection.contains(id))
            .map(str::to_string)
            .collect()
    }

    // ==================== Bulk actions ====================

    /// True while a bulk action is waiting on its collaborator
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Snapshot the targets of `action` and lock the view against another dispatch
    pub fn begin_bulk(&mut self, action: BulkAction) -> Result<PendingBulk, BulkError> {
        let kind = action.kind();
        if let Some(running) = self.in_flight {
            return Err(BulkError::InFlight(running));
        }

        let mut ids = self.selected_ids();
        if ids.is_empty() && !action.requires_selection() {
            ids = self.visible_ids().into_iter().map(str::to_string).collect();
        }
        if ids.is_empty() {
            return Err(BulkError::EmptySelection(kind));
        }

        info!(kind, count = ids.len(), "dispatching bulk action");
        self.in_flight = Some(kind);
        Ok(PendingBulk {
            request: BulkRequest { action, ids },
            generation: self.generation,
        })
    }

    /// Record the collaborator's answer. Success clears the selection; failure keeps it.
    pub fn complete_bulk(
        &mut self,
        pending: PendingBulk,
        result: Result<BulkOutcome>,
    ) -> Result<BulkOutcome, BulkError> {
        let kind = pending.request.action.kind();
        if pending.generation != self.generation {
            debug!(kind, "dropping bulk result for a reset view");
            return Err(BulkError::Discarded(kind));
        }
        self.in_flight = None;

        match result {
            Ok(outcome) => {
                info!(kind, affected = outcome.affected, "bulk action complete");
                self.selection.clear();
                Ok(outcome)
            }
            Err(source) => {
                self.prune_selection();
                warn!(kind, error = %source, selected = self.selection.len(), "bulk action failed");
                Err(BulkError::Collaborator { kind, source })
            }
        }
    }

    /// Begin, run and complete a bulk action against `mutator`
    pub fn dispatch<M: Mutator<R> + ?Sized>(
        &mut self,
        action: BulkAction,
        mutator: &mut M,
    ) -> Result<BulkOutcome, BulkError> {
        let pending = self.begin_bulk(action)?;
        let result = mutator.apply(pending.request());
        self.complete_bulk(pending, result)
    }

    pub fn apply_bulk_status_change<M: Mutator<R> + ?Sized>(
        &mut self,
        status: &str,
        mutator: &mut M,
    ) -> Result<BulkOutcome, BulkError> {
        self.dispatch(BulkAction::StatusChange(status.to_string()), mutator)
    }

    pub fn apply_bulk_delete<M: Mutator<R> + ?Sized>(
        &mut self,
        mutator: &mut M,
    ) -> Result<BulkOutcome, BulkError> {
        self.dispatch(BulkAction::Delete, mutator)
    }

    /// Export the selection, or every visible record when nothing is selected
    pub fn export_selection<M: Mutator<R> + ?Sized>(
        &mut self,
        path: impl Into<PathBuf>,
        mutator: &mut M,
    ) -> Result<BulkOutcome, BulkError> {
        self.dispatch(BulkAction::Export(path.into()), mutator)
    }

    /// Return to the freshly-mounted state. Pending bulk results are discarded.
    pub fn reset(&mut self) {
        self.filter.clear_all();
        self.selection.clear();
        self.in_flight = None;
        self.generation += 1;
    }
}
