//! Filtering and bulk-selection engine shared by every list view.
//!
//! `ListView<R>` owns the filter and selection state for one list of
//! records; the free functions and small types are usable on their own.

mod bulk;
mod chips;
mod filter;
mod record;
mod selection;
mod view;

pub use bulk::{BulkAction, BulkError, BulkOutcome, BulkRequest, DataSource, Mutator, PendingBulk};
pub use chips::{active_chips, remove_chip, ChipTarget, FilterChip};
pub use filter::{apply_filter, FilterState, ALL};
pub use record::{value_label, Dimension, Record};
pub use selection::{HeaderCheckbox, SelectionSet};
pub use view::{ListStatus, ListSummary, ListView};
