use super::filter::FilterState;
use super::record::{value_label, Record};

/// What a chip's remove button resets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipTarget {
    Search,
    Dimension(String),
}

/// One active-filter descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub target: ChipTarget,
    pub label: String,
}

/// Chips for every active criterion: search first, then dimensions in display order
pub fn active_chips<R: Record>(filter: &FilterState, records: &[R]) -> Vec<FilterChip> {
    let mut chips = Vec::new();

    if !filter.search().is_empty() {
        chips.push(FilterChip {
            target: ChipTarget::Search,
            label: format!("Search: \"{}\"", filter.search()),
        });
    }

    for dimension in R::DIMENSIONS {
        if let Some(value) = filter.dimension(dimension.key) {
            chips.push(FilterChip {
                target: ChipTarget::Dimension(dimension.key.to_string()),
                label: format!(
                    "{}: {}",
                    dimension.label,
                    value_label(records, dimension.key, value)
                ),
            });
        }
    }

    // Keys the record type doesn't declare still filter, so they still get a chip
    for (key, value) in filter.active_dimensions() {
        if R::dimension(key).is_none() {
            chips.push(FilterChip {
                target: ChipTarget::Dimension(key.to_string()),
                label: format!("{}: {}", key, value),
            });
        }
    }

    chips
}

/// Reset exactly the criterion a chip stands for
pub fn remove_chip(filter: &mut FilterState, target: &ChipTarget) {
    match target {
        ChipTarget::Search => filter.clear_search(),
        ChipTarget::Dimension(key) => filter.clear_dimension(key),
    }
}
