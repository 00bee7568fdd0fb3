use std::collections::BTreeMap;

use super::record::Record;

/// Sentinel value meaning "this dimension is not filtered"
pub const ALL: &str = "all";

/// Active filter values plus the free-text search.
///
/// Dimensions are AND-combined. A dimension missing from the map is inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    dimensions: BTreeMap<String, String>,
    search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a dimension to a value. Setting it to `"all"` deactivates it.
    pub fn set_dimension(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value == ALL {
            self.dimensions.remove(&key);
        } else {
            self.dimensions.insert(key, value);
        }
    }

    /// Selected value for a dimension, `None` when it is "all"
    pub fn dimension(&self, key: &str) -> Option<&str> {
        self.dimensions.get(key).map(String::as_str)
    }

    pub fn clear_dimension(&mut self, key: &str) {
        self.dimensions.remove(key);
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Reset every dimension and the search in one step
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        !self.dimensions.is_empty() || !self.search.is_empty()
    }

    /// Active `(key, value)` pairs, sorted by key
    pub fn active_dimensions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dimensions
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check whether a single record passes every active criterion
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.matches_with_needle(record, &self.search.to_lowercase())
    }

    fn matches_with_needle<R: Record>(&self, record: &R, needle: &str) -> bool {
        let dimensions_match = self
            .dimensions
            .iter()
            .all(|(key, value)| record.field(key) == Some(value.as_str()));
        if !dimensions_match {
            return false;
        }

        // Empty search matches everything
        needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|text| text.to_lowercase().contains(needle))
    }
}

/// Visible subset of `records` under `filter`, in input order
pub fn apply_filter<'a, R: Record>(records: &'a [R], filter: &FilterState) -> Vec<&'a R> {
    let needle = filter.search.to_lowercase();
    records
        .iter()
        .filter(|record| filter.matches_with_needle(*record, &needle))
        .collect()
}
