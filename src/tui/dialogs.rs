use crate::listing::{value_label, FilterState, Record, ALL};

/// One dimension row in the filter dialog
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionChoice {
    pub key: &'static str,
    pub label: &'static str,
    /// `"all"` first, then known values, then values only seen in the data
    pub options: Vec<String>,
    /// Display label per option
    pub labels: Vec<String>,
    pub selected: usize,
}

impl DimensionChoice {
    pub fn value(&self) -> &str {
        self.options.get(self.selected).map(String::as_str).unwrap_or(ALL)
    }

    pub fn value_label(&self) -> &str {
        self.labels.get(self.selected).map(String::as_str).unwrap_or("All")
    }
}

/// State for the filter dialog: one row per dimension, Left/Right cycles the value
pub struct FilterDialogState {
    pub rows: Vec<DimensionChoice>,
    pub focus: usize,
}

impl FilterDialogState {
    /// Build rows for `R`, preselecting what `filter` currently has
    pub fn for_records<R: Record>(records: &[R], filter: &FilterState) -> Self {
        let rows = R::DIMENSIONS
            .iter()
            .map(|dimension| {
                let mut options = vec![ALL.to_string()];
                options.extend(dimension.values.iter().map(|v| v.to_string()));

                let mut seen: Vec<String> = records
                    .iter()
                    .filter_map(|r| r.field(dimension.key))
                    .filter(|v| !options.iter().any(|o| o.as_str() == *v))
                    .map(str::to_string)
                    .collect();
                seen.sort();
                seen.dedup();
                options.extend(seen);

                // Keep a value set elsewhere (e.g. CLI) even if no record has it
                let current = filter.dimension(dimension.key).unwrap_or(ALL);
                let selected = match options.iter().position(|o| o == current) {
                    Some(i) => i,
                    None => {
                        options.push(current.to_string());
                        options.len() - 1
                    }
                };

                let labels = options
                    .iter()
                    .map(|o| {
                        if o == ALL {
                            "All".to_string()
                        } else {
                            value_label(records, dimension.key, o)
                        }
                    })
                    .collect();

                DimensionChoice {
                    key: dimension.key,
                    label: dimension.label,
                    options,
                    labels,
                    selected,
                }
            })
            .collect();

        Self { rows, focus: 0 }
    }

    /// Move focus up (wraps to bottom)
    pub fn focus_up(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.focus = if self.focus > 0 { self.focus - 1 } else { self.rows.len() - 1 };
    }

    /// Move focus down (wraps to top)
    pub fn focus_down(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.rows.len();
    }

    /// Previous value of the focused dimension. Returns the `(key, value)` to apply.
    pub fn cycle_left(&mut self) -> Option<(&'static str, String)> {
        let row = self.rows.get_mut(self.focus)?;
        let len = row.options.len();
        row.selected = (row.selected + len - 1) % len;
        Some((row.key, row.value().to_string()))
    }

    /// Next value of the focused dimension. Returns the `(key, value)` to apply.
    pub fn cycle_right(&mut self) -> Option<(&'static str, String)> {
        let row = self.rows.get_mut(self.focus)?;
        row.selected = (row.selected + 1) % row.options.len();
        Some((row.key, row.value().to_string()))
    }

    /// Reset every row to "all"
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.selected = 0;
        }
    }
}

/// State for incremental search (`/`)
#[derive(Default)]
pub struct SearchState {
    pub query: String,
    pub active: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.query.clear();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.query.clear();
    }

    /// Accept the current search: stop editing but keep the query as filter
    pub fn accept(&mut self) {
        self.active = false;
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }
}

/// State for the bulk status-change menu
pub struct StatusMenuState {
    pub options: Vec<&'static str>,
    pub selected: usize,
}

impl StatusMenuState {
    /// Menu over the known values of `R`'s status dimension
    pub fn for_records<R: Record>() -> Option<Self> {
        let dimension = R::dimension("status")?;
        if dimension.values.is_empty() {
            return None;
        }
        Some(Self {
            options: dimension.values.to_vec(),
            selected: 0,
        })
    }

    /// Move selection up (wraps to bottom)
    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.options.len() - 1;
        }
    }

    /// Move selection down (wraps to top)
    pub fn move_down(&mut self) {
        if self.selected < self.options.len() - 1 {
            self.selected += 1;
        } else {
            self.selected = 0;
        }
    }

    pub fn selected_status(&self) -> Option<&'static str> {
        self.options.get(self.selected).copied()
    }
}
