use std::collections::BTreeSet;

/// Display state of the "select all" header checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckbox {
    Unchecked,
    Indeterminate,
    Checked,
}

impl HeaderCheckbox {
    pub fn marker(&self) -> &'static str {
        match self {
            HeaderCheckbox::Unchecked => "[ ]",
            HeaderCheckbox::Indeterminate => "[-]",
            HeaderCheckbox::Checked => "[x]",
        }
    }
}

/// Ids of the records checked for a bulk action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Flip membership of one id. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Checked replaces the selection with `visible_ids`; unchecked empties it
    pub fn toggle_all<'a>(&mut self, checked: bool, visible_ids: impl IntoIterator<Item = &'a str>) {
        self.ids.clear();
        if checked {
            self.ids.extend(visible_ids.into_iter().map(str::to_string));
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// True iff `visible_ids` is non-empty and equals the selection exactly
    pub fn is_all_selected<'a>(&self, visible_ids: impl IntoIterator<Item = &'a str>) -> bool {
        let visible: BTreeSet<&str> = visible_ids.into_iter().collect();
        !visible.is_empty()
            && visible.len() == self.ids.len()
            && visible.iter().all(|id| self.ids.contains(*id))
    }

    pub fn header_state<'a>(&self, visible_ids: impl IntoIterator<Item = &'a str>) -> HeaderCheckbox {
        let visible: Vec<&str> = visible_ids.into_iter().collect();
        if self.is_all_selected(visible.iter().copied()) {
            HeaderCheckbox::Checked
        } else if visible.iter().any(|id| self.ids.contains(*id)) {
            HeaderCheckbox::Indeterminate
        } else {
            HeaderCheckbox::Unchecked
        }
    }

    /// Drop ids that are no longer visible. Returns how many were dropped.
    pub fn retain_visible<'a>(&mut self, visible_ids: impl IntoIterator<Item = &'a str>) -> usize {
        let visible: BTreeSet<&str> = visible_ids.into_iter().collect();
        let before = self.ids.len();
        self.ids.retain(|id| visible.contains(id.as_str()));
        before - self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(ids: &[&str]) -> SelectionSet {
        let mut set = SelectionSet::new();
        for id in ids {
            set.toggle(id);
        }
        set
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut set = SelectionSet::new();
        assert!(set.toggle("1"));
        assert!(set.contains("1"));
        assert!(!set.toggle("1"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_all_replaces_previous_selection() {
        let mut set = selection(&["9"]);
        set.toggle_all(true, ["1", "3"]);

        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["1", "3"]);
    }

    #[test]
    fn test_toggle_all_on_then_off_is_empty() {
        let mut set = SelectionSet::new();
        set.toggle_all(true, ["1", "2", "3"]);
        set.toggle_all(false, ["1", "2", "3"]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_is_all_selected_exact_match() {
        let set = selection(&["1", "3"]);
        assert!(set.is_all_selected(["1", "3"]));
        assert!(set.is_all_selected(["3", "1"]));
    }

    #[test]
    fn test_is_all_selected_false_for_proper_subset() {
        let set = selection(&["1", "3"]);
        assert!(!set.is_all_selected(["1", "2", "3"]));
    }

    #[test]
    fn test_is_all_selected_false_when_selection_has_extra_ids() {
        let set = selection(&["1", "2", "3"]);
        assert!(!set.is_all_selected(["1", "3"]));
    }

    #[test]
    fn test_is_all_selected_never_true_for_empty_visible_list() {
        assert!(!SelectionSet::new().is_all_selected([]));
        assert!(!selection(&["1"]).is_all_selected([]));
    }

    #[test]
    fn test_header_state() {
        let set = selection(&["1"]);
        assert_eq!(set.header_state(["1"]), HeaderCheckbox::Checked);
        assert_eq!(set.header_state(["1", "2"]), HeaderCheckbox::Indeterminate);
        assert_eq!(set.header_state(["2"]), HeaderCheckbox::Unchecked);
        assert_eq!(set.header_state([]), HeaderCheckbox::Unchecked);
    }

    #[test]
    fn test_retain_visible_drops_hidden_ids() {
        let mut set = selection(&["1", "2", "4"]);
        let dropped = set.retain_visible(["1", "3", "4"]);

        assert_eq!(dropped, 1);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["1", "4"]);
    }
}
