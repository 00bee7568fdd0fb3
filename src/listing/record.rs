/// A categorical attribute a list can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub key: &'static str,
    pub label: &'static str,
    /// Values known up front. Empty when the values only come from data (e.g. website groups).
    pub values: &'static [&'static str],
}

/// Anything a list view can filter and select.
///
/// Content items and websites both implement this, so the filter, selection
/// and chip logic is written once against the trait.
pub trait Record {
    /// Filter dimensions, in display order
    const DIMENSIONS: &'static [Dimension];

    /// Stable unique identifier
    fn id(&self) -> &str;

    /// Value of the record for a dimension key, `None` if the record has no such field
    fn field(&self, key: &str) -> Option<&str>;

    /// Free-text fields searched by the search box. The first one is the display title.
    fn search_fields(&self) -> Vec<&str>;

    /// Human label for a dimension value
    fn describe_value(key: &str, value: &str) -> String {
        let _ = key;
        value.to_string()
    }

    /// Label of this record's value for `key`. Override when the record carries
    /// its own display name for a value (e.g. a group id and its group name).
    fn field_label(&self, key: &str) -> Option<String> {
        self.field(key).map(|value| Self::describe_value(key, value))
    }

    fn dimension(key: &str) -> Option<&'static Dimension> {
        Self::DIMENSIONS.iter().find(|d| d.key == key)
    }

    /// Display title (first search field)
    fn title(&self) -> &str {
        self.search_fields().first().copied().unwrap_or_default()
    }
}

/// Label for `value` of `key`, taken from the first record that holds it
pub fn value_label<R: Record>(records: &[R], key: &str, value: &str) -> String {
    records
        .iter()
        .find(|r| r.field(key) == Some(value))
        .and_then(|r| r.field_label(key))
        .unwrap_or_else(|| R::describe_value(key, value))
}


#[cfg(test)]
mod tests {
    use super::test_records::*;
    use super::Record;

    #[test]
    fn test_dimension_lookup() {
        assert_eq!(Item::dimension("status").map(|d| d.label), Some("Status"));
        assert!(Item::dimension("language").is_none());
    }

    #[test]
    fn test_title_is_first_search_field() {
        let record = item("1", "SEO Guide", "draft", "article");
        assert_eq!(record.title(), "SEO Guide");
    }

    #[test]
    fn test_describe_value_falls_back_to_raw_value() {
        assert_eq!(Item::describe_value("status", "draft"), "Draft");
        assert_eq!(Item::describe_value("kind", "video"), "video");
    }
}
