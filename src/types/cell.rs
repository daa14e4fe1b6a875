use serde::Serialize;

use super::Entry;

/// Separator between stacked entries in persisted cell text.
pub const STACK_SEPARATOR: &str = "<br>";

/// Non-empty, ordered stack of entries held by one cell.
///
/// Empty cells are represented by absence from the store, never by an empty
/// `CellContent`; every constructor that could produce one returns `None`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct CellContent {
    entries: Vec<Entry>,
}

impl CellContent {
    pub fn single(entry: Entry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    pub fn from_entries(entries: Vec<Entry>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    /// Split persisted text on the stack separator.
    ///
    /// Blank segments are dropped, so `""` and `"<br>"` both mean empty.
    pub fn from_text(text: &str) -> Option<Self> {
        let entries = text
            .split(STACK_SEPARATOR)
            .filter(|item| !item.trim().is_empty())
            .map(Entry::from_text)
            .collect();
        Self::from_entries(entries)
    }

    /// Join entries with the stack separator for persistence.
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(STACK_SEPARATOR)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.entries.contains(entry)
    }

    /// Whether any entry's leading label names the batch with this bare id.
    pub fn has_batch(&self, batch_id: &str) -> bool {
        self.entries.iter().any(|e| e.batch_id() == Some(batch_id))
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Content with every entry equal to `removed` dropped, or `None` if
    /// nothing remains.
    pub fn without(&self, removed: &Entry) -> Option<Self> {
        let entries = self
            .entries
            .iter()
            .filter(|e| *e != removed)
            .cloned()
            .collect();
        Self::from_entries(entries)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_text_roundtrip_keeps_order() {
        let text = "Batch 1: Physics<br>Batch 2: Chemistry";
        let content = CellContent::from_text(text).unwrap();
        assert_eq!(content.len(), 2);
        assert!(content.has_batch("2"));
        assert!(!content.has_batch("3"));
        assert_eq!(content.to_text(), text);
    }

    #[test]
    fn test_loaded_labels_count_as_batches() {
        let content = CellContent::from_text("Batch 1:Physics<br>Lab A : Chemistry").unwrap();
        assert!(content.has_batch("1"));
        assert!(content.has_batch("Lab A"));
        assert_eq!(content.to_text(), "Batch 1:Physics<br>Lab A : Chemistry");
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert_eq!(CellContent::from_text(""), None);
        assert_eq!(CellContent::from_text("<br>"), None);
        assert_eq!(CellContent::from_text("  "), None);
    }

    #[test]
    fn test_without_last_entry_is_none() {
        let content = CellContent::single(Entry::subject("French"));
        assert_eq!(content.without(&Entry::subject("French")), None);
        assert_eq!(
            content.without(&Entry::subject("German")),
            Some(content.clone())
        );
    }

    #[test]
    fn test_payload_containing_separator_survives_in_memory() {
        let content = CellContent::single(Entry::subject("A<br>B"));
        assert_eq!(content.len(), 1);
        assert_eq!(content.entries()[0].text(), "A<br>B");
    }
}
