//! In-memory timetable contents keyed by [`ContentKey`].

use std::collections::BTreeMap;

use crate::cell_ref::ContentKey;
use crate::types::{CellContent, Entry};

/// Mapping from content key to the entries stacked in that cell.
///
/// A key is either absent or holds at least one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableStore {
    cells: BTreeMap<ContentKey, CellContent>,
}

impl TimetableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ContentKey) -> Option<&CellContent> {
        self.cells.get(key)
    }

    pub fn is_occupied(&self, key: &ContentKey) -> bool {
        self.cells.contains_key(key)
    }

    /// Persisted text for `key`, empty string if absent.
    pub fn text(&self, key: &ContentKey) -> String {
        self.cells.get(key).map(CellContent::to_text).unwrap_or_default()
    }

    /// Replace the cell's content.
    pub fn set(&mut self, key: ContentKey, content: CellContent) {
        self.cells.insert(key, content);
    }

    /// Replace the cell's content with a single entry.
    pub fn set_entry(&mut self, key: ContentKey, entry: Entry) {
        self.set(key, CellContent::single(entry));
    }

    /// Append to the cell, creating it if absent.
    pub fn push_entry(&mut self, key: ContentKey, entry: Entry) {
        match self.cells.get_mut(&key) {
            Some(content) => content.push(entry),
            None => self.set_entry(key, entry),
        }
    }

    /// Delete the key outright.
    pub fn remove(&mut self, key: &ContentKey) -> Option<CellContent> {
        self.cells.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContentKey, &CellContent)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_push_creates_then_appends() {
        let mut store = TimetableStore::new();
        let key = ContentKey::new(0, 0, "Monday");
        store.push_entry(key, Entry::subject("Art"));
        store.push_entry(key, Entry::subject("Music"));
        assert_eq!(store.text(&key), "Art<br>Music");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_absent_key_reads_as_empty_text() {
        let store = TimetableStore::new();
        let key = ContentKey::new(9, 6, "Sunday");
        assert!(!store.is_occupied(&key));
        assert_eq!(store.text(&key), "");
    }

    #[test]
    fn test_remove_deletes_key() {
        let mut store = TimetableStore::new();
        let key = ContentKey::new(3, 1, "Tuesday");
        store.set_entry(key, Entry::subject("History"));
        assert!(store.remove(&key).is_some());
        assert!(store.get(&key).is_none());
        assert!(store.is_empty());
    }
}
