//! Two-row merge bookkeeping for practical blocks.
//!
//! Merges are derived from store contents by [`infer_merges`]. The practical
//! insert path may also assert a merge directly; the next full inference
//! replaces whatever was asserted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cell_ref::{ContentKey, MergeKey};
use crate::grid::{GridDefinition, PracticalGroup};
use crate::store::TimetableStore;

/// Starting merge key → `[start, next]` span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MergeMap {
    spans: BTreeMap<MergeKey, [MergeKey; 2]>,
}

impl MergeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `group` spans two rows in column `col`.
    pub fn assert_block(&mut self, group: &PracticalGroup, col: usize) {
        let start = MergeKey::new(group.start(), col);
        let next = MergeKey::new(group.next(), col);
        self.spans.insert(start, [start, next]);
    }

    pub fn span(&self, start: &MergeKey) -> Option<&[MergeKey; 2]> {
        self.spans.get(start)
    }

    /// Rows covered by the cell starting at `key`; 1 when not merged.
    pub fn row_span(&self, key: &MergeKey) -> usize {
        self.spans.get(key).map_or(1, |span| span.len())
    }

    /// True if `key` is swallowed by the merge of a preceding row and must
    /// not be rendered on its own.
    pub fn is_merged_continuation(&self, key: &MergeKey) -> bool {
        self.continuation_origin(key).is_some()
    }

    /// Starting key of the merge that swallows `key`, if any.
    pub fn continuation_origin(&self, key: &MergeKey) -> Option<MergeKey> {
        self.spans
            .iter()
            .find(|(start, span)| *start != key && span.contains(key))
            .map(|(start, _)| *start)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MergeKey, &[MergeKey; 2])> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Derive every two-row merge from the store.
///
/// A block in a column merges iff its first row holds content and its second
/// row does not. Pure function of `store`; calling it twice yields the same map.
pub fn infer_merges(store: &TimetableStore, grid: &GridDefinition) -> MergeMap {
    let mut merges = MergeMap::new();
    for (col, day) in grid.days.iter().enumerate() {
        for group in grid.merge_starts() {
            let main = ContentKey::new(group.start(), col, *day);
            let next = ContentKey::new(group.next(), col, *day);
            if store.is_occupied(&main) && !store.is_occupied(&next) {
                merges.assert_block(group, col);
            }
        }
    }
    tracing::debug!(merges = merges.len(), "inferred merge layout");
    merges
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
    use crate::types::Entry;

    fn store_with(cells: &[(usize, usize, &'static str, &str)]) -> TimetableStore {
        let mut store = TimetableStore::new();
        for &(row, col, day, text) in cells {
            store.set_entry(ContentKey::new(row, col, day), Entry::from_text(text));
        }
        store
    }

    #[test]
    fn test_empty_store_has_no_merges() {
        let grid = GridDefinition::standard();
        assert!(infer_merges(&TimetableStore::new(), &grid).is_empty());
    }

    #[test]
    fn test_first_row_only_merges() {
        let grid = GridDefinition::standard();
        let store = store_with(&[(0, 0, "Monday", "Batch 1: Physics")]);
        let merges = infer_merges(&store, &grid);
        assert_eq!(merges.len(), 1);
        assert_eq!(
            merges.span(&MergeKey::new(0, 0)),
            Some(&[MergeKey::new(0, 0), MergeKey::new(1, 0)])
        );
        assert_eq!(merges.row_span(&MergeKey::new(0, 0)), 2);
        assert!(merges.is_merged_continuation(&MergeKey::new(1, 0)));
        assert!(!merges.is_merged_continuation(&MergeKey::new(0, 0)));
    }

    #[test]
    fn test_occupied_second_row_blocks_merge() {
        let grid = GridDefinition::standard();
        let store = store_with(&[(3, 2, "Wednesday", "Maths"), (4, 2, "Wednesday", "Art")]);
        assert!(infer_merges(&store, &grid).is_empty());
    }

    #[test]
    fn test_rows_outside_blocks_never_merge() {
        let grid = GridDefinition::standard();
        let store = store_with(&[(1, 0, "Monday", "Maths"), (9, 4, "Friday", "Art")]);
        assert!(infer_merges(&store, &grid).is_empty());
    }

    #[test]
    fn test_inference_is_idempotent() {
        let grid = GridDefinition::standard();
        let store = store_with(&[
            (0, 0, "Monday", "Maths"),
            (3, 0, "Monday", "Art"),
            (4, 0, "Monday", "Music"),
            (6, 5, "Saturday", "Batch 2: Chemistry"),
        ]);
        let once = infer_merges(&store, &grid);
        let twice = infer_merges(&store, &grid);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_continuation_origin() {
        let mut merges = MergeMap::new();
        let grid = GridDefinition::standard();
        merges.assert_block(&grid.practical_groups[2], 4);
        assert_eq!(
            merges.continuation_origin(&MergeKey::new(7, 4)),
            Some(MergeKey::new(6, 4))
        );
        assert_eq!(merges.continuation_origin(&MergeKey::new(7, 3)), None);
    }
}
