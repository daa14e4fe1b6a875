//! Timetable mutations.
//!
//! Applies validated edits to the in-memory store. Every rejection happens
//! before the store is touched, so a failed call leaves no partial state.

use crate::cell_ref::ContentKey;
use crate::error::{Result, TimetableError};
use crate::grid::GridDefinition;
use crate::layout::MergeMap;
use crate::store::TimetableStore;
use crate::types::{Entry, EntryKind};

/// Place a one-period entry.
///
/// - `SpecSubject` onto an occupied cell appends, unless an equal entry is
///   already stacked there (then nothing changes).
/// - Anything else replaces the cell's content.
///
/// Only the store changes; merges are left for the caller to re-derive.
pub fn set_or_append_entry(
    store: &mut TimetableStore,
    grid: &GridDefinition,
    day: &str,
    row: usize,
    content: &str,
    kind: EntryKind,
) -> Result<ContentKey> {
    let key = grid.content_key(row, day)?;
    let entry = Entry::subject(content);

    if kind != EntryKind::SpecSubject || !store.is_occupied(&key) {
        store.set_entry(key, entry);
    } else if store.get(&key).is_some_and(|c| c.contains(&entry)) {
        tracing::debug!(%key, entry = %entry, "entry already stacked");
    } else {
        store.push_entry(key, entry);
    }
    tracing::debug!(%key, kind = kind.as_str(), "cell updated");
    Ok(key)
}

/// Add a practical to the two-row block `group` on `day`.
///
/// `combined_label` reads "Batch 3: Physics" and is stored verbatim, stacked
/// on the block's first row; the block's merge is asserted. Rejected when:
/// - an existing entry in the block carries the same leading batch label,
///   however it is spaced (`DuplicateBatch`),
/// - the block's second row holds its own content (`BlockOccupied`).
pub fn set_practical_entry(
    store: &mut TimetableStore,
    merges: &mut MergeMap,
    grid: &GridDefinition,
    day: &str,
    group: usize,
    combined_label: &str,
) -> Result<ContentKey> {
    let group = grid.practical_group(group)?;
    let key = grid.content_key(group.start(), day)?;
    let entry = Entry::parse_practical(combined_label)?;

    if let (Some(existing), Some(batch)) = (store.get(&key), entry.batch_id()) {
        if existing.has_batch(batch) {
            tracing::warn!(%key, batch, "batch already scheduled in block");
            return Err(TimetableError::DuplicateBatch(batch.to_string()));
        }
    }

    let next = key.next_row();
    if store.is_occupied(&next) {
        tracing::warn!(%key, %next, "second row of practical block is occupied");
        return Err(TimetableError::BlockOccupied(format!(
            "{} on {}",
            grid.slot(next.row).map_or("slot", |s| s.label),
            next.day
        )));
    }

    store.push_entry(key, entry);
    merges.assert_block(group, key.col);
    tracing::debug!(%key, block = group.label, "practical added");
    Ok(key)
}

/// Drop `removed` from the cell at `key`, deleting the key when the last
/// entry goes. Returns whether anything was removed.
///
/// Merges are untouched; re-derive them afterwards.
pub fn remove_entry(store: &mut TimetableStore, key: &ContentKey, removed: &Entry) -> bool {
    let Some(existing) = store.get(key) else {
        return false;
    };
    if !existing.contains(removed) {
        return false;
    }
    match existing.without(removed) {
        Some(rest) => store.set(*key, rest),
        None => {
            store.remove(key);
        }
    }
    tracing::debug!(%key, entry = %removed, "entry removed");
    true
}

/// Delete every entry in the cell at `key`.
pub fn clear_cell(store: &mut TimetableStore, key: &ContentKey) -> bool {
    let cleared = store.remove(key).is_some();
    if cleared {
        tracing::debug!(%key, "cell cleared");
    }
    cleared
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
    use crate::cell_ref::MergeKey;

    fn setup() -> (TimetableStore, MergeMap, GridDefinition) {
        (
            TimetableStore::new(),
            MergeMap::new(),
            GridDefinition::standard(),
        )
    }

    #[test]
    fn test_plain_subject_overwrites() {
        let (mut store, _, grid) = setup();
        set_or_append_entry(&mut store, &grid, "Friday", 9, "Maths", EntryKind::Subject).unwrap();
        let key =
            set_or_append_entry(&mut store, &grid, "Friday", 9, "Art", EntryKind::Subject).unwrap();
        assert_eq!(store.text(&key), "Art");
    }

    #[test]
    fn test_spec_subject_stacks_without_duplicates() {
        let (mut store, _, grid) = setup();
        let key = set_or_append_entry(
            &mut store,
            &grid,
            "Tuesday",
            3,
            "Spanish",
            EntryKind::SpecSubject,
        )
        .unwrap();
        set_or_append_entry(&mut store, &grid, "Tuesday", 3, "Spanish", EntryKind::SpecSubject)
            .unwrap();
        assert_eq!(store.text(&key), "Spanish");

        set_or_append_entry(&mut store, &grid, "Tuesday", 3, "German", EntryKind::SpecSubject)
            .unwrap();
        assert_eq!(store.text(&key), "Spanish<br>German");
    }

    #[test]
    fn test_subject_replaces_stacked_cell() {
        let (mut store, _, grid) = setup();
        set_or_append_entry(&mut store, &grid, "Monday", 0, "A", EntryKind::SpecSubject).unwrap();
        set_or_append_entry(&mut store, &grid, "Monday", 0, "B", EntryKind::SpecSubject).unwrap();
        let key =
            set_or_append_entry(&mut store, &grid, "Monday", 0, "C", EntryKind::Subject).unwrap();
        assert_eq!(store.text(&key), "C");
    }

    #[test]
    fn test_invalid_day_is_rejected() {
        let (mut store, _, grid) = setup();
        let err = set_or_append_entry(&mut store, &grid, "Caturday", 0, "A", EntryKind::Subject)
            .unwrap_err();
        assert!(matches!(err, TimetableError::InvalidDay(d) if d == "Caturday"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_break_row_is_rejected() {
        let (mut store, _, grid) = setup();
        let err = set_or_append_entry(&mut store, &grid, "Monday", 5, "A", EntryKind::Subject)
            .unwrap_err();
        assert!(matches!(err, TimetableError::InvalidSlot(5)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_practical_scenario() {
        let (mut store, mut merges, grid) = setup();

        let key = set_practical_entry(
            &mut store,
            &mut merges,
            &grid,
            "Monday",
            0,
            "Batch 1: Physics",
        )
        .unwrap();
        assert_eq!(key, ContentKey::new(0, 0, "Monday"));
        assert_eq!(store.text(&key), "Batch 1: Physics");
        assert_eq!(
            merges.span(&MergeKey::new(0, 0)),
            Some(&[MergeKey::new(0, 0), MergeKey::new(1, 0)])
        );

        set_practical_entry(
            &mut store,
            &mut merges,
            &grid,
            "Monday",
            0,
            "Batch 2: Chemistry",
        )
        .unwrap();
        assert_eq!(store.text(&key), "Batch 1: Physics<br>Batch 2: Chemistry");

        let before = store.clone();
        let err = set_practical_entry(
            &mut store,
            &mut merges,
            &grid,
            "Monday",
            0,
            "Batch 1: Biology",
        )
        .unwrap_err();
        assert!(matches!(err, TimetableError::DuplicateBatch(ref b) if b == "1"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_practical_label_is_stored_verbatim() {
        let (mut store, mut merges, grid) = setup();
        let key = set_practical_entry(
            &mut store,
            &mut merges,
            &grid,
            "Monday",
            0,
            "Batch 3 :  Physics",
        )
        .unwrap();
        assert_eq!(store.text(&key), "Batch 3 :  Physics");

        let err = set_practical_entry(&mut store, &mut merges, &grid, "Monday", 0, "Batch 3: Art")
            .unwrap_err();
        assert!(matches!(err, TimetableError::DuplicateBatch(ref b) if b == "3"));
    }

    #[test]
    fn test_loosely_spaced_existing_label_blocks_batch() {
        let (mut store, mut merges, grid) = setup();
        let key = grid.content_key(0, "Monday").unwrap();
        store.set_entry(key, Entry::from_text("Batch 1:Physics"));
        let before = store.clone();

        let err = set_practical_entry(
            &mut store,
            &mut merges,
            &grid,
            "Monday",
            0,
            "Batch 1: Biology",
        )
        .unwrap_err();
        assert!(matches!(err, TimetableError::DuplicateBatch(ref b) if b == "1"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_practical_rejects_occupied_second_row() {
        let (mut store, mut merges, grid) = setup();
        set_or_append_entry(&mut store, &grid, "Thursday", 4, "Maths", EntryKind::Subject)
            .unwrap();
        let before = store.clone();
        let err = set_practical_entry(
            &mut store,
            &mut merges,
            &grid,
            "Thursday",
            1,
            "Batch 1: Physics",
        )
        .unwrap_err();
        assert!(matches!(err, TimetableError::BlockOccupied(_)));
        assert_eq!(store, before);
        assert!(merges.is_empty());
    }

    #[test]
    fn test_practical_appends_to_existing_subject() {
        let (mut store, mut merges, grid) = setup();
        set_or_append_entry(&mut store, &grid, "Monday", 6, "Seminar", EntryKind::Subject)
            .unwrap();
        let key = set_practical_entry(
            &mut store,
            &mut merges,
            &grid,
            "Monday",
            2,
            "Batch 1: Physics",
        )
        .unwrap();
        assert_eq!(store.text(&key), "Seminar<br>Batch 1: Physics");
    }

    #[test]
    fn test_practical_rejects_bad_group_and_label() {
        let (mut store, mut merges, grid) = setup();
        assert!(matches!(
            set_practical_entry(&mut store, &mut merges, &grid, "Monday", 3, "Batch 1: X"),
            Err(TimetableError::InvalidPracticalSlot(3))
        ));
        assert!(matches!(
            set_practical_entry(&mut store, &mut merges, &grid, "Monday", 0, "Physics"),
            Err(TimetableError::MalformedPractical(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_last_entry_deletes_key() {
        let (mut store, _, grid) = setup();
        let key =
            set_or_append_entry(&mut store, &grid, "Sunday", 9, "Yoga", EntryKind::Subject).unwrap();
        assert!(remove_entry(&mut store, &key, &Entry::subject("Yoga")));
        assert!(store.get(&key).is_none());
        assert!(!remove_entry(&mut store, &key, &Entry::subject("Yoga")));
    }

    #[test]
    fn test_remove_one_of_many() {
        let (mut store, mut merges, grid) = setup();
        let key =
            set_practical_entry(&mut store, &mut merges, &grid, "Friday", 1, "Batch 1: A").unwrap();
        set_practical_entry(&mut store, &mut merges, &grid, "Friday", 1, "Batch 2: B").unwrap();
        assert!(remove_entry(&mut store, &key, &Entry::practical("1", "A")));
        assert_eq!(store.text(&key), "Batch 2: B");
        // Removal leaves merges alone.
        assert_eq!(merges.len(), 1);
    }

    #[test]
    fn test_clear_cell() {
        let (mut store, mut merges, grid) = setup();
        let key =
            set_practical_entry(&mut store, &mut merges, &grid, "Friday", 1, "Batch 1: A").unwrap();
        assert!(clear_cell(&mut store, &key));
        assert!(store.is_empty());
        assert!(!clear_cell(&mut store, &key));
    }
}
