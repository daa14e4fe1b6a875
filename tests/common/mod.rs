//! Common test utilities and assertion helpers.
//!
//! Builders for timetable payloads plus assertions over the store, the merge
//! map and the render projection.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use weekgrid::{
    ContentKey, GridCell, GridDefinition, MergeKey, Session, TimetablePayload, TimetableStore,
};

// ============================================================================
// Payload Builder
// ============================================================================

/// Builds a `{slot: {day: text}}` payload cell by cell, addressed by row.
#[derive(Default)]
pub struct PayloadBuilder {
    payload: TimetablePayload,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text of `row` / `day`, using the row's slot label as key.
    #[must_use]
    pub fn cell(mut self, row: usize, day: &str, text: &str) -> Self {
        let grid = GridDefinition::standard();
        let label = grid.slot(row).expect("row out of range").label;
        self.payload
            .slots
            .entry(label.to_string())
            .or_default()
            .insert(day.to_string(), text.to_string());
        self
    }

    pub fn build(self) -> TimetablePayload {
        self.payload
    }

    pub fn session(self) -> Session {
        Session::from_payload("CS-A", &self.build())
    }
}

// ============================================================================
// Lookups
// ============================================================================

pub fn key(row: usize, day: &str) -> ContentKey {
    GridDefinition::standard()
        .content_key(row, day)
        .expect("invalid test cell")
}

pub fn merge_key(row: usize, day: &str) -> MergeKey {
    key(row, day).merge_key()
}

/// Displayed entries of a cell, in stack order.
pub fn entries_at(store: &TimetableStore, row: usize, day: &str) -> Vec<String> {
    store
        .get(&key(row, day))
        .map(|c| c.entries().iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

// ============================================================================
// Assertions
// ============================================================================

/// Assert that exactly the `(start_row, day)` blocks are merged.
pub fn assert_merges(session: &Session, expected: &[(usize, &str)]) {
    let mut actual: Vec<MergeKey> = session.merges().iter().map(|(k, _)| *k).collect();
    let mut wanted: Vec<MergeKey> = expected.iter().map(|(r, d)| merge_key(*r, d)).collect();
    actual.sort();
    wanted.sort();
    assert_eq!(actual, wanted, "merged blocks differ");
}

/// Assert that the merge map agrees with store occupancy for every block.
///
/// A block is merged iff its first row is occupied and its second is empty.
pub fn assert_merges_match_store(session: &Session) {
    let grid = session.grid();
    for group in grid.merge_starts() {
        for (col, day) in grid.days.iter().enumerate() {
            let start = ContentKey::new(group.start(), col, *day);
            let expected = session.store().is_occupied(&start)
                && !session.store().is_occupied(&start.next_row());
            assert_eq!(
                session.merges().span(&start.merge_key()).is_some(),
                expected,
                "block {} on {day}",
                group.label
            );
        }
    }
}

/// Assert the projected cell at `row` / `col` is skipped by the renderer.
pub fn assert_absorbed(session: &Session, row: usize, col: usize) {
    let projection = session.projection();
    let cell = projection.cell(row, col).expect("cell out of range");
    assert!(
        matches!(cell, GridCell::Absorbed { .. }),
        "expected absorbed cell at ({row}, {col}), got {cell:?}"
    );
}
