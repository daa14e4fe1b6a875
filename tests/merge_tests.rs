//! Tests for practical-block merge inference
//!
//! A practical block covers two contiguous rows: 08.45-10.35 (rows 0-1),
//! 10.50-12.40 (rows 3-4) and 01.40-03.30 (rows 6-7). After a load, the block
//! is drawn as one merged cell iff its first row holds content and its second
//! row is empty.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use common::{
    assert_absorbed, assert_merges, assert_merges_match_store, key, merge_key, PayloadBuilder,
};
use test_case::test_case;
use weekgrid::{infer_merges, GridCell, GridDefinition, MergeKey, Session};

// ============================================================================
// INFERENCE AFTER LOAD
// ============================================================================

#[test]
fn test_empty_timetable_has_no_merges() {
    let session = PayloadBuilder::new().session();
    assert!(session.merges().is_empty());
    assert_merges_match_store(&session);
}

#[test_case(0, "Monday" ; "morning block")]
#[test_case(3, "Wednesday" ; "midday block")]
#[test_case(6, "Sunday" ; "afternoon block")]
fn test_first_row_only_merges(row: usize, day: &str) {
    let session = PayloadBuilder::new()
        .cell(row, day, "Batch 1: Physics")
        .session();
    assert_merges(&session, &[(row, day)]);
    assert!(session
        .merges()
        .is_merged_continuation(&merge_key(row + 1, day)));
    assert!(!session.merges().is_merged_continuation(&merge_key(row, day)));
}

#[test]
fn test_both_rows_occupied_does_not_merge() {
    let session = PayloadBuilder::new()
        .cell(0, "Monday", "Maths")
        .cell(1, "Monday", "Art")
        .session();
    assert!(session.merges().is_empty());
}

#[test]
fn test_second_row_only_does_not_merge() {
    let session = PayloadBuilder::new().cell(4, "Friday", "Art").session();
    assert!(session.merges().is_empty());
}

#[test_case(9 ; "last row has no block")]
#[test_case(1 ; "second row of block")]
fn test_rows_outside_block_starts_never_merge(row: usize) {
    let session = PayloadBuilder::new().cell(row, "Tuesday", "Maths").session();
    assert!(session.merges().is_empty());
}

/// Plain subjects in a block's first row merge too; inference only looks at
/// occupancy, not entry kind.
#[test]
fn test_plain_subject_merges_like_practical() {
    let session = PayloadBuilder::new().cell(6, "Thursday", "Maths").session();
    assert_merges(&session, &[(6, "Thursday")]);
}

#[test]
fn test_break_text_in_payload_is_ignored() {
    let session = PayloadBuilder::new()
        .cell(2, "Monday", "Short Break")
        .cell(5, "Monday", "Lunch Break")
        .session();
    assert!(session.store().is_empty());
    assert!(session.merges().is_empty());
}

#[test]
fn test_mixed_week_matches_store() {
    let session = PayloadBuilder::new()
        .cell(0, "Monday", "Batch 1: Physics<br>Batch 2: Chemistry")
        .cell(3, "Monday", "Maths")
        .cell(4, "Monday", "Art")
        .cell(6, "Tuesday", "Batch 3: Biology")
        .cell(7, "Wednesday", "History")
        .cell(0, "Saturday", "Spanish<br>German")
        .cell(9, "Sunday", "Sport")
        .session();

    assert_merges(&session, &[(0, "Monday"), (6, "Tuesday"), (0, "Saturday")]);
    assert_merges_match_store(&session);
}

#[test]
fn test_inference_is_idempotent() {
    let session = PayloadBuilder::new()
        .cell(0, "Monday", "Batch 1: Physics")
        .cell(3, "Friday", "Maths")
        .cell(4, "Friday", "Art")
        .session();
    let grid = GridDefinition::standard();

    let once = infer_merges(session.store(), &grid);
    let twice = infer_merges(session.store(), &grid);
    assert_eq!(once, twice);
    assert_eq!(&once, session.merges());
}

// ============================================================================
// ASSERTED MERGES
// ============================================================================

#[test]
fn test_practical_asserts_merge_before_refresh() {
    let mut session = Session::new("CS-A");
    session
        .set_practical_entry("Tuesday", 1, "Batch 2: Chemistry")
        .unwrap();
    assert_merges(&session, &[(3, "Tuesday")]);
}

/// An asserted merge whose content is gone survives until the next full
/// inference, then disappears.
#[test]
fn test_asserted_merge_retracted_on_refresh() {
    let mut session = Session::new("CS-A");
    let start = session
        .set_practical_entry("Monday", 0, "Batch 1: Physics")
        .unwrap();
    session.clear_cell(&start);
    assert_merges(&session, &[(0, "Monday")]);

    session.refresh_layout();
    assert!(session.merges().is_empty());
    assert_merges_match_store(&session);
}

#[test]
fn test_reload_reproduces_asserted_merges() {
    let mut session = Session::new("CS-A");
    session
        .set_practical_entry("Monday", 0, "Batch 1: Physics")
        .unwrap();
    session
        .set_practical_entry("Monday", 0, "Batch 2: Chemistry")
        .unwrap();
    session
        .set_practical_entry("Friday", 2, "Batch 1: Biology")
        .unwrap();

    let reloaded = Session::from_payload("CS-A", &session.to_payload());
    assert_eq!(reloaded.merges(), session.merges());
}

// ============================================================================
// PROJECTION
// ============================================================================

#[test]
fn test_merged_block_projects_one_tall_cell() {
    let session = PayloadBuilder::new()
        .cell(3, "Wednesday", "Batch 1: Physics")
        .session();
    let projection = session.projection();

    match projection.cell(3, 2).unwrap() {
        GridCell::Slot {
            key: cell_key,
            row_span,
            content,
        } => {
            assert_eq!(*cell_key, key(3, "Wednesday"));
            assert_eq!(*row_span, 2);
            assert_eq!(content.as_ref().unwrap().to_text(), "Batch 1: Physics");
        }
        other => panic!("expected slot, got {other:?}"),
    }
    assert_absorbed(&session, 4, 2);
    match projection.cell(4, 2).unwrap() {
        GridCell::Absorbed { origin } => assert_eq!(*origin, MergeKey::new(3, 2)),
        other => panic!("expected absorbed, got {other:?}"),
    }
}

#[test]
fn test_unmerged_columns_unaffected() {
    let session = PayloadBuilder::new()
        .cell(0, "Monday", "Batch 1: Physics")
        .session();
    let projection = session.projection();
    for col in 1..7 {
        assert_eq!(projection.cell(0, col).unwrap().row_span(), 1);
        assert!(!projection.cell(1, col).unwrap().is_skipped());
    }
}
