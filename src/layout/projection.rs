//! Render projection: what a renderer draws for every row × day position.
//!
//! The projection is a pure function of the store and merge map. Break rows
//! always project their fixed text, whatever the store holds.

use serde::Serialize;

use super::MergeMap;
use crate::cell_ref::{ContentKey, MergeKey};
use crate::grid::{BreakKind, GridDefinition};
use crate::store::TimetableStore;
use crate::types::CellContent;

/// One projected grid position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GridCell {
    /// Fixed break text; not editable.
    Break {
        #[serde(rename = "break")]
        kind: BreakKind,
        label: &'static str,
    },
    /// Editable cell, possibly spanning two rows.
    #[serde(rename_all = "camelCase")]
    Slot {
        key: ContentKey,
        content: Option<CellContent>,
        row_span: usize,
    },
    /// Covered by the merged cell above; the renderer emits nothing here.
    Absorbed { origin: MergeKey },
}

impl GridCell {
    /// True if this position must be skipped when emitting table cells.
    pub fn is_skipped(&self) -> bool {
        matches!(self, GridCell::Absorbed { .. })
    }

    pub fn row_span(&self) -> usize {
        match self {
            GridCell::Slot { row_span, .. } => *row_span,
            GridCell::Break { .. } | GridCell::Absorbed { .. } => 1,
        }
    }

    pub fn content(&self) -> Option<&CellContent> {
        match self {
            GridCell::Slot { content, .. } => content.as_ref(),
            GridCell::Break { .. } | GridCell::Absorbed { .. } => None,
        }
    }
}

/// One projected row: the slot label plus one cell per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub label: &'static str,
    pub cells: Vec<GridCell>,
}

/// Whole-grid projection, header first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub days: &'static [&'static str],
    pub rows: Vec<GridRow>,
}

impl Projection {
    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(row)?.cells.get(col)
    }
}

/// Project the store through the merge map onto the grid.
pub fn project(store: &TimetableStore, merges: &MergeMap, grid: &GridDefinition) -> Projection {
    let rows = grid
        .time_slots
        .iter()
        .enumerate()
        .map(|(row, slot)| {
            let cells = grid
                .days
                .iter()
                .enumerate()
                .map(|(col, day)| project_cell(store, merges, grid, row, col, *day))
                .collect();
            GridRow {
                label: slot.label,
                cells,
            }
        })
        .collect();

    Projection {
        days: grid.days,
        rows,
    }
}

fn project_cell(
    store: &TimetableStore,
    merges: &MergeMap,
    grid: &GridDefinition,
    row: usize,
    col: usize,
    day: &'static str,
) -> GridCell {
    if let Some(kind) = grid.break_at(row) {
        return GridCell::Break {
            kind,
            label: kind.label(),
        };
    }

    let merge_key = MergeKey::new(row, col);
    if let Some(origin) = merges.continuation_origin(&merge_key) {
        return GridCell::Absorbed { origin };
    }

    let key = ContentKey::new(row, col, day);
    GridCell::Slot {
        key,
        content: store.get(&key).cloned(),
        row_span: merges.row_span(&merge_key),
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
    use crate::layout::infer_merges;
    use crate::types::Entry;

    #[test]
    fn test_projection_shape() {
        let grid = GridDefinition::standard();
        let store = TimetableStore::new();
        let projection = project(&store, &MergeMap::new(), &grid);
        assert_eq!(projection.rows.len(), 10);
        assert!(projection.rows.iter().all(|r| r.cells.len() == 7));
        assert_eq!(projection.rows[0].label, "08.45 - 09.40");
    }

    #[test]
    fn test_break_rows_project_fixed_text() {
        let grid = GridDefinition::standard();
        let projection = project(&TimetableStore::new(), &MergeMap::new(), &grid);
        for col in 0..7 {
            assert!(matches!(
                projection.cell(5, col),
                Some(GridCell::Break {
                    kind: BreakKind::Lunch,
                    label: "Lunch Break"
                })
            ));
        }
    }

    #[test]
    fn test_merged_block_absorbs_second_row() {
        let grid = GridDefinition::standard();
        let mut store = TimetableStore::new();
        store.set_entry(
            ContentKey::new(6, 2, "Wednesday"),
            Entry::practical("1", "Physics"),
        );
        let merges = infer_merges(&store, &grid);
        let projection = project(&store, &merges, &grid);

        let origin = projection.cell(6, 2).unwrap();
        assert_eq!(origin.row_span(), 2);
        assert_eq!(origin.content().unwrap().to_text(), "Batch 1: Physics");

        let absorbed = projection.cell(7, 2).unwrap();
        assert!(absorbed.is_skipped());
        assert!(!projection.cell(7, 3).unwrap().is_skipped());
    }

    #[test]
    fn test_projection_serializes_keys_as_strings() {
        let grid = GridDefinition::standard();
        let mut store = TimetableStore::new();
        store.set_entry(ContentKey::new(0, 0, "Monday"), Entry::subject("Maths"));
        let merges = infer_merges(&store, &grid);
        let json = serde_json::to_value(project(&store, &merges, &grid)).unwrap();
        assert_eq!(json["rows"][0]["cells"][0]["key"], "0-0-Monday");
        assert_eq!(json["rows"][0]["cells"][0]["rowSpan"], 2);
        assert_eq!(json["rows"][1]["cells"][0]["kind"], "absorbed");
        assert_eq!(json["rows"][1]["cells"][0]["origin"], "0-0");
    }
}
