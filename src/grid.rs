//! Static schedule grid: days, time slots, breaks and practical slot groups.
//!
//! Row index = position in [`GridDefinition::time_slots`], column index =
//! position in [`GridDefinition::days`].

use serde::Serialize;

use crate::cell_ref::ContentKey;
use crate::error::{Result, TimetableError};

/// Weekday names in column order.
pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Fixed break kinds occupying whole rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakKind {
    Short,
    Lunch,
}

impl BreakKind {
    /// Text shown in every cell of the break row.
    pub fn label(self) -> &'static str {
        match self {
            BreakKind::Short => "Short Break",
            BreakKind::Lunch => "Lunch Break",
        }
    }
}

/// Whether a row holds editable periods or a fixed break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotKind {
    Teaching,
    Break(BreakKind),
}

/// One row of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub label: &'static str,
    pub kind: SlotKind,
}

/// A two-row block eligible for a practical merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PracticalGroup {
    pub label: &'static str,
    /// First and second row; always contiguous, never break rows.
    pub rows: [usize; 2],
}

impl PracticalGroup {
    pub fn start(&self) -> usize {
        let [start, _] = self.rows;
        start
    }

    pub fn next(&self) -> usize {
        let [_, next] = self.rows;
        next
    }
}

const fn teaching(label: &'static str) -> TimeSlot {
    TimeSlot {
        label,
        kind: SlotKind::Teaching,
    }
}

const fn pause(label: &'static str, kind: BreakKind) -> TimeSlot {
    TimeSlot {
        label,
        kind: SlotKind::Break(kind),
    }
}

const TIME_SLOTS: [TimeSlot; 10] = [
    teaching("08.45 - 09.40"),
    teaching("09.40 - 10.35"),
    pause("10.35 - 10.50", BreakKind::Short),
    teaching("10.50 - 11.45"),
    teaching("11.45 - 12.40"),
    pause("12.40 - 01.40", BreakKind::Lunch),
    teaching("01.40 - 02.35"),
    teaching("02.35 - 03.30"),
    pause("03.30 - 03.40", BreakKind::Short),
    teaching("03.40 - 04.30"),
];

const PRACTICAL_GROUPS: [PracticalGroup; 3] = [
    PracticalGroup {
        label: "08.45 - 10.35",
        rows: [0, 1],
    },
    PracticalGroup {
        label: "10.50 - 12.40",
        rows: [3, 4],
    },
    PracticalGroup {
        label: "01.40 - 03.30",
        rows: [6, 7],
    },
];

/// Length of a slot: single period or a two-period practical block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLength {
    OneHour,
    TwoHour,
}

/// A selectable time-slot option, as offered in the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotOption {
    /// Row index for one-hour options, practical group index for two-hour ones.
    pub value: usize,
    pub label: &'static str,
}

/// Immutable grid layout shared by every class.
#[derive(Debug, Clone, Serialize)]
pub struct GridDefinition {
    pub days: &'static [&'static str],
    pub time_slots: &'static [TimeSlot],
    pub practical_groups: &'static [PracticalGroup],
}

impl Default for GridDefinition {
    fn default() -> Self {
        Self::standard()
    }
}

impl GridDefinition {
    /// The college week: 7 days, 10 slots, 3 breaks, 3 practical blocks.
    pub fn standard() -> Self {
        Self {
            days: &DAYS,
            time_slots: &TIME_SLOTS,
            practical_groups: &PRACTICAL_GROUPS,
        }
    }

    pub fn row_count(&self) -> usize {
        self.time_slots.len()
    }

    pub fn column_count(&self) -> usize {
        self.days.len()
    }

    /// Column of `day`, or `InvalidDay`.
    pub fn day_index(&self, day: &str) -> Result<usize> {
        self.resolve_day(day).map(|(col, _)| col)
    }

    /// Column and canonical name of `day`.
    fn resolve_day(&self, day: &str) -> Result<(usize, &'static str)> {
        self.days
            .iter()
            .enumerate()
            .find(|(_, d)| **d == day)
            .map(|(col, d)| (col, *d))
            .ok_or_else(|| TimetableError::InvalidDay(day.to_string()))
    }

    pub fn day_at(&self, col: usize) -> Option<&'static str> {
        self.days.get(col).copied()
    }

    /// Row index of a time-slot label.
    pub fn slot_index(&self, label: &str) -> Option<usize> {
        self.time_slots.iter().position(|s| s.label == label)
    }

    pub fn slot(&self, row: usize) -> Option<&TimeSlot> {
        self.time_slots.get(row)
    }

    pub fn break_at(&self, row: usize) -> Option<BreakKind> {
        match self.slot(row)?.kind {
            SlotKind::Break(kind) => Some(kind),
            SlotKind::Teaching => None,
        }
    }

    pub fn is_break_row(&self, row: usize) -> bool {
        self.break_at(row).is_some()
    }

    /// True for in-range rows that accept entries.
    pub fn is_editable_row(&self, row: usize) -> bool {
        matches!(self.slot(row), Some(s) if s.kind == SlotKind::Teaching)
    }

    pub fn practical_group(&self, index: usize) -> Result<&PracticalGroup> {
        self.practical_groups
            .get(index)
            .ok_or(TimetableError::InvalidPracticalSlot(index))
    }

    /// Rows where a two-row merge may start.
    pub fn merge_starts(&self) -> impl Iterator<Item = &PracticalGroup> + '_ {
        self.practical_groups.iter()
    }

    /// Content key for an editable cell; rejects unknown days and break or
    /// out-of-range rows.
    pub fn content_key(&self, row: usize, day: &str) -> Result<ContentKey> {
        let (col, day) = self.resolve_day(day)?;
        if !self.is_editable_row(row) {
            return Err(TimetableError::InvalidSlot(row));
        }
        Ok(ContentKey::new(row, col, day))
    }

    /// Options offered for a slot length: every teaching row, or every
    /// practical block.
    pub fn slot_options(&self, length: SlotLength) -> Vec<SlotOption> {
        match length {
            SlotLength::OneHour => self
                .time_slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.kind == SlotKind::Teaching)
                .map(|(value, slot)| SlotOption {
                    value,
                    label: slot.label,
                })
                .collect(),
            SlotLength::TwoHour => self
                .practical_groups
                .iter()
                .enumerate()
                .map(|(value, group)| SlotOption {
                    value,
                    label: group.label,
                })
                .collect(),
        }
    }

    /// Check that every practical group is two contiguous teaching rows.
    pub fn validate(&self) -> Result<()> {
        for group in self.practical_groups {
            let [start, next] = group.rows;
            if next != start + 1 {
                return Err(TimetableError::InvalidGrid(format!(
                    "practical block {} is not contiguous",
                    group.label
                )));
            }
            if !self.is_editable_row(start) || !self.is_editable_row(next) {
                return Err(TimetableError::InvalidGrid(format!(
                    "practical block {} covers a break or missing row",
                    group.label
                )));
            }
        }
        Ok(())
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
    fn test_standard_grid_is_valid() {
        let grid = GridDefinition::standard();
        assert!(grid.validate().is_ok());
        assert_eq!(grid.column_count(), 7);
        assert_eq!(grid.row_count(), 10);
    }

    #[test]
    fn test_break_rows() {
        let grid = GridDefinition::standard();
        let breaks: Vec<usize> = (0..grid.row_count())
            .filter(|&r| grid.is_break_row(r))
            .collect();
        assert_eq!(breaks, vec![2, 5, 8]);
        assert_eq!(grid.break_at(5), Some(BreakKind::Lunch));
        assert_eq!(grid.break_at(8).map(BreakKind::label), Some("Short Break"));
        assert!(!grid.is_break_row(42));
    }

    #[test]
    fn test_day_index() {
        let grid = GridDefinition::standard();
        assert_eq!(grid.day_index("Sunday").unwrap(), 6);
        assert!(matches!(
            grid.day_index("Funday"),
            Err(TimetableError::InvalidDay(d)) if d == "Funday"
        ));
    }

    #[test]
    fn test_content_key_rejects_break_rows() {
        let grid = GridDefinition::standard();
        assert!(matches!(
            grid.content_key(2, "Monday"),
            Err(TimetableError::InvalidSlot(2))
        ));
        assert!(matches!(
            grid.content_key(10, "Monday"),
            Err(TimetableError::InvalidSlot(10))
        ));
        let key = grid.content_key(3, "Tuesday").unwrap();
        assert_eq!(key.col, 1);
    }

    #[test]
    fn test_slot_options() {
        let grid = GridDefinition::standard();
        let one_hour = grid.slot_options(SlotLength::OneHour);
        assert_eq!(one_hour.len(), 7);
        assert!(one_hour.iter().all(|o| !grid.is_break_row(o.value)));

        let two_hour = grid.slot_options(SlotLength::TwoHour);
        assert_eq!(two_hour.len(), 3);
        assert_eq!(two_hour[2].label, "01.40 - 03.30");
    }

    #[test]
    fn test_validate_rejects_gap() {
        static BAD: [PracticalGroup; 1] = [PracticalGroup {
            label: "bad",
            rows: [1, 3],
        }];
        let grid = GridDefinition {
            practical_groups: &BAD,
            ..GridDefinition::standard()
        };
        assert!(matches!(
            grid.validate(),
            Err(TimetableError::InvalidGrid(msg)) if msg.contains("not contiguous")
        ));
    }

    #[test]
    fn test_validate_rejects_break_in_block() {
        static BAD: [PracticalGroup; 1] = [PracticalGroup {
            label: "over lunch",
            rows: [4, 5],
        }];
        let grid = GridDefinition {
            practical_groups: &BAD,
            ..GridDefinition::standard()
        };
        assert!(matches!(
            grid.validate(),
            Err(TimetableError::InvalidGrid(msg)) if msg.contains("break")
        ));
    }
}
