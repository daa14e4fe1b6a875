//! Cell addressing: content keys `row-col-day` and merge keys `row-col`.
//!
//! Both forms are order-sensitive. The practical-block code reads the row from
//! the first component and the column from the second, so the layout of the
//! display string is part of the contract.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::grid::GridDefinition;

/// Address of one editable cell. `day` always equals `days[col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey {
    pub row: usize,
    pub col: usize,
    pub day: &'static str,
}

/// Address of a cell for merge bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MergeKey {
    pub row: usize,
    pub col: usize,
}

impl ContentKey {
    pub fn new(row: usize, col: usize, day: &'static str) -> Self {
        Self { row, col, day }
    }

    pub fn merge_key(&self) -> MergeKey {
        MergeKey::new(self.row, self.col)
    }

    /// Same column and day, one row further down.
    pub fn next_row(&self) -> Self {
        Self {
            row: self.row + 1,
            ..*self
        }
    }
}

impl MergeKey {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.row, self.col, self.day)
    }
}

impl fmt::Display for MergeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl Serialize for ContentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for MergeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a content key like "0-2-Wednesday".
///
/// Returns `None` unless the day exists in `grid` and sits in the named column.
pub fn parse_content_key(key: &str, grid: &GridDefinition) -> Option<ContentKey> {
    let mut parts = key.trim().splitn(3, '-');
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    let day = parts.next()?;
    let canonical = grid.day_at(col)?;
    if canonical != day {
        return None;
    }
    Some(ContentKey::new(row, col, canonical))
}
