//! Data types for timetable cells.

mod cell;
mod entry;

pub use cell::*;
pub use entry::*;
