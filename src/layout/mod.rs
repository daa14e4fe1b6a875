//! Derived grid layout.
//!
//! This module handles:
//! - Inferring which practical blocks merge two rows
//! - Projecting the store onto the grid for rendering

mod merge;
mod projection;

pub use merge::{infer_merges, MergeMap};
pub use projection::{project, GridCell, GridRow, Projection};
