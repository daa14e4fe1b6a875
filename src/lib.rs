//! weekgrid - weekly class timetable model
//!
//! Keeps one class's week as a grid of days × time slots and derives how it
//! is drawn:
//! - Fixed break rows that never hold entries
//! - Stacked entries per cell (specialization subjects, practical batches)
//! - Two-period practical blocks rendered as one merged cell
//! - Flat `{slot: {day: text}}` payload for saving and loading
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { TimetableApp } from 'weekgrid';
//! await init();
//! const app = new TimetableApp("CS-A");
//! app.load(await fetchTimetable("CS-A"));
//! app.submit({ day: "Monday", option: "practical", practicalSubject: "Physics", batch: "1", slot: 0 });
//! render(app.projection());
//! ```

pub mod bindings;
pub mod cell_ref;
pub mod config_lists;
pub mod editor;
pub mod error;
pub mod grid;
pub mod layout;
pub mod persistence;
pub mod session;
pub mod store;
pub mod types;

use wasm_bindgen::prelude::*;

pub use bindings::TimetableApp;
pub use cell_ref::{ContentKey, MergeKey};
pub use config_lists::{ConfigKind, ConfigLists};
pub use editor::TimetableEditor;
pub use error::{Result, TimetableError};
pub use grid::GridDefinition;
pub use layout::{infer_merges, project, GridCell, MergeMap, Projection};
pub use persistence::{JsonFileBackend, MemoryBackend, TimetableBackend, TimetablePayload};
pub use session::Session;
pub use store::TimetableStore;
pub use types::*;

/// Get the library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
