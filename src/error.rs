//! Structured error types for weekgrid.
//!
//! User-facing rejections (`DuplicateBatch`, `MissingSelection`, `BlockOccupied`)
//! leave the timetable untouched; the caller reports them and moves on.

/// All errors that can occur while editing or persisting a timetable.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// Day name is not one of the grid's days.
    #[error("Invalid day: {0}")]
    InvalidDay(String),

    /// Row index is out of range or names a fixed break row.
    #[error("Invalid time slot: row {0} is not editable")]
    InvalidSlot(usize),

    /// Content key string that does not address an editable cell.
    #[error("Invalid cell key: {0}")]
    InvalidCellKey(String),

    /// Grid layout breaks a structural rule.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Practical slot group index is out of range.
    #[error("Invalid practical slot: {0}")]
    InvalidPracticalSlot(usize),

    /// The batch already occupies this practical block.
    #[error("Cannot add: Batch {0} already exists in this block.")]
    DuplicateBatch(String),

    /// A required form field was left unset.
    #[error("Please select {}.", with_article(.0))]
    MissingSelection(&'static str),

    /// Practical label without a `label: subject` separator.
    #[error("Malformed practical entry: {0:?}")]
    MalformedPractical(String),

    /// The second row of a practical block already holds independent content.
    #[error("Cannot add practical: {0} is already occupied")]
    BlockOccupied(String),

    /// An operation that needs an active class ran without one.
    #[error("Please select a class first.")]
    NoClassSelected,

    /// Config list kind not recognized.
    #[error("Unknown config type: {0}")]
    UnknownConfigKind(String),

    /// Payload (de)serialization failure.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn with_article(field: &str) -> String {
    let article = if field.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    };
    format!("{article} {field}")
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TimetableError>;

#[cfg(target_arch = "wasm32")]
impl From<TimetableError> for wasm_bindgen::JsValue {
    fn from(e: TimetableError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
