use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Separator between a batch label and the practical subject.
pub const LABEL_SEPARATOR: char = ':';

/// Display prefix of batch labels ("Batch 3").
pub const BATCH_PREFIX: &str = "Batch ";

/// Kind of entry submitted from the entry form.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    /// Plain subject; replaces whatever the cell held.
    Subject,
    /// Specialization subject; stacks beside existing entries.
    SpecSubject,
    /// Two-period practical for one batch.
    Practical,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Subject => "subject",
            EntryKind::SpecSubject => "specSubject",
            EntryKind::Practical => "practical",
        }
    }
}

/// One item in a timetable cell, held as the exact text it was entered or
/// loaded with.
///
/// The batch label is the text before the first `:`, trimmed. Any entry
/// carrying one occupies that batch's place in a practical block, whatever
/// path created it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Entry {
    text: String,
}

impl Entry {
    pub fn subject(name: impl Into<String>) -> Self {
        Self { text: name.into() }
    }

    /// Practical entry for `batch` (the bare id, e.g. "3") and `subject`,
    /// written the way the entry form writes it.
    pub fn practical(batch: &str, subject: &str) -> Self {
        Self {
            text: format!("{BATCH_PREFIX}{}{LABEL_SEPARATOR} {subject}", batch.trim()),
        }
    }

    /// Accept a combined label such as "Batch 3: Physics".
    ///
    /// The label is kept verbatim; it only has to name a batch before its
    /// first `:`.
    pub fn parse_practical(label: &str) -> Result<Self> {
        let entry = Self::from_text(label);
        if entry.batch_label().is_none() {
            return Err(TimetableError::MalformedPractical(label.to_string()));
        }
        Ok(entry)
    }

    /// Entry for one persisted stack segment.
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Leading batch label, e.g. "Batch 3"; `None` without a non-blank
    /// label before the first `:`.
    pub fn batch_label(&self) -> Option<&str> {
        let (label, _) = self.text.split_once(LABEL_SEPARATOR)?;
        let label = label.trim();
        (!label.is_empty()).then_some(label)
    }

    /// Batch label without the display prefix, e.g. "3".
    pub fn batch_id(&self) -> Option<&str> {
        self.batch_label()
            .map(|b| b.strip_prefix(BATCH_PREFIX).unwrap_or(b).trim())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
