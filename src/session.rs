//! Per-class editing session.
//!
//! A `Session` owns one class's store and merge map. Switching class or
//! reloading builds a fresh session; nothing is shared between sessions.

use crate::cell_ref::{parse_content_key, ContentKey};
use crate::editor::input::Submission;
use crate::editor::mutation;
use crate::error::{Result, TimetableError};
use crate::grid::GridDefinition;
use crate::layout::{infer_merges, project, MergeMap, Projection};
use crate::persistence::TimetablePayload;
use crate::store::TimetableStore;
use crate::types::{Entry, EntryKind};

#[derive(Debug, Clone)]
pub struct Session {
    class: String,
    grid: GridDefinition,
    store: TimetableStore,
    merges: MergeMap,
}

impl Session {
    /// Empty timetable for `class` on the standard grid.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            grid: GridDefinition::standard(),
            store: TimetableStore::new(),
            merges: MergeMap::new(),
        }
    }

    /// Session rebuilt from a loaded payload, with merges fully re-derived.
    pub fn from_payload(class: impl Into<String>, payload: &TimetablePayload) -> Self {
        let mut session = Self::new(class);
        session.store = payload.to_store(&session.grid);
        session.refresh_layout();
        tracing::info!(
            class = %session.class,
            cells = session.store.len(),
            merges = session.merges.len(),
            "timetable loaded"
        );
        session
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn grid(&self) -> &GridDefinition {
        &self.grid
    }

    pub fn store(&self) -> &TimetableStore {
        &self.store
    }

    pub fn merges(&self) -> &MergeMap {
        &self.merges
    }

    /// Content key of an editable cell.
    pub fn key(&self, row: usize, day: &str) -> Result<ContentKey> {
        self.grid.content_key(row, day)
    }

    /// Editable cell named by a projected key string such as "0-0-Monday".
    pub fn parse_key(&self, key: &str) -> Result<ContentKey> {
        parse_content_key(key, &self.grid)
            .filter(|k| self.grid.is_editable_row(k.row))
            .ok_or_else(|| TimetableError::InvalidCellKey(key.to_string()))
    }

    /// Full payload for saving.
    pub fn to_payload(&self) -> TimetablePayload {
        TimetablePayload::from_store(&self.store, &self.grid)
    }

    /// Re-derive the merge map from the store, dropping any asserted merge
    /// the contents no longer support.
    pub fn refresh_layout(&mut self) {
        self.merges = infer_merges(&self.store, &self.grid);
    }

    pub fn projection(&self) -> Projection {
        project(&self.store, &self.merges, &self.grid)
    }

    pub fn set_or_append_entry(
        &mut self,
        day: &str,
        row: usize,
        content: &str,
        kind: EntryKind,
    ) -> Result<ContentKey> {
        mutation::set_or_append_entry(&mut self.store, &self.grid, day, row, content, kind)
    }

    pub fn set_practical_entry(
        &mut self,
        day: &str,
        group: usize,
        combined_label: &str,
    ) -> Result<ContentKey> {
        mutation::set_practical_entry(
            &mut self.store,
            &mut self.merges,
            &self.grid,
            day,
            group,
            combined_label,
        )
    }

    /// Apply a validated form submission.
    pub fn apply(&mut self, submission: &Submission) -> Result<ContentKey> {
        match submission {
            Submission::Single {
                day,
                row,
                content,
                kind,
            } => self.set_or_append_entry(day, *row, content, *kind),
            Submission::Practical { day, group, label } => {
                self.set_practical_entry(day, *group, label)
            }
        }
    }

    pub fn remove_entry(&mut self, key: &ContentKey, entry: &Entry) -> bool {
        mutation::remove_entry(&mut self.store, key, entry)
    }

    pub fn clear_cell(&mut self, key: &ContentKey) -> bool {
        mutation::clear_cell(&mut self.store, key)
    }
}
