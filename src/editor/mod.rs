//! Timetable editor controller.
//!
//! `TimetableEditor` wraps a persistence backend and the active [`Session`],
//! adding:
//! - Class selection (loads config lists and the timetable together)
//! - Form submission with layout refresh and autosave
//! - Entry removal and config list maintenance
//!
//! Every successful mutation is followed by a save. Save failures become the
//! returned status message; the in-memory edit stays applied.

pub mod input;
pub mod mutation;

use crate::config_lists::{ConfigKind, ConfigLists};
use crate::error::{Result, TimetableError};
use crate::persistence::TimetableBackend;
use crate::session::Session;
use crate::types::Entry;

use input::EntryForm;

pub struct TimetableEditor<B: TimetableBackend> {
    backend: B,
    session: Option<Session>,
    config: ConfigLists,
}

impl<B: TimetableBackend> TimetableEditor<B> {
    /// Editor with no class selected.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: None,
            config: ConfigLists::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Config lists of the selected class.
    pub fn config(&self) -> &ConfigLists {
        &self.config
    }

    /// Switch to `class`, replacing the session and config lists.
    ///
    /// A blank class name deselects.
    pub fn select_class(&mut self, class: &str) -> Result<()> {
        let class = class.trim();
        if class.is_empty() {
            self.session = None;
            self.config = ConfigLists::new();
            return Ok(());
        }
        let config = self.backend.load_config(class)?;
        let payload = self.backend.load(class)?;
        self.config = config;
        self.session = Some(Session::from_payload(class, &payload));
        Ok(())
    }

    /// Validate and apply the entry form, then refresh merges and save.
    ///
    /// Returns the save status message. Validation or mutation errors leave
    /// the timetable unchanged and nothing is saved.
    pub fn submit(&mut self, form: &EntryForm) -> Result<String> {
        let session = self.session_mut()?;
        let submission = form.validate(session.grid())?;
        if let Err(e) = session.apply(&submission) {
            tracing::warn!(error = %e, "entry rejected");
            return Err(e);
        }
        session.refresh_layout();
        Ok(self.autosave())
    }

    /// Remove one entry from the cell at `row` / `day`.
    pub fn remove_entry(&mut self, row: usize, day: &str, entry: &Entry) -> Result<String> {
        let session = self.session_mut()?;
        let key = session.key(row, day)?;
        session.remove_entry(&key, entry);
        session.refresh_layout();
        Ok(self.autosave())
    }

    /// Remove every entry from the cell at `row` / `day`.
    pub fn clear_cell(&mut self, row: usize, day: &str) -> Result<String> {
        let session = self.session_mut()?;
        let key = session.key(row, day)?;
        session.clear_cell(&key);
        session.refresh_layout();
        Ok(self.autosave())
    }

    pub fn add_config(&mut self, kind: ConfigKind, name: &str) -> Result<()> {
        let class = self.class()?.to_string();
        if name.trim().is_empty() {
            return Ok(());
        }
        self.backend.add_config(&class, kind, name)?;
        self.config = self.backend.load_config(&class)?;
        Ok(())
    }

    pub fn delete_config(&mut self, kind: ConfigKind, name: &str) -> Result<()> {
        let class = self.class()?.to_string();
        self.backend.delete_config(&class, kind, name)?;
        self.config = self.backend.load_config(&class)?;
        Ok(())
    }

    fn class(&self) -> Result<&str> {
        self.session
            .as_ref()
            .map(Session::class)
            .ok_or(TimetableError::NoClassSelected)
    }

    fn session_mut(&mut self) -> Result<&mut Session> {
        self.session.as_mut().ok_or(TimetableError::NoClassSelected)
    }

    /// Save the active session; failures are reported, never retried.
    fn autosave(&mut self) -> String {
        let Some(session) = self.session.as_ref() else {
            return TimetableError::NoClassSelected.to_string();
        };
        let payload = session.to_payload();
        match self.backend.save(session.class(), &payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(class = session.class(), error = %e, "save failed");
                format!("Save failed: {e}")
            }
        }
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
    use crate::persistence::{MemoryBackend, TimetablePayload};
    use crate::types::EntryKind;

    fn practical(batch: &str, subject: &str) -> EntryForm {
        EntryForm {
            day: Some("Monday".into()),
            option: Some(EntryKind::Practical),
            practical_subject: Some(subject.into()),
            batch: Some(batch.into()),
            slot: Some(0),
            ..EntryForm::default()
        }
    }

    #[test]
    fn test_requires_class() {
        let mut editor = TimetableEditor::new(MemoryBackend::new());
        assert!(matches!(
            editor.submit(&practical("1", "Physics")),
            Err(TimetableError::NoClassSelected)
        ));
        assert!(matches!(
            editor.add_config(ConfigKind::Batch, "1"),
            Err(TimetableError::NoClassSelected)
        ));
    }

    #[test]
    fn test_submit_saves_after_mutation() {
        let mut editor = TimetableEditor::new(MemoryBackend::new());
        editor.select_class("CS-A").unwrap();
        let message = editor.submit(&practical("1", "Physics")).unwrap();
        assert_eq!(message, "Saved successfully to CS-A!");

        let saved = editor.backend().saved("CS-A").unwrap();
        assert_eq!(saved.cell("08.45 - 09.40", "Monday"), Some("Batch 1: Physics"));
    }

    #[test]
    fn test_rejected_submit_does_not_save() {
        let mut editor = TimetableEditor::new(MemoryBackend::new());
        editor.select_class("CS-A").unwrap();
        editor.submit(&practical("1", "Physics")).unwrap();
        let saved_before = editor.backend().saved("CS-A").cloned();

        let err = editor.submit(&practical("1", "Biology")).unwrap_err();
        assert!(matches!(err, TimetableError::DuplicateBatch(ref b) if b == "1"));
        assert_eq!(editor.backend().saved("CS-A").cloned(), saved_before);
    }

    #[test]
    fn test_class_switch_replaces_session() {
        let mut editor = TimetableEditor::new(MemoryBackend::new());
        editor.select_class("CS-A").unwrap();
        editor.submit(&practical("1", "Physics")).unwrap();
        editor.add_config(ConfigKind::Batch, "1").unwrap();

        editor.select_class("CS-B").unwrap();
        let session = editor.session().unwrap();
        assert_eq!(session.class(), "CS-B");
        assert!(session.store().is_empty());
        assert!(editor.config().names(ConfigKind::Batch).is_empty());

        editor.select_class("CS-A").unwrap();
        assert_eq!(editor.session().unwrap().merges().len(), 1);
        assert_eq!(editor.config().names(ConfigKind::Batch), ["1"]);
    }

    #[test]
    fn test_remove_and_clear_refresh_layout() {
        let mut editor = TimetableEditor::new(MemoryBackend::new());
        editor.select_class("CS-A").unwrap();
        editor.submit(&practical("1", "Physics")).unwrap();
        editor.submit(&practical("2", "Chemistry")).unwrap();

        editor
            .remove_entry(0, "Monday", &Entry::practical("1", "Physics"))
            .unwrap();
        let session = editor.session().unwrap();
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.merges().len(), 1);

        editor.clear_cell(0, "Monday").unwrap();
        let session = editor.session().unwrap();
        assert!(session.store().is_empty());
        assert!(session.merges().is_empty());
        assert_eq!(
            editor.backend().saved("CS-A").unwrap().cell("08.45 - 09.40", "Monday"),
            Some("")
        );
    }

    struct FailingBackend;

    impl TimetableBackend for FailingBackend {
        fn load(&mut self, _class: &str) -> Result<TimetablePayload> {
            Ok(TimetablePayload::default())
        }

        fn save(&mut self, _class: &str, _payload: &TimetablePayload) -> Result<String> {
            Err(std::io::Error::other("disk full").into())
        }

        fn load_config(&mut self, _class: &str) -> Result<ConfigLists> {
            Ok(ConfigLists::new())
        }

        fn add_config(&mut self, _class: &str, _kind: ConfigKind, _name: &str) -> Result<()> {
            Ok(())
        }

        fn delete_config(&mut self, _class: &str, _kind: ConfigKind, _name: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_save_keeps_edit() {
        let mut editor = TimetableEditor::new(FailingBackend);
        editor.select_class("CS-A").unwrap();
        let message = editor.submit(&practical("1", "Physics")).unwrap();
        assert_eq!(message, "Save failed: I/O error: disk full");
        assert_eq!(editor.session().unwrap().store().len(), 1);
    }
}
