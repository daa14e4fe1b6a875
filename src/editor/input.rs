//! Entry form state.
//!
//! Mirrors the add-entry dialog: every field is optional until submission,
//! where [`EntryForm::validate`] turns it into a [`Submission`] or names the
//! first missing field.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};
use crate::grid::{GridDefinition, SlotLength};
use crate::types::{EntryKind, BATCH_PREFIX, LABEL_SEPARATOR};

/// Raw dialog fields, as selected by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryForm {
    pub day: Option<String>,
    pub option: Option<EntryKind>,
    pub subject: Option<String>,
    pub spec_subject: Option<String>,
    pub practical_subject: Option<String>,
    pub batch: Option<String>,
    /// Row index for one-hour kinds, practical group index for practicals.
    pub slot: Option<usize>,
}

/// A complete, validated request to change the timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// One-period entry at `row`.
    Single {
        day: String,
        row: usize,
        content: String,
        kind: EntryKind,
    },
    /// Practical entry for practical slot `group`.
    Practical {
        day: String,
        group: usize,
        label: String,
    },
}

impl EntryForm {
    /// Slot length offered for the chosen entry kind.
    pub fn slot_length(&self) -> Option<SlotLength> {
        match self.option? {
            EntryKind::Subject | EntryKind::SpecSubject => Some(SlotLength::OneHour),
            EntryKind::Practical => Some(SlotLength::TwoHour),
        }
    }

    /// Check fields in dialog order: day, option type, the kind's value
    /// field(s), then the time slot.
    pub fn validate(&self, grid: &GridDefinition) -> Result<Submission> {
        let day = required(self.day.as_deref(), "day")?;
        grid.day_index(day)?;
        let kind = self
            .option
            .ok_or(TimetableError::MissingSelection("option type"))?;

        match kind {
            EntryKind::Subject | EntryKind::SpecSubject => {
                let (field, name) = if kind == EntryKind::Subject {
                    (self.subject.as_deref(), "subject")
                } else {
                    (self.spec_subject.as_deref(), "specialization subject")
                };
                let content = required(field, name)?;
                let row = self
                    .slot
                    .ok_or(TimetableError::MissingSelection("time slot"))?;
                Ok(Submission::Single {
                    day: day.to_string(),
                    row,
                    content: content.to_string(),
                    kind,
                })
            }
            EntryKind::Practical => {
                let subject = required(self.practical_subject.as_deref(), "practical subject")?;
                let batch = required(self.batch.as_deref(), "batch")?;
                let group = self
                    .slot
                    .ok_or(TimetableError::MissingSelection("time slot"))?;
                Ok(Submission::Practical {
                    day: day.to_string(),
                    group,
                    label: format!("{BATCH_PREFIX}{batch}{LABEL_SEPARATOR} {subject}"),
                })
            }
        }
    }
}

/// Non-blank value of a selection, or `MissingSelection(name)`.
fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(TimetableError::MissingSelection(name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn practical_form() -> EntryForm {
        EntryForm {
            day: Some("Monday".into()),
            option: Some(EntryKind::Practical),
            practical_subject: Some("Physics".into()),
            batch: Some("1".into()),
            slot: Some(0),
            ..EntryForm::default()
        }
    }

    #[test]
    fn test_practical_builds_batch_label() {
        let submission = practical_form().validate(&GridDefinition::standard()).unwrap();
        assert_eq!(
            submission,
            Submission::Practical {
                day: "Monday".into(),
                group: 0,
                label: "Batch 1: Physics".into(),
            }
        );
    }

    #[test]
    fn test_spec_subject_submission() {
        let form = EntryForm {
            day: Some("Tuesday".into()),
            option: Some(EntryKind::SpecSubject),
            spec_subject: Some("Spanish".into()),
            slot: Some(3),
            ..EntryForm::default()
        };
        assert_eq!(
            form.validate(&GridDefinition::standard()).unwrap(),
            Submission::Single {
                day: "Tuesday".into(),
                row: 3,
                content: "Spanish".into(),
                kind: EntryKind::SpecSubject,
            }
        );
        assert_eq!(form.slot_length(), Some(SlotLength::OneHour));
    }

    #[test_case(|f: &mut EntryForm| f.day = None, "day" ; "day first")]
    #[test_case(|f: &mut EntryForm| f.option = None, "option type" ; "option type")]
    #[test_case(|f: &mut EntryForm| f.practical_subject = Some("  ".into()), "practical subject" ; "blank subject")]
    #[test_case(|f: &mut EntryForm| f.batch = None, "batch" ; "batch")]
    #[test_case(|f: &mut EntryForm| f.slot = None, "time slot" ; "slot last")]
    fn test_missing_fields(clear: fn(&mut EntryForm), field: &str) {
        let mut form = practical_form();
        clear(&mut form);
        match form.validate(&GridDefinition::standard()) {
            Err(TimetableError::MissingSelection(name)) => assert_eq!(name, field),
            other => panic!("expected MissingSelection({field}), got {other:?}"),
        }
    }

    #[test]
    fn test_missing_subject_reported_before_slot() {
        let form = EntryForm {
            day: Some("Monday".into()),
            option: Some(EntryKind::Subject),
            ..EntryForm::default()
        };
        assert!(matches!(
            form.validate(&GridDefinition::standard()),
            Err(TimetableError::MissingSelection("subject"))
        ));
    }

    #[test]
    fn test_form_deserializes_from_dialog_json() {
        let form: EntryForm = serde_json::from_str(
            r#"{"day":"Friday","option":"specSubject","specSubject":"Latin","slot":9}"#,
        )
        .unwrap();
        assert_eq!(form.option, Some(EntryKind::SpecSubject));
        assert!(form.validate(&GridDefinition::standard()).is_ok());
    }
}
