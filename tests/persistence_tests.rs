//! Tests for the JSON file backend and the slot → day → text payload.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use common::{entries_at, key, PayloadBuilder};
use tempfile::TempDir;
use weekgrid::editor::input::EntryForm;
use weekgrid::{
    ConfigKind, EntryKind, JsonFileBackend, Session, TimetableBackend, TimetableEditor,
    TimetableError, TimetablePayload,
};

fn backend() -> (TempDir, JsonFileBackend) {
    let dir = TempDir::new().unwrap();
    let backend = JsonFileBackend::new(dir.path().join("timetables"));
    (dir, backend)
}

#[test]
fn test_missing_files_load_empty() {
    let (_dir, mut backend) = backend();
    assert_eq!(backend.load("CS-A").unwrap(), TimetablePayload::default());
    assert!(backend.load_config("CS-A").unwrap().names(ConfigKind::Batch).is_empty());
}

#[test]
fn test_save_then_load_preserves_text_verbatim() {
    let (_dir, mut backend) = backend();
    let payload = PayloadBuilder::new()
        .cell(0, "Monday", "Batch 1: Physics<br>Batch 2: Chemistry")
        .cell(3, "Tuesday", "Spanish<br>German")
        .cell(9, "Sunday", "Batch 7:Sport")
        .build();
    let payload = Session::from_payload("CS-A", &payload).to_payload();

    let message = backend.save("CS-A", &payload).unwrap();
    assert!(message.starts_with("Saved successfully to "));
    assert!(backend.timetable_path("CS-A").exists());

    let loaded = backend.load("CS-A").unwrap();
    assert_eq!(loaded, payload);
    assert_eq!(
        loaded.cell("08.45 - 09.40", "Monday"),
        Some("Batch 1: Physics<br>Batch 2: Chemistry")
    );
    assert_eq!(loaded.cell("03.40 - 04.30", "Sunday"), Some("Batch 7:Sport"));
}

#[test]
fn test_saved_file_is_slot_day_text_json() {
    let (_dir, mut backend) = backend();
    let mut session = Session::new("CS-A");
    session
        .set_practical_entry("Monday", 0, "Batch 1: Physics")
        .unwrap();
    backend.save("CS-A", &session.to_payload()).unwrap();

    let text = std::fs::read_to_string(backend.timetable_path("CS-A")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["08.45 - 09.40"]["Monday"], "Batch 1: Physics");
    assert_eq!(json["09.40 - 10.35"]["Monday"], "");
    assert_eq!(json["12.40 - 01.40"]["Friday"], "Lunch Break");
    assert_eq!(json.as_object().unwrap().len(), 10);
}

#[test]
fn test_corrupt_file_reports_json_error() {
    let (_dir, mut backend) = backend();
    std::fs::create_dir_all(backend.dir()).unwrap();
    std::fs::write(backend.timetable_path("CS-A"), "{ not json").unwrap();
    assert!(matches!(
        backend.load("CS-A"),
        Err(TimetableError::Json(_))
    ));
}

#[test]
fn test_config_lists_persist_per_class() {
    let (_dir, mut backend) = backend();
    backend.add_config("CS-A", ConfigKind::Batch, "1").unwrap();
    backend.add_config("CS-A", ConfigKind::Batch, "2").unwrap();
    backend.add_config("CS-A", ConfigKind::Practical, "Physics").unwrap();
    backend.add_config("CS-B", ConfigKind::Batch, "9").unwrap();

    let lists = backend.load_config("CS-A").unwrap();
    assert_eq!(lists.names(ConfigKind::Batch), ["1", "2"]);
    assert_eq!(lists.names(ConfigKind::Practical), ["Physics"]);

    backend.delete_config("CS-A", ConfigKind::Batch, "1").unwrap();
    assert_eq!(
        backend.load_config("CS-A").unwrap().names(ConfigKind::Batch),
        ["2"]
    );
    assert_eq!(
        backend.load_config("CS-B").unwrap().names(ConfigKind::Batch),
        ["9"]
    );
}

#[test]
fn test_editor_reload_from_disk() {
    let (dir, backend) = backend();
    let mut editor = TimetableEditor::new(backend);
    editor.select_class("CS-A").unwrap();
    editor
        .submit(&EntryForm {
            day: Some("Wednesday".into()),
            option: Some(EntryKind::Practical),
            practical_subject: Some("Physics".into()),
            batch: Some("1".into()),
            slot: Some(2),
            ..EntryForm::default()
        })
        .unwrap();
    editor.add_config(ConfigKind::Subject, "Maths").unwrap();

    let mut reopened = TimetableEditor::new(JsonFileBackend::new(dir.path().join("timetables")));
    reopened.select_class("CS-A").unwrap();
    let session = reopened.session().unwrap();
    assert_eq!(
        entries_at(session.store(), 6, "Wednesday"),
        ["Batch 1: Physics"]
    );
    assert!(session.merges().span(&key(6, "Wednesday").merge_key()).is_some());
    assert_eq!(reopened.config().names(ConfigKind::Subject), ["Maths"]);
}

#[test]
fn test_loaded_label_blocks_same_batch() {
    let mut session = PayloadBuilder::new()
        .cell(0, "Monday", "Batch 1:Physics")
        .session();
    let err = session
        .set_practical_entry("Monday", 0, "Batch 1: Biology")
        .unwrap_err();
    assert!(matches!(err, TimetableError::DuplicateBatch(ref b) if b == "1"));
    assert_eq!(entries_at(session.store(), 0, "Monday"), ["Batch 1:Physics"]);
}

#[test]
fn test_duplicate_batch_detection_survives_reload() {
    let mut session = Session::new("CS-A");
    session
        .set_practical_entry("Tuesday", 1, "Lab A: Physics")
        .unwrap();
    assert!(matches!(
        session.set_practical_entry("Tuesday", 1, "Lab A: Chem"),
        Err(TimetableError::DuplicateBatch(ref b)) if b == "Lab A"
    ));

    let mut reloaded = Session::from_payload("CS-A", &session.to_payload());
    assert_eq!(reloaded.store(), session.store());
    assert!(matches!(
        reloaded.set_practical_entry("Tuesday", 1, "Lab A: Chem"),
        Err(TimetableError::DuplicateBatch(ref b)) if b == "Lab A"
    ));
}
