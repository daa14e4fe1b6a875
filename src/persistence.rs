//! Persistence contract and backends.
//!
//! A class timetable travels as a [`TimetablePayload`]: time-slot label →
//! day name → cell text, with stacked entries joined by `<br>`. Backends store
//! that payload and the class's config lists.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cell_ref::ContentKey;
use crate::config_lists::{ConfigKind, ConfigLists};
use crate::error::Result;
use crate::grid::GridDefinition;
use crate::store::TimetableStore;
use crate::types::CellContent;

/// Slot label → day → cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimetablePayload {
    pub slots: BTreeMap<String, BTreeMap<String, String>>,
}

impl TimetablePayload {
    /// Full grid payload. Break rows carry their fixed text, taken from the
    /// grid rather than the store; empty cells carry `""`.
    pub fn from_store(store: &TimetableStore, grid: &GridDefinition) -> Self {
        let mut slots = BTreeMap::new();
        for (row, slot) in grid.time_slots.iter().enumerate() {
            let days = grid
                .days
                .iter()
                .enumerate()
                .map(|(col, day)| {
                    let text = match grid.break_at(row) {
                        Some(kind) => kind.label().to_string(),
                        None => store.text(&ContentKey::new(row, col, *day)),
                    };
                    ((*day).to_string(), text)
                })
                .collect();
            slots.insert(slot.label.to_string(), days);
        }
        Self { slots }
    }

    /// Rebuild a store. Unknown slots or days are skipped, break rows are
    /// ignored whatever they hold, and blank text means an empty cell.
    pub fn to_store(&self, grid: &GridDefinition) -> TimetableStore {
        let mut store = TimetableStore::new();
        for (label, days) in &self.slots {
            let Some(row) = grid.slot_index(label) else {
                tracing::debug!(slot = %label, "skipping unknown time slot");
                continue;
            };
            if grid.is_break_row(row) {
                continue;
            }
            for (day, text) in days {
                let Ok(key) = grid.content_key(row, day) else {
                    tracing::debug!(%day, "skipping unknown day");
                    continue;
                };
                if let Some(content) = CellContent::from_text(text) {
                    store.set(key, content);
                }
            }
        }
        store
    }

    /// Text stored for `slot` / `day`, if present.
    pub fn cell(&self, slot: &str, day: &str) -> Option<&str> {
        self.slots.get(slot)?.get(day).map(String::as_str)
    }
}

/// Storage used by the editor for timetables and config lists.
pub trait TimetableBackend {
    /// Stored payload for `class`; empty when nothing was saved yet.
    fn load(&mut self, class: &str) -> Result<TimetablePayload>;

    /// Persist the payload and return a status message for display.
    fn save(&mut self, class: &str, payload: &TimetablePayload) -> Result<String>;

    fn load_config(&mut self, class: &str) -> Result<ConfigLists>;

    fn add_config(&mut self, class: &str, kind: ConfigKind, name: &str) -> Result<()>;

    fn delete_config(&mut self, class: &str, kind: ConfigKind, name: &str) -> Result<()>;
}

/// Backend keeping everything in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    timetables: HashMap<String, TimetablePayload>,
    configs: HashMap<String, ConfigLists>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last payload saved for `class`.
    pub fn saved(&self, class: &str) -> Option<&TimetablePayload> {
        self.timetables.get(class)
    }
}

impl TimetableBackend for MemoryBackend {
    fn load(&mut self, class: &str) -> Result<TimetablePayload> {
        Ok(self.timetables.get(class).cloned().unwrap_or_default())
    }

    fn save(&mut self, class: &str, payload: &TimetablePayload) -> Result<String> {
        self.timetables.insert(class.to_string(), payload.clone());
        Ok(format!("Saved successfully to {class}!"))
    }

    fn load_config(&mut self, class: &str) -> Result<ConfigLists> {
        Ok(self.configs.get(class).cloned().unwrap_or_default())
    }

    fn add_config(&mut self, class: &str, kind: ConfigKind, name: &str) -> Result<()> {
        self.configs
            .entry(class.to_string())
            .or_default()
            .add(kind, name);
        Ok(())
    }

    fn delete_config(&mut self, class: &str, kind: ConfigKind, name: &str) -> Result<()> {
        if let Some(lists) = self.configs.get_mut(class) {
            lists.delete(kind, name);
        }
        Ok(())
    }
}

/// Backend writing `{class}_timetable.json` and `{class}_config.json` into a
/// directory.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Backend rooted at `dir`; the directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn timetable_path(&self, class: &str) -> PathBuf {
        self.dir.join(format!("{}_timetable.json", file_stem(class)))
    }

    pub fn config_path(&self, class: &str) -> PathBuf {
        self.dir.join(format!("{}_config.json", file_stem(class)))
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn update_config(&mut self, class: &str, apply: impl FnOnce(&mut ConfigLists)) -> Result<()> {
        let mut lists = self.load_config(class)?;
        apply(&mut lists);
        self.write_json(&self.config_path(class), &lists)
    }
}

/// Read and parse `path`, or `None` if it does not exist.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// File-system safe form of a class name.
fn file_stem(class: &str) -> String {
    let stem: String = class
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "timetable".to_string()
    } else {
        stem
    }
}

impl TimetableBackend for JsonFileBackend {
    fn load(&mut self, class: &str) -> Result<TimetablePayload> {
        let path = self.timetable_path(class);
        let payload: TimetablePayload = read_json(&path)?.unwrap_or_default();
        tracing::info!(path = %path.display(), "loaded timetable");
        Ok(payload)
    }

    fn save(&mut self, class: &str, payload: &TimetablePayload) -> Result<String> {
        let path = self.timetable_path(class);
        self.write_json(&path, payload)?;
        tracing::info!(path = %path.display(), "saved timetable");
        Ok(format!("Saved successfully to {}!", path.display()))
    }

    fn load_config(&mut self, class: &str) -> Result<ConfigLists> {
        let lists: ConfigLists = read_json(&self.config_path(class))?.unwrap_or_default();
        Ok(lists)
    }

    fn add_config(&mut self, class: &str, kind: ConfigKind, name: &str) -> Result<()> {
        self.update_config(class, |lists| {
            lists.add(kind, name);
        })
    }

    fn delete_config(&mut self, class: &str, kind: ConfigKind, name: &str) -> Result<()> {
        self.update_config(class, |lists| {
            lists.delete(kind, name);
        })
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
    use crate::types::Entry;

    #[test]
    fn test_from_store_covers_full_grid() {
        let grid = GridDefinition::standard();
        let payload = TimetablePayload::from_store(&TimetableStore::new(), &grid);
        assert_eq!(payload.slots.len(), 10);
        assert!(payload.slots.values().all(|days| days.len() == 7));
        assert_eq!(payload.cell("10.35 - 10.50", "Monday"), Some("Short Break"));
        assert_eq!(payload.cell("12.40 - 01.40", "Sunday"), Some("Lunch Break"));
        assert_eq!(payload.cell("08.45 - 09.40", "Monday"), Some(""));
    }

    #[test]
    fn test_stacked_text_uses_br() {
        let grid = GridDefinition::standard();
        let mut store = TimetableStore::new();
        let key = ContentKey::new(0, 0, "Monday");
        store.push_entry(key, Entry::practical("1", "Physics"));
        store.push_entry(key, Entry::practical("2", "Chemistry"));
        let payload = TimetablePayload::from_store(&store, &grid);
        assert_eq!(
            payload.cell("08.45 - 09.40", "Monday"),
            Some("Batch 1: Physics<br>Batch 2: Chemistry")
        );
        assert_eq!(payload.to_store(&grid), store);
    }

    #[test]
    fn test_to_store_ignores_breaks_and_unknowns() {
        let grid = GridDefinition::standard();
        let payload: TimetablePayload = serde_json::from_value(serde_json::json!({
            "10.35 - 10.50": { "Monday": "Short Break" },
            "12.40 - 01.40": { "Monday": "Something else" },
            "99.99 - 99.99": { "Monday": "Ghost" },
            "03.40 - 04.30": { "Someday": "Ghost", "Friday": "Art", "Saturday": "" },
        }))
        .unwrap();
        let store = payload.to_store(&grid);
        assert_eq!(store.len(), 1);
        assert_eq!(store.text(&ContentKey::new(9, 4, "Friday")), "Art");
    }

    #[test]
    fn test_memory_backend_roundtrip() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.load("CS-A").unwrap(), TimetablePayload::default());

        let grid = GridDefinition::standard();
        let payload = TimetablePayload::from_store(&TimetableStore::new(), &grid);
        let message = backend.save("CS-A", &payload).unwrap();
        assert_eq!(message, "Saved successfully to CS-A!");
        assert_eq!(backend.load("CS-A").unwrap(), payload);
    }

    #[test]
    fn test_file_stem_sanitizes() {
        assert_eq!(file_stem("CS A/2"), "CS_A_2");
        assert_eq!(file_stem("   "), "timetable");
    }
}
