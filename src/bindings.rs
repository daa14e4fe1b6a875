//! JavaScript bindings.
//!
//! `TimetableApp` exposes one class session to a browser front end. The page
//! owns persistence: it feeds `load` with the server payload and posts
//! `payload()` back after each successful mutation.

use wasm_bindgen::prelude::*;

use crate::editor::input::EntryForm;
use crate::persistence::TimetablePayload;
use crate::session::Session;
use crate::types::Entry;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Install the panic hook so Rust panics show up in the browser console.
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// The main timetable struct exported to JavaScript.
#[wasm_bindgen]
pub struct TimetableApp {
    session: Session,
}

#[wasm_bindgen]
impl TimetableApp {
    /// Empty timetable for `class_name`.
    #[wasm_bindgen(constructor)]
    pub fn new(class_name: &str) -> TimetableApp {
        TimetableApp {
            session: Session::new(class_name),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn class_name(&self) -> String {
        self.session.class().to_string()
    }

    /// Replace the timetable with a loaded `{slot: {day: text}}` payload.
    #[wasm_bindgen]
    pub fn load(&mut self, payload: JsValue) -> Result<(), JsValue> {
        let payload: TimetablePayload = serde_wasm_bindgen::from_value(payload)?;
        self.session = Session::from_payload(self.session.class(), &payload);
        Ok(())
    }

    /// Full payload for saving.
    #[wasm_bindgen]
    pub fn payload(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.to_payload()).map_err(js_error)
    }

    /// Apply the entry dialog's fields. Rejections come back as error text.
    #[wasm_bindgen]
    pub fn submit(&mut self, form: JsValue) -> Result<(), JsValue> {
        let form: EntryForm = serde_wasm_bindgen::from_value(form)?;
        let submission = form.validate(self.session.grid()).map_err(js_error)?;
        self.session.apply(&submission).map_err(js_error)?;
        self.session.refresh_layout();
        Ok(())
    }

    /// Remove the stacked item whose text is `text` from the cell with the
    /// projected key `key` ("row-col-day").
    #[wasm_bindgen]
    pub fn remove_entry(&mut self, key: &str, text: &str) -> Result<bool, JsValue> {
        let key = self.session.parse_key(key).map_err(js_error)?;
        let removed = self.session.remove_entry(&key, &Entry::from_text(text));
        self.session.refresh_layout();
        Ok(removed)
    }

    #[wasm_bindgen]
    pub fn clear_cell(&mut self, key: &str) -> Result<bool, JsValue> {
        let key = self.session.parse_key(key).map_err(js_error)?;
        let cleared = self.session.clear_cell(&key);
        self.session.refresh_layout();
        Ok(cleared)
    }

    /// Render projection: rows of break / slot / absorbed cells.
    #[wasm_bindgen]
    pub fn projection(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.projection()).map_err(js_error)
    }

    /// Selectable slots for `"subject"`, `"specSubject"` or `"practical"`.
    #[wasm_bindgen]
    pub fn slot_options(&self, option: JsValue) -> Result<JsValue, JsValue> {
        let form = EntryForm {
            option: Some(serde_wasm_bindgen::from_value(option)?),
            ..EntryForm::default()
        };
        let options = form
            .slot_length()
            .map(|length| self.session.grid().slot_options(length))
            .unwrap_or_default();
        serde_wasm_bindgen::to_value(&options).map_err(js_error)
    }
}
