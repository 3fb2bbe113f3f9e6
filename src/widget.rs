//! WASM binding: a grid's column selectors driven from JavaScript.
//!
//! The notebook front end pushes state snapshots in with `load_state` and
//! reads derived views back as plain JS objects.

use wasm_bindgen::prelude::*;

use crate::prefs::GridPrefs;
use crate::report::GridReport;
use crate::selectors::ColumnSelectors;
use crate::types::{ColumnPosition, GridState};

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[wasm_bindgen]
pub struct GridColumns {
    selectors: ColumnSelectors,
    state: GridState,
}

#[wasm_bindgen]
impl GridColumns {
    /// Create selectors with optional preferences JSON (`{"outputColumnLimit": n}`).
    #[wasm_bindgen(constructor)]
    pub fn new(prefs_json: Option<String>) -> Result<GridColumns, JsValue> {
        let prefs = match prefs_json {
            Some(json) => GridPrefs::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => GridPrefs::default(),
        };
        Ok(Self {
            selectors: ColumnSelectors::new(prefs),
            state: GridState::default(),
        })
    }

    /// Replace the preferences.
    pub fn reconfigure(&mut self, prefs_json: &str) -> Result<(), JsValue> {
        let prefs = GridPrefs::from_json(prefs_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.selectors.reconfigure(prefs);
        Ok(())
    }

    /// Replace the current state snapshot with one parsed from JSON.
    pub fn load_state(&mut self, state_json: &str) -> Result<(), JsValue> {
        self.state =
            GridState::from_json(state_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Replace the current state snapshot with a JS object.
    pub fn load_state_js(&mut self, state: JsValue) -> Result<(), JsValue> {
        self.state = serde_wasm_bindgen::from_value(state)
            .map_err(|e| JsValue::from_str(&format!("Invalid grid state: {e}")))?;
        Ok(())
    }

    pub fn column_states(&self) -> Result<JsValue, JsValue> {
        to_js(self.selectors.column_states_array(&self.state).as_slice())
    }

    pub fn body_column_states(&self) -> Result<JsValue, JsValue> {
        to_js(self.selectors.body_column_states(&self.state).as_slice())
    }

    pub fn visible_body_columns(&self) -> Result<JsValue, JsValue> {
        to_js(self.selectors.visible_body_columns(&self.state).as_slice())
    }

    pub fn index_column_names(&self) -> Vec<String> {
        self.selectors.index_column_names(&self.state).to_vec()
    }

    pub fn frozen_column_names(&self) -> Vec<String> {
        self.selectors.frozen_column_names(&self.state).to_vec()
    }

    /// Column state for a `"<type>_<index>"` key (default record when absent).
    pub fn column_state(&self, key: &str) -> Result<JsValue, JsValue> {
        to_js(self.selectors.column_state_by_key(&self.state, key))
    }

    /// Index of the column at `{region, value}`; throws when no column is there.
    pub fn column_index_by_position(&self, position: JsValue) -> Result<u32, JsValue> {
        let position: ColumnPosition = serde_wasm_bindgen::from_value(position)
            .map_err(|e| JsValue::from_str(&format!("Invalid position: {e}")))?;
        self.selectors
            .column_index_by_position(&self.state, &position)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn output_column_limit(&self) -> usize {
        self.selectors.output_column_limit(&self.state)
    }

    /// All derived views in one object.
    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_js(&GridReport::build(&self.selectors, &self.state))
    }
}
