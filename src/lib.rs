//! gridcols - column-state selectors for notebook data grids
//!
//! Derives per-column display properties from a grid state snapshot:
//! - All / body / visible column states, with store order and index order
//! - Index and frozen column names
//! - Per-column type, alignment, sort order, filter, width and position
//! - Reverse lookup of a column from its physical position
//!
//! Derived collections are memoized on their inputs, so calling a selector
//! once per render pass is cheap while the state is unchanged.
//!
//! # Usage
//!
//! ```rust
//! use gridcols::{ColumnKey, ColumnSelectors, ColumnState, ColumnType, GridPrefs, GridState};
//!
//! let state = GridState::new().with_columns(vec![
//!     ColumnState::new("price", ColumnType::Body, 1),
//!     ColumnState::new("name", ColumnType::Body, 0),
//! ]);
//! let selectors = ColumnSelectors::new(GridPrefs::default());
//! let body = selectors.body_column_states(&state);
//! assert_eq!(body[0].name, "name");
//! assert_eq!(selectors.column_filter(&state, &ColumnKey::body(1)), "");
//! ```

pub mod error;
pub mod prefs;
pub mod report;
pub mod selectors;
pub mod types;
pub mod widget;

use wasm_bindgen::prelude::*;

pub use error::GridError;
pub use prefs::GridPrefs;
pub use report::{ColumnView, GridReport};
pub use selectors::{ColumnSelectors, DEFAULT_INDEX_COLUMN_NAME};
pub use types::*;
pub use widget::GridColumns;

/// Derive the column report for a JSON grid state and return it as JSON.
///
/// # Arguments
/// * `state_json` - The serialized grid state
/// * `prefs_json` - Optional serialized grid preferences
///
/// # Errors
/// Returns an error if either input is not valid JSON for its type.
#[wasm_bindgen]
pub fn derive_columns(state_json: &str, prefs_json: Option<String>) -> Result<String, JsValue> {
    report_json(state_json, prefs_json.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Native counterpart of [`derive_columns`].
///
/// # Errors
/// Returns an error if either input is not valid JSON for its type.
pub fn report_json(state_json: &str, prefs_json: Option<&str>) -> error::Result<String> {
    let prefs = prefs_json
        .map(GridPrefs::from_json)
        .transpose()?
        .unwrap_or_default();
    let state = GridState::from_json(state_json)?;
    GridReport::build(&ColumnSelectors::new(prefs), &state).to_json()
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
