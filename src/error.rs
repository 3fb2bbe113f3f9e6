//! Structured error types for gridcols.

use crate::types::ColumnRegion;

/// All errors that can occur when deriving column views.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// No column state occupies the requested grid slot.
    ///
    /// Indicates the position map and the column states are out of sync.
    #[error("No column at position {region}/{value}")]
    ColumnNotFoundAtPosition { region: ColumnRegion, value: u32 },

    /// Malformed `"<type>_<index>"` key.
    #[error("Invalid column key: {0}")]
    InvalidColumnKey(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
