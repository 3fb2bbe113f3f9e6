//! Grid preferences injected into the selectors.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// User preferences that affect derived column views.
///
/// Loaded once when the grid widget is created and handed to
/// [`ColumnSelectors`](crate::selectors::ColumnSelectors); replaced only via
/// `ColumnSelectors::reconfigure`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GridPrefs {
    /// Maximum number of columns to output; `None` or `0` means unlimited
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub output_column_limit: Option<usize>,
}

impl GridPrefs {
    pub fn with_output_column_limit(limit: usize) -> Self {
        Self {
            output_column_limit: Some(limit),
        }
    }

    /// Configured limit, treating `0` as "not configured".
    pub fn column_limit(&self) -> Option<usize> {
        self.output_column_limit.filter(|&limit| limit > 0)
    }

    /// Parse preferences from a JSON object (e.g. `{"outputColumnLimit": 50}`).
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or is not an object.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(GridError::Other(format!(
                "grid preferences must be a JSON object, got: {json}"
            )));
        }
        Ok(serde_json::from_value(value)?)
    }
}
