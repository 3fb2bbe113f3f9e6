use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::{ColumnDescriptor, ColumnState};
use crate::error::GridError;

/// Column states keyed by composite key, iterated in insertion order.
///
/// Serialized as a plain sequence of records; keys are derived from each
/// record's type and index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ColumnState>", into = "Vec<ColumnState>")]
pub struct ColumnStates {
    entries: Vec<ColumnState>,
    by_key: HashMap<String, usize>,
}

impl ColumnStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a column state.
    ///
    /// Replacing keeps the original insertion slot. Returns the previous
    /// record for the key, if any.
    pub fn insert(&mut self, state: ColumnState) -> Option<ColumnState> {
        let key = state.key().to_string();
        match self.by_key.get(&key) {
            Some(&slot) => self
                .entries
                .get_mut(slot)
                .map(|existing| std::mem::replace(existing, state)),
            None => {
                self.by_key.insert(key, self.entries.len());
                self.entries.push(state);
                None
            }
        }
    }

    /// Look up a record by its `"<type>_<index>"` key string.
    pub fn get(&self, key: &str) -> Option<&ColumnState> {
        self.by_key.get(key).and_then(|&slot| self.entries.get(slot))
    }

    /// Records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnState> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[ColumnState] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<ColumnState>> for ColumnStates {
    fn from(states: Vec<ColumnState>) -> Self {
        states.into_iter().collect()
    }
}

impl From<ColumnStates> for Vec<ColumnState> {
    fn from(states: ColumnStates) -> Self {
        states.entries
    }
}

impl FromIterator<ColumnState> for ColumnStates {
    fn from_iter<I: IntoIterator<Item = ColumnState>>(iter: I) -> Self {
        let mut states = Self::new();
        for state in iter {
            states.insert(state);
        }
        states
    }
}

impl<'a> IntoIterator for &'a ColumnStates {
    type Item = &'a ColumnState;
    type IntoIter = std::slice::Iter<'a, ColumnState>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Snapshot of the grid display state owned by the external store.
///
/// Each slice sits behind an `Arc`. The `with_*` builders swap one slice and
/// share the rest, so unchanged slices stay pointer-equal across snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridState {
    #[serde(default)]
    pub columns: Arc<ColumnStates>,
    /// Explicit visibility per column name; absent means visible
    #[serde(default)]
    pub columns_visible: Arc<HashMap<String, bool>>,
    /// Explicit display order; empty means "store order"
    #[serde(default)]
    pub column_order: Arc<Vec<String>>,
    #[serde(default)]
    pub columns_frozen: Arc<HashMap<String, bool>>,
    #[serde(default)]
    pub has_index: bool,
    /// All column names; element 0 is the index column name when `has_index`
    #[serde(default)]
    pub column_names: Arc<Vec<Option<String>>>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(&self, columns: impl Into<ColumnStates>) -> Self {
        Self {
            columns: Arc::new(columns.into()),
            ..self.clone()
        }
    }

    pub fn with_columns_visible(&self, visible: HashMap<String, bool>) -> Self {
        Self {
            columns_visible: Arc::new(visible),
            ..self.clone()
        }
    }

    pub fn with_column_order(&self, order: Vec<String>) -> Self {
        Self {
            column_order: Arc::new(order),
            ..self.clone()
        }
    }

    pub fn with_columns_frozen(&self, frozen: HashMap<String, bool>) -> Self {
        Self {
            columns_frozen: Arc::new(frozen),
            ..self.clone()
        }
    }

    pub fn with_index(&self, has_index: bool) -> Self {
        Self {
            has_index,
            ..self.clone()
        }
    }

    pub fn with_column_names(&self, names: Vec<Option<String>>) -> Self {
        Self {
            column_names: Arc::new(names),
            ..self.clone()
        }
    }

    /// Parse a state snapshot from JSON.
    ///
    /// # Errors
    /// Returns an error if the JSON is not an object describing a grid state.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(GridError::Other(format!(
                "grid state must be a JSON object, got: {json}"
            )));
        }
        Ok(serde_json::from_value(value)?)
    }
}
