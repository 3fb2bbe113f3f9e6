//! Serializable summary of the derived column views of a grid state.
//!
//! Used by the CLI and the WASM binding to hand rendering code everything
//! it needs in one pass.

use serde::Serialize;

use crate::selectors::ColumnSelectors;
use crate::types::{
    ColumnDescriptor, ColumnPosition, DataType, GridState, HorizontalAlignment, SortOrder,
};

/// Derived view of a single body column
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub key: String,
    pub name: String,
    pub index: u32,
    pub data_type_name: String,
    pub display_type: DataType,
    pub horizontal_alignment: HorizontalAlignment,
    pub sort_order: SortOrder,
    pub filter: String,
    pub width: f64,
    pub position: ColumnPosition,
    pub visible: bool,
}

/// Derived views for a whole grid
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridReport {
    pub index_column_names: Vec<String>,
    pub frozen_column_names: Vec<String>,
    pub output_column_limit: usize,
    pub columns: Vec<ColumnView>,
}

impl GridReport {
    pub fn build(selectors: &ColumnSelectors, state: &GridState) -> Self {
        let visible = selectors.visible_body_columns(state);
        let columns = selectors
            .body_column_states(state)
            .iter()
            .map(|column| ColumnView {
                key: column.key().to_string(),
                name: column.name.clone(),
                index: column.index,
                data_type_name: selectors.column_data_type_name(state, column),
                display_type: selectors.column_display_type(state, column),
                horizontal_alignment: selectors.column_horizontal_alignment(state, column),
                sort_order: selectors.column_sort_order(state, column),
                filter: selectors.column_filter(state, column).to_string(),
                width: selectors.column_width(state, column),
                position: selectors.column_position(state, column),
                visible: visible.iter().any(|v| v.key() == column.key()),
            })
            .collect();

        Self {
            index_column_names: selectors.index_column_names(state).to_vec(),
            frozen_column_names: selectors.frozen_column_names(state).to_vec(),
            output_column_limit: selectors.output_column_limit(state),
            columns,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
