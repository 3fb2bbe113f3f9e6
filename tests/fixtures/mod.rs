//! Test fixtures for building grid state snapshots in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::GridStateBuilder;
//!
//! let state = GridStateBuilder::new()
//!     .index_column("Date")
//!     .body("A")
//!     .body("B")
//!     .hidden("A")
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::collections::HashMap;

use gridcols::{ColumnRegion, ColumnState, ColumnType, GridState};

/// Builder for [`GridState`] snapshots.
///
/// Body columns get consecutive indices and body-region positions in the
/// order they are added; the index column (if any) sits in the index region.
#[derive(Default)]
pub struct GridStateBuilder {
    columns: Vec<ColumnState>,
    visible: HashMap<String, bool>,
    order: Vec<String>,
    frozen: HashMap<String, bool>,
    has_index: bool,
    index_name: Option<String>,
    body_names: Vec<String>,
}

impl GridStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named index column.
    pub fn index_column(mut self, name: &str) -> Self {
        self.has_index = true;
        self.index_name = Some(name.to_string());
        self.columns.push(
            ColumnState::new(name, ColumnType::Index, 0).with_position(ColumnRegion::Index, 0),
        );
        self
    }

    /// Mark the grid as indexed without naming the index column.
    pub fn unnamed_index(mut self) -> Self {
        self.has_index = true;
        self.index_name = None;
        self.columns.push(
            ColumnState::new("", ColumnType::Index, 0).with_position(ColumnRegion::Index, 0),
        );
        self
    }

    /// Add a body column with the next free index.
    pub fn body(self, name: &str) -> Self {
        let index = u32::try_from(self.body_names.len()).unwrap();
        self.body_at(name, index)
    }

    /// Add a body column with an explicit index (also used as its body slot).
    pub fn body_at(mut self, name: &str, index: u32) -> Self {
        self.body_names.push(name.to_string());
        self.columns.push(
            ColumnState::new(name, ColumnType::Body, index).with_position(ColumnRegion::Body, index),
        );
        self
    }

    /// Add a fully specified column state.
    pub fn column(mut self, state: ColumnState) -> Self {
        if state.column_type == ColumnType::Body {
            self.body_names.push(state.name.clone());
        }
        self.columns.push(state);
        self
    }

    pub fn hidden(mut self, name: &str) -> Self {
        self.visible.insert(name.to_string(), false);
        self
    }

    pub fn shown(mut self, name: &str) -> Self {
        self.visible.insert(name.to_string(), true);
        self
    }

    pub fn order(mut self, names: &[&str]) -> Self {
        self.order = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    pub fn frozen(mut self, name: &str) -> Self {
        self.frozen.insert(name.to_string(), true);
        self
    }

    pub fn build(self) -> GridState {
        let mut names: Vec<Option<String>> = Vec::new();
        if self.has_index {
            names.push(self.index_name.clone());
        }
        names.extend(self.body_names.iter().cloned().map(Some));

        GridState::new()
            .with_columns(self.columns)
            .with_columns_visible(self.visible)
            .with_column_order(self.order)
            .with_columns_frozen(self.frozen)
            .with_index(self.has_index)
            .with_column_names(names)
    }
}

/// Names of a list of column states, in order.
pub fn names(states: &[ColumnState]) -> Vec<String> {
    states.iter().map(|s| s.name.clone()).collect()
}
