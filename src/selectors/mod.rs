//! Memoized selectors deriving per-column views from a [`GridState`].
//!
//! The external store owns and mutates the state; selectors only read the
//! snapshot they are handed. Derived collections are returned as `Arc`s so
//! repeated calls with unchanged inputs hand back the very same allocation:
//! - all column states, in store order
//! - body column states, sorted by index
//! - visible body columns (visibility map + explicit column order)
//! - index column names and frozen column names
//! - column index by physical position
//!
//! Per-field accessors resolve the column state (falling back to
//! [`DEFAULT_COLUMN_STATE`]) and project a single field.

mod cache;
mod memo;

pub use memo::{KeyedMemo, Memo, MemoInput};

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{GridError, Result};
use crate::prefs::GridPrefs;
use crate::types::{
    ColumnDescriptor, ColumnKey, ColumnPosition, ColumnState, ColumnStates, ColumnType, DataType,
    GridState, HorizontalAlignment, SortOrder, TimeFormat, DEFAULT_COLUMN_STATE,
};

/// Name reported for the index column when the data has no named index.
pub const DEFAULT_INDEX_COLUMN_NAME: &str = "index";

/// Per-column memo slots kept before the oldest are evicted.
const PER_COLUMN_CAPACITY: usize = 1024;

type StateList = Arc<Vec<ColumnState>>;
type NameList = Arc<Vec<String>>;
type Visibility = Arc<HashMap<String, bool>>;
type ColumnNames = Arc<Vec<Option<String>>>;

/// Selector set for one grid.
///
/// Holds the memo caches and the injected [`GridPrefs`]. Not `Sync`: the
/// caches use `RefCell` and are meant to be driven from the UI thread.
pub struct ColumnSelectors {
    prefs: GridPrefs,
    states_array: RefCell<Memo<Arc<ColumnStates>, StateList>>,
    body_states: RefCell<Memo<StateList, StateList>>,
    index_names: RefCell<Memo<(ColumnNames, bool), NameList>>,
    visible_body: RefCell<Memo<(StateList, Visibility, Arc<Vec<String>>), StateList>>,
    frozen_names: RefCell<Memo<(Visibility, Visibility, ColumnNames), NameList>>,
    data_type_names: RefCell<KeyedMemo<ColumnKey, ColumnState, String>>,
    index_by_position: RefCell<KeyedMemo<ColumnPosition, StateList, Option<u32>>>,
    /// Column list the `index_by_position` slots were computed from
    position_source: RefCell<Option<StateList>>,
}

impl Default for ColumnSelectors {
    fn default() -> Self {
        Self::new(GridPrefs::default())
    }
}

impl ColumnSelectors {
    pub fn new(prefs: GridPrefs) -> Self {
        Self {
            prefs,
            states_array: RefCell::new(Memo::new("column_states_array")),
            body_states: RefCell::new(Memo::new("body_column_states")),
            index_names: RefCell::new(Memo::new("index_column_names")),
            visible_body: RefCell::new(Memo::new("visible_body_columns")),
            frozen_names: RefCell::new(Memo::new("frozen_column_names")),
            data_type_names: RefCell::new(KeyedMemo::new(
                "column_data_type_name",
                PER_COLUMN_CAPACITY,
            )),
            index_by_position: RefCell::new(KeyedMemo::new(
                "column_index_by_position",
                PER_COLUMN_CAPACITY,
            )),
            position_source: RefCell::new(None),
        }
    }

    pub fn prefs(&self) -> &GridPrefs {
        &self.prefs
    }

    /// Replace the injected preferences.
    pub fn reconfigure(&mut self, prefs: GridPrefs) {
        tracing::debug!(?prefs, "grid prefs reconfigured");
        self.prefs = prefs;
    }

    // ------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------

    /// All column states in store (insertion) order.
    pub fn column_states_array(&self, state: &GridState) -> StateList {
        self.states_array
            .borrow_mut()
            .get_or_compute(&state.columns, |columns| Arc::new(columns.iter().cloned().collect()))
    }

    /// Body column states sorted ascending by index.
    pub fn body_column_states(&self, state: &GridState) -> StateList {
        let all = self.column_states_array(state);
        self.body_states.borrow_mut().get_or_compute(&all, |all| {
            let mut body: Vec<ColumnState> = all
                .iter()
                .filter(|s| s.column_type == ColumnType::Body)
                .cloned()
                .collect();
            body.sort_by_key(|s| s.index);
            Arc::new(body)
        })
    }

    /// Name of the index column, as a one-element list.
    pub fn index_column_names(&self, state: &GridState) -> NameList {
        let inputs = (Arc::clone(&state.column_names), state.has_index);
        self.index_names
            .borrow_mut()
            .get_or_compute(&inputs, |(names, has_index)| {
                let first = names.first().and_then(Option::as_deref);
                let name = match first {
                    Some(name) if *has_index => name,
                    _ => DEFAULT_INDEX_COLUMN_NAME,
                };
                Arc::new(vec![name.to_string()])
            })
    }

    /// Body columns that are not explicitly hidden and, when an explicit
    /// column order is configured, appear in it.
    pub fn visible_body_columns(&self, state: &GridState) -> StateList {
        let inputs = (
            self.body_column_states(state),
            Arc::clone(&state.columns_visible),
            Arc::clone(&state.column_order),
        );
        self.visible_body
            .borrow_mut()
            .get_or_compute(&inputs, |(body, visible, order)| {
                let ordered: HashSet<&str> = order.iter().map(String::as_str).collect();
                let visible_body = body
                    .iter()
                    .filter(|s| visible.get(&s.name) != Some(&false))
                    .filter(|s| ordered.is_empty() || ordered.contains(s.name.as_str()))
                    .cloned()
                    .collect();
                Arc::new(visible_body)
            })
    }

    /// Names marked frozen that are not explicitly hidden, in column-name order.
    pub fn frozen_column_names(&self, state: &GridState) -> NameList {
        let inputs = (
            Arc::clone(&state.columns_frozen),
            Arc::clone(&state.columns_visible),
            Arc::clone(&state.column_names),
        );
        self.frozen_names
            .borrow_mut()
            .get_or_compute(&inputs, |(frozen, visible, names)| {
                let frozen_names = names
                    .iter()
                    .flatten()
                    .filter(|name| frozen.get(*name).copied().unwrap_or(false))
                    .filter(|name| visible.get(*name) != Some(&false))
                    .cloned()
                    .collect();
                Arc::new(frozen_names)
            })
    }

    // ------------------------------------------------------------------
    // Single column lookup
    // ------------------------------------------------------------------

    /// Column state for a `"<type>_<index>"` key, or the shared default.
    pub fn column_state_by_key<'a>(&self, state: &'a GridState, key: &str) -> &'a ColumnState {
        state.columns.get(key).unwrap_or(&DEFAULT_COLUMN_STATE)
    }

    /// Column state for a column descriptor, or the shared default.
    pub fn column_state<'a, C: ColumnDescriptor + ?Sized>(
        &self,
        state: &'a GridState,
        column: &C,
    ) -> &'a ColumnState {
        self.column_state_by_key(state, &column.key().to_string())
    }

    /// First column state with the given name, in store order.
    pub fn column_state_by_name<'a>(
        &self,
        state: &'a GridState,
        name: &str,
    ) -> Option<&'a ColumnState> {
        state.columns.iter().find(|s| s.name == name)
    }

    // ------------------------------------------------------------------
    // Per-field accessors
    // ------------------------------------------------------------------

    /// Explicit type name, falling back to the name of the data type.
    pub fn column_data_type_name<C: ColumnDescriptor + ?Sized>(
        &self,
        state: &GridState,
        column: &C,
    ) -> String {
        let column_state = self.column_state(state, column);
        self.data_type_names
            .borrow_mut()
            .get_or_compute(&column.key(), column_state, |s| {
                if s.data_type_name.is_empty() {
                    s.data_type.name().to_string()
                } else {
                    s.data_type_name.clone()
                }
            })
    }

    pub fn column_horizontal_alignment<C: ColumnDescriptor + ?Sized>(
        &self,
        state: &GridState,
        column: &C,
    ) -> HorizontalAlignment {
        self.column_state(state, column).horizontal_alignment
    }

    pub fn column_display_type<C: ColumnDescriptor + ?Sized>(
        &self,
        state: &GridState,
        column: &C,
    ) -> DataType {
        self.column_state(state, column).display_type
    }

    /// Filter expression, empty when none is set.
    pub fn column_filter<'a, C: ColumnDescriptor + ?Sized>(
        &self,
        state: &'a GridState,
        column: &C,
    ) -> &'a str {
        self.column_state(state, column)
            .filter
            .as_deref()
            .unwrap_or("")
    }

    pub fn column_data_type<C: ColumnDescriptor + ?Sized>(
        &self,
        state: &GridState,
        column: &C,
    ) -> DataType {
        self.column_state(state, column).data_type
    }

    pub fn column_sort_order<C: ColumnDescriptor + ?Sized>(
        &self,
        state: &GridState,
        column: &C,
    ) -> SortOrder {
        self.column_state(state, column).sort_order
    }

    pub fn column_keep_trigger<C: ColumnDescriptor + ?Sized>(
        &self,
        state: &GridState,
        column: &C,
    ) -> bool {
        self.column_state(state, column).keep_trigger
    }

    /// Time format, or the empty format when none is set.
    pub fn column_format_for_times<C: ColumnDescriptor + ?Sized>(
        &self,
        state: &GridState,
        column: &C,
    ) -> TimeFormat {
        self.column_state(state, column)
            .format_for_times
            .clone()
            .unwrap_or_default()
    }

    /// Width in pixels, `0.0` when the grid default applies.
    pub fn column_width<C: ColumnDescriptor + ?Sized>(&self, state: &GridState, column: &C) -> f64 {
        self.column_state(state, column).width.unwrap_or(0.0)
    }

    pub fn column_position<C: ColumnDescriptor + ?Sized>(
        &self,
        state: &GridState,
        column: &C,
    ) -> ColumnPosition {
        self.column_state(state, column).position
    }

    // ------------------------------------------------------------------
    // Reverse lookups and limits
    // ------------------------------------------------------------------

    /// Index of the column occupying `position`.
    ///
    /// # Errors
    /// Returns [`GridError::ColumnNotFoundAtPosition`] when no column state
    /// sits at that region and slot.
    pub fn column_index_by_position(
        &self,
        state: &GridState,
        position: &ColumnPosition,
    ) -> Result<u32> {
        let all = self.column_states_array(state);
        {
            // Slots computed from an older column list are stale
            let mut source = self.position_source.borrow_mut();
            if !source.as_ref().is_some_and(|s| Arc::ptr_eq(s, &all)) {
                self.index_by_position.borrow_mut().clear();
                *source = Some(Arc::clone(&all));
            }
        }
        let found = self
            .index_by_position
            .borrow_mut()
            .get_or_compute(position, &all, |all| {
                all.iter()
                    .find(|s| s.position == *position)
                    .map(|s| s.index)
            });
        found.ok_or_else(|| {
            tracing::warn!(
                region = %position.region,
                value = position.value,
                columns = all.len(),
                "no column state at position"
            );
            GridError::ColumnNotFoundAtPosition {
                region: position.region,
                value: position.value,
            }
        })
    }

    /// Configured output column limit, or the number of column names.
    pub fn output_column_limit(&self, state: &GridState) -> usize {
        self.prefs
            .column_limit()
            .unwrap_or(state.column_names.len())
    }

    // ------------------------------------------------------------------
    // Cache maintenance
    // ------------------------------------------------------------------

    /// Total number of recomputations across all memoized selectors.
    pub fn recompute_count(&self) -> usize {
        self.states_array.borrow().recomputations()
            + self.body_states.borrow().recomputations()
            + self.index_names.borrow().recomputations()
            + self.visible_body.borrow().recomputations()
            + self.frozen_names.borrow().recomputations()
            + self.data_type_names.borrow().recomputations()
            + self.index_by_position.borrow().recomputations()
    }

    /// Drop every remembered result.
    pub fn clear_cache(&self) {
        self.states_array.borrow_mut().clear();
        self.body_states.borrow_mut().clear();
        self.index_names.borrow_mut().clear();
        self.visible_body.borrow_mut().clear();
        self.frozen_names.borrow_mut().clear();
        self.data_type_names.borrow_mut().clear();
        self.index_by_position.borrow_mut().clear();
        self.position_source.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
    use super::*;
    use crate::types::{ColumnRegion, TimeUnit};

    fn body(name: &str, index: u32) -> ColumnState {
        ColumnState::new(name, ColumnType::Body, index)
    }

    fn names(states: &[ColumnState]) -> Vec<&str> {
        states.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_states_array_keeps_store_order() {
        let state = GridState::new().with_columns(vec![
            body("c", 2),
            ColumnState::new("idx", ColumnType::Index, 0),
            body("a", 0),
        ]);
        let selectors = ColumnSelectors::default();
        assert_eq!(names(&selectors.column_states_array(&state)), ["c", "idx", "a"]);
    }

    #[test]
    fn test_body_states_sorted_and_filtered() {
        let state = GridState::new().with_columns(vec![
            body("five", 5),
            ColumnState::new("idx", ColumnType::Index, 0),
            body("one", 1),
            ColumnState::new("filler", ColumnType::Other, 2),
            body("three", 3),
        ]);
        let selectors = ColumnSelectors::default();
        let body_states = selectors.body_column_states(&state);
        let indices: Vec<u32> = body_states.iter().map(|s| s.index).collect();
        assert_eq!(indices, [1, 3, 5]);
    }

    #[test]
    fn test_body_states_memoized_across_unrelated_changes() {
        let state = GridState::new().with_columns(vec![body("a", 0)]);
        let selectors = ColumnSelectors::default();
        let first = selectors.body_column_states(&state);
        let before = selectors.recompute_count();

        let reordered = state.with_column_order(vec!["a".to_string()]);
        let second = selectors.body_column_states(&reordered);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(selectors.recompute_count(), before);

        let changed = state.with_columns(vec![body("a", 0), body("b", 1)]);
        let third = selectors.body_column_states(&changed);
        assert_eq!(third.len(), 2);
        assert!(selectors.recompute_count() > before);
    }

    #[test]
    fn test_data_type_name_fallback() {
        let mut custom = body("b", 1).with_data_type(DataType::Double);
        custom.data_type_name = "money".to_string();
        let state = GridState::new()
            .with_columns(vec![body("a", 0).with_data_type(DataType::Int64), custom]);
        let selectors = ColumnSelectors::default();
        assert_eq!(selectors.column_data_type_name(&state, &ColumnKey::body(0)), "int64");
        assert_eq!(selectors.column_data_type_name(&state, &ColumnKey::body(1)), "money");
        assert_eq!(selectors.column_data_type_name(&state, &ColumnKey::body(9)), "string");
    }

    #[test]
    fn test_data_type_name_recomputes_on_record_change() {
        let state = GridState::new().with_columns(vec![body("a", 0).with_data_type(DataType::Time)]);
        let selectors = ColumnSelectors::default();
        assert_eq!(selectors.column_data_type_name(&state, &ColumnKey::body(0)), "time");

        let updated =
            state.with_columns(vec![body("a", 0).with_data_type(DataType::Datetime)]);
        assert_eq!(
            selectors.column_data_type_name(&updated, &ColumnKey::body(0)),
            "datetime"
        );
    }

    #[test]
    fn test_field_fallbacks() {
        let state = GridState::new();
        let selectors = ColumnSelectors::default();
        let key = ColumnKey::body(3);
        assert_eq!(selectors.column_filter(&state, &key), "");
        assert_eq!(selectors.column_width(&state, &key), 0.0);
        assert!(selectors.column_format_for_times(&state, &key).is_empty());
        assert_eq!(selectors.column_sort_order(&state, &key), SortOrder::None);
        assert_eq!(
            selectors.column_horizontal_alignment(&state, &key),
            HorizontalAlignment::Left
        );
        assert!(!selectors.column_keep_trigger(&state, &key));
    }

    #[test]
    fn test_field_values() {
        let mut column = body("when", 0).with_position(ColumnRegion::Frozen, 2);
        column.filter = Some("$ > 3".to_string());
        column.width = Some(88.0);
        column.sort_order = SortOrder::Descending;
        column.keep_trigger = true;
        column.horizontal_alignment = HorizontalAlignment::Right;
        column.display_type = DataType::Html;
        column.format_for_times = Some(TimeFormat {
            time_unit: Some(TimeUnit::Seconds),
            ..TimeFormat::default()
        });
        let state = GridState::new().with_columns(vec![column]);
        let selectors = ColumnSelectors::default();
        let key = ColumnKey::body(0);

        assert_eq!(selectors.column_filter(&state, &key), "$ > 3");
        assert_eq!(selectors.column_width(&state, &key), 88.0);
        assert_eq!(selectors.column_sort_order(&state, &key), SortOrder::Descending);
        assert!(selectors.column_keep_trigger(&state, &key));
        assert_eq!(
            selectors.column_horizontal_alignment(&state, &key),
            HorizontalAlignment::Right
        );
        assert_eq!(selectors.column_display_type(&state, &key), DataType::Html);
        assert_eq!(selectors.column_data_type(&state, &key), DataType::String);
        assert_eq!(
            selectors.column_format_for_times(&state, &key).time_unit,
            Some(TimeUnit::Seconds)
        );
        assert_eq!(
            selectors.column_position(&state, &key),
            ColumnPosition::new(ColumnRegion::Frozen, 2)
        );
    }

    #[test]
    fn test_frozen_column_names() {
        let state = GridState::new()
            .with_column_names(vec![
                Some("idx".to_string()),
                Some("a".to_string()),
                None,
                Some("b".to_string()),
                Some("c".to_string()),
            ])
            .with_columns_frozen(HashMap::from([
                ("c".to_string(), true),
                ("a".to_string(), true),
                ("b".to_string(), false),
            ]))
            .with_columns_visible(HashMap::from([("c".to_string(), false)]));
        let selectors = ColumnSelectors::default();
        assert_eq!(*selectors.frozen_column_names(&state), ["a"]);
    }

    #[test]
    fn test_reconfigure_changes_limit() {
        let state = GridState::new().with_column_names(vec![None, Some("a".to_string())]);
        let mut selectors = ColumnSelectors::default();
        assert_eq!(selectors.output_column_limit(&state), 2);
        selectors.reconfigure(GridPrefs::with_output_column_limit(7));
        assert_eq!(selectors.output_column_limit(&state), 7);
        assert_eq!(selectors.prefs().column_limit(), Some(7));
    }

    #[test]
    fn test_position_slots_release_previous_column_list() {
        let state = GridState::new().with_columns(vec![
            body("a", 0).with_position(ColumnRegion::Body, 0),
            body("b", 1).with_position(ColumnRegion::Body, 1),
        ]);
        let selectors = ColumnSelectors::default();
        for value in 0..2 {
            selectors
                .column_index_by_position(&state, &ColumnPosition::new(ColumnRegion::Body, value))
                .unwrap();
        }
        let previous = selectors.column_states_array(&state);

        let swapped = state.with_columns(vec![
            body("a", 0).with_position(ColumnRegion::Body, 1),
            body("b", 1).with_position(ColumnRegion::Body, 0),
        ]);
        let slot = ColumnPosition::new(ColumnRegion::Body, 0);
        assert_eq!(selectors.column_index_by_position(&swapped, &slot).unwrap(), 1);
        assert_eq!(selectors.index_by_position.borrow().len(), 1);
        // Only the local handle still refers to the previous list
        assert_eq!(Arc::strong_count(&previous), 1);
    }

    #[test]
    fn test_clear_cache_forces_recompute() {
        let state = GridState::new().with_columns(vec![body("a", 0)]);
        let selectors = ColumnSelectors::default();
        selectors.body_column_states(&state);
        let before = selectors.recompute_count();
        selectors.clear_cache();
        selectors.body_column_states(&state);
        assert_eq!(selectors.recompute_count(), before + 2);
    }
}
