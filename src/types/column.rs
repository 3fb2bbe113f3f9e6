use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DataType;
use crate::error::GridError;

/// Classification of a grid column.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Row-label column
    Index,
    /// Ordinary data column (default)
    #[default]
    Body,
    /// Anything else the grid may render (e.g. a trailing filler column)
    Other,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Body => "body",
            Self::Other => "other",
        }
    }
}

impl FromStr for ColumnType {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(Self::Index),
            "body" => Ok(Self::Body),
            "other" => Ok(Self::Other),
            _ => Err(GridError::InvalidColumnKey(s.to_string())),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Not sorted (default)
    #[default]
    None,
    Ascending,
    Descending,
}

/// Unit of a time-valued column
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

/// Display format for datetime/time columns.
///
/// The empty value (all fields unset) means "use the grid default".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimeFormat {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub time_unit: Option<TimeUnit>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub human_friendly: bool,
    /// Explicit strftime-like pattern
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub format: Option<String>,
}

impl TimeFormat {
    pub fn is_empty(&self) -> bool {
        self.time_unit.is_none() && !self.human_friendly && self.format.is_none()
    }
}

/// Layout area of the grid a column is painted into
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRegion {
    /// Scrollable body area (default)
    #[default]
    Body,
    /// Row-header area holding the index column
    Index,
    /// Frozen area left of the scrollable body
    Frozen,
}

impl fmt::Display for ColumnRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Body => "body",
            Self::Index => "index",
            Self::Frozen => "frozen",
        })
    }
}

/// Physical slot of a column: region plus position within that region
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColumnPosition {
    pub region: ColumnRegion,
    pub value: u32,
}

impl ColumnPosition {
    pub const fn new(region: ColumnRegion, value: u32) -> Self {
        Self { region, value }
    }
}

/// Anything that identifies a column by type and index.
///
/// Header/cell descriptors in the rendering layer implement this so they can
/// be handed to the selectors directly.
pub trait ColumnDescriptor {
    fn column_type(&self) -> ColumnType;
    fn index(&self) -> u32;

    /// Composite key of the described column.
    fn key(&self) -> ColumnKey {
        ColumnKey::new(self.column_type(), self.index())
    }
}

/// Composite column key, rendered as `"<type>_<index>"` (e.g. `body_3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    pub column_type: ColumnType,
    pub index: u32,
}

impl ColumnKey {
    pub const fn new(column_type: ColumnType, index: u32) -> Self {
        Self { column_type, index }
    }

    pub const fn body(index: u32) -> Self {
        Self::new(ColumnType::Body, index)
    }

    pub const fn index_column(index: u32) -> Self {
        Self::new(ColumnType::Index, index)
    }
}

impl ColumnDescriptor for ColumnKey {
    fn column_type(&self) -> ColumnType {
        self.column_type
    }

    fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.column_type, self.index)
    }
}

impl FromStr for ColumnKey {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::InvalidColumnKey(s.to_string());
        let (type_part, index_part) = s.rsplit_once('_').ok_or_else(invalid)?;
        let column_type = type_part.parse::<ColumnType>().map_err(|_| invalid())?;
        let index = index_part.parse::<u32>().map_err(|_| invalid())?;
        Ok(Self::new(column_type, index))
    }
}

/// Display configuration of a single grid column.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnState {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub column_type: ColumnType,
    /// Explicit type name override; empty means "derive from `data_type`"
    #[serde(default)]
    pub data_type_name: String,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub display_type: DataType,
    #[serde(default)]
    pub keep_trigger: bool,
    #[serde(default)]
    pub horizontal_alignment: HorizontalAlignment,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub format_for_times: Option<TimeFormat>,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub filter: Option<String>,
    /// Width in pixels; `None` means the grid default
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub position: ColumnPosition,
}

/// Record returned for keys that have no entry in the store.
pub static DEFAULT_COLUMN_STATE: ColumnState = ColumnState::DEFAULT;

impl ColumnState {
    /// Neutral column state: every field at its empty value.
    pub const DEFAULT: ColumnState = ColumnState {
        name: String::new(),
        index: 0,
        column_type: ColumnType::Body,
        data_type_name: String::new(),
        data_type: DataType::String,
        display_type: DataType::String,
        keep_trigger: false,
        horizontal_alignment: HorizontalAlignment::Left,
        format_for_times: None,
        sort_order: SortOrder::None,
        filter: None,
        width: None,
        position: ColumnPosition::new(ColumnRegion::Body, 0),
    };

    /// Create a body/index column with default display settings.
    pub fn new(name: impl Into<String>, column_type: ColumnType, index: u32) -> Self {
        Self {
            name: name.into(),
            column_type,
            index,
            ..Self::DEFAULT
        }
    }

    pub fn with_position(mut self, region: ColumnRegion, value: u32) -> Self {
        self.position = ColumnPosition::new(region, value);
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self.display_type = data_type;
        self
    }
}

impl Default for ColumnState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ColumnDescriptor for ColumnState {
    fn column_type(&self) -> ColumnType {
        self.column_type
    }

    fn index(&self) -> u32 {
        self.index
    }
}
