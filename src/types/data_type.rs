use serde::{Deserialize, Serialize};

/// Primitive value types a grid column can hold or be displayed as.
///
/// Serialized using the display name (e.g. `"double with precision"`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    #[default]
    #[serde(rename = "string")]
    String,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "formatted integer")]
    FormattedInteger,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "double with precision")]
    DoubleWithPrecision,
    #[serde(rename = "exponential 5")]
    Exponential5,
    #[serde(rename = "exponential 15")]
    Exponential15,
    #[serde(rename = "datetime")]
    Datetime,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "html")]
    Html,
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "image")]
    Image,
}

impl DataType {
    /// Human-readable type name, as shown in column menus.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::FormattedInteger => "formatted integer",
            Self::Double => "double",
            Self::DoubleWithPrecision => "double with precision",
            Self::Exponential5 => "exponential 5",
            Self::Exponential15 => "exponential 15",
            Self::Datetime => "datetime",
            Self::Boolean => "boolean",
            Self::Html => "html",
            Self::Int64 => "int64",
            Self::Time => "time",
            Self::Image => "image",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
