//! Structured metadata attached to a log entry.
//!
//! Metadata is an explicit tagged value rather than an opaque blob. Its
//! serialized form is compact JSON with object keys in sorted order, and
//! nesting is bounded by [`Metadata::MAX_DEPTH`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use logbuddy_core::{AppError, AppResult};

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Explicit absence.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Whole number.
    Integer(i64),
    /// Whole number above `i64::MAX`.
    UInt(u64),
    /// Finite floating-point number.
    Float(f64),
    /// Text.
    String(String),
    /// Ordered list of values.
    List(Vec<MetadataValue>),
    /// Nested mapping with string keys.
    Map(BTreeMap<String, MetadataValue>),
}

impl MetadataValue {
    /// Nesting depth of this value; scalars are 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::List(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            Self::Map(map) => 1 + map.values().map(Self::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    fn has_non_finite(&self) -> bool {
        match self {
            Self::Float(f) => !f.is_finite(),
            Self::List(items) => items.iter().any(Self::has_non_finite),
            Self::Map(map) => map.values().any(Self::has_non_finite),
            _ => false,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u64> for MetadataValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::UInt(v), Self::Integer)
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Key/value metadata with string keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, MetadataValue>);

impl Metadata {
    /// Maximum nesting depth, counting the top-level mapping as 1.
    pub const MAX_DEPTH: usize = 8;

    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Nesting depth, counting the top-level mapping as 1.
    pub fn depth(&self) -> usize {
        1 + self.0.values().map(MetadataValue::depth).max().unwrap_or(0)
    }

    /// Check the bounds that keep the serialized form well-defined.
    pub fn validate(&self) -> AppResult<()> {
        let depth = self.depth();
        if depth > Self::MAX_DEPTH {
            return Err(AppError::validation(format!(
                "Metadata nesting depth {depth} exceeds the maximum of {}",
                Self::MAX_DEPTH
            )));
        }
        if self.0.values().any(MetadataValue::has_non_finite) {
            return Err(AppError::validation(
                "Metadata numbers must be finite (NaN and infinity are not allowed)",
            ));
        }
        Ok(())
    }

    /// Compact JSON text with sorted keys.
    pub fn to_json_string(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse metadata from its JSON text.
    pub fn from_json_str(s: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl TryFrom<serde_json::Value> for Metadata {
    type Error = AppError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(AppError::validation(format!(
                "Metadata must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
