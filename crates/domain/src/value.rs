//! Resolved values
//!
//! Everything a backing store can hand back: JSON-shaped data for the runtime
//! table, computed values and constants, or raw bytes for file constants.

use std::fmt;

use serde::Serialize;

/// A value produced by resolving a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Structured data: string, number, bool, null, array or object.
    Json(serde_json::Value),

    /// Raw file contents.
    Bytes(Vec<u8>),
}

impl Value {
    /// Creates a string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Json(serde_json::Value::String(value.into()))
    }

    /// Creates the null value.
    #[must_use]
    pub const fn null() -> Self {
        Self::Json(serde_json::Value::Null)
    }

    /// Returns the string content if this value is a JSON string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Json(json) => json.as_str(),
            Self::Bytes(_) => None,
        }
    }

    /// Returns the raw bytes if this value is file-backed.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Json(_) => None,
        }
    }

    /// Returns the JSON payload, if any.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(json) => Some(json),
            Self::Bytes(_) => None,
        }
    }

    /// Returns true if this value holds raw bytes.
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, Self::Bytes(_))
    }

    /// Returns true if this value is JSON null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Json(serde_json::Value::Null))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(serde_json::Value::String(s)) => f.write_str(s),
            Self::Json(json) => write!(f, "{json}"),
            Self::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Json(serde_json::Value::Bool(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Json(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Json(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Json(value.into())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}
