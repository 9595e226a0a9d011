//! Domain error types

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain-level errors that can occur while classifying keys.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The key could not be classified by the active grammar.
    #[error("malformed key: {0:?}")]
    MalformedKey(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// The family of backing provider a lookup was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Provider of derived values (`#` sigil).
    Computed,
    /// Provider of static and file-backed constants (`!` and `!!` sigils).
    Constants,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Computed => f.write_str("computed"),
            Self::Constants => f.write_str("constants"),
        }
    }
}

/// Failures raised by a provider's own lookup.
///
/// The resolver never inspects these, it hands them back to the caller as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No computation is registered under the name.
    #[error("computed value {0:?} is not defined")]
    UnknownComputed(String),

    /// No constant is registered under the name.
    #[error("constant {0:?} is not defined")]
    UnknownConstant(String),

    /// No file constant is registered under the name.
    #[error("file constant {0:?} is not defined")]
    UnknownFileConstant(String),

    /// A computation ran but could not produce a value.
    #[error("computation {name:?} failed: {reason}")]
    ComputationFailed {
        /// Name of the failing computation.
        name: String,
        /// Human readable cause.
        reason: String,
    },
}

impl ProviderError {
    /// Convenience constructor for [`ProviderError::ComputationFailed`].
    #[must_use]
    pub fn computation_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ComputationFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for provider lookups.
pub type ProviderResult<T> = Result<T, ProviderError>;
