//! Application error types

use sigil_domain::{DomainError, ProviderError, ProviderKind};
use thiserror::Error;

/// Errors returned by [`Resolver::resolve`](crate::Resolver::resolve).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The key could not be classified.
    #[error("malformed key: {0:?}")]
    MalformedKey(String),

    /// The runtime table holds no entry for the name.
    #[error("value {0:?} doesn't exist in the runtime table")]
    NotFound(String),

    /// The key targets a provider that has not been registered yet.
    #[error("no {0} provider is registered")]
    ProviderMissing(ProviderKind),

    /// The provider's own lookup failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<DomainError> for ResolveError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::MalformedKey(key) => Self::MalformedKey(key),
        }
    }
}

/// Errors returned by the batch registration operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// An empty batch was registered while no provider of that kind exists,
    /// leaving nothing to become the registration.
    #[error("cannot register an empty batch of {0} providers: none is registered yet")]
    EmptyBatch(ProviderKind),
}

/// Result type alias for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;
