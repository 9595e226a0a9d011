//! Computation descriptors
//!
//! A computed provider exposes an ordered list of named computations. Merging
//! providers concatenates these lists, so descriptors are cheap to clone.

use std::fmt;
use std::sync::Arc;

use crate::error::ProviderResult;
use crate::value::Value;

/// The function behind a computation.
pub type ComputeFn = Arc<dyn Fn() -> ProviderResult<Value> + Send + Sync>;

/// A named computation.
#[derive(Clone)]
pub struct Computation {
    name: String,
    compute: ComputeFn,
}

impl Computation {
    /// Creates a computation from a name and a closure.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigil_domain::{Computation, Value};
    ///
    /// let answer = Computation::new("answer", || Ok(Value::from(42_i64)));
    /// assert_eq!(answer.name(), "answer");
    /// assert_eq!(answer.evaluate(), Ok(Value::from(42_i64)));
    /// ```
    pub fn new<F>(name: impl Into<String>, compute: F) -> Self
    where
        F: Fn() -> ProviderResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            compute: Arc::new(compute),
        }
    }

    /// Creates a computation that always yields the same value.
    pub fn constant(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(name, move || Ok(value.clone()))
    }

    /// Returns the computation's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the computation.
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying closure reports.
    pub fn evaluate(&self) -> ProviderResult<Value> {
        (self.compute)()
    }
}

impl fmt::Debug for Computation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
