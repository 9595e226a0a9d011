//! Computed provider port

use sigil_domain::{Computation, ProviderError, ProviderResult, Value};

/// A provider of derived values, addressed with the `#` sigil.
///
/// Implementors expose their computations as an ordered list. When another
/// provider is registered on top of this one, the resolver appends the new
/// computations through [`replace_computed`](Self::replace_computed).
pub trait ComputedProvider: Send + Sync {
    /// Returns the computations in lookup order.
    fn computed(&self) -> &[Computation];

    /// Replaces the computations with a merged list.
    fn replace_computed(&mut self, computed: Vec<Computation>);

    /// Evaluates the computation registered under `name`.
    ///
    /// The default implementation runs the first computation with a matching
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownComputed`] if no computation matches,
    /// or the computation's own error.
    fn get_computed(&self, name: &str) -> ProviderResult<Value> {
        self.computed()
            .iter()
            .find(|computation| computation.name() == name)
            .ok_or_else(|| ProviderError::UnknownComputed(name.to_string()))?
            .evaluate()
    }

    /// Returns the computation names in lookup order.
    fn computed_names(&self) -> Vec<&str> {
        self.computed().iter().map(Computation::name).collect()
    }
}
