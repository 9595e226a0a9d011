//! In-memory computed provider.

use sigil_application::ports::ComputedProvider;
use sigil_domain::{Computation, ProviderResult, Value};

/// A computed provider backed by a list of named closures.
///
/// ```
/// use sigil_application::Resolver;
/// use sigil_infrastructure::ComputedTable;
/// use sigil_domain::Value;
///
/// let mut resolver = Resolver::new();
/// resolver.register_computed(
///     ComputedTable::new().with("answer", || Ok(Value::from(42_i64))),
/// );
/// assert_eq!(resolver.resolve("#answer").unwrap(), Value::from(42_i64));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComputedTable {
    computed: Vec<Computation>,
}

impl ComputedTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a computation backed by a closure.
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, compute: F) -> Self
    where
        F: Fn() -> ProviderResult<Value> + Send + Sync + 'static,
    {
        self.computed.push(Computation::new(name, compute));
        self
    }

    /// Adds a computation that always yields `value`.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.computed.push(Computation::constant(name, value));
        self
    }

    /// Returns the number of computations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.computed.len()
    }

    /// Returns true if the table holds no computation.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.computed.is_empty()
    }
}

impl FromIterator<Computation> for ComputedTable {
    fn from_iter<I: IntoIterator<Item = Computation>>(iter: I) -> Self {
        Self {
            computed: iter.into_iter().collect(),
        }
    }
}

impl ComputedProvider for ComputedTable {
    fn computed(&self) -> &[Computation] {
        &self.computed
    }

    fn replace_computed(&mut self, computed: Vec<Computation>) {
        self.computed = computed;
    }
}
