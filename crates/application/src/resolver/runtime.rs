//! Runtime table
//!
//! The mutable key/value store read through the `$` sigil.

use std::collections::HashMap;

use sigil_domain::Value;

/// Values written at runtime with [`Resolver::set_value`](crate::Resolver::set_value).
///
/// The backing map is only allocated on the first write. Entries are
/// overwritten in place and never removed.
#[derive(Debug, Clone, Default)]
pub struct RuntimeTable {
    entries: Option<HashMap<String, Value>>,
}

impl RuntimeTable {
    /// Creates an uninitialized table.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: None }
    }

    /// Stores a value, returning the one it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into())
    }

    /// Looks up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.as_ref()?.get(key)
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, HashMap::len)
    }

    /// Returns true if no value is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
