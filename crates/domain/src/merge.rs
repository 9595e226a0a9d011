//! Merge rules for provider registration
//!
//! When a second provider is registered, its contents are folded into the one
//! already registered:
//! - computations are concatenated, existing entries first
//! - constants use an overwrite union, later maps winning on collisions

use indexmap::IndexMap;

use crate::computation::Computation;
use crate::value::Value;

/// Appends every addition, in order, to the base sequence.
#[must_use]
pub fn merge_computations<'a, I>(base: Vec<Computation>, additions: I) -> Vec<Computation>
where
    I: IntoIterator<Item = &'a [Computation]>,
{
    let mut merged = base;
    for addition in additions {
        merged.extend_from_slice(addition);
    }
    merged
}

/// Overwrites the base map with every addition, in order.
///
/// A key already present keeps its position but takes the later value.
#[must_use]
pub fn merge_constant_maps<'a, I>(
    base: IndexMap<String, Value>,
    additions: I,
) -> IndexMap<String, Value>
where
    I: IntoIterator<Item = &'a IndexMap<String, Value>>,
{
    let mut merged = base;
    for addition in additions {
        for (name, value) in addition {
            merged.insert(name.clone(), value.clone());
        }
    }
    merged
}
