//! Constant maps held by constants providers.

use indexmap::IndexMap;

use crate::value::Value;

/// Static constants, looked up with the `!` sigil.
pub type ConstantMap = IndexMap<String, Value>;

/// File-backed constants, looked up with the `!!` sigil.
pub type FileConstantMap = IndexMap<String, Value>;

/// Builds a constant map from the members of a JSON object.
///
/// Returns `None` if the document is not an object.
#[must_use]
pub fn constants_from_json(document: serde_json::Value) -> Option<ConstantMap> {
    match document {
        serde_json::Value::Object(members) => Some(
            members
                .into_iter()
                .map(|(name, value)| (name, Value::Json(value)))
                .collect(),
        ),
        _ => None,
    }
}
