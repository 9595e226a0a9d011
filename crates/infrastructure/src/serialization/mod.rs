//! Parsing of constant documents.
//!
//! Constants files may be JSON or YAML; both are read into a
//! `serde_json::Value` so the rest of the crate handles a single shape.

mod document;

pub use document::*;
