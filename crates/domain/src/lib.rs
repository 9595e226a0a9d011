//! Sigil Domain - Core resolver types
//!
//! This crate defines the domain model for the Sigil resolver: resolved
//! values, the sigil key grammar, computation descriptors, constant maps and
//! the pure merge rules applied when providers are registered.
//! All types here are pure Rust with no I/O dependencies.

pub mod computation;
pub mod constants;
pub mod error;
pub mod key;
pub mod merge;
pub mod value;

pub use computation::{Computation, ComputeFn};
pub use constants::{ConstantMap, FileConstantMap};
pub use error::{DomainError, DomainResult, ProviderError, ProviderKind, ProviderResult};
pub use key::{KeyGrammar, SigilKey, SigilKind};
pub use merge::{merge_computations, merge_constant_maps};
pub use value::Value;
