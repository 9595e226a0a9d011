//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the resolver and its collaborators.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod computed_provider;
mod constants_provider;
mod file_system;

pub use computed_provider::ComputedProvider;
pub use constants_provider::ConstantsProvider;
pub use file_system::{FileSystem, FileSystemError};
