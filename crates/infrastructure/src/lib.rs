//! Sigil Infrastructure - Adapters and implementations
//!
//! This crate provides concrete providers, the file system adapter, the
//! constants loader and layered settings for assembling a
//! [`Resolver`](sigil_application::Resolver).

pub mod adapters;
pub mod bootstrap;
pub mod persistence;
pub mod serialization;
pub mod settings;
pub mod telemetry;

pub use adapters::{ComputedTable, ConstantsTable};
pub use bootstrap::{BootstrapError, build_resolver};
pub use persistence::{ConstantsLoader, LoaderError, StdFileSystem};
pub use serialization::{DocumentFormat, SerializationError, parse_document};
pub use settings::{ResolverSettings, SettingsError};
pub use telemetry::{init_tracing, try_init_for_tests};
