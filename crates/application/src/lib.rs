//! Sigil Application - Resolver engine
//!
//! This crate owns the resolver: the runtime table, provider registration and
//! the dispatch of sigil keys to their backing store. Providers and file
//! access are reached through the ports defined in [`ports`].

pub mod error;
pub mod ports;
pub mod resolver;

pub use error::{RegistrationError, ResolveError, ResolveResult};
pub use resolver::Resolver;
