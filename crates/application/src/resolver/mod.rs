//! Sigil resolution
//!
//! Resolves keys such as `"$username"`, `"#now"`, `"!apiUrl"` or `"!!logo"`
//! against the store their sigil selects.
//!
//! # Usage
//!
//! ```
//! use sigil_application::Resolver;
//! use sigil_domain::Value;
//!
//! let mut resolver = Resolver::new();
//! resolver.set_value("env", "prod");
//!
//! assert_eq!(resolver.resolve("$env").unwrap(), Value::from("prod"));
//! assert_eq!(resolver.resolve("plainLiteral").unwrap(), Value::from("plainLiteral"));
//! ```

pub mod engine;
pub mod registration;
pub mod runtime;

pub use engine::Resolver;
pub use registration::{ComputedRegistration, ConstantsRegistration};
pub use runtime::RuntimeTable;
