//! Provider adapters
//!
//! In-memory implementations of the provider ports.

mod computed_table;
mod constants_table;

pub use computed_table::ComputedTable;
pub use constants_table::ConstantsTable;
