//! File-backed loading of constants.

mod constants_loader;
mod file_system;

pub use constants_loader::{ConstantsLoader, LoaderError};
pub use file_system::StdFileSystem;
