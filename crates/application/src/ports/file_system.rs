//! File system port
//!
//! Used by the constants loader to read constant documents and file-constant
//! directories without tying the loader to a concrete file system.

use std::path::{Path, PathBuf};

/// Errors that can occur during file system operations.
#[derive(Debug, thiserror::Error)]
pub enum FileSystemError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The path does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Access to the path was denied.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// The file is not valid UTF-8.
    #[error("invalid UTF-8 in {}", .0.display())]
    InvalidUtf8(PathBuf),
}

/// Read-only file system access.
pub trait FileSystem: Send + Sync {
    /// Reads a whole file as bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError>;

    /// Reads a whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8.
    fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|_| FileSystemError::InvalidUtf8(path.to_path_buf()))
    }

    /// Returns true if the path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns true if the path is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Lists the entries of a directory, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError>;
}
