//! Real file system implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sigil_application::ports::{FileSystem, FileSystemError};

/// Real file system implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Creates a new `StdFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn map_io_error(path: &Path, e: io::Error) -> FileSystemError {
    match e.kind() {
        io::ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FileSystemError::PermissionDenied(path.to_path_buf()),
        _ => FileSystemError::Io(e),
    }
}

impl FileSystem for StdFileSystem {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path).map_err(|e| map_io_error(path, e))
    }

    fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidData {
                FileSystemError::InvalidUtf8(path.to_path_buf())
            } else {
                map_io_error(path, e)
            }
        })
    }

    fn is_dir(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|m| m.is_dir())
    }

    fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|m| m.is_file())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| map_io_error(path, e))? {
            entries.push(entry?.path());
        }

        entries.sort(); // Deterministic ordering
        Ok(entries)
    }
}
