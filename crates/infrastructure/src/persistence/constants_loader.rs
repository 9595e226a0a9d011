//! Constants loader
//!
//! Reads constant documents (`.json`, `.yaml`, `.yml`) and file-constant
//! directories into [`ConstantsTable`] providers.
//!
//! A constants document must have an object at the top level:
//! ```yaml
//! apiUrl: https://api.example.com
//! retries: 3
//! ```
//!
//! Every regular file of a file-constant directory becomes a file constant
//! named after its file stem, so `assets/logo.png` is resolved with `!!logo`.

use std::path::{Path, PathBuf};

use sigil_application::ports::{FileSystem, FileSystemError};
use sigil_domain::{ConstantMap, FileConstantMap, Value};
use tracing::debug;

use crate::adapters::ConstantsTable;
use crate::serialization::{DocumentFormat, SerializationError, parse_document};

/// Errors that can occur while loading constants.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// File system access failed.
    #[error("file system error: {0}")]
    FileSystem(#[from] FileSystemError),

    /// The file extension is not a supported document format.
    #[error("unsupported constants file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The document could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// The parser error.
        source: SerializationError,
    },

    /// The document's top level is not an object.
    #[error("constants file {} must contain an object at the top level", .0.display())]
    NotAnObject(PathBuf),

    /// The path is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A file name is not valid UTF-8 and cannot become a constant name.
    #[error("file name is not valid UTF-8: {}", .0.display())]
    InvalidFileName(PathBuf),
}

/// Loads constants providers through a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct ConstantsLoader<F> {
    fs: F,
}

impl<F: FileSystem> ConstantsLoader<F> {
    /// Creates a loader.
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Returns the underlying file system.
    pub const fn file_system(&self) -> &F {
        &self.fs
    }

    /// Reads a constants document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, does not parse, or is not an object.
    pub fn load_constants_file(&self, path: &Path) -> Result<ConstantMap, LoaderError> {
        let format = DocumentFormat::from_path(path)
            .ok_or_else(|| LoaderError::UnsupportedFormat(path.to_path_buf()))?;
        let text = self.fs.read_file_string(path)?;
        let document = parse_document(format, &text).map_err(|source| LoaderError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let constants = sigil_domain::constants::constants_from_json(document)
            .ok_or_else(|| LoaderError::NotAnObject(path.to_path_buf()))?;
        debug!(path = %path.display(), count = constants.len(), "loaded constants file");
        Ok(constants)
    }

    /// Reads every regular file of a directory as a file constant.
    ///
    /// Subdirectories are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or a file cannot be read.
    pub fn load_file_constants_dir(&self, dir: &Path) -> Result<FileConstantMap, LoaderError> {
        if !self.fs.is_dir(dir) {
            return Err(LoaderError::NotADirectory(dir.to_path_buf()));
        }

        let mut file_constants = FileConstantMap::new();
        for path in self.fs.read_dir(dir)? {
            if !self.fs.is_file(&path) {
                continue;
            }

            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| LoaderError::InvalidFileName(path.clone()))?
                .to_string();
            let bytes = self.fs.read_file(&path)?;
            file_constants.insert(name, Value::Bytes(bytes));
        }

        debug!(dir = %dir.display(), count = file_constants.len(), "loaded file constants");
        Ok(file_constants)
    }

    /// Loads a constants document as a provider.
    ///
    /// # Errors
    ///
    /// See [`load_constants_file`](Self::load_constants_file).
    pub fn constants_provider(&self, path: &Path) -> Result<ConstantsTable, LoaderError> {
        let constants = self.load_constants_file(path)?;
        Ok(ConstantsTable::from_maps(constants, FileConstantMap::new()))
    }

    /// Loads a file-constant directory as a provider.
    ///
    /// # Errors
    ///
    /// See [`load_file_constants_dir`](Self::load_file_constants_dir).
    pub fn file_constants_provider(&self, dir: &Path) -> Result<ConstantsTable, LoaderError> {
        let file_constants = self.load_file_constants_dir(dir)?;
        Ok(ConstantsTable::from_maps(ConstantMap::new(), file_constants))
    }
}
