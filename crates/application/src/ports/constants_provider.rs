//! Constants provider port

use sigil_domain::{ConstantMap, FileConstantMap, ProviderError, ProviderResult, Value};

/// A provider of static constants (`!` sigil) and file-backed constants
/// (`!!` sigil).
pub trait ConstantsProvider: Send + Sync {
    /// Returns the static constants.
    fn constants(&self) -> &ConstantMap;

    /// Returns the file-backed constants.
    fn file_constants(&self) -> &FileConstantMap;

    /// Replaces the static constants with a merged map.
    fn replace_constants(&mut self, constants: ConstantMap);

    /// Replaces the file-backed constants with a merged map.
    fn replace_file_constants(&mut self, file_constants: FileConstantMap);

    /// Looks up a static constant.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownConstant`] if the name is not defined.
    fn get_constant(&self, name: &str) -> ProviderResult<Value> {
        self.constants()
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownConstant(name.to_string()))
    }

    /// Looks up a file-backed constant.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownFileConstant`] if the name is not defined.
    fn get_file_constant(&self, name: &str) -> ProviderResult<Value> {
        self.file_constants()
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownFileConstant(name.to_string()))
    }
}
