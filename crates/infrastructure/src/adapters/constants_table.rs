//! In-memory constants provider.

use sigil_application::ports::ConstantsProvider;
use sigil_domain::constants::constants_from_json;
use sigil_domain::{ConstantMap, FileConstantMap, Value};

/// A constants provider backed by two in-memory maps.
///
/// ```
/// use sigil_application::Resolver;
/// use sigil_infrastructure::ConstantsTable;
///
/// let mut resolver = Resolver::new();
/// resolver.register_constants(
///     ConstantsTable::new()
///         .with_constant("apiUrl", "https://api.example.com")
///         .with_file_constant("logo", b"\x89PNG".to_vec()),
/// );
/// assert_eq!(resolver.resolve("!apiUrl").unwrap(), "https://api.example.com");
/// assert!(resolver.resolve("!!logo").unwrap().is_bytes());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantsTable {
    constants: ConstantMap,
    file_constants: FileConstantMap,
}

impl ConstantsTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from prepared maps.
    #[must_use]
    pub const fn from_maps(constants: ConstantMap, file_constants: FileConstantMap) -> Self {
        Self {
            constants,
            file_constants,
        }
    }

    /// Creates a table whose constants are the members of a JSON object.
    ///
    /// Returns `None` if the document is not an object.
    #[must_use]
    pub fn from_json(document: serde_json::Value) -> Option<Self> {
        constants_from_json(document)
            .map(|constants| Self::from_maps(constants, FileConstantMap::new()))
    }

    /// Adds a constant.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_constant(name, value);
        self
    }

    /// Adds a file constant.
    #[must_use]
    pub fn with_file_constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_file_constant(name, value);
        self
    }

    /// Inserts a constant, returning the value it replaced.
    pub fn insert_constant(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.constants.insert(name.into(), value.into())
    }

    /// Inserts a file constant, returning the value it replaced.
    pub fn insert_file_constant(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.file_constants.insert(name.into(), value.into())
    }

    /// Returns true if neither map holds an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty() && self.file_constants.is_empty()
    }
}

impl ConstantsProvider for ConstantsTable {
    fn constants(&self) -> &ConstantMap {
        &self.constants
    }

    fn file_constants(&self) -> &FileConstantMap {
        &self.file_constants
    }

    fn replace_constants(&mut self, constants: ConstantMap) {
        self.constants = constants;
    }

    fn replace_file_constants(&mut self, file_constants: FileConstantMap) {
        self.file_constants = file_constants;
    }
}
