//! Resolver settings
//!
//! Layered with the `config` crate, later sources overriding earlier ones:
//! 1. defaults
//! 2. a `sigil.{toml,yaml,json}` file in the working directory (optional), or
//!    an explicit file passed to [`ResolverSettings::load_from`]
//! 3. `SIGIL__*` environment variables, e.g. `SIGIL__GRAMMAR=strict` or
//!    `SIGIL__CONSTANTS_FILES=base.yaml,local.yaml`

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use sigil_domain::KeyGrammar;

/// Prefix of the environment variables read by [`ResolverSettings::load`].
pub const ENV_PREFIX: &str = "SIGIL";

/// Base name of the optional settings file.
pub const DEFAULT_CONFIG_NAME: &str = "sigil";

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// How a resolver is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Grammar used to classify keys.
    pub grammar: KeyGrammar,

    /// Constants documents, merged in order.
    pub constants_files: Vec<PathBuf>,

    /// Directories whose files become file constants, merged in order.
    pub file_constants_dirs: Vec<PathBuf>,

    /// Whether a missing file-constant directory is an error rather than
    /// being skipped with a warning.
    pub fail_on_missing_dir: bool,
}

impl ResolverSettings {
    /// Loads settings from the optional default file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed.
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_sources(None, env_source())
    }

    /// Loads settings from the given file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or a source is malformed.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        Self::from_sources(Some(path), env_source())
    }

    fn from_sources(path: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let config = builder.add_source(env).build()?;
        Ok(config.try_deserialize()?)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("constants_files")
        .with_list_parse_key("file_constants_dirs")
}
