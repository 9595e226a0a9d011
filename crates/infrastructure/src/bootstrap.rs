//! Resolver assembly from [`ResolverSettings`].

use sigil_application::ports::{ConstantsProvider, FileSystem};
use sigil_application::{RegistrationError, Resolver};
use tracing::{info, warn};

use crate::persistence::{ConstantsLoader, LoaderError};
use crate::settings::ResolverSettings;

/// Errors that can occur while assembling a resolver.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// A configured source could not be loaded.
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Registration of the loaded providers failed.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Builds a resolver with the configured grammar and registers one constants
/// provider per configured source, in order: constants files first, then
/// file-constant directories.
///
/// Missing file-constant directories are skipped with a warning unless
/// `fail_on_missing_dir` is set.
///
/// # Errors
///
/// Returns an error if a configured source cannot be loaded.
pub fn build_resolver<F: FileSystem>(
    settings: &ResolverSettings,
    fs: F,
) -> Result<Resolver, BootstrapError> {
    let loader = ConstantsLoader::new(fs);
    let mut providers: Vec<Box<dyn ConstantsProvider>> = Vec::new();

    for path in &settings.constants_files {
        providers.push(Box::new(loader.constants_provider(path)?));
    }

    for dir in &settings.file_constants_dirs {
        if !settings.fail_on_missing_dir && !loader.file_system().is_dir(dir) {
            warn!(dir = %dir.display(), "file constants path is not a directory, skipping");
            continue;
        }
        providers.push(Box::new(loader.file_constants_provider(dir)?));
    }

    let mut resolver = Resolver::with_grammar(settings.grammar);
    if !providers.is_empty() {
        let sources = providers.len();
        resolver.register_constants_batch(providers)?;
        info!(
            sources,
            constants = resolver.constant_names().len(),
            file_constants = resolver.file_constant_names().len(),
            "registered configured constants"
        );
    }

    Ok(resolver)
}
