//! Provider registration slots
//!
//! Each slot holds at most one provider. Registering into an occupied slot
//! keeps the existing provider and folds the newcomer's contents into it
//! using the merge rules from [`sigil_domain::merge`].

use std::iter;

use sigil_domain::{
    ConstantMap, FileConstantMap, ProviderKind, merge_computations, merge_constant_maps,
};
use tracing::debug;

use crate::error::RegistrationError;
use crate::ports::{ComputedProvider, ConstantsProvider};

/// The computed-provider slot.
#[derive(Default)]
pub struct ComputedRegistration {
    provider: Option<Box<dyn ComputedProvider>>,
}

impl ComputedRegistration {
    /// Returns the registered provider, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&dyn ComputedProvider> {
        self.provider.as_deref()
    }

    /// Returns true if a provider is registered.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.provider.is_some()
    }

    /// Registers a provider, or appends its computations to the registered one.
    pub fn register(&mut self, provider: Box<dyn ComputedProvider>) {
        if let Some(existing) = self.provider.as_mut() {
            let added = provider.computed().len();
            let merged = merge_computations(existing.computed().to_vec(), [provider.computed()]);
            existing.replace_computed(merged);
            debug!(added, total = existing.computed().len(), "merged computed provider");
        } else {
            debug!(computations = provider.computed().len(), "registered computed provider");
            self.provider = Some(provider);
        }
    }

    /// Registers several providers at once.
    ///
    /// With an empty slot the last provider becomes the registration; in
    /// either case the resulting computations follow input order, exactly as
    /// if each provider had been registered in turn.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::EmptyBatch`] if `providers` is empty and
    /// no provider is registered yet.
    pub fn register_batch(
        &mut self,
        mut providers: Vec<Box<dyn ComputedProvider>>,
    ) -> Result<(), RegistrationError> {
        if let Some(existing) = self.provider.as_mut() {
            let merged = merge_computations(
                existing.computed().to_vec(),
                providers.iter().map(|p| p.computed()),
            );
            existing.replace_computed(merged);
            debug!(
                providers = providers.len(),
                total = existing.computed().len(),
                "merged computed provider batch"
            );
            return Ok(());
        }

        let mut base = providers
            .pop()
            .ok_or(RegistrationError::EmptyBatch(ProviderKind::Computed))?;
        let merged = merge_computations(
            Vec::new(),
            providers
                .iter()
                .map(|p| p.computed())
                .chain(iter::once(base.computed())),
        );
        base.replace_computed(merged);
        debug!(
            providers = providers.len() + 1,
            total = base.computed().len(),
            "registered computed provider batch"
        );
        self.provider = Some(base);
        Ok(())
    }
}

/// The constants-provider slot.
#[derive(Default)]
pub struct ConstantsRegistration {
    provider: Option<Box<dyn ConstantsProvider>>,
}

impl ConstantsRegistration {
    /// Returns the registered provider, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&dyn ConstantsProvider> {
        self.provider.as_deref()
    }

    /// Returns true if a provider is registered.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.provider.is_some()
    }

    /// Registers a provider, or merges both of its maps into the registered
    /// one with the newcomer winning on collisions.
    pub fn register(&mut self, provider: Box<dyn ConstantsProvider>) {
        if let Some(existing) = self.provider.as_mut() {
            let (constants, file_constants) = fold_constants(
                existing.constants().clone(),
                existing.file_constants().clone(),
                &[&*provider],
            );
            replace_maps(&mut **existing, constants, file_constants);
        } else {
            debug!(
                constants = provider.constants().len(),
                file_constants = provider.file_constants().len(),
                "registered constants provider"
            );
            self.provider = Some(provider);
        }
    }

    /// Registers several providers at once.
    ///
    /// With an empty slot the last provider becomes the registration. Maps
    /// are merged in input order, so later providers win on collisions just
    /// as with individual registration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::EmptyBatch`] if `providers` is empty and
    /// no provider is registered yet.
    pub fn register_batch(
        &mut self,
        mut providers: Vec<Box<dyn ConstantsProvider>>,
    ) -> Result<(), RegistrationError> {
        if let Some(existing) = self.provider.as_mut() {
            let sources: Vec<&dyn ConstantsProvider> = providers.iter().map(|p| &**p).collect();
            let (constants, file_constants) = fold_constants(
                existing.constants().clone(),
                existing.file_constants().clone(),
                &sources,
            );
            replace_maps(&mut **existing, constants, file_constants);
            return Ok(());
        }

        let mut base = providers
            .pop()
            .ok_or(RegistrationError::EmptyBatch(ProviderKind::Constants))?;
        let (constants, file_constants) = {
            let sources: Vec<&dyn ConstantsProvider> = providers
                .iter()
                .map(|p| &**p)
                .chain(iter::once(&*base))
                .collect();
            fold_constants(ConstantMap::new(), FileConstantMap::new(), &sources)
        };
        replace_maps(&mut *base, constants, file_constants);
        self.provider = Some(base);
        Ok(())
    }
}

fn fold_constants(
    constants: ConstantMap,
    file_constants: FileConstantMap,
    sources: &[&dyn ConstantsProvider],
) -> (ConstantMap, FileConstantMap) {
    (
        merge_constant_maps(constants, sources.iter().map(|s| s.constants())),
        merge_constant_maps(file_constants, sources.iter().map(|s| s.file_constants())),
    )
}

fn replace_maps(
    target: &mut dyn ConstantsProvider,
    constants: ConstantMap,
    file_constants: FileConstantMap,
) {
    debug!(
        constants = constants.len(),
        file_constants = file_constants.len(),
        "merged constants provider"
    );
    target.replace_constants(constants);
    target.replace_file_constants(file_constants);
}
