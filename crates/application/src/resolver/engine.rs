//! Resolver engine
//!
//! Classifies a key with the configured grammar, then dispatches on its kind.
//! Nothing is cached; every call goes back to the backing store.

use std::fmt;

use sigil_domain::{KeyGrammar, ProviderKind, SigilKind, Value};
use tracing::trace;

use super::registration::{ComputedRegistration, ConstantsRegistration};
use super::runtime::RuntimeTable;
use crate::error::{RegistrationError, ResolveError, ResolveResult};
use crate::ports::{ComputedProvider, ConstantsProvider};

/// Resolves sigil keys against the runtime table and registered providers.
///
/// | key | store |
/// |---|---|
/// | `$name` | runtime table |
/// | `#name` | computed provider |
/// | `!name` | constants provider |
/// | `!!name` | file constants of the constants provider |
/// | anything else | the key itself |
///
/// Registration and [`set_value`](Self::set_value) take `&mut self`; once
/// set up, a resolver can be shared for concurrent reads.
#[derive(Default)]
pub struct Resolver {
    grammar: KeyGrammar,
    runtime: RuntimeTable,
    computed: ComputedRegistration,
    constants: ConstantsRegistration,
}

impl Resolver {
    /// Creates a resolver with the lenient grammar and no providers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver using the given grammar.
    #[must_use]
    pub fn with_grammar(grammar: KeyGrammar) -> Self {
        Self {
            grammar,
            ..Self::default()
        }
    }

    /// Returns the grammar used to classify keys.
    #[must_use]
    pub const fn grammar(&self) -> KeyGrammar {
        self.grammar
    }

    /// Writes a value into the runtime table, replacing any previous one.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        trace!(key = %key, "setting runtime value");
        self.runtime.set(key, value);
    }

    /// Reads the runtime table directly, without sigil handling.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.runtime.get(key)
    }

    /// Registers a computed provider.
    ///
    /// If one is already registered, the new provider's computations are
    /// appended to it and the new provider is dropped.
    pub fn register_computed(&mut self, provider: impl ComputedProvider + 'static) {
        self.computed.register(Box::new(provider));
    }

    /// Registers several computed providers.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::EmptyBatch`] if `providers` is empty and
    /// no computed provider is registered yet.
    pub fn register_computed_batch(
        &mut self,
        providers: Vec<Box<dyn ComputedProvider>>,
    ) -> Result<(), RegistrationError> {
        self.computed.register_batch(providers)
    }

    /// Registers a constants provider.
    ///
    /// If one is already registered, the new provider's constants and file
    /// constants overwrite matching entries of the registered one.
    pub fn register_constants(&mut self, provider: impl ConstantsProvider + 'static) {
        self.constants.register(Box::new(provider));
    }

    /// Registers several constants providers.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::EmptyBatch`] if `providers` is empty and
    /// no constants provider is registered yet.
    pub fn register_constants_batch(
        &mut self,
        providers: Vec<Box<dyn ConstantsProvider>>,
    ) -> Result<(), RegistrationError> {
        self.constants.register_batch(providers)
    }

    /// Returns true if a computed provider is registered.
    #[must_use]
    pub const fn has_computed_provider(&self) -> bool {
        self.computed.is_registered()
    }

    /// Returns true if a constants provider is registered.
    #[must_use]
    pub const fn has_constants_provider(&self) -> bool {
        self.constants.is_registered()
    }

    /// Returns the registered computation names in lookup order.
    #[must_use]
    pub fn computed_names(&self) -> Vec<&str> {
        self.computed
            .provider()
            .map(|p| p.computed_names())
            .unwrap_or_default()
    }

    /// Returns the registered constant names.
    #[must_use]
    pub fn constant_names(&self) -> Vec<&str> {
        self.constants
            .provider()
            .map(|p| p.constants().keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns the registered file constant names.
    #[must_use]
    pub fn file_constant_names(&self) -> Vec<&str> {
        self.constants
            .provider()
            .map(|p| p.file_constants().keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Resolves a key.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::MalformedKey`] if the grammar rejects the key
    /// - [`ResolveError::NotFound`] for a `$` key missing from the runtime table
    /// - [`ResolveError::ProviderMissing`] for `#`, `!` or `!!` before the
    ///   matching provider is registered
    /// - [`ResolveError::Provider`] carrying the provider's own failure
    pub fn resolve(&self, key: &str) -> ResolveResult<Value> {
        let parsed = self.grammar.parse(key)?;
        trace!(kind = %parsed.kind, name = parsed.name, "resolving key");

        match parsed.kind {
            SigilKind::Runtime => self
                .runtime
                .get(parsed.name)
                .cloned()
                .ok_or_else(|| ResolveError::NotFound(parsed.name.to_string())),
            SigilKind::Computed => Ok(self.computed_provider()?.get_computed(parsed.name)?),
            SigilKind::Constant => Ok(self.constants_provider()?.get_constant(parsed.name)?),
            SigilKind::FileConstant => {
                Ok(self.constants_provider()?.get_file_constant(parsed.name)?)
            }
            SigilKind::Literal => Ok(Value::string(parsed.name)),
        }
    }

    fn computed_provider(&self) -> ResolveResult<&dyn ComputedProvider> {
        self.computed
            .provider()
            .ok_or(ResolveError::ProviderMissing(ProviderKind::Computed))
    }

    fn constants_provider(&self) -> ResolveResult<&dyn ConstantsProvider> {
        self.constants
            .provider()
            .ok_or(ResolveError::ProviderMissing(ProviderKind::Constants))
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("grammar", &self.grammar)
            .field("runtime", &self.runtime)
            .field("computed", &self.computed_names())
            .field("constants", &self.constant_names())
            .field("file_constants", &self.file_constant_names())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sigil_domain::{Computation, ConstantMap, FileConstantMap, ProviderError, ProviderResult};

    #[derive(Default)]
    struct Computed {
        computed: Vec<Computation>,
    }

    impl Computed {
        fn with(mut self, name: &str, value: &str) -> Self {
            self.computed.push(Computation::constant(name, value));
            self
        }
    }

    impl ComputedProvider for Computed {
        fn computed(&self) -> &[Computation] {
            &self.computed
        }

        fn replace_computed(&mut self, computed: Vec<Computation>) {
            self.computed = computed;
        }
    }

    #[derive(Default)]
    struct Constants {
        constants: ConstantMap,
        file_constants: FileConstantMap,
    }

    impl Constants {
        fn constant(mut self, name: &str, value: &str) -> Self {
            self.constants.insert(name.to_string(), Value::from(value));
            self
        }

        fn file(mut self, name: &str, bytes: &[u8]) -> Self {
            self.file_constants
                .insert(name.to_string(), Value::from(bytes.to_vec()));
            self
        }
    }

    impl ConstantsProvider for Constants {
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

    /// Holds maps like any provider but answers every lookup with the
    /// requested name uppercased.
    #[derive(Default)]
    struct Shouting {
        computed: Vec<Computation>,
        constants: ConstantMap,
        file_constants: FileConstantMap,
    }

    impl Shouting {
        fn with(mut self, name: &str, value: &str) -> Self {
            self.computed.push(Computation::constant(name, value));
            self.constants.insert(name.to_string(), Value::from(value));
            self.file_constants
                .insert(name.to_string(), Value::from(value.as_bytes().to_vec()));
            self
        }
    }

    impl ComputedProvider for Shouting {
        fn computed(&self) -> &[Computation] {
            &self.computed
        }

        fn replace_computed(&mut self, computed: Vec<Computation>) {
            self.computed = computed;
        }

        fn get_computed(&self, name: &str) -> ProviderResult<Value> {
            Ok(Value::from(name.to_uppercase()))
        }
    }

    impl ConstantsProvider for Shouting {
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

        fn get_constant(&self, name: &str) -> ProviderResult<Value> {
            Ok(Value::from(name.to_uppercase()))
        }

        fn get_file_constant(&self, name: &str) -> ProviderResult<Value> {
            Ok(Value::from(name.to_uppercase()))
        }
    }

    #[test]
    fn test_literal_passthrough() {
        let resolver = Resolver::new();
        assert_eq!(resolver.resolve("plainLiteral").unwrap(), "plainLiteral");
        assert_eq!(resolver.resolve("").unwrap(), "");
        assert_eq!(resolver.resolve("a$b#c!d").unwrap(), "a$b#c!d");
    }

    #[test]
    fn test_runtime_value() {
        let mut resolver = Resolver::new();
        resolver.set_value("env", "prod");
        assert_eq!(resolver.resolve("$env").unwrap(), "prod");
    }

    #[test]
    fn test_runtime_value_structured() {
        let mut resolver = Resolver::new();
        resolver.set_value("user", serde_json::json!({"name": "ada", "age": 36}));
        assert_eq!(
            resolver.resolve("$user").unwrap(),
            Value::from(serde_json::json!({"name": "ada", "age": 36}))
        );
    }

    #[test]
    fn test_runtime_value_overwritten() {
        let mut resolver = Resolver::new();
        resolver.set_value("env", "dev");
        resolver.set_value("env", "prod");
        assert_eq!(resolver.resolve("$env").unwrap(), "prod");
    }

    #[test]
    fn test_runtime_missing_before_first_write() {
        let resolver = Resolver::new();
        assert_eq!(
            resolver.resolve("$missingKey"),
            Err(ResolveError::NotFound("missingKey".to_string()))
        );
    }

    #[test]
    fn test_runtime_missing_after_writes() {
        let mut resolver = Resolver::new();
        resolver.set_value("other", 1_i64);
        assert_eq!(
            resolver.resolve("$missingKey"),
            Err(ResolveError::NotFound("missingKey".to_string()))
        );
    }

    #[test]
    fn test_bare_runtime_sigil_looks_up_empty_name() {
        let mut resolver = Resolver::new();
        assert_eq!(
            resolver.resolve("$"),
            Err(ResolveError::NotFound(String::new()))
        );
        resolver.set_value("", "blank");
        assert_eq!(resolver.resolve("$").unwrap(), "blank");
    }

    #[test]
    fn test_computed_provider_missing() {
        let resolver = Resolver::new();
        assert_eq!(
            resolver.resolve("#anything"),
            Err(ResolveError::ProviderMissing(ProviderKind::Computed))
        );
    }

    #[test]
    fn test_constants_provider_missing() {
        let resolver = Resolver::new();
        for key in ["!x", "!!x"] {
            assert_eq!(
                resolver.resolve(key),
                Err(ResolveError::ProviderMissing(ProviderKind::Constants))
            );
        }
    }

    #[test]
    fn test_computed_value() {
        let mut resolver = Resolver::new();
        resolver.register_computed(Computed::default().with("x", "y"));
        assert_eq!(resolver.resolve("#x").unwrap(), "y");
    }

    #[test]
    fn test_computed_unknown_name_propagates_provider_error() {
        let mut resolver = Resolver::new();
        resolver.register_computed(Computed::default().with("x", "y"));
        assert_eq!(
            resolver.resolve("#nope"),
            Err(ResolveError::Provider(ProviderError::UnknownComputed(
                "nope".to_string()
            )))
        );
    }

    #[test]
    fn test_computation_failure_propagates() {
        let mut resolver = Resolver::new();
        resolver.register_computed(Computed {
            computed: vec![Computation::new("broken", || {
                Err(ProviderError::computation_failed("broken", "boom"))
            })],
        });
        assert_eq!(
            resolver.resolve("#broken"),
            Err(ResolveError::Provider(ProviderError::computation_failed(
                "broken", "boom"
            )))
        );
    }

    #[test]
    fn test_constant_and_file_constant_not_confused() {
        let mut resolver = Resolver::new();
        resolver.register_constants(
            Constants::default()
                .constant("x", "constant")
                .file("x", b"file"),
        );

        assert_eq!(resolver.resolve("!x").unwrap(), "constant");
        assert_eq!(
            resolver.resolve("!!x").unwrap(),
            Value::from(b"file".to_vec())
        );
    }

    #[test]
    fn test_unknown_constant_propagates_provider_error() {
        let mut resolver = Resolver::new();
        resolver.register_constants(Constants::default().constant("x", "1"));
        assert_eq!(
            resolver.resolve("!y"),
            Err(ResolveError::Provider(ProviderError::UnknownConstant(
                "y".to_string()
            )))
        );
        assert_eq!(
            resolver.resolve("!!x"),
            Err(ResolveError::Provider(ProviderError::UnknownFileConstant(
                "x".to_string()
            )))
        );
    }

    #[test]
    fn test_register_computed_merges_into_first() {
        let mut resolver = Resolver::new();
        resolver.register_computed(Computed::default().with("a", "1"));
        resolver.register_computed(Computed::default().with("b", "2").with("a", "shadowed"));

        assert_eq!(resolver.computed_names(), vec!["a", "b", "a"]);
        assert_eq!(resolver.resolve("#a").unwrap(), "1");
        assert_eq!(resolver.resolve("#b").unwrap(), "2");
    }

    #[test]
    fn test_register_computed_batch_empty_slot() {
        let mut resolver = Resolver::new();
        resolver
            .register_computed_batch(vec![
                Box::new(Computed::default().with("a", "1")),
                Box::new(Computed::default().with("b", "2")),
            ])
            .unwrap();

        assert_eq!(resolver.computed_names(), vec!["a", "b"]);
        assert_eq!(resolver.resolve("#a").unwrap(), "1");
        assert_eq!(resolver.resolve("#b").unwrap(), "2");
    }

    #[test]
    fn test_register_computed_batch_occupied_slot() {
        let mut resolver = Resolver::new();
        resolver.register_computed(Computed::default().with("base", "0"));
        resolver
            .register_computed_batch(vec![
                Box::new(Computed::default().with("a", "1")),
                Box::new(Computed::default().with("b", "2")),
            ])
            .unwrap();

        assert_eq!(resolver.computed_names(), vec!["base", "a", "b"]);
    }

    #[test]
    fn test_register_computed_batch_matches_sequential() {
        let mut batch = Resolver::new();
        batch
            .register_computed_batch(vec![
                Box::new(Computed::default().with("x", "p1").with("only1", "1")),
                Box::new(Computed::default().with("x", "p2").with("only2", "2")),
            ])
            .unwrap();

        let mut sequential = Resolver::new();
        sequential.register_computed(Computed::default().with("x", "p1").with("only1", "1"));
        sequential.register_computed(Computed::default().with("x", "p2").with("only2", "2"));

        assert_eq!(batch.computed_names(), sequential.computed_names());
        for key in ["#x", "#only1", "#only2"] {
            assert_eq!(batch.resolve(key), sequential.resolve(key), "{key}");
        }
    }

    #[test]
    fn test_empty_batch_without_registration_fails() {
        let mut resolver = Resolver::new();
        assert_eq!(
            resolver.register_computed_batch(Vec::new()),
            Err(RegistrationError::EmptyBatch(ProviderKind::Computed))
        );
        assert_eq!(
            resolver.register_constants_batch(Vec::new()),
            Err(RegistrationError::EmptyBatch(ProviderKind::Constants))
        );
        assert!(!resolver.has_computed_provider());
        assert!(!resolver.has_constants_provider());
    }

    #[test]
    fn test_empty_batch_with_registration_is_noop() {
        let mut resolver = Resolver::new();
        resolver.register_computed(Computed::default().with("a", "1"));
        resolver.register_constants(Constants::default().constant("c", "1"));

        resolver.register_computed_batch(Vec::new()).unwrap();
        resolver.register_constants_batch(Vec::new()).unwrap();

        assert_eq!(resolver.computed_names(), vec!["a"]);
        assert_eq!(resolver.constant_names(), vec!["c"]);
    }

    #[test]
    fn test_register_constants_later_wins() {
        let mut resolver = Resolver::new();
        resolver.register_constants(
            Constants::default()
                .constant("x", "p1")
                .constant("only1", "1")
                .file("f", b"p1"),
        );
        resolver.register_constants(
            Constants::default()
                .constant("x", "p2")
                .file("f", b"p2")
                .file("g", b"g"),
        );

        assert_eq!(resolver.resolve("!x").unwrap(), "p2");
        assert_eq!(resolver.resolve("!only1").unwrap(), "1");
        assert_eq!(resolver.resolve("!!f").unwrap(), Value::from(b"p2".to_vec()));
        assert_eq!(resolver.file_constant_names(), vec!["f", "g"]);
    }

    #[test]
    fn test_register_constants_batch_matches_sequential() {
        let p1 = || {
            Constants::default()
                .constant("x", "p1")
                .constant("a", "1")
                .file("f", b"1")
        };
        let p2 = || {
            Constants::default()
                .constant("x", "p2")
                .constant("b", "2")
                .file("f", b"2")
        };

        let mut batch = Resolver::new();
        batch
            .register_constants_batch(vec![Box::new(p1()), Box::new(p2())])
            .unwrap();

        let mut sequential = Resolver::new();
        sequential.register_constants(p1());
        sequential.register_constants(p2());

        for key in ["!x", "!a", "!b", "!!f"] {
            assert_eq!(batch.resolve(key), sequential.resolve(key), "{key}");
        }
        assert_eq!(batch.resolve("!x").unwrap(), "p2");
        assert_eq!(batch.resolve("!!f").unwrap(), Value::from(b"2".to_vec()));
    }

    #[test]
    fn test_register_constants_batch_occupied_slot() {
        let mut resolver = Resolver::new();
        resolver.register_constants(Constants::default().constant("x", "base"));
        resolver
            .register_constants_batch(vec![
                Box::new(Constants::default().constant("x", "p1")),
                Box::new(Constants::default().constant("x", "p2").constant("y", "p2")),
            ])
            .unwrap();

        assert_eq!(resolver.resolve("!x").unwrap(), "p2");
        assert_eq!(resolver.constant_names(), vec!["x", "y"]);
    }

    #[test]
    fn test_register_computed_keeps_first_provider() {
        let mut resolver = Resolver::new();
        resolver.register_computed(Shouting::default().with("now", "low"));
        resolver.register_computed(Computed::default().with("now", "plain"));
        assert_eq!(resolver.resolve("#now").unwrap(), "NOW");

        let mut resolver = Resolver::new();
        resolver.register_computed(Computed::default().with("now", "plain"));
        resolver.register_computed(Shouting::default().with("now", "low"));
        assert_eq!(resolver.resolve("#now").unwrap(), "plain");
        assert_eq!(
            resolver.resolve("#later"),
            Err(ResolveError::Provider(ProviderError::UnknownComputed(
                "later".to_string()
            )))
        );
    }

    #[test]
    fn test_register_computed_batch_keeps_last_provider_when_empty() {
        let mut resolver = Resolver::new();
        resolver
            .register_computed_batch(vec![
                Box::new(Computed::default().with("now", "plain")),
                Box::new(Shouting::default().with("now", "low")),
            ])
            .unwrap();
        assert_eq!(resolver.resolve("#now").unwrap(), "NOW");
    }

    #[test]
    fn test_register_computed_batch_keeps_existing_provider() {
        let mut resolver = Resolver::new();
        resolver.register_computed(Computed::default().with("base", "b"));
        resolver
            .register_computed_batch(vec![
                Box::new(Computed::default().with("now", "plain")),
                Box::new(Shouting::default().with("now", "low")),
            ])
            .unwrap();
        assert_eq!(resolver.resolve("#now").unwrap(), "plain");
        assert_eq!(resolver.computed_names(), vec!["base", "now", "now"]);
    }

    #[test]
    fn test_register_constants_keeps_first_provider() {
        let mut resolver = Resolver::new();
        resolver.register_constants(Shouting::default().with("x", "low"));
        resolver.register_constants(Constants::default().constant("x", "plain"));
        assert_eq!(resolver.resolve("!x").unwrap(), "X");
        assert_eq!(resolver.resolve("!!x").unwrap(), "X");

        let mut resolver = Resolver::new();
        resolver.register_constants(Constants::default().constant("x", "plain"));
        resolver.register_constants(Shouting::default().with("y", "low"));
        assert_eq!(resolver.resolve("!x").unwrap(), "plain");
        assert_eq!(resolver.resolve("!y").unwrap(), "low");
        assert_eq!(resolver.resolve("!!y").unwrap(), Value::from(b"low".to_vec()));
    }

    #[test]
    fn test_register_constants_batch_keeps_last_provider_when_empty() {
        let mut resolver = Resolver::new();
        resolver
            .register_constants_batch(vec![
                Box::new(Constants::default().constant("x", "plain")),
                Box::new(Shouting::default().with("y", "low")),
            ])
            .unwrap();
        assert_eq!(resolver.resolve("!x").unwrap(), "X");
        assert_eq!(resolver.resolve("!!y").unwrap(), "Y");
    }

    #[test]
    fn test_register_constants_batch_keeps_existing_provider() {
        let mut resolver = Resolver::new();
        resolver.register_constants(Constants::default().constant("base", "b"));
        resolver
            .register_constants_batch(vec![
                Box::new(Constants::default().constant("x", "plain")),
                Box::new(Shouting::default().with("y", "low")),
            ])
            .unwrap();
        assert_eq!(resolver.resolve("!x").unwrap(), "plain");
        assert_eq!(resolver.resolve("!y").unwrap(), "low");
        assert_eq!(resolver.constant_names(), vec!["base", "x", "y"]);
    }

    #[test]
    fn test_strict_grammar_reports_malformed_key() {
        let mut resolver = Resolver::with_grammar(KeyGrammar::Strict);
        resolver.set_value("$x", "nested");
        assert_eq!(
            resolver.resolve("$$x"),
            Err(ResolveError::MalformedKey("$$x".to_string()))
        );
    }

    #[test]
    fn test_lenient_grammar_keeps_sigils_in_name() {
        let mut resolver = Resolver::new();
        resolver.set_value("$x", "nested");
        assert_eq!(resolver.resolve("$$x").unwrap(), "nested");
    }

    #[test]
    fn test_no_caching() {
        let mut resolver = Resolver::new();
        resolver.set_value("env", "dev");
        assert_eq!(resolver.resolve("$env").unwrap(), "dev");
        resolver.set_value("env", "prod");
        assert_eq!(resolver.resolve("$env").unwrap(), "prod");
    }

    #[test]
    fn test_debug_lists_names() {
        let mut resolver = Resolver::new();
        resolver.register_computed(Computed::default().with("now", "t"));
        let debug = format!("{resolver:?}");
        assert!(debug.contains("now"));
    }
}
