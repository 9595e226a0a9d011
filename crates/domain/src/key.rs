//! Sigil key grammar
//!
//! Splits a key such as `"$username"` or `"!!logo"` into the store it targets
//! and the name looked up in that store. Classification happens here, dispatch
//! happens in the resolver engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, ProviderKind};

/// Characters that may start a sigil.
pub const SIGIL_CHARS: [char; 3] = ['$', '#', '!'];

/// The backing store selected by a key's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigilKind {
    /// `$name`: runtime table.
    Runtime,
    /// `#name`: computed provider.
    Computed,
    /// `!name`: constants provider.
    Constant,
    /// `!!name`: file constants of the constants provider.
    FileConstant,
    /// No sigil: the key is its own value.
    Literal,
}

impl SigilKind {
    /// Returns the prefix that selects this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Runtime => "$",
            Self::Computed => "#",
            Self::Constant => "!",
            Self::FileConstant => "!!",
            Self::Literal => "",
        }
    }

    /// Returns the provider registration this kind depends on, if any.
    #[must_use]
    pub const fn provider(self) -> Option<ProviderKind> {
        match self {
            Self::Computed => Some(ProviderKind::Computed),
            Self::Constant | Self::FileConstant => Some(ProviderKind::Constants),
            Self::Runtime | Self::Literal => None,
        }
    }
}

impl fmt::Display for SigilKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Runtime => "runtime",
            Self::Computed => "computed",
            Self::Constant => "constant",
            Self::FileConstant => "file-constant",
            Self::Literal => "literal",
        };
        f.write_str(label)
    }
}

/// A classified key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigilKey<'a> {
    /// Which store the key targets.
    pub kind: SigilKind,

    /// The name looked up in that store. For literals this is the whole key.
    pub name: &'a str,
}

impl<'a> SigilKey<'a> {
    /// Classifies a key with the lenient grammar.
    ///
    /// Every string classifies. Prefixes are matched longest first, so `!!`
    /// always wins over `!`. Sigil characters after the prefix belong to the
    /// name, and a bare prefix yields an empty name.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigil_domain::key::{SigilKey, SigilKind};
    ///
    /// let key = SigilKey::parse("!!logo");
    /// assert_eq!(key.kind, SigilKind::FileConstant);
    /// assert_eq!(key.name, "logo");
    ///
    /// let key = SigilKey::parse("user$name");
    /// assert_eq!(key.kind, SigilKind::Literal);
    /// assert_eq!(key.name, "user$name");
    /// ```
    #[must_use]
    pub fn parse(key: &'a str) -> Self {
        if let Some(name) = key.strip_prefix("!!") {
            Self::new(SigilKind::FileConstant, name)
        } else if let Some(name) = key.strip_prefix('!') {
            Self::new(SigilKind::Constant, name)
        } else if let Some(name) = key.strip_prefix('$') {
            Self::new(SigilKind::Runtime, name)
        } else if let Some(name) = key.strip_prefix('#') {
            Self::new(SigilKind::Computed, name)
        } else {
            Self::new(SigilKind::Literal, key)
        }
    }

    /// Creates a classified key from its parts.
    #[must_use]
    pub const fn new(kind: SigilKind, name: &'a str) -> Self {
        Self { kind, name }
    }

    /// Returns true if the key carried a sigil.
    #[must_use]
    pub fn is_sigil(&self) -> bool {
        self.kind != SigilKind::Literal
    }
}

impl fmt::Display for SigilKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.name)
    }
}

/// How strictly keys are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyGrammar {
    /// Every string classifies (default).
    #[default]
    Lenient,
    /// A name directly following a sigil may not itself start with a sigil
    /// character, so `"$$x"`, `"#!x"` and `"!!!x"` are rejected.
    Strict,
}

impl KeyGrammar {
    /// Classifies a key under this grammar.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedKey`] when the strict grammar rejects
    /// the key. The lenient grammar never fails.
    pub fn parse(self, key: &str) -> DomainResult<SigilKey<'_>> {
        let parsed = SigilKey::parse(key);

        if self == Self::Strict && parsed.is_sigil() && starts_with_sigil(parsed.name) {
            return Err(DomainError::MalformedKey(key.to_string()));
        }

        Ok(parsed)
    }
}

/// Returns true if the input begins with a sigil character.
#[must_use]
pub fn starts_with_sigil(input: &str) -> bool {
    input.starts_with(SIGIL_CHARS)
}
