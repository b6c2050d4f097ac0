//! Language type: a locale validated against the registry.

use crate::i18n::LocaleRegistry;
use anyhow::{bail, Result};

/// A validated, enabled locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Registry code (e.g., "en", "es")
    code: &'static str,
}

impl Language {
    /// Create a Language from a registry code.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is known and enabled
    /// * `Err` if the code is not found or the locale is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LocaleRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Locale '{}' is not enabled", code),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

/// Lowercase a locale tag, trim it, and use `-` as the subtag separator.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase().replace('_', "-")
}

/// The primary language subtag of a locale tag ("es-MX" -> "es").
pub fn primary_subtag(tag: &str) -> String {
    let normalized = normalize_tag(tag);
    match normalized.split_once('-') {
        Some((primary, _)) => primary.to_string(),
        None => normalized,
    }
}
