//! Locale registry: single source of truth for the supported locales.
//!
//! The registry is built once on first access (`OnceLock`) and is immutable
//! afterwards. Every locale carries its message bundle.

use crate::i18n::strings::{LocaleBundle, ENGLISH_MESSAGES, SPANISH_MESSAGES};
use crate::i18n::{normalize_tag, primary_subtag};
use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale tag, lowercase (e.g., "en", "es", "es-mx")
    pub code: &'static str,

    /// Whether this is the bundle of last resort (only one should be true)
    pub is_default: bool,

    /// Whether requests may resolve to this locale
    pub enabled: bool,

    /// Message templates
    pub bundle: LocaleBundle,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry::new(default_locales()))
    }

    /// Build a registry from an explicit locale list.
    pub fn new(locales: Vec<LocaleConfig>) -> Self {
        Self { locales }
    }

    /// Get an enabled or disabled locale by its exact code (case-insensitive).
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        let code = normalize_tag(code);
        self.locales.iter().find(|locale| locale.code == code)
    }

    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// The bundle of last resort.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default locale
    /// (this indicates a configuration error).
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Resolve a request locale tag to a bundle. Never fails.
    ///
    /// Order: exact tag, then primary language subtag, then `preferred_default`,
    /// then the registry's own default.
    pub fn resolve(&self, tag: &str, preferred_default: &str) -> &LocaleConfig {
        self.find_enabled(tag)
            .or_else(|| self.find_enabled(&primary_subtag(tag)))
            .or_else(|| self.find_enabled(preferred_default))
            .unwrap_or_else(|| self.default_locale())
    }

    fn find_enabled(&self, code: &str) -> Option<&LocaleConfig> {
        self.get_by_code(code).filter(|locale| locale.enabled)
    }
}

/// English (default) and Spanish.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            is_default: true,
            enabled: true,
            bundle: LocaleBundle::new("en", ENGLISH_MESSAGES),
        },
        LocaleConfig {
            code: "es",
            is_default: false,
            enabled: true,
            bundle: LocaleBundle::new("es", SPANISH_MESSAGES),
        },
    ]
}
