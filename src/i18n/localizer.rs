//! Per-request localization context.
//!
//! A `Localizer` is built once per request from the resolved locale and is
//! handed to the handlers inside `HandlerInput`.

use crate::error::SkillError;
use crate::i18n::format::{format_template, FormatArg};
use crate::i18n::strings::keys;
use crate::i18n::{LocaleConfig, LocaleRegistry};
use std::cell::Cell;
use tracing::{error, warn};

/// Spoken when even the error message cannot be found.
const LAST_RESORT_MESSAGE: &str = "Sorry, there was a problem.";

pub struct Localizer {
    active: &'static LocaleConfig,
    fallback: &'static LocaleConfig,
    strict: bool,
    degraded: Cell<usize>,
}

impl Localizer {
    /// Resolve `tag` against the global registry.
    ///
    /// In strict mode a missing key is an error; otherwise it degrades to the
    /// generic error message.
    pub fn for_locale(tag: &str, default_locale: &str, strict: bool) -> Self {
        Self::from_registry(LocaleRegistry::get(), tag, default_locale, strict)
    }

    /// Resolve `tag` against a specific registry.
    pub fn from_registry(
        registry: &'static LocaleRegistry,
        tag: &str,
        default_locale: &str,
        strict: bool,
    ) -> Self {
        let active = registry.resolve(tag, default_locale);
        let fallback = registry.resolve(default_locale, default_locale);
        Self::new(active, fallback, strict)
    }

    pub fn new(active: &'static LocaleConfig, fallback: &'static LocaleConfig, strict: bool) -> Self {
        Self {
            active,
            fallback,
            strict,
            degraded: Cell::new(0),
        }
    }

    pub fn locale_code(&self) -> &'static str {
        self.active.code
    }

    /// Number of lookups that degraded to the generic message.
    pub fn degraded_lookups(&self) -> usize {
        self.degraded.get()
    }

    /// Look up and format a message, failing on missing keys and bad
    /// templates regardless of mode.
    pub fn try_t(&self, key: &str, args: &[FormatArg]) -> Result<String, SkillError> {
        let template = self
            .active
            .bundle
            .get(key)
            .or_else(|| self.fallback.bundle.get(key))
            .ok_or_else(|| SkillError::MissingLocalizationKey {
                locale: self.active.code.to_string(),
                key: key.to_string(),
            })?;

        format_template(template, args).map_err(|source| SkillError::Template {
            key: key.to_string(),
            source,
        })
    }

    /// Look up and format a message.
    pub fn t(&self, key: &str, args: &[FormatArg]) -> Result<String, SkillError> {
        match self.try_t(key, args) {
            Ok(message) => Ok(message),
            Err(err) if self.strict => Err(err),
            Err(err) => {
                warn!(locale = self.active.code, key, error = %err, "Localization degraded");
                self.degraded.set(self.degraded.get() + 1);
                Ok(self.generic_error())
            }
        }
    }

    /// Look up a message without ever failing. Used by the error handler.
    pub fn t_or_generic(&self, key: &str, args: &[FormatArg]) -> String {
        self.try_t(key, args).unwrap_or_else(|err| {
            error!(locale = self.active.code, key, error = %err, "Localization failed in error path");
            self.degraded.set(self.degraded.get() + 1);
            self.generic_error()
        })
    }

    fn generic_error(&self) -> String {
        self.active
            .bundle
            .get(keys::ERROR_MESSAGE)
            .or_else(|| self.fallback.bundle.get(keys::ERROR_MESSAGE))
            .unwrap_or(LAST_RESORT_MESSAGE)
            .to_string()
    }
}
