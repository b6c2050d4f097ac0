//! Bundle validation.
//!
//! Checks that every locale defines every message key and that each
//! template takes the same placeholders, in the same order, as the default
//! locale's template. Run at startup so a broken bundle is caught before it
//! can degrade a live turn.

use crate::i18n::strings::keys;
use crate::i18n::{LocaleConfig, LocaleRegistry};
use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about the bundles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that would make a handler fail or degrade
    pub errors: Vec<String>,

    /// Non-critical findings (e.g., keys no handler uses)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BundleValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl BundleValidator {
    /// Validate every enabled locale of a registry against its default locale.
    pub fn validate(registry: &LocaleRegistry) -> ValidationReport {
        let reference = registry.default_locale();
        let mut report = ValidationReport::new();

        for locale in registry.list_enabled() {
            Self::validate_locale(locale, reference, &mut report);
        }

        report
    }

    fn validate_locale(locale: &LocaleConfig, reference: &LocaleConfig, report: &mut ValidationReport) {
        for key in keys::ALL {
            let Some(template) = locale.bundle.get(key) else {
                report
                    .errors
                    .push(format!("Locale '{}' is missing key {}", locale.code, key));
                continue;
            };

            if let Some(bad) = Self::unsupported_placeholder(template) {
                report.errors.push(format!(
                    "Locale '{}' key {} uses unsupported placeholder '{}'",
                    locale.code, key, bad
                ));
            }

            if let Some(expected) = reference.bundle.get(key) {
                let found = Self::extract_placeholders(template);
                let wanted = Self::extract_placeholders(expected);
                if found != wanted {
                    report.errors.push(format!(
                        "Locale '{}' key {} has placeholders {:?}, default locale has {:?}",
                        locale.code, key, found, wanted
                    ));
                }
            }
        }

        for key in locale.bundle.keys() {
            if !keys::ALL.contains(&key) {
                report
                    .warnings
                    .push(format!("Locale '{}' defines unused key {}", locale.code, key));
            }
        }
    }

    /// Placeholders that consume an argument, in order (`%%` excluded).
    fn extract_placeholders(template: &str) -> Vec<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"%(%|\.\d+f|f|s)").expect("Invalid placeholder regex"));

        regex
            .find_iter(template)
            .map(|m| m.as_str().to_string())
            .filter(|p| p != "%%")
            .collect()
    }

    /// First `%` sequence that is not a supported placeholder.
    fn unsupported_placeholder(template: &str) -> Option<String> {
        let mut rest = template;
        while let Some(idx) = rest.find('%') {
            let candidate = &rest[idx..];
            let supported = Self::extract_placeholders(candidate)
                .first()
                .map(|p| candidate.starts_with(p.as_str()))
                .unwrap_or(false)
                || candidate.starts_with("%%");
            if !supported {
                return Some(candidate.chars().take(2).collect());
            }
            let skip = if candidate.starts_with("%%") { 2 } else { 1 };
            rest = &candidate[skip..];
        }
        None
    }
}
