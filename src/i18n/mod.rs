//! Internationalization (i18n) for the skill's spoken messages.
//!
//! # Architecture
//!
//! - `registry`: single source of truth for the supported locales and their bundles
//! - `language`: validated `Language` type and locale tag helpers
//! - `strings`: message keys and the English and Spanish templates
//! - `format`: the `%.2f` / `%s` template formatter
//! - `localizer`: per-request lookup context handed to the handlers
//! - `validator`: startup check that all bundles are complete and consistent
//!
//! # Example
//!
//! ```rust,ignore
//! use unit_converter_skill::i18n::{keys, Localizer};
//!
//! let localizer = Localizer::for_locale("es-MX", "en", false);
//! let goodbye = localizer.t(keys::GOODBYE_MESSAGE, &[])?;
//! ```

mod format;
mod language;
mod localizer;
mod registry;
mod strings;
mod validator;

pub use format::{format_template, FormatArg, FormatError};
pub use language::{normalize_tag, primary_subtag, Language};
pub use localizer::Localizer;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::{keys, LocaleBundle, ENGLISH_MESSAGES, SPANISH_MESSAGES};
pub use validator::{BundleValidator, ValidationReport};
