use crate::i18n::FormatError;
use thiserror::Error;

/// Failures that can happen while a request is being dispatched.
///
/// Everything except `Interceptor` is caught by the error handler and turned
/// into a spoken apology; an interceptor failure aborts the dispatch.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("required slot '{0}' is missing")]
    MissingSlot(String),

    #[error("slot '{slot}' has malformed value '{value}'")]
    MalformedSlot { slot: String, value: String },

    #[error("no handler matched request type '{request_type}'")]
    NoHandlerMatched { request_type: String },

    #[error("missing localization key '{key}' for locale '{locale}'")]
    MissingLocalizationKey { locale: String, key: String },

    #[error("failed to format message '{key}': {source}")]
    Template {
        key: String,
        #[source]
        source: FormatError,
    },

    #[error("interceptor '{name}' failed: {message}")]
    Interceptor { name: &'static str, message: String },
}

impl SkillError {
    /// Whether the failure is a defect in the bundled configuration rather
    /// than in the user's request.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SkillError::MissingLocalizationKey { .. }
                | SkillError::Template { .. }
                | SkillError::NoHandlerMatched { .. }
        )
    }
}
