//! Request handlers.
//!
//! Each handler is a predicate over request type and intent name plus an
//! action that builds the spoken response. They are plain enum variants
//! evaluated in registration order by the dispatcher; the first handler whose
//! predicate matches wins, so the intent catch-all (`IntentReflector`) must
//! come after every handler for a specific intent.

mod builtin;
mod convert;
pub mod error;
mod reflector;
mod session;

use crate::conversion::ConversionTable;
use crate::envelope::{RequestEnvelope, RequestType};
use crate::error::SkillError;
use crate::i18n::{FormatArg, Localizer};
use crate::metrics::SkillMetrics;
use crate::response::Response;

pub use convert::{AMOUNT_SLOTS, SOURCE_UNIT_SLOTS, TARGET_UNIT_SLOTS};

/// Intent names the skill recognizes.
pub mod intents {
    pub const CONVERT: &str = "ConvertidorIntent";
    pub const HELP: &str = "AMAZON.HelpIntent";
    pub const CANCEL: &str = "AMAZON.CancelIntent";
    pub const STOP: &str = "AMAZON.StopIntent";
    pub const FALLBACK: &str = "AMAZON.FallbackIntent";
}

/// Everything a handler may read for one request.
pub struct HandlerInput<'a> {
    pub envelope: &'a RequestEnvelope,
    pub localizer: &'a Localizer,
    pub table: &'static ConversionTable,
    pub speech_prefix: &'a str,
    pub metrics: &'a SkillMetrics,
}

impl<'a> HandlerInput<'a> {
    pub fn request_type(&self) -> RequestType {
        self.envelope.request_type()
    }

    /// Whether this is an intent request for `name`.
    pub fn is_intent(&self, name: &str) -> bool {
        self.request_type() == RequestType::Intent && self.envelope.intent_name() == Some(name)
    }

    pub fn t(&self, key: &str, args: &[FormatArg]) -> Result<String, SkillError> {
        self.localizer.t(key, args)
    }

    /// Prepend the skill's speech prefix.
    pub fn prefixed(&self, message: &str) -> String {
        format!("{}{}", self.speech_prefix, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    Launch,
    Convert,
    Help,
    CancelAndStop,
    Fallback,
    SessionEnded,
    IntentReflector,
}

impl Handler {
    /// The registration order of the standard skill.
    pub const STANDARD_ORDER: [Handler; 7] = [
        Handler::Launch,
        Handler::Convert,
        Handler::Help,
        Handler::CancelAndStop,
        Handler::Fallback,
        Handler::SessionEnded,
        Handler::IntentReflector,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Handler::Launch => "LaunchRequestHandler",
            Handler::Convert => "ConvertidorIntentHandler",
            Handler::Help => "HelpIntentHandler",
            Handler::CancelAndStop => "CancelAndStopIntentHandler",
            Handler::Fallback => "FallbackIntentHandler",
            Handler::SessionEnded => "SessionEndedRequestHandler",
            Handler::IntentReflector => "IntentReflectorHandler",
        }
    }

    /// Handlers bound to one or two named intents.
    pub fn is_specific_intent(self) -> bool {
        matches!(
            self,
            Handler::Convert | Handler::Help | Handler::CancelAndStop | Handler::Fallback
        )
    }

    /// The handler that accepts any intent request.
    pub fn is_intent_catch_all(self) -> bool {
        self == Handler::IntentReflector
    }

    pub fn can_handle(self, input: &HandlerInput<'_>) -> bool {
        match self {
            Handler::Launch => session::can_handle_launch(input),
            Handler::Convert => convert::can_handle(input),
            Handler::Help => builtin::can_handle_help(input),
            Handler::CancelAndStop => builtin::can_handle_cancel_and_stop(input),
            Handler::Fallback => builtin::can_handle_fallback(input),
            Handler::SessionEnded => session::can_handle_session_ended(input),
            Handler::IntentReflector => reflector::can_handle(input),
        }
    }

    pub fn handle(self, input: &HandlerInput<'_>) -> Result<Response, SkillError> {
        match self {
            Handler::Launch => session::handle_launch(input),
            Handler::Convert => convert::handle(input),
            Handler::Help => builtin::handle_help(input),
            Handler::CancelAndStop => builtin::handle_cancel_and_stop(input),
            Handler::Fallback => builtin::handle_fallback(input),
            Handler::SessionEnded => session::handle_session_ended(input),
            Handler::IntentReflector => reflector::handle(input),
        }
    }
}
