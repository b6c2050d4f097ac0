//! The error handler: the last stop for any failure during matching or
//! handling.

use crate::error::SkillError;
use crate::handlers::HandlerInput;
use crate::i18n::keys;
use crate::response::Response;
use tracing::error;

/// Every error is accepted.
pub fn can_handle(_error: &SkillError) -> bool {
    true
}

/// Log the failure and apologize, reprompting with the help message.
///
/// Uses the non-failing localization path so it cannot fail itself.
pub fn handle(input: &HandlerInput<'_>, err: &SkillError) -> Response {
    error!(
        request_id = input.envelope.request_id().unwrap_or("-"),
        request_type = input.envelope.request_type_tag(),
        intent = input.envelope.intent_name().unwrap_or("-"),
        configuration = err.is_configuration_error(),
        "Error handled: {}",
        err
    );
    input.metrics.record_error_handled();

    let speech = input.prefixed(&input.localizer.t_or_generic(keys::ERROR_MESSAGE, &[]));
    let reprompt = input.localizer.t_or_generic(keys::HELP_MESSAGE, &[]);
    Response::builder().speak(speech).reprompt(reprompt).build()
}
