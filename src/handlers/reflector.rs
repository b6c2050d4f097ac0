use crate::envelope::RequestType;
use crate::error::SkillError;
use crate::handlers::HandlerInput;
use crate::i18n::keys;
use crate::response::Response;
use tracing::debug;

/// Any intent request. Must be registered after every specific intent
/// handler or it shadows them.
pub(super) fn can_handle(input: &HandlerInput<'_>) -> bool {
    input.request_type() == RequestType::Intent
}

/// Echo the intent name back. Useful while building the interaction model.
pub(super) fn handle(input: &HandlerInput<'_>) -> Result<Response, SkillError> {
    let intent_name = input.envelope.intent_name().unwrap_or_default();
    debug!(intent = intent_name, "Reflecting unhandled intent");

    let speech = input.prefixed(&input.t(keys::REFLECTOR_MESSAGE, &[intent_name.into()])?);
    let reprompt = input.t(keys::HELP_MESSAGE, &[])?;
    Ok(Response::builder().speak(speech).reprompt(reprompt).build())
}
