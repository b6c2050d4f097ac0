use crate::envelope::RequestType;
use crate::error::SkillError;
use crate::handlers::HandlerInput;
use crate::i18n::keys;
use crate::response::Response;
use tracing::{info, warn};

pub(super) fn can_handle_launch(input: &HandlerInput<'_>) -> bool {
    input.request_type() == RequestType::Launch
}

/// Welcome message, repeated as the reprompt.
pub(super) fn handle_launch(input: &HandlerInput<'_>) -> Result<Response, SkillError> {
    let speech = input.prefixed(&input.t(keys::WELCOME_MESSAGE, &[])?);
    Ok(Response::builder().speak(speech.as_str()).reprompt(speech).build())
}

pub(super) fn can_handle_session_ended(input: &HandlerInput<'_>) -> bool {
    input.request_type() == RequestType::SessionEnded
}

/// Log the notification. Nothing may be spoken after the session ended.
pub(super) fn handle_session_ended(input: &HandlerInput<'_>) -> Result<Response, SkillError> {
    match serde_json::to_string(input.envelope) {
        Ok(json) => info!(
            session_id = input.envelope.session_id().unwrap_or("-"),
            reason = input.envelope.request.reason.as_deref().unwrap_or("-"),
            envelope = %json,
            "Session ended"
        ),
        Err(e) => warn!("Session ended; envelope could not be serialized: {}", e),
    }
    Ok(Response::empty())
}
