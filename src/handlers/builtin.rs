//! Handlers for the platform's built-in intents.

use crate::error::SkillError;
use crate::handlers::{intents, HandlerInput};
use crate::i18n::keys;
use crate::response::Response;

pub(super) fn can_handle_help(input: &HandlerInput<'_>) -> bool {
    input.is_intent(intents::HELP)
}

pub(super) fn handle_help(input: &HandlerInput<'_>) -> Result<Response, SkillError> {
    let speech = input.prefixed(&input.t(keys::HELP_MESSAGE, &[])?);
    Ok(Response::builder().speak(speech.as_str()).reprompt(speech).build())
}

pub(super) fn can_handle_cancel_and_stop(input: &HandlerInput<'_>) -> bool {
    input.is_intent(intents::CANCEL) || input.is_intent(intents::STOP)
}

/// Say goodbye and close the session. No reprompt.
pub(super) fn handle_cancel_and_stop(input: &HandlerInput<'_>) -> Result<Response, SkillError> {
    let speech = input.prefixed(&input.t(keys::GOODBYE_MESSAGE, &[])?);
    Ok(Response::builder().speak(speech).end_session(true).build())
}

pub(super) fn can_handle_fallback(input: &HandlerInput<'_>) -> bool {
    input.is_intent(intents::FALLBACK)
}

pub(super) fn handle_fallback(input: &HandlerInput<'_>) -> Result<Response, SkillError> {
    let speech = input.prefixed(&input.t(keys::FALLBACK_MESSAGE, &[])?);
    Ok(Response::builder().speak(speech.as_str()).reprompt(speech).build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::RequestEnvelope;
    use crate::handlers::testing::{with_input, PREFIX};

    #[test]
    fn test_help_reprompts_with_itself() {
        let envelope = RequestEnvelope::intent("en-US", intents::HELP);
        let response = with_input(&envelope, handle_help).unwrap();
        let speech = response.speech.unwrap();
        assert!(speech.starts_with(PREFIX));
        assert!(speech.contains("convert length units"));
        assert_eq!(response.reprompt, Some(speech));
    }

    #[test]
    fn test_cancel_and_stop_both_match() {
        assert!(with_input(&RequestEnvelope::intent("en-US", intents::CANCEL), can_handle_cancel_and_stop));
        assert!(with_input(&RequestEnvelope::intent("en-US", intents::STOP), can_handle_cancel_and_stop));
        assert!(!with_input(&RequestEnvelope::intent("en-US", intents::HELP), can_handle_cancel_and_stop));
    }

    #[test]
    fn test_goodbye_ends_session() {
        let envelope = RequestEnvelope::intent("es-ES", intents::STOP);
        let response = with_input(&envelope, handle_cancel_and_stop).unwrap();
        assert_eq!(response.speech, Some(format!("{}¡Adiós!", PREFIX)));
        assert_eq!(response.reprompt, None);
        assert_eq!(response.should_end_session, Some(true));
    }

    #[test]
    fn test_fallback_message() {
        let envelope = RequestEnvelope::intent("en-GB", intents::FALLBACK);
        let response = with_input(&envelope, handle_fallback).unwrap();
        assert_eq!(
            response.speech.as_deref(),
            Some("Convertidor de Keren. Sorry, I don't know about that. Please try again.")
        );
        assert_eq!(response.reprompt, response.speech);
    }

    #[test]
    fn test_builtin_predicates_ignore_launch() {
        let envelope = RequestEnvelope::launch("en-US");
        assert!(!with_input(&envelope, can_handle_help));
        assert!(!with_input(&envelope, can_handle_fallback));
    }
}
