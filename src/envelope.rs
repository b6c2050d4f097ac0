//! Inbound request envelope.
//!
//! Mirrors the JSON document the voice platform posts for each turn. Only
//! the fields the skill reads are modelled; everything else is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    pub request: Request,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    #[serde(default)]
    pub new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Why the session ended (SessionEndedRequest only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Slot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Request types the skill distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Launch,
    Intent,
    SessionEnded,
    Other,
}

impl RequestType {
    pub const LAUNCH: &'static str = "LaunchRequest";
    pub const INTENT: &'static str = "IntentRequest";
    pub const SESSION_ENDED: &'static str = "SessionEndedRequest";

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            Self::LAUNCH => RequestType::Launch,
            Self::INTENT => RequestType::Intent,
            Self::SESSION_ENDED => RequestType::SessionEnded,
            _ => RequestType::Other,
        }
    }
}

impl RequestEnvelope {
    pub fn request_type(&self) -> RequestType {
        RequestType::from_tag(&self.request.request_type)
    }

    /// The raw request type tag.
    pub fn request_type_tag(&self) -> &str {
        &self.request.request_type
    }

    /// Intent name, for intent requests.
    pub fn intent_name(&self) -> Option<&str> {
        self.request.intent.as_ref().map(|intent| intent.name.as_str())
    }

    /// A filled slot's value. Unfilled and blank slots read as `None`.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()?
            .slots
            .get(name)?
            .value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// First filled slot among `names`, with the name that matched.
    pub fn first_slot_value<'a>(&'a self, names: &[&'a str]) -> Option<(&'a str, &'a str)> {
        names
            .iter()
            .find_map(|name| self.slot_value(name).map(|value| (*name, value)))
    }

    /// Locale tag, empty when the platform did not send one.
    pub fn locale(&self) -> &str {
        self.request.locale.as_deref().unwrap_or("")
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request.request_id.as_deref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.session_id.as_str())
    }

    pub fn application_id(&self) -> Option<&str> {
        self.session
            .as_ref()?
            .application
            .as_ref()
            .map(|application| application.application_id.as_str())
    }

    // ==================== Construction ====================

    fn with_request(request_type: &str, locale: &str) -> Self {
        Self {
            version: Some("1.0".to_string()),
            session: None,
            request: Request {
                request_type: request_type.to_string(),
                request_id: None,
                timestamp: Some(Utc::now()),
                locale: Some(locale.to_string()),
                intent: None,
                reason: None,
            },
        }
    }

    pub fn launch(locale: &str) -> Self {
        Self::with_request(RequestType::LAUNCH, locale)
    }

    pub fn intent(locale: &str, name: &str) -> Self {
        let mut envelope = Self::with_request(RequestType::INTENT, locale);
        envelope.request.intent = Some(Intent {
            name: name.to_string(),
            slots: BTreeMap::new(),
        });
        envelope
    }

    pub fn session_ended(locale: &str, reason: &str) -> Self {
        let mut envelope = Self::with_request(RequestType::SESSION_ENDED, locale);
        envelope.request.reason = Some(reason.to_string());
        envelope
    }

    /// Add a filled slot. Has no effect on non-intent requests.
    pub fn with_slot(mut self, name: &str, value: &str) -> Self {
        if let Some(intent) = self.request.intent.as_mut() {
            intent.slots.insert(
                name.to_string(),
                Slot {
                    name: name.to_string(),
                    value: Some(value.to_string()),
                },
            );
        }
        self
    }

    pub fn with_session(mut self, session_id: &str, application_id: &str) -> Self {
        self.session = Some(Session {
            session_id: session_id.to_string(),
            new: false,
            application: Some(Application {
                application_id: application_id.to_string(),
            }),
        });
        self
    }

    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request.request_id = Some(request_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Deserialization Tests ====================

    #[test]
    fn test_intent_request_deserialization() {
        let json = r#"{
            "version": "1.0",
            "session": {
                "sessionId": "amzn1.echo-api.session.abc",
                "new": true,
                "application": { "applicationId": "amzn1.ask.skill.123" }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.1",
                "timestamp": "2024-01-15T10:30:00Z",
                "locale": "en-US",
                "intent": {
                    "name": "ConvertidorIntent",
                    "confirmationStatus": "NONE",
                    "slots": {
                        "deUnidad": { "name": "deUnidad", "value": "Feet" },
                        "UnidadFinal": { "name": "UnidadFinal", "value": "inches" },
                        "cantidad": { "name": "cantidad", "value": "5" }
                    }
                }
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(envelope.request_type(), RequestType::Intent);
        assert_eq!(envelope.intent_name(), Some("ConvertidorIntent"));
        assert_eq!(envelope.slot_value("deUnidad"), Some("Feet"));
        assert_eq!(envelope.slot_value("cantidad"), Some("5"));
        assert_eq!(envelope.locale(), "en-US");
        assert_eq!(envelope.session_id(), Some("amzn1.echo-api.session.abc"));
        assert_eq!(envelope.application_id(), Some("amzn1.ask.skill.123"));
        assert_eq!(envelope.request_id(), Some("amzn1.echo-api.request.1"));
        assert!(envelope.request.timestamp.is_some());
    }

    #[test]
    fn test_launch_request_minimal() {
        let json = r#"{"request": {"type": "LaunchRequest"}}"#;
        let envelope: RequestEnvelope = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(envelope.request_type(), RequestType::Launch);
        assert_eq!(envelope.intent_name(), None);
        assert_eq!(envelope.locale(), "");
        assert_eq!(envelope.session_id(), None);
        assert_eq!(envelope.application_id(), None);
    }

    #[test]
    fn test_unfilled_slot_reads_as_none() {
        let json = r#"{
            "request": {
                "type": "IntentRequest",
                "intent": {
                    "name": "ConvertidorIntent",
                    "slots": {
                        "cantidad": { "name": "cantidad" },
                        "deUnidad": { "name": "deUnidad", "value": "   " }
                    }
                }
            }
        }"#;
        let envelope: RequestEnvelope = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(envelope.slot_value("cantidad"), None);
        assert_eq!(envelope.slot_value("deUnidad"), None);
        assert_eq!(envelope.slot_value("UnidadFinal"), None);
    }

    #[test]
    fn test_unknown_request_type() {
        let json = r#"{"request": {"type": "CanFulfillIntentRequest"}}"#;
        let envelope: RequestEnvelope = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(envelope.request_type(), RequestType::Other);
        assert_eq!(envelope.request_type_tag(), "CanFulfillIntentRequest");
    }

    #[test]
    fn test_missing_request_is_rejected() {
        let result: Result<RequestEnvelope, _> = serde_json::from_str(r#"{"version": "1.0"}"#);
        assert!(result.is_err());
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_first_slot_value_prefers_order() {
        let envelope = RequestEnvelope::intent("en-US", "ConvertidorIntent")
            .with_slot("fromUnit", "feet")
            .with_slot("deUnidad", "yards");
        assert_eq!(
            envelope.first_slot_value(&["deUnidad", "fromUnit"]),
            Some(("deUnidad", "yards"))
        );
        assert_eq!(
            envelope.first_slot_value(&["missing", "fromUnit"]),
            Some(("fromUnit", "feet"))
        );
        assert_eq!(envelope.first_slot_value(&["missing"]), None);
    }

    #[test]
    fn test_with_slot_ignored_without_intent() {
        let envelope = RequestEnvelope::launch("es-ES").with_slot("cantidad", "2");
        assert_eq!(envelope.slot_value("cantidad"), None);
    }

    #[test]
    fn test_session_ended_reason() {
        let envelope = RequestEnvelope::session_ended("en-US", "USER_INITIATED");
        assert_eq!(envelope.request_type(), RequestType::SessionEnded);
        assert_eq!(envelope.request.reason.as_deref(), Some("USER_INITIATED"));
    }

    #[test]
    fn test_builder_serializes_camel_case() {
        let envelope = RequestEnvelope::intent("es-ES", "AMAZON.HelpIntent")
            .with_session("s-1", "app-1")
            .with_request_id("r-1");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["request"]["type"], "IntentRequest");
        assert_eq!(value["request"]["requestId"], "r-1");
        assert_eq!(value["session"]["sessionId"], "s-1");
        assert_eq!(value["session"]["application"]["applicationId"], "app-1");
    }
}
