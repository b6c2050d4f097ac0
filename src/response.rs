//! Outbound response and its wire envelope.

use serde::{Deserialize, Serialize};

/// What the skill says back for one turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub speech: Option<String>,
    pub reprompt: Option<String>,
    pub should_end_session: Option<bool>,
}

impl Response {
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    /// A response with nothing to say (e.g., after the session ended).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.speech.is_none() && self.reprompt.is_none() && self.should_end_session.is_none()
    }

    pub fn to_envelope(&self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: "1.0".to_string(),
            response: ResponseBody {
                output_speech: self.speech.as_deref().map(OutputSpeech::ssml),
                reprompt: self.reprompt.as_deref().map(|text| Reprompt {
                    output_speech: OutputSpeech::ssml(text),
                }),
                should_end_session: self.should_end_session,
            },
        }
    }
}

#[derive(Debug, Default)]
pub struct ResponseBuilder {
    response: Response,
}

impl ResponseBuilder {
    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.response.speech = Some(text.into());
        self
    }

    /// Setting a reprompt keeps the session open.
    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.response.reprompt = Some(text.into());
        self.response.should_end_session = Some(false);
        self
    }

    pub fn end_session(mut self, end: bool) -> Self {
        self.response.should_end_session = Some(end);
        self
    }

    pub fn build(self) -> Response {
        self.response
    }
}

// ==================== Wire Format ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    pub ssml: String,
}

impl OutputSpeech {
    pub fn ssml(text: &str) -> Self {
        Self {
            speech_type: "SSML".to_string(),
            ssml: format!("<speak>{}</speak>", escape_ssml(text)),
        }
    }
}

/// Escape the characters SSML treats as markup.
pub fn escape_ssml(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
