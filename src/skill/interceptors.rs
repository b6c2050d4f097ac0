//! Interceptors run around every dispatch.
//!
//! Request interceptors run before handler matching and may abort the
//! request. Response interceptors run after a response exists; their
//! failures are logged and ignored.

use crate::envelope::RequestEnvelope;
use crate::error::SkillError;
use crate::response::Response;
use tracing::info;

pub trait RequestInterceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, envelope: &RequestEnvelope) -> Result<(), SkillError>;
}

pub trait ResponseInterceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, envelope: &RequestEnvelope, response: &Response) -> Result<(), SkillError>;
}

/// Logs the full inbound request.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingRequestInterceptor;

impl RequestInterceptor for LoggingRequestInterceptor {
    fn name(&self) -> &'static str {
        "LoggingRequestInterceptor"
    }

    fn process(&self, envelope: &RequestEnvelope) -> Result<(), SkillError> {
        let json = serde_json::to_string(&envelope.request).map_err(|e| SkillError::Interceptor {
            name: self.name(),
            message: e.to_string(),
        })?;
        info!(
            request_id = envelope.request_id().unwrap_or("-"),
            request = %json,
            "Incoming request"
        );
        Ok(())
    }
}

/// Logs the outbound response envelope.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingResponseInterceptor;

impl ResponseInterceptor for LoggingResponseInterceptor {
    fn name(&self) -> &'static str {
        "LoggingResponseInterceptor"
    }

    fn process(&self, envelope: &RequestEnvelope, response: &Response) -> Result<(), SkillError> {
        let json = serde_json::to_string(&response.to_envelope()).map_err(|e| {
            SkillError::Interceptor {
                name: self.name(),
                message: e.to_string(),
            }
        })?;
        info!(
            request_id = envelope.request_id().unwrap_or("-"),
            response = %json,
            "Outgoing response"
        );
        Ok(())
    }
}
