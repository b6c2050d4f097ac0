//! The dispatcher.
//!
//! A `Skill` owns the ordered handler list and the interceptor chains. For
//! each request it builds the per-request context (localizer and conversion
//! table), runs the request interceptors, picks the first matching handler
//! and routes any failure to the error handler.

pub mod interceptors;

use crate::config::{Config, DEFAULT_LOCALE, DEFAULT_SPEECH_PREFIX};
use crate::conversion::ConversionTable;
use crate::envelope::RequestEnvelope;
use crate::error::SkillError;
use crate::handlers::{self, Handler, HandlerInput};
use crate::i18n::{LocaleRegistry, Localizer};
use crate::metrics::SkillMetrics;
use crate::response::Response;
use interceptors::{
    LoggingRequestInterceptor, LoggingResponseInterceptor, RequestInterceptor, ResponseInterceptor,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Per-skill settings derived from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillSettings {
    pub default_locale: String,
    pub speech_prefix: String,
    pub strict_localization: bool,
}

impl Default for SkillSettings {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            speech_prefix: DEFAULT_SPEECH_PREFIX.to_string(),
            strict_localization: false,
        }
    }
}

impl From<&Config> for SkillSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_locale: config.default_locale.clone(),
            speech_prefix: config.speech_prefix.clone(),
            strict_localization: config.strict_localization,
        }
    }
}

/// Ways a handler list can be assembled wrongly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("a skill needs at least one handler")]
    NoHandlers,

    #[error("handler {0} is registered twice")]
    DuplicateHandler(&'static str),

    #[error("handler {handler} is unreachable behind {catch_all}")]
    ShadowedHandler {
        handler: &'static str,
        catch_all: &'static str,
    },
}

/// Who produced the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandledBy {
    Handler(Handler),
    ErrorHandler,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub response: Response,
    pub handled_by: HandledBy,
}

pub struct Skill {
    handlers: Vec<Handler>,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    settings: SkillSettings,
    registry: &'static LocaleRegistry,
    metrics: Arc<SkillMetrics>,
}

impl Skill {
    /// The standard handler order with request and response logging.
    pub fn standard(settings: SkillSettings) -> Self {
        Self {
            handlers: Handler::STANDARD_ORDER.to_vec(),
            request_interceptors: vec![Box::new(LoggingRequestInterceptor)],
            response_interceptors: vec![Box::new(LoggingResponseInterceptor)],
            settings,
            registry: LocaleRegistry::get(),
            metrics: Arc::new(SkillMetrics::new()),
        }
    }

    pub fn builder() -> SkillBuilder {
        SkillBuilder::default()
    }

    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    pub fn settings(&self) -> &SkillSettings {
        &self.settings
    }

    pub fn metrics(&self) -> &Arc<SkillMetrics> {
        &self.metrics
    }

    /// The first handler, in registration order, that accepts the input.
    pub fn select_handler(&self, input: &HandlerInput<'_>) -> Option<Handler> {
        self.handlers
            .iter()
            .copied()
            .find(|handler| handler.can_handle(input))
    }

    /// Dispatch one request.
    ///
    /// Handler failures and unmatched requests are answered by the error
    /// handler. Only a failing request interceptor makes this return `Err`.
    pub fn process(&self, envelope: &RequestEnvelope) -> Result<DispatchOutcome, SkillError> {
        self.metrics.record_request();

        for interceptor in &self.request_interceptors {
            interceptor.process(envelope)?;
        }

        let localizer = Localizer::from_registry(
            self.registry,
            envelope.locale(),
            &self.settings.default_locale,
            self.settings.strict_localization,
        );
        let input = HandlerInput {
            envelope,
            localizer: &localizer,
            table: ConversionTable::for_locale(envelope.locale()),
            speech_prefix: &self.settings.speech_prefix,
            metrics: &self.metrics,
        };

        let outcome = match self.select_handler(&input) {
            Some(handler) => {
                debug!(
                    request_id = envelope.request_id().unwrap_or("-"),
                    handler = handler.name(),
                    locale = localizer.locale_code(),
                    table = input.table.family(),
                    "Dispatching request"
                );
                match handler.handle(&input) {
                    Ok(response) => {
                        self.metrics.record_handled(handler);
                        DispatchOutcome {
                            response,
                            handled_by: HandledBy::Handler(handler),
                        }
                    }
                    Err(err) => self.recover(&input, err)?,
                }
            }
            None => self.recover(
                &input,
                SkillError::NoHandlerMatched {
                    request_type: envelope.request_type_tag().to_string(),
                },
            )?,
        };

        for interceptor in &self.response_interceptors {
            if let Err(e) = interceptor.process(envelope, &outcome.response) {
                warn!(interceptor = interceptor.name(), "Response interceptor failed: {}", e);
            }
        }

        self.metrics
            .record_localization_fallbacks(localizer.degraded_lookups());

        Ok(outcome)
    }

    /// Dispatch one request and keep only the response.
    pub fn dispatch(&self, envelope: &RequestEnvelope) -> Result<Response, SkillError> {
        self.process(envelope).map(|outcome| outcome.response)
    }

    fn recover(&self, input: &HandlerInput<'_>, err: SkillError) -> Result<DispatchOutcome, SkillError> {
        if !handlers::error::can_handle(&err) {
            return Err(err);
        }
        Ok(DispatchOutcome {
            response: handlers::error::handle(input, &err),
            handled_by: HandledBy::ErrorHandler,
        })
    }
}

/// Assembles a `Skill` with a custom handler list or interceptor chain.
#[derive(Default)]
pub struct SkillBuilder {
    handlers: Vec<Handler>,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    settings: SkillSettings,
    registry: Option<&'static LocaleRegistry>,
    metrics: Option<Arc<SkillMetrics>>,
}

impl SkillBuilder {
    pub fn handler(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn handlers(mut self, handlers: impl IntoIterator<Item = Handler>) -> Self {
        self.handlers.extend(handlers);
        self
    }

    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Box::new(interceptor));
        self
    }

    pub fn response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response_interceptors.push(Box::new(interceptor));
        self
    }

    pub fn settings(mut self, settings: SkillSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Localize from this registry instead of the built-in one.
    pub fn registry(mut self, registry: &'static LocaleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Share an existing metrics instance.
    pub fn metrics(mut self, metrics: Arc<SkillMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Validate the handler order and build the skill.
    ///
    /// A specific intent handler registered after the intent catch-all could
    /// never be selected, so that order is rejected.
    pub fn build(self) -> Result<Skill, BuildError> {
        if self.handlers.is_empty() {
            return Err(BuildError::NoHandlers);
        }

        for (index, handler) in self.handlers.iter().enumerate() {
            if self.handlers[..index].contains(handler) {
                return Err(BuildError::DuplicateHandler(handler.name()));
            }
        }

        if let Some(position) = self.handlers.iter().position(|h| h.is_intent_catch_all()) {
            if let Some(shadowed) = self.handlers[position + 1..]
                .iter()
                .find(|h| h.is_specific_intent())
            {
                return Err(BuildError::ShadowedHandler {
                    handler: shadowed.name(),
                    catch_all: self.handlers[position].name(),
                });
            }
        }

        Ok(Skill {
            handlers: self.handlers,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
            settings: self.settings,
            registry: self.registry.unwrap_or_else(LocaleRegistry::get),
            metrics: self.metrics.unwrap_or_default(),
        })
    }
}
