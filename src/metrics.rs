//! Skill metrics.
//!
//! Counters for dispatch outcomes, exposed as a `MetricsReport` snapshot.
//! One instance is shared by a `Skill` and every request it dispatches.

use crate::handlers::Handler;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

const HANDLER_COUNT: usize = Handler::STANDARD_ORDER.len();

#[derive(Debug, Default)]
pub struct SkillMetrics {
    /// Requests that reached the dispatcher
    requests: AtomicUsize,

    /// Requests answered by each handler, indexed by `Handler::STANDARD_ORDER`
    handled: [AtomicUsize; HANDLER_COUNT],

    /// Successful unit conversions
    conversions: AtomicUsize,

    /// Conversions refused because the pair is not in the table
    unsupported_conversions: AtomicUsize,

    /// Failures turned into an apology by the error handler
    errors_handled: AtomicUsize,

    /// Message lookups that fell back to the generic error message
    localization_fallbacks: AtomicUsize,
}

impl SkillMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_handled(&self, handler: Handler) {
        if let Some(index) = Handler::STANDARD_ORDER.iter().position(|h| *h == handler) {
            self.handled[index].fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_conversion(&self) {
        self.conversions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unsupported_conversion(&self) {
        self.unsupported_conversions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error_handled(&self) {
        self.errors_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_localization_fallbacks(&self, count: usize) {
        if count > 0 {
            self.localization_fallbacks.fetch_add(count, Ordering::Relaxed);
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn handled_by(&self, handler: Handler) -> usize {
        Handler::STANDARD_ORDER
            .iter()
            .position(|h| *h == handler)
            .map(|index| self.handled[index].load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let requests = self.requests();
        let errors_handled = self.errors_handled.load(Ordering::Relaxed);
        let error_rate = if requests > 0 {
            (errors_handled as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requests,
            handled: Handler::STANDARD_ORDER
                .iter()
                .map(|handler| (handler.name().to_string(), self.handled_by(*handler)))
                .collect(),
            conversions: self.conversions.load(Ordering::Relaxed),
            unsupported_conversions: self.unsupported_conversions.load(Ordering::Relaxed),
            errors_handled,
            error_rate,
            localization_fallbacks: self.localization_fallbacks.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub requests: usize,
    pub handled: BTreeMap<String, usize>,
    pub conversions: usize,
    pub unsupported_conversions: usize,
    pub errors_handled: usize,
    /// Errors handled as a percentage of requests (0-100)
    pub error_rate: f64,
    pub localization_fallbacks: usize,
}
