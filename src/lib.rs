//! Unit converter voice skill.
//!
//! Converts length units (feet, inches and yards in English; metros,
//! centímetros and kilómetros in Spanish) in response to voice requests and
//! answers with localized speech.
//!
//! # Architecture
//!
//! - `envelope` / `response`: inbound request and outbound response documents
//! - `conversion`: per-locale conversion tables and the lookup
//! - `i18n`: locale registry, message bundles and the per-request `Localizer`
//! - `handlers`: the request handlers and the error handler
//! - `skill`: the dispatcher and its interceptor chain
//! - `server`: the HTTP webhook that hosts the skill
//! - `config` / `security` / `metrics`: environment settings, caller
//!   verification and dispatch counters

pub mod config;
pub mod conversion;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod i18n;
pub mod metrics;
pub mod response;
pub mod security;
pub mod server;
pub mod skill;

pub use error::SkillError;
pub use skill::{Skill, SkillSettings};
