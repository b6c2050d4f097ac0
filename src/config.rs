use crate::i18n::{primary_subtag, Language};
use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_SPEECH_PREFIX: &str = "Convertidor de Keren. ";

#[derive(Debug, Clone)]
pub struct Config {
    // Webhook
    pub port: u16,

    // Localization
    pub default_locale: String,
    pub speech_prefix: String,
    pub strict_localization: bool,

    // Request verification
    pub skill_id: Option<String>,
    pub skill_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_locale =
            std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());
        // Must name a bundled locale; region subtags are dropped
        let default_locale = Language::from_code(&primary_subtag(&default_locale))
            .context("DEFAULT_LOCALE has no message bundle")?
            .code()
            .to_string();

        Ok(Self {
            // Webhook
            port: match std::env::var("PORT") {
                Ok(v) => v.parse().context("PORT must be a valid port number")?,
                Err(_) => DEFAULT_PORT,
            },

            // Localization
            default_locale,
            speech_prefix: std::env::var("SPEECH_PREFIX")
                .unwrap_or_else(|_| DEFAULT_SPEECH_PREFIX.to_string()),
            strict_localization: std::env::var("STRICT_LOCALIZATION")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),

            // Request verification (disabled when unset or blank)
            skill_id: non_empty_var("SKILL_ID"),
            skill_api_key: non_empty_var("SKILL_API_KEY"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            default_locale: DEFAULT_LOCALE.to_string(),
            speech_prefix: DEFAULT_SPEECH_PREFIX.to_string(),
            strict_localization: false,
            skill_id: None,
            skill_api_key: None,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
