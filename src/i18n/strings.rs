use std::collections::HashMap;

/// Message keys referenced by the handlers.
pub mod keys {
    pub const WELCOME_MESSAGE: &str = "WELCOME_MESSAGE";
    pub const HELP_MESSAGE: &str = "HELP_MESSAGE";
    pub const GOODBYE_MESSAGE: &str = "GOODBYE_MESSAGE";
    pub const FALLBACK_MESSAGE: &str = "FALLBACK_MESSAGE";
    pub const ERROR_MESSAGE: &str = "ERROR_MESSAGE";
    /// Placeholders: amount, source unit, converted value, target unit
    pub const CONVERT_MESSAGE: &str = "CONVERT_MESSAGE";
    /// Placeholders: source unit, target unit
    pub const UNSUPPORTED_CONVERSION: &str = "UNSUPPORTED_CONVERSION";
    /// Placeholders: intent name
    pub const REFLECTOR_MESSAGE: &str = "REFLECTOR_MESSAGE";

    /// Every key a complete bundle must define.
    pub const ALL: [&str; 8] = [
        WELCOME_MESSAGE,
        HELP_MESSAGE,
        GOODBYE_MESSAGE,
        FALLBACK_MESSAGE,
        ERROR_MESSAGE,
        CONVERT_MESSAGE,
        UNSUPPORTED_CONVERSION,
        REFLECTOR_MESSAGE,
    ];
}

/// Message templates for one locale, keyed by message key.
///
/// Templates use `%.2f` for numbers and `%s` for text, filled in order.
#[derive(Debug, Clone)]
pub struct LocaleBundle {
    locale: &'static str,
    messages: HashMap<&'static str, &'static str>,
}

impl LocaleBundle {
    pub fn new(locale: &'static str, entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            locale,
            messages: entries.iter().copied().collect(),
        }
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.messages.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.messages.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ==================== English Strings ====================

pub const ENGLISH_MESSAGES: &[(&str, &str)] = &[
    (
        keys::WELCOME_MESSAGE,
        "Welcome to the unit converter. What would you like to convert?",
    ),
    (
        keys::HELP_MESSAGE,
        "You can ask me to convert length units, for example: convert 5 meters to feet. How can I help you?",
    ),
    (keys::GOODBYE_MESSAGE, "Goodbye!"),
    (
        keys::FALLBACK_MESSAGE,
        "Sorry, I don't know about that. Please try again.",
    ),
    (
        keys::ERROR_MESSAGE,
        "Sorry, there was a problem. Please try again.",
    ),
    (keys::CONVERT_MESSAGE, "%.2f %s is %.2f %s."),
    (
        keys::UNSUPPORTED_CONVERSION,
        "Sorry, I can't convert from %s to %s.",
    ),
    (keys::REFLECTOR_MESSAGE, "You just triggered %s."),
];

// ==================== Spanish Strings ====================

pub const SPANISH_MESSAGES: &[(&str, &str)] = &[
    (
        keys::WELCOME_MESSAGE,
        "Bienvenido al conversor. ¿Qué cantidad te gustaría convertir?",
    ),
    (
        keys::HELP_MESSAGE,
        "Puedes pedirme que convierta unidades de longitud, por ejemplo: convierte 5 metros a pies. ¿Cómo puedo ayudarte?",
    ),
    (keys::GOODBYE_MESSAGE, "¡Adiós!"),
    (
        keys::FALLBACK_MESSAGE,
        "Lo siento, no sé sobre eso. Por favor intenta de nuevo.",
    ),
    (
        keys::ERROR_MESSAGE,
        "Lo siento, tuve problemas para hacer lo que pediste. Por favor intenta nuevamente.",
    ),
    (keys::CONVERT_MESSAGE, "%.2f %s son %.2f %s."),
    (
        keys::UNSUPPORTED_CONVERSION,
        "Lo siento, no puedo convertir de %s a %s.",
    ),
    (keys::REFLECTOR_MESSAGE, "Acabas de activar %s."),
];
