use crate::conversion::{convert, normalize_unit, UnsupportedConversion};
use crate::envelope::RequestEnvelope;
use crate::error::SkillError;
use crate::handlers::{intents, HandlerInput};
use crate::i18n::{keys, FormatArg};
use crate::response::Response;
use tracing::{debug, info};

/// Slot names for the source unit. The first is the interaction model's name.
pub const SOURCE_UNIT_SLOTS: [&str; 2] = ["deUnidad", "fromUnit"];
/// Slot names for the target unit.
pub const TARGET_UNIT_SLOTS: [&str; 2] = ["UnidadFinal", "toUnit"];
/// Slot names for the amount.
pub const AMOUNT_SLOTS: [&str; 2] = ["cantidad", "amount"];

pub(super) fn can_handle(input: &HandlerInput<'_>) -> bool {
    input.is_intent(intents::CONVERT)
}

/// Convert the requested amount, or explain that the pair is unsupported.
///
/// The amount is only read for supported pairs, so "feet to kilometers"
/// gets the unsupported message even when no amount was heard.
pub(super) fn handle(input: &HandlerInput<'_>) -> Result<Response, SkillError> {
    let from = normalize_unit(required_slot(input.envelope, &SOURCE_UNIT_SLOTS)?);
    let to = normalize_unit(required_slot(input.envelope, &TARGET_UNIT_SLOTS)?);

    let message = if input.table.supports(&from, &to) {
        let (slot, raw) = amount_slot(input.envelope)?;
        let amount = parse_amount(slot, raw, input.table.family())?;
        match convert(&from, &to, amount, input.table) {
            Ok(converted) if !converted.value.is_finite() => {
                return Err(malformed(slot, raw));
            }
            Ok(converted) => {
                info!(
                    table = input.table.family(),
                    from = %from,
                    to = %to,
                    amount,
                    value = converted.value,
                    "Converted units"
                );
                input.metrics.record_conversion();
                input.t(
                    keys::CONVERT_MESSAGE,
                    &[
                        FormatArg::Number(amount),
                        FormatArg::Text(from),
                        FormatArg::Number(converted.value),
                        FormatArg::Text(converted.unit),
                    ],
                )?
            }
            Err(unsupported) => unsupported_message(input, unsupported)?,
        }
    } else {
        unsupported_message(input, UnsupportedConversion { from, to })?
    };

    let reprompt = input.t(keys::HELP_MESSAGE, &[])?;
    Ok(Response::builder()
        .speak(input.prefixed(&message))
        .reprompt(reprompt)
        .build())
}

fn unsupported_message(
    input: &HandlerInput<'_>,
    unsupported: UnsupportedConversion,
) -> Result<String, SkillError> {
    debug!(table = input.table.family(), "{}", unsupported);
    input.metrics.record_unsupported_conversion();
    input.t(
        keys::UNSUPPORTED_CONVERSION,
        &[
            FormatArg::Text(unsupported.from),
            FormatArg::Text(unsupported.to),
        ],
    )
}

fn required_slot<'a>(envelope: &'a RequestEnvelope, names: &[&'a str]) -> Result<&'a str, SkillError> {
    envelope
        .first_slot_value(names)
        .map(|(_, value)| value)
        .ok_or_else(|| SkillError::MissingSlot(names[0].to_string()))
}

fn amount_slot(envelope: &RequestEnvelope) -> Result<(&str, &str), SkillError> {
    envelope
        .first_slot_value(&AMOUNT_SLOTS)
        .ok_or_else(|| SkillError::MissingSlot(AMOUNT_SLOTS[0].to_string()))
}

/// Parse the spoken amount.
///
/// With the Spanish table a single comma is the decimal separator ("1,5").
/// Otherwise commas group thousands ("1,000").
fn parse_amount(slot: &str, raw: &str, family: &str) -> Result<f64, SkillError> {
    let decimal_comma = family == "es" && raw.matches(',').count() == 1 && !raw.contains('.');
    let normalized = if decimal_comma {
        raw.replace(',', ".")
    } else {
        raw.replace(',', "")
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| malformed(slot, raw))
}

fn malformed(slot: &str, raw: &str) -> SkillError {
    SkillError::MalformedSlot {
        slot: slot.to_string(),
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::with_input;

    fn convert_request(locale: &str, slots: &[(&str, &str)]) -> RequestEnvelope {
        slots
            .iter()
            .fold(RequestEnvelope::intent(locale, intents::CONVERT), |envelope, (name, value)| {
                envelope.with_slot(name, value)
            })
    }

    fn speech(envelope: &RequestEnvelope) -> Result<String, SkillError> {
        with_input(envelope, handle).map(|response| response.speech.unwrap_or_default())
    }

    // ==================== Conversion Tests ====================

    #[test]
    fn test_feet_to_inches_english() {
        let envelope = convert_request(
            "en-US",
            &[("deUnidad", "Feet"), ("UnidadFinal", "inches"), ("cantidad", "5")],
        );
        let response = with_input(&envelope, handle).unwrap();
        assert!(response
            .speech
            .unwrap()
            .contains("5.00 feet is 60.00 inches."));
        assert!(response.reprompt.unwrap().starts_with("You can ask me"));
    }

    #[test]
    fn test_metros_to_centimetros_spanish() {
        let envelope = convert_request(
            "es-ES",
            &[("deUnidad", "metros"), ("UnidadFinal", "centímetros"), ("cantidad", "2")],
        );
        assert_eq!(
            speech(&envelope).unwrap(),
            "Convertidor de Keren. 2.00 metros son 200.00 centímetros."
        );
    }

    #[test]
    fn test_alias_slot_names() {
        let envelope = convert_request(
            "en-US",
            &[("fromUnit", "yards"), ("toUnit", "feet"), ("amount", "2")],
        );
        assert!(speech(&envelope).unwrap().contains("2.00 yards is 6.00 feet."));
    }

    #[test]
    fn test_decimal_comma_amount() {
        let envelope = convert_request(
            "es-MX",
            &[("deUnidad", "kilómetros"), ("UnidadFinal", "metros"), ("cantidad", "1,5")],
        );
        assert!(speech(&envelope).unwrap().contains("1.50 kilómetros son 1500.00 metros."));
    }

    #[test]
    fn test_thousands_separator_in_english() {
        let envelope = convert_request(
            "en-US",
            &[("deUnidad", "feet"), ("UnidadFinal", "inches"), ("cantidad", "1,000")],
        );
        assert!(speech(&envelope).unwrap().contains("1000.00 feet is 12000.00 inches."));
    }

    #[test]
    fn test_overflowing_result_rejected() {
        let envelope = convert_request(
            "es-ES",
            &[("deUnidad", "kilómetros"), ("UnidadFinal", "centímetros"), ("cantidad", "1e305")],
        );
        let err = speech(&envelope).unwrap_err();
        assert!(matches!(
            err,
            SkillError::MalformedSlot { ref slot, ref value } if slot == "cantidad" && value == "1e305"
        ));
    }

    #[test]
    fn test_parse_amount_separators() {
        assert_eq!(parse_amount("cantidad", "2,5", "es").unwrap(), 2.5);
        assert_eq!(parse_amount("cantidad", "2,5", "en").unwrap(), 25.0);
        assert_eq!(parse_amount("cantidad", "1,000,000", "en").unwrap(), 1_000_000.0);
        assert!(parse_amount("cantidad", "1,2,3", "es").is_ok());
        assert!(parse_amount("cantidad", "", "en").is_err());
    }

    // ==================== Unsupported Tests ====================

    #[test]
    fn test_unsupported_pair_without_amount() {
        let envelope = convert_request("en-US", &[("fromUnit", "feet"), ("toUnit", "kilometers")]);
        assert_eq!(
            speech(&envelope).unwrap(),
            "Convertidor de Keren. Sorry, I can't convert from feet to kilometers."
        );
    }

    #[test]
    fn test_spanish_units_unsupported_in_english_table() {
        let envelope = convert_request(
            "en-US",
            &[("deUnidad", "Metros"), ("UnidadFinal", "centímetros"), ("cantidad", "1")],
        );
        assert!(speech(&envelope)
            .unwrap()
            .contains("Sorry, I can't convert from metros to centímetros."));
    }

    #[test]
    fn test_unsupported_counts_metric() {
        let envelope = convert_request("es-ES", &[("deUnidad", "pies"), ("UnidadFinal", "metros")]);
        let (unsupported, conversions) = with_input(&envelope, |input| {
            handle(input).unwrap();
            let report = input.metrics.report();
            (report.unsupported_conversions, report.conversions)
        });
        assert_eq!((unsupported, conversions), (1, 0));
    }

    // ==================== Slot Error Tests ====================

    #[test]
    fn test_missing_amount_for_supported_pair() {
        let envelope = convert_request("en-US", &[("deUnidad", "feet"), ("UnidadFinal", "inches")]);
        let err = speech(&envelope).unwrap_err();
        assert!(matches!(err, SkillError::MissingSlot(ref slot) if slot == "cantidad"));
    }

    #[test]
    fn test_non_numeric_amount() {
        let envelope = convert_request(
            "en-US",
            &[("deUnidad", "feet"), ("UnidadFinal", "inches"), ("cantidad", "five")],
        );
        let err = speech(&envelope).unwrap_err();
        assert!(matches!(
            err,
            SkillError::MalformedSlot { ref slot, ref value } if slot == "cantidad" && value == "five"
        ));
    }

    #[test]
    fn test_infinite_amount_rejected() {
        let envelope = convert_request(
            "en-US",
            &[("deUnidad", "feet"), ("UnidadFinal", "inches"), ("cantidad", "inf")],
        );
        assert!(matches!(speech(&envelope), Err(SkillError::MalformedSlot { .. })));
    }

    #[test]
    fn test_missing_unit_slot() {
        let envelope = convert_request("en-US", &[("UnidadFinal", "inches"), ("cantidad", "3")]);
        let err = speech(&envelope).unwrap_err();
        assert!(matches!(err, SkillError::MissingSlot(ref slot) if slot == "deUnidad"));
    }
}
