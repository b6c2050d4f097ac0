//! Conversion tables and the unit lookup.
//!
//! Each locale family owns one table that maps a source unit to the
//! multipliers of the target units it converts to. Only pairs that are listed
//! directly are supported. Nothing is derived: `yards -> feet` does not imply
//! `feet -> yards`, and `metros -> kilómetros` plus `kilómetros -> centímetros`
//! does not give a path through both legs.

use crate::i18n::primary_subtag;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// A conversion between two units that the active table does not list.
///
/// This is a normal outcome, spoken back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert from '{from}' to '{to}'")]
pub struct UnsupportedConversion {
    pub from: String,
    pub to: String,
}

/// Result of a successful lookup, tagged with the target unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedValue {
    pub value: f64,
    pub unit: String,
}

/// Multipliers for one locale family.
#[derive(Debug, Clone)]
pub struct ConversionTable {
    family: &'static str,
    rates: HashMap<&'static str, HashMap<&'static str, f64>>,
}

type RateRow = (&'static str, &'static [(&'static str, f64)]);

const ENGLISH_RATES: &[RateRow] = &[
    ("feet", &[("inches", 12.0), ("yards", 0.333333)]),
    ("inches", &[("feet", 0.0833333), ("yards", 0.0277778)]),
    ("yards", &[("feet", 3.0), ("inches", 36.0)]),
];

const SPANISH_RATES: &[RateRow] = &[
    ("metros", &[("centímetros", 100.0), ("kilómetros", 0.001)]),
    ("centímetros", &[("metros", 0.01), ("kilómetros", 0.00001)]),
    ("kilómetros", &[("metros", 1000.0), ("centímetros", 100000.0)]),
];

static ENGLISH_TABLE: OnceLock<ConversionTable> = OnceLock::new();
static SPANISH_TABLE: OnceLock<ConversionTable> = OnceLock::new();

impl ConversionTable {
    /// Build a table from `(from, [(to, multiplier)])` rows.
    pub fn from_rows(family: &'static str, rows: &[RateRow]) -> Self {
        let rates = rows
            .iter()
            .map(|(from, targets)| (*from, targets.iter().copied().collect()))
            .collect();
        Self { family, rates }
    }

    /// Length units in feet, inches and yards.
    pub fn english() -> &'static ConversionTable {
        ENGLISH_TABLE.get_or_init(|| Self::from_rows("en", ENGLISH_RATES))
    }

    /// Metric units named in Spanish.
    pub fn spanish() -> &'static ConversionTable {
        SPANISH_TABLE.get_or_init(|| Self::from_rows("es", SPANISH_RATES))
    }

    /// Select the table for a request locale.
    ///
    /// English locales get the English table; every other locale, including
    /// ones with no bundle of their own, gets the Spanish table.
    pub fn for_locale(locale: &str) -> &'static ConversionTable {
        if primary_subtag(locale) == "en" {
            Self::english()
        } else {
            Self::spanish()
        }
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Multiplier for a directly listed pair. Unit names must already be
    /// normalized.
    pub fn rate(&self, from: &str, to: &str) -> Option<f64> {
        self.rates.get(from).and_then(|targets| targets.get(to)).copied()
    }

    pub fn supports(&self, from: &str, to: &str) -> bool {
        self.rate(from, to).is_some()
    }

    /// Every listed pair, sorted by source then target unit.
    pub fn pairs(&self) -> Vec<(&'static str, &'static str, f64)> {
        let mut pairs: Vec<_> = self
            .rates
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |(to, rate)| (*from, *to, *rate)))
            .collect();
        pairs.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        pairs
    }

    /// Every unit that appears as a source, sorted.
    pub fn units(&self) -> Vec<&'static str> {
        let mut units: Vec<_> = self.rates.keys().copied().collect();
        units.sort_unstable();
        units
    }
}

/// Normalize a spoken unit name for lookup.
pub fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase()
}

/// Convert `amount` from one unit to another using a single table entry.
pub fn convert(
    from_unit: &str,
    to_unit: &str,
    amount: f64,
    table: &ConversionTable,
) -> Result<ConvertedValue, UnsupportedConversion> {
    let from = normalize_unit(from_unit);
    let to = normalize_unit(to_unit);

    match table.rate(&from, &to) {
        Some(rate) => Ok(ConvertedValue {
            value: amount * rate,
            unit: to,
        }),
        None => Err(UnsupportedConversion { from, to }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Lookup Tests ====================

    #[test]
    fn test_feet_to_inches() {
        let result = convert("feet", "inches", 5.0, ConversionTable::english()).unwrap();
        assert_eq!(result.value, 60.0);
        assert_eq!(result.unit, "inches");
    }

    #[test]
    fn test_unit_names_are_case_normalized() {
        let result = convert("Feet", " INCHES ", 2.0, ConversionTable::english()).unwrap();
        assert_eq!(result.value, 24.0);
        assert_eq!(result.unit, "inches");
    }

    #[test]
    fn test_spanish_accented_units() {
        let result = convert("Metros", "Centímetros", 2.0, ConversionTable::spanish()).unwrap();
        assert_eq!(result.value, 200.0);
        assert_eq!(result.unit, "centímetros");
    }

    #[test]
    fn test_unknown_target_is_unsupported() {
        let err = convert("feet", "kilometers", 1.0, ConversionTable::english()).unwrap_err();
        assert_eq!(
            err,
            UnsupportedConversion {
                from: "feet".to_string(),
                to: "kilometers".to_string(),
            }
        );
    }

    #[test]
    fn test_same_unit_is_unsupported() {
        assert!(convert("feet", "feet", 1.0, ConversionTable::english()).is_err());
    }

    #[test]
    fn test_no_transitive_path() {
        let table = ConversionTable::from_rows(
            "test",
            &[("a", &[("b", 2.0)]), ("b", &[("c", 3.0)])],
        );
        assert!(convert("a", "b", 1.0, &table).is_ok());
        assert!(convert("b", "c", 1.0, &table).is_ok());
        assert!(convert("a", "c", 1.0, &table).is_err());
    }

    #[test]
    fn test_reverse_pair_not_derived() {
        let table = ConversionTable::from_rows("test", &[("a", &[("b", 2.0)])]);
        assert!(convert("b", "a", 1.0, &table).is_err());
    }

    #[test]
    fn test_round_trip_follows_table_literally() {
        let table = ConversionTable::english();
        let yards = convert("feet", "yards", 3.0, table).unwrap();
        let feet = convert("yards", "feet", yards.value, table).unwrap();
        // 3 * 0.333333 * 3, not 3
        assert_eq!(feet.value, 3.0 * 0.333333 * 3.0);
        assert_ne!(feet.value, 3.0);
    }

    #[test]
    fn test_tables_do_not_mix_languages() {
        assert!(convert("metros", "centímetros", 1.0, ConversionTable::english()).is_err());
        assert!(convert("feet", "inches", 1.0, ConversionTable::spanish()).is_err());
    }

    // ==================== Table Selection Tests ====================

    #[test]
    fn test_table_for_english_locales() {
        assert_eq!(ConversionTable::for_locale("en-US").family(), "en");
        assert_eq!(ConversionTable::for_locale("EN_gb").family(), "en");
    }

    #[test]
    fn test_table_for_spanish_locales() {
        assert_eq!(ConversionTable::for_locale("es-ES").family(), "es");
        assert_eq!(ConversionTable::for_locale("es_MX").family(), "es");
    }

    #[test]
    fn test_non_english_locales_use_spanish_table() {
        assert_eq!(ConversionTable::for_locale("fr-FR").family(), "es");
        assert_eq!(ConversionTable::for_locale("de").family(), "es");
        assert_eq!(ConversionTable::for_locale("").family(), "es");
    }

    #[test]
    fn test_table_listing() {
        let table = ConversionTable::english();
        assert_eq!(table.units(), vec!["feet", "inches", "yards"]);
        assert_eq!(table.pairs().len(), 6);
        assert_eq!(table.pairs()[0], ("feet", "inches", 12.0));
    }

    // ==================== Property Tests ====================

    fn all_tables() -> Vec<&'static ConversionTable> {
        vec![ConversionTable::english(), ConversionTable::spanish()]
    }

    proptest! {
        #[test]
        fn prop_listed_pairs_multiply_exactly(amount in -1.0e6f64..1.0e6) {
            for table in all_tables() {
                for (from, to, rate) in table.pairs() {
                    let result = convert(from, to, amount, table).unwrap();
                    prop_assert_eq!(result.value, amount * rate);
                    prop_assert_eq!(result.unit, to);
                }
            }
        }

        #[test]
        fn prop_unlisted_pairs_are_unsupported(from in "[a-zñí]{1,12}", to in "[a-zñí]{1,12}") {
            for table in all_tables() {
                let listed = table.supports(&from, &to);
                let result = convert(&from, &to, 1.0, table);
                prop_assert_eq!(result.is_ok(), listed);
            }
        }
    }
}
