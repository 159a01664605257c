//! Quantity and unit extraction from the text following an item name.

use super::patterns::{NUMBER, QUANTITY_WITH_UNIT};
use super::units::UnitVocabulary;
use super::{ExtractionMatch, FieldExtractor};

/// A quantity as written, with the unit found next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    /// Digits with an optional decimal part, untouched.
    pub amount: String,
    /// Unit in its configured spelling.
    pub unit: Option<String>,
}

/// Locates `(word)? number (word)?` and keeps whichever word is a unit.
///
/// When both neighbours are units the one after the number wins.
pub struct QuantityExtractor<'u> {
    units: &'u UnitVocabulary,
}

impl<'u> QuantityExtractor<'u> {
    pub fn new(units: &'u UnitVocabulary) -> Self {
        Self { units }
    }

    fn to_match(
        &self,
        text: &str,
        caps: &regex::Captures<'_>,
    ) -> Option<ExtractionMatch<Quantity>> {
        let whole = caps.get(0)?;
        let number = caps.get(2)?;

        // "1,5 kg": a comma decimal would otherwise be cut to "1".
        let mut rest = text[number.end()..].chars();
        if rest.next() == Some(',') && rest.next().is_some_and(|c| c.is_ascii_digit()) {
            return None;
        }
        let amount = number.as_str().to_string();

        let mut unit = None;
        for word in [caps.get(1), caps.get(3)].into_iter().flatten() {
            if let Some(canonical) = self.units.canonical(word.as_str()) {
                unit = Some(canonical.to_string());
            }
        }

        Some(ExtractionMatch::new(
            Quantity { amount, unit },
            whole.start(),
            whole.end(),
            whole.as_str(),
        ))
    }
}

impl FieldExtractor for QuantityExtractor<'_> {
    type Output = ExtractionMatch<Quantity>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        QUANTITY_WITH_UNIT
            .captures(text)
            .and_then(|caps| self.to_match(text, &caps))
    }
}

/// Up to `limit` numeric tokens from `text`, in order.
pub fn trailing_numbers(text: &str, limit: usize) -> Vec<String> {
    NUMBER
        .find_iter(text)
        .take(limit)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn units() -> UnitVocabulary {
        UnitVocabulary::new(["kg", "ltr", "pcs", "box"])
    }

    fn quantity(amount: &str, unit: Option<&str>) -> Quantity {
        Quantity {
            amount: amount.to_string(),
            unit: unit.map(String::from),
        }
    }

    #[test]
    fn test_unit_after_number() {
        let units = units();
        let q = QuantityExtractor::new(&units).extract(" 5 kg").unwrap();
        assert_eq!(q.value, quantity("5", Some("kg")));
    }

    #[test]
    fn test_unit_before_number() {
        let units = units();
        let q = QuantityExtractor::new(&units).extract(" KG 5").unwrap();
        assert_eq!(q.value, quantity("5", Some("kg")));
    }

    #[test]
    fn test_after_wins_when_both_are_units() {
        let units = units();
        let q = QuantityExtractor::new(&units).extract(" box 3 pcs").unwrap();
        assert_eq!(q.value, quantity("3", Some("pcs")));
    }

    #[test]
    fn test_decimal_kept_verbatim_and_no_space() {
        let units = units();
        let q = QuantityExtractor::new(&units).extract(" 2.50ltr").unwrap();
        assert_eq!(q.value, quantity("2.50", Some("ltr")));
    }

    #[test]
    fn test_unknown_words_give_no_unit() {
        let units = units();
        let q = QuantityExtractor::new(&units).extract(" fresh 4 packs").unwrap();
        assert_eq!(q.value, quantity("4", None));
        assert_eq!(q.source, "fresh 4 packs");
    }

    #[test]
    fn test_words_are_not_numbers() {
        let units = units();
        assert!(QuantityExtractor::new(&units).extract(" two fifty").is_none());
        assert!(QuantityExtractor::new(&units).extract("").is_none());
    }

    #[test]
    fn test_comma_decimal_is_not_truncated() {
        let units = units();
        assert!(QuantityExtractor::new(&units).extract(" 1,5 kg").is_none());

        let q = QuantityExtractor::new(&units).extract(" 3, kg").unwrap();
        assert_eq!(q.value, quantity("3", None));
    }

    #[test]
    fn test_trailing_numbers() {
        assert_eq!(trailing_numbers(" @ 45.5 = 227.50 ok 9", 2), vec!["45.5", "227.50"]);
        assert!(trailing_numbers(" none", 2).is_empty());
    }
}
