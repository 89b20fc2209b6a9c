//! Display formatting of calculation results.
//!
//! The engine works in `f64`; amounts are converted to [`Decimal`] here so
//! that rounding for display is exact and half-away-from-zero.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::i18n::Language;

const NO_BREAK_SPACE: char = '\u{a0}';

/// Formats amounts as whole Hungarian forints in the conventions of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormatter {
    language: Language,
}

impl CurrencyFormatter {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// `hu`: `1 234 567 Ft`, `en`: `HUF 1,234,567` (no-break spaces).
    /// Amounts that cannot be represented format as `-`.
    pub fn format(&self, amount: f64) -> String {
        let Some(rounded) = round_to_units(amount) else {
            return "-".to_string();
        };

        let sign = if rounded.is_sign_negative() { "-" } else { "" };
        match self.language {
            Language::Hu => {
                let digits = group_digits(rounded.abs(), NO_BREAK_SPACE);
                format!("{sign}{digits}{NO_BREAK_SPACE}Ft")
            }
            Language::En => {
                let digits = group_digits(rounded.abs(), ',');
                format!("{sign}HUF{NO_BREAK_SPACE}{digits}")
            }
        }
    }
}

/// Rounds to whole units. `None` for NaN, infinities and values outside the
/// decimal range.
pub fn round_to_units(amount: f64) -> Option<Decimal> {
    let rounded = Decimal::from_f64_retain(amount)?.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return Some(Decimal::ZERO);
    }
    Some(rounded)
}

/// Renders a ratio as a percentage with one decimal (`0.375` -> `37.5%`).
pub fn format_percent(ratio: f64) -> String {
    match Decimal::from_f64_retain(ratio) {
        Some(ratio) => {
            let percent = (ratio * dec!(100)).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            format!("{percent:.1}%")
        }
        None => "-".to_string(),
    }
}

fn group_digits(value: Decimal, separator: char) -> String {
    let digits = format!("{value:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Language::Hu, 201_398.298, "201\u{a0}398\u{a0}Ft")]
    #[case(Language::En, 201_398.298, "HUF\u{a0}201,398")]
    #[case(Language::Hu, 25_000_000.0, "25\u{a0}000\u{a0}000\u{a0}Ft")]
    #[case(Language::En, 999.5, "HUF\u{a0}1,000")]
    #[case(Language::En, 0.2, "HUF\u{a0}0")]
    #[case(Language::En, -0.2, "HUF\u{a0}0")]
    #[case(Language::Hu, -1_234.5, "-1\u{a0}235\u{a0}Ft")]
    #[case(Language::En, f64::NAN, "-")]
    #[case(Language::Hu, f64::INFINITY, "-")]
    fn test_format_currency(#[case] language: Language, #[case] amount: f64, #[case] expected: &str) {
        assert_eq!(CurrencyFormatter::new(language).format(amount), expected);
    }

    #[test]
    fn test_round_to_units() {
        assert_eq!(round_to_units(2.5), Some(dec!(3)));
        assert_eq!(round_to_units(-2.5), Some(dec!(-3)));
        assert_eq!(round_to_units(f64::NAN), None);
    }

    #[rstest]
    #[case(0.375, "37.5%")]
    #[case(0.5, "50.0%")]
    #[case(0.12345, "12.3%")]
    #[case(1.0, "100.0%")]
    fn test_format_percent(#[case] ratio: f64, #[case] expected: &str) {
        assert_eq!(format_percent(ratio), expected);
    }
}
