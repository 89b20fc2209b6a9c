use serde::{Deserialize, Serialize};

/// Longest term the calculator accepts: 50 years of monthly payments.
pub const MAX_TERM_MONTHS: u32 = 600;

/// A loan term split into whole years and the remaining months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerm {
    /// Whole years of the term.
    pub years: u32,
    /// Months left over after the whole years, always below 12.
    pub months: u32,
}

impl LoanTerm {
    /// The term as a single month count.
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

/// Splits a month count into years and leftover months (`30` -> 2 years, 6 months).
pub fn to_years_and_months(total_months: u32) -> LoanTerm {
    LoanTerm {
        years: total_months / 12,
        months: total_months % 12,
    }
}

/// Combines years and months into a whole month count.
///
/// Fractional inputs are accepted (the form layer parses free text) and the
/// sum is rounded to the nearest month. A negative sum gives `Some(0)`; a
/// non-finite sum or one beyond `u32::MAX` months gives `None`.
pub fn to_total_months(years: f64, months: f64) -> Option<u32> {
    let total = (years * 12.0 + months).round();
    if !total.is_finite() || total > f64::from(u32::MAX) {
        return None;
    }
    if total <= 0.0 {
        return Some(0);
    }

    Some(total as u32)
}
