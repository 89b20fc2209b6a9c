use thiserror::Error;

use crate::amortization::{calculate_with_adjustment, monthly_rate, InflationAdjustment, MortgageCalculation};
use crate::i18n::Translations;
use crate::term::MAX_TERM_MONTHS;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid loan amount: must be a number greater than zero")]
    InvalidLoanAmount,

    #[error("invalid interest rate: must be a non-negative number")]
    InvalidInterestRate,

    #[error("interest rate cannot be zero")]
    ZeroInterestRate,

    #[error("invalid loan term: must be between 1 and 600 months")]
    InvalidLoanTerm,
}

impl ValidationError {
    /// The user facing message in the given language.
    pub fn message(&self, t: &Translations) -> &'static str {
        match self {
            ValidationError::InvalidLoanAmount => t.invalid_loan_amount,
            ValidationError::InvalidInterestRate => t.invalid_interest_rate,
            ValidationError::ZeroInterestRate => t.zero_interest_rate,
            ValidationError::InvalidLoanTerm => t.invalid_loan_term,
        }
    }
}

/// Field level validation outcome for the calculator form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Set when the loan amount is not a positive number.
    pub loan_amount: Option<ValidationError>,
    /// Set when the rate is not a number, negative or zero.
    pub interest_rate: Option<ValidationError>,
    /// Set when the combined term is outside 1..=[`MAX_TERM_MONTHS`].
    pub total_months: Option<ValidationError>,
}

impl ValidationErrors {
    /// True when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.loan_amount.is_none() && self.interest_rate.is_none() && self.total_months.is_none()
    }

    /// The errors present, in field order.
    pub fn iter(&self) -> impl Iterator<Item = ValidationError> {
        [self.loan_amount, self.interest_rate, self.total_months]
            .into_iter()
            .flatten()
    }
}

/// Parses a form field as a finite number. Surrounding whitespace is ignored.
pub(crate) fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Validates raw form input.
///
/// Empty fields are not reported: a missing value only withholds the
/// calculation. `term_months` is the combined term; zero means not entered,
/// anything else must lie within 1..=[`MAX_TERM_MONTHS`].
pub fn validate_inputs(loan_amount: &str, interest_rate: &str, term_months: f64) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if !loan_amount.trim().is_empty() {
        match parse_number(loan_amount) {
            Some(principal) if principal > 0.0 => {}
            _ => errors.loan_amount = Some(ValidationError::InvalidLoanAmount),
        }
    }

    if !interest_rate.trim().is_empty() {
        errors.interest_rate = match parse_number(interest_rate) {
            Some(rate) if rate < 0.0 => Some(ValidationError::InvalidInterestRate),
            Some(rate) if rate == 0.0 => Some(ValidationError::ZeroInterestRate),
            Some(_) => None,
            None => Some(ValidationError::InvalidInterestRate),
        };
    }

    let below_one_month = term_months > 0.0 && term_months < 1.0;
    if term_months.is_nan() || below_one_month || term_months > f64::from(MAX_TERM_MONTHS) {
        errors.total_months = Some(ValidationError::InvalidLoanTerm);
    }

    errors
}

/// Loan inputs that are known to give a well defined schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanParameters {
    principal: f64,
    annual_rate_percent: f64,
    total_months: u32,
    inflation: Option<InflationAdjustment>,
}

impl LoanParameters {
    /// Checks the engine preconditions: a positive finite principal, a
    /// positive rate whose compound growth over the term stays finite, and a
    /// term of 1..=[`MAX_TERM_MONTHS`] months.
    pub fn new(principal: f64, annual_rate_percent: f64, total_months: u32) -> Result<Self, ValidationError> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(ValidationError::InvalidLoanAmount);
        }
        if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
            return Err(ValidationError::InvalidInterestRate);
        }
        if annual_rate_percent == 0.0 {
            return Err(ValidationError::ZeroInterestRate);
        }
        if total_months == 0 || total_months > MAX_TERM_MONTHS {
            return Err(ValidationError::InvalidLoanTerm);
        }
        if !(1.0 + monthly_rate(annual_rate_percent)).powf(f64::from(total_months)).is_finite() {
            return Err(ValidationError::InvalidInterestRate);
        }

        Ok(Self {
            principal,
            annual_rate_percent,
            total_months,
            inflation: None,
        })
    }

    /// Attaches a property value projection. Ignored unless both values are
    /// given and the property value is positive.
    pub fn with_inflation(
        mut self,
        current_property_value: Option<f64>,
        expected_yearly_inflation: Option<f64>,
    ) -> Self {
        self.inflation = InflationAdjustment::from_inputs(current_property_value, expected_yearly_inflation);
        self
    }

    /// Loan amount in currency units.
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Annual rate as a percentage.
    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    /// Number of monthly payments.
    pub fn total_months(&self) -> u32 {
        self.total_months
    }

    /// The property value projection, if one was attached.
    pub fn inflation(&self) -> Option<InflationAdjustment> {
        self.inflation
    }

    /// Runs the amortization engine on these parameters.
    pub fn calculate(&self) -> MortgageCalculation {
        calculate_with_adjustment(
            self.principal,
            self.annual_rate_percent,
            self.total_months,
            self.inflation,
        )
    }
}
