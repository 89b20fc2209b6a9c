use crate::amortization::MortgageCalculation;
use crate::i18n::Language;
use crate::share::ShareParams;
use crate::storage::MortgageData;
use crate::term::{to_total_months, to_years_and_months};
use crate::validation::{parse_number, validate_inputs, LoanParameters, ValidationErrors};

/// Loan and property amounts are entered in millions of currency units.
pub const AMOUNT_MULTIPLIER: f64 = 1_000_000.0;

/// Raw calculator form state, kept as the strings the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MortgageInputs {
    /// Loan amount in millions.
    pub loan_amount: String,
    /// Whole years of the term.
    pub loan_term_years: String,
    /// Extra months on top of the years.
    pub loan_term_months: String,
    /// Annual interest rate in percent.
    pub interest_rate: String,
    /// Property value in millions, for the inflation projection.
    pub current_property_value: String,
    /// Yearly inflation in percent, may be negative.
    pub expected_yearly_inflation: String,
    /// Whether the property projection inputs are shown.
    pub advanced_features_expanded: bool,
}

impl MortgageInputs {
    /// Form state restored from persisted data.
    pub fn from_stored(data: &MortgageData) -> Self {
        Self {
            loan_amount: data.loan_amount.clone(),
            loan_term_years: data.loan_term_years.clone(),
            loan_term_months: data.loan_term_months.clone(),
            interest_rate: data.interest_rate.clone(),
            current_property_value: data.current_property_value.clone(),
            expected_yearly_inflation: data.expected_yearly_inflation.clone(),
            advanced_features_expanded: data.advanced_features_expanded,
        }
    }

    /// The form state in its persisted shape.
    pub fn to_stored(&self, language: Language) -> MortgageData {
        MortgageData {
            loan_amount: self.loan_amount.clone(),
            loan_term_years: self.loan_term_years.clone(),
            loan_term_months: self.loan_term_months.clone(),
            interest_rate: self.interest_rate.clone(),
            language,
            current_property_value: self.current_property_value.clone(),
            expected_yearly_inflation: self.expected_yearly_inflation.clone(),
            advanced_features_expanded: self.advanced_features_expanded,
        }
    }

    /// Overrides fields with the ones present in a share link.
    pub fn apply_share(&mut self, params: &ShareParams) {
        if let Some(amount) = &params.amount {
            self.loan_amount = amount.clone();
        }
        if let Some(total_months) = params.term_months {
            let term = to_years_and_months(total_months);
            self.loan_term_years = term.years.to_string();
            self.loan_term_months = term.months.to_string();
        }
        if let Some(rate) = &params.rate {
            self.interest_rate = rate.clone();
        }
        if let Some(value) = &params.property_value {
            self.current_property_value = value.clone();
        }
        if let Some(inflation) = &params.inflation {
            self.expected_yearly_inflation = inflation.clone();
        }
    }

    /// The combined term in months before rounding. Unparseable year or
    /// month fields count as zero.
    pub fn term_months(&self) -> f64 {
        let years = parse_number(&self.loan_term_years).unwrap_or(0.0);
        let months = parse_number(&self.loan_term_months).unwrap_or(0.0);
        years * 12.0 + months
    }

    /// The combined term as a whole month count, or 0 when it does not fit
    /// a `u32`. [`MortgageInputs::validate`] reports such a term as invalid.
    pub fn total_months(&self) -> u32 {
        to_total_months(self.term_months(), 0.0).unwrap_or(0)
    }

    /// Accepts an empty string or a non-negative number. Returns whether the
    /// edit was taken.
    pub fn set_loan_amount(&mut self, value: &str) -> bool {
        accept_if(&mut self.loan_amount, value, |n| n >= 0.0)
    }

    /// Accepts an empty string or a non-negative rate.
    pub fn set_interest_rate(&mut self, value: &str) -> bool {
        accept_if(&mut self.interest_rate, value, |n| n >= 0.0)
    }

    /// Accepts an empty string or a non-negative value in millions.
    pub fn set_current_property_value(&mut self, value: &str) -> bool {
        accept_if(&mut self.current_property_value, value, |n| n >= 0.0)
    }

    /// Accepts an empty string or a percentage between -100 and 100.
    pub fn set_expected_yearly_inflation(&mut self, value: &str) -> bool {
        accept_if(&mut self.expected_yearly_inflation, value, |n| (-100.0..=100.0).contains(&n))
    }

    /// Picking a whole number of years resets the month part.
    pub fn select_years(&mut self, years: &str) {
        self.loan_term_years = years.to_string();
        self.loan_term_months = "0".to_string();
    }

    /// Sets the term from a total month count; anything not positive clears it.
    /// A count too large to split is kept as typed so validation can flag it.
    pub fn set_total_months(&mut self, value: &str) {
        let total = parse_number(value).unwrap_or(0.0);
        if total <= 0.0 {
            self.loan_term_years.clear();
            self.loan_term_months.clear();
            return;
        }

        match to_total_months(0.0, total) {
            Some(total_months) => {
                let term = to_years_and_months(total_months);
                self.loan_term_years = term.years.to_string();
                self.loan_term_months = term.months.to_string();
            }
            None => {
                self.loan_term_years = "0".to_string();
                self.loan_term_months = value.trim().to_string();
            }
        }
    }

    /// Shows or hides the property projection inputs.
    pub fn toggle_advanced_features(&mut self) {
        self.advanced_features_expanded = !self.advanced_features_expanded;
    }

    /// Clears the loan fields. The property projection inputs are kept.
    pub fn reset(&mut self) {
        self.loan_amount.clear();
        self.loan_term_years.clear();
        self.loan_term_months.clear();
        self.interest_rate.clear();
    }

    /// True when any loan field holds text.
    pub fn has_values(&self) -> bool {
        [
            &self.loan_amount,
            &self.loan_term_years,
            &self.loan_term_months,
            &self.interest_rate,
        ]
        .iter()
        .any(|field| !field.is_empty())
    }

    /// Field level errors for the current input.
    pub fn validate(&self) -> ValidationErrors {
        validate_inputs(&self.loan_amount, &self.interest_rate, self.term_months().round())
    }

    /// Validated engine inputs, or `None` while anything is missing or invalid.
    pub fn loan_parameters(&self) -> Option<LoanParameters> {
        if self.loan_amount.trim().is_empty() || self.interest_rate.trim().is_empty() {
            return None;
        }
        if !self.validate().is_empty() {
            return None;
        }

        let principal = parse_number(&self.loan_amount)? * AMOUNT_MULTIPLIER;
        let rate = parse_number(&self.interest_rate)?;
        let property_value = parse_number(&self.current_property_value).map(|value| value * AMOUNT_MULTIPLIER);
        let inflation = parse_number(&self.expected_yearly_inflation);

        LoanParameters::new(principal, rate, self.total_months())
            .ok()
            .map(|params| params.with_inflation(property_value, inflation))
    }

    /// The mortgage for the current input, or `None` while it is incomplete or
    /// invalid. Amounts are scaled from millions before calling the engine.
    pub fn calculation(&self) -> Option<MortgageCalculation> {
        self.loan_parameters().map(|params| params.calculate())
    }
}

fn accept_if(field: &mut String, value: &str, valid: impl Fn(f64) -> bool) -> bool {
    if value.is_empty() {
        field.clear();
        return true;
    }

    match parse_number(value) {
        Some(n) if valid(n) => {
            *field = value.to_string();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn filled() -> MortgageInputs {
        MortgageInputs::from_stored(&MortgageData::default())
    }

    #[test]
    fn test_defaults_calculate() {
        let inputs = filled();
        assert_eq!(inputs.total_months(), 240);

        let calculation = inputs.calculation().unwrap();
        assert_eq!(calculation.amortization_schedule.len(), 240);
        assert!((calculation.monthly_payment - 201_398.298).abs() < 0.01);
    }

    #[rstest]
    #[case("", "7.5", "20")]
    #[case("25", "", "20")]
    #[case("25", "7.5", "")]
    #[case("25", "0", "20")]
    #[case("0", "7.5", "20")]
    #[case("abc", "7.5", "20")]
    fn test_calculation_withheld(#[case] amount: &str, #[case] rate: &str, #[case] years: &str) {
        let inputs = MortgageInputs {
            loan_amount: amount.to_string(),
            interest_rate: rate.to_string(),
            loan_term_years: years.to_string(),
            ..MortgageInputs::default()
        };
        assert!(inputs.calculation().is_none());
    }

    #[test]
    fn test_zero_rate_flagged_by_validation() {
        let inputs = MortgageInputs {
            interest_rate: "0".to_string(),
            ..filled()
        };
        assert_eq!(
            inputs.validate().interest_rate,
            Some(crate::validation::ValidationError::ZeroInterestRate)
        );
        assert!(inputs.calculation().is_none());
    }

    #[test]
    fn test_inflation_inputs_scale_to_millions() {
        let inputs = MortgageInputs {
            current_property_value: "30".to_string(),
            expected_yearly_inflation: "3.5".to_string(),
            ..filled()
        };
        let calculation = inputs.calculation().unwrap();

        assert_eq!(
            calculation.amortization_schedule[11].adjusted_property_value,
            Some(31_050_000.0)
        );
    }

    #[test]
    fn test_incomplete_inflation_inputs_are_ignored() {
        let inputs = MortgageInputs {
            current_property_value: "30".to_string(),
            ..filled()
        };
        let calculation = inputs.calculation().unwrap();
        assert!(calculation.amortization_schedule.iter().all(|p| p.adjusted_property_value.is_none()));
    }

    #[rstest]
    #[case("12.5", true, "12.5")]
    #[case("", true, "")]
    #[case("-1", false, "25")]
    #[case("x", false, "25")]
    fn test_set_loan_amount(#[case] value: &str, #[case] accepted: bool, #[case] stored: &str) {
        let mut inputs = filled();
        assert_eq!(inputs.set_loan_amount(value), accepted);
        assert_eq!(inputs.loan_amount, stored);
    }

    #[rstest]
    #[case("400000000")]
    #[case("10000")]
    #[case("50.1")]
    fn test_oversized_term_is_rejected(#[case] years: &str) {
        let inputs = MortgageInputs {
            loan_term_years: years.to_string(),
            ..filled()
        };

        assert_eq!(
            inputs.validate().total_months,
            Some(crate::validation::ValidationError::InvalidLoanTerm)
        );
        assert!(inputs.loan_parameters().is_none());
        assert!(inputs.calculation().is_none());
    }

    #[test]
    fn test_fifty_year_term_is_accepted() {
        let inputs = MortgageInputs {
            loan_term_years: "50".to_string(),
            ..filled()
        };

        assert!(inputs.validate().is_empty());
        assert_eq!(inputs.calculation().unwrap().amortization_schedule.len(), 600);
    }

    #[test]
    fn test_huge_total_months_stays_invalid() {
        let mut inputs = filled();
        inputs.set_total_months("99999999999");

        assert_eq!(inputs.loan_term_years, "0");
        assert_eq!(inputs.loan_term_months, "99999999999");
        assert!(inputs.validate().total_months.is_some());
        assert!(inputs.calculation().is_none());
    }

    #[test]
    fn test_inflation_bounds() {
        let mut inputs = filled();
        assert!(inputs.set_expected_yearly_inflation("-2.5"));
        assert!(!inputs.set_expected_yearly_inflation("150"));
        assert_eq!(inputs.expected_yearly_inflation, "-2.5");
    }

    #[test]
    fn test_term_handlers() {
        let mut inputs = filled();

        inputs.set_total_months("30");
        assert_eq!((inputs.loan_term_years.as_str(), inputs.loan_term_months.as_str()), ("2", "6"));

        inputs.select_years("15");
        assert_eq!(inputs.total_months(), 180);
        assert_eq!(inputs.loan_term_months, "0");

        inputs.set_total_months("0");
        assert!(inputs.loan_term_years.is_empty() && inputs.loan_term_months.is_empty());
        assert_eq!(inputs.total_months(), 0);
    }

    #[test]
    fn test_reset_and_has_values() {
        let mut inputs = filled();
        assert!(inputs.has_values());

        inputs.toggle_advanced_features();
        inputs.reset();
        assert!(!inputs.has_values());
        assert!(inputs.advanced_features_expanded);
        assert!(inputs.calculation().is_none());
    }

    #[test]
    fn test_share_params_override_storage() {
        let mut inputs = filled();
        inputs.apply_share(&ShareParams::from_query("amt=40&term=246&rate=6.1"));

        assert_eq!(inputs.loan_amount, "40");
        assert_eq!(inputs.loan_term_years, "20");
        assert_eq!(inputs.loan_term_months, "6");
        assert_eq!(inputs.interest_rate, "6.1");
        assert_eq!(ShareParams::from_inputs(&inputs).term_months, Some(246));
    }

    #[test]
    fn test_storage_round_trip() {
        let mut inputs = filled();
        inputs.set_current_property_value("45");
        let stored = inputs.to_stored(Language::En);

        assert_eq!(stored.language, Language::En);
        assert_eq!(MortgageInputs::from_stored(&stored), inputs);
    }
}
