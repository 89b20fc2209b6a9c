use serde::{Deserialize, Serialize};

use crate::term::MAX_TERM_MONTHS;

/// Represents the payment details for a single month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationPayment {
    /// 1-based index of the period within the schedule.
    pub month: u32,
    /// The fixed total payment for the period.
    pub payment: f64,
    /// The portion of the payment that reduces the outstanding balance.
    pub principal: f64,
    /// The portion of the payment that covers the interest accrued this period.
    pub interest: f64,
    /// The remaining balance after the payment, never below zero.
    pub balance: f64,
    /// Projected property value at this month, present only when an inflation
    /// adjustment was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_property_value: Option<f64>,
}

/// Contains the results of a fixed payment mortgage calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageCalculation {
    /// The fixed monthly payment amount.
    pub monthly_payment: f64,
    /// `total_amount - principal`, computed from the nominal term.
    pub total_interest: f64,
    /// `monthly_payment * total_months`, computed from the nominal term.
    pub total_amount: f64,
    /// Payment details ordered by month. Never longer than the term; shorter
    /// only when the balance hits zero before the last period.
    pub amortization_schedule: Vec<AmortizationPayment>,
}

/// Compound growth applied to a property value along the schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationAdjustment {
    /// Property value at month 0, in currency units.
    pub current_property_value: f64,
    /// Yearly inflation in percent; negative values shrink the value.
    pub expected_yearly_inflation: f64,
}

impl InflationAdjustment {
    /// Returns an adjustment only when both inputs are given and the property
    /// value is positive.
    pub fn from_inputs(
        current_property_value: Option<f64>,
        expected_yearly_inflation: Option<f64>,
    ) -> Option<Self> {
        match (current_property_value, expected_yearly_inflation) {
            (Some(value), Some(inflation)) if value > 0.0 => Some(Self {
                current_property_value: value,
                expected_yearly_inflation: inflation,
            }),
            _ => None,
        }
    }

    /// The projected value at the end of `month`, rounded to whole units.
    pub fn value_at(&self, month: u32) -> f64 {
        calculate_inflation_adjusted_value(
            self.current_property_value,
            self.expected_yearly_inflation,
            f64::from(month) / 12.0,
        )
    }
}

/// Projects `current_value` forward by `years` (fractional years allowed) of
/// compound growth at `inflation_rate` percent per year, rounded to whole units.
pub fn calculate_inflation_adjusted_value(current_value: f64, inflation_rate: f64, years: f64) -> f64 {
    (current_value * (1.0 + inflation_rate / 100.0).powf(years)).round()
}

/// Converts an annual percentage rate to its nominal monthly fraction (7.5 -> 0.00625).
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Calculates the fixed monthly payment and the full amortization schedule.
///
/// The payment uses the annuity formula: PMT = P * [i(1 + i)^n] / [(1 + i)^n – 1]
///
/// # Arguments
///
/// * `principal` - The loan amount.
/// * `annual_rate_percent` - The annual interest rate as a percentage (e.g., 7.5 for 7.5%).
/// * `total_months` - The number of monthly payments.
/// * `current_property_value` - Optional property value to project along the schedule.
/// * `expected_yearly_inflation` - Optional yearly inflation percentage for that projection.
///
/// Inputs are not checked here. A zero rate or a zero term produce NaN or
/// infinite figures; use [`crate::LoanParameters`] to rule those out first.
pub fn calculate_mortgage(
    principal: f64,
    annual_rate_percent: f64,
    total_months: u32,
    current_property_value: Option<f64>,
    expected_yearly_inflation: Option<f64>,
) -> MortgageCalculation {
    let inflation = InflationAdjustment::from_inputs(current_property_value, expected_yearly_inflation);
    calculate_with_adjustment(principal, annual_rate_percent, total_months, inflation)
}

pub(crate) fn calculate_with_adjustment(
    principal: f64,
    annual_rate_percent: f64,
    total_months: u32,
    inflation: Option<InflationAdjustment>,
) -> MortgageCalculation {
    let monthly_rate = monthly_rate(annual_rate_percent);

    let i_plus_1_pow_n = (1.0 + monthly_rate).powf(f64::from(total_months));
    let monthly_payment = principal * (monthly_rate * i_plus_1_pow_n) / (i_plus_1_pow_n - 1.0);

    let mut balance = principal;
    let mut amortization_schedule = Vec::with_capacity(total_months.min(MAX_TERM_MONTHS) as usize);

    for month in 1..=total_months {
        let interest = balance * monthly_rate;
        let principal_payment = monthly_payment - interest;
        balance = (balance - principal_payment).max(0.0);

        amortization_schedule.push(AmortizationPayment {
            month,
            payment: monthly_payment,
            principal: principal_payment,
            interest,
            balance,
            adjusted_property_value: inflation.map(|adjustment| adjustment.value_at(month)),
        });

        if balance == 0.0 {
            break;
        }
    }

    let total_amount = monthly_payment * f64::from(total_months);
    let total_interest = total_amount - principal;

    log::debug!(
        "mortgage: principal={principal} rate={annual_rate_percent}% months={total_months} \
         payment={monthly_payment:.2} periods={} inflation={}",
        amortization_schedule.len(),
        inflation.is_some()
    );

    MortgageCalculation {
        monthly_payment,
        total_interest,
        total_amount,
        amortization_schedule,
    }
}
