//! Presentation data derived from a [`MortgageCalculation`]: yearly groups,
//! chart samples, the principal/interest split and a CSV export.

use serde::Serialize;

use crate::amortization::{AmortizationPayment, MortgageCalculation};
use crate::format::round_to_units;
use crate::i18n::Translations;

/// Schedules longer than this are shown one row per year.
pub const YEARLY_SAMPLING_THRESHOLD: usize = 120;

/// The payments of one loan year (months 1-12 are year 1).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: u32,
    pub payments_count: u32,
    pub total_payment: f64,
    pub total_principal: f64,
    pub total_interest: f64,
    pub ending_balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_property_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub month: u32,
    pub year: u32,
    pub balance: f64,
    /// Sum of payments up to and including `month`.
    pub cumulative_payment: f64,
    /// Sum of interest up to and including `month`.
    pub cumulative_interest: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_property_value: Option<f64>,
}

/// Principal against total interest, with each part's share of the sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalInterestSplit {
    pub principal: f64,
    pub interest: f64,
}

impl PrincipalInterestSplit {
    pub fn new(principal: f64, calculation: &MortgageCalculation) -> Self {
        Self {
            principal,
            interest: calculation.total_interest,
        }
    }

    pub fn total(&self) -> f64 {
        self.principal + self.interest
    }

    pub fn principal_share(&self) -> f64 {
        self.principal / self.total()
    }

    pub fn interest_share(&self) -> f64 {
        self.interest / self.total()
    }
}

/// The loan year a month falls in.
pub fn year_of(month: u32) -> u32 {
    month.div_ceil(12)
}

pub fn yearly_summaries(calculation: &MortgageCalculation) -> Vec<YearSummary> {
    let mut summaries: Vec<YearSummary> = Vec::new();

    for payment in &calculation.amortization_schedule {
        let year = year_of(payment.month);
        match summaries.last_mut() {
            Some(summary) if summary.year == year => {
                summary.payments_count += 1;
                summary.total_payment += payment.payment;
                summary.total_principal += payment.principal;
                summary.total_interest += payment.interest;
                summary.ending_balance = payment.balance;
                summary.adjusted_property_value = payment.adjusted_property_value;
            }
            _ => summaries.push(YearSummary {
                year,
                payments_count: 1,
                total_payment: payment.payment,
                total_principal: payment.principal,
                total_interest: payment.interest,
                ending_balance: payment.balance,
                adjusted_property_value: payment.adjusted_property_value,
            }),
        }
    }

    summaries
}

fn is_yearly_sample(index: usize, len: usize) -> bool {
    index % 12 == 0 || index + 1 == len
}

/// Every twelfth record starting with the first, plus the last one.
pub fn chart_points(calculation: &MortgageCalculation) -> Vec<ChartPoint> {
    let schedule = &calculation.amortization_schedule;
    let mut cumulative_payment = 0.0;
    let mut cumulative_interest = 0.0;
    let mut points = Vec::with_capacity(schedule.len() / 12 + 2);

    for (index, payment) in schedule.iter().enumerate() {
        cumulative_payment += payment.payment;
        cumulative_interest += payment.interest;

        if is_yearly_sample(index, schedule.len()) {
            points.push(ChartPoint {
                month: payment.month,
                year: year_of(payment.month),
                balance: payment.balance,
                cumulative_payment,
                cumulative_interest,
                adjusted_property_value: payment.adjusted_property_value,
            });
        }
    }

    points
}

/// Rows for the schedule table: all of them for short loans, yearly samples
/// for long ones.
pub fn table_rows(calculation: &MortgageCalculation) -> Vec<&AmortizationPayment> {
    let schedule = &calculation.amortization_schedule;
    if schedule.len() <= YEARLY_SAMPLING_THRESHOLD {
        return schedule.iter().collect();
    }

    schedule
        .iter()
        .enumerate()
        .filter(|(index, _)| is_yearly_sample(*index, schedule.len()))
        .map(|(_, payment)| payment)
        .collect()
}

/// The full schedule as CSV with localized headers and amounts in whole units.
/// The property value column is only written when the schedule carries it.
pub fn schedule_csv(calculation: &MortgageCalculation, t: &Translations) -> String {
    let with_property_value = calculation
        .amortization_schedule
        .iter()
        .any(|payment| payment.adjusted_property_value.is_some());

    let mut headers = vec![t.month, t.payment, t.principal, t.interest, t.balance];
    if with_property_value {
        headers.push(t.adjusted_property_value);
    }

    let mut csv = headers.into_iter().map(csv_field).collect::<Vec<_>>().join(",");
    csv.push('\n');

    for payment in &calculation.amortization_schedule {
        csv.push_str(&format!(
            "{},{},{},{},{}",
            payment.month,
            csv_amount(payment.payment),
            csv_amount(payment.principal),
            csv_amount(payment.interest),
            csv_amount(payment.balance),
        ));
        if with_property_value {
            csv.push(',');
            if let Some(value) = payment.adjusted_property_value {
                csv.push_str(&csv_amount(value));
            }
        }
        csv.push('\n');
    }

    csv
}

fn csv_amount(amount: f64) -> String {
    round_to_units(amount)
        .map(|rounded| format!("{rounded:.0}"))
        .unwrap_or_default()
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::calculate_mortgage;
    use crate::i18n::{translations, Language};
    use rstest::rstest;

    #[rstest]
    #[case(1, 1)]
    #[case(12, 1)]
    #[case(13, 2)]
    #[case(240, 20)]
    fn test_year_of(#[case] month: u32, #[case] year: u32) {
        assert_eq!(year_of(month), year);
    }

    #[test]
    fn test_yearly_summaries() {
        let calculation = calculate_mortgage(10_000_000.0, 6.0, 30, None, None);
        let summaries = yearly_summaries(&calculation);

        assert_eq!(summaries.len(), 3);
        assert_eq!(
            summaries.iter().map(|s| s.payments_count).collect::<Vec<_>>(),
            vec![12, 12, 6]
        );

        let first = &summaries[0];
        assert!((first.total_payment - calculation.monthly_payment * 12.0).abs() < 1e-6);
        assert!((first.total_principal + first.total_interest - first.total_payment).abs() < 1e-6);
        assert_eq!(first.ending_balance, calculation.amortization_schedule[11].balance);

        let principal_paid: f64 = summaries.iter().map(|s| s.total_principal).sum();
        assert!((principal_paid - 10_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_chart_points_sampling_and_cumulative_sums() {
        let calculation = calculate_mortgage(25_000_000.0, 7.5, 30, Some(30_000_000.0), Some(3.5));
        let points = chart_points(&calculation);

        assert_eq!(points.iter().map(|p| p.month).collect::<Vec<_>>(), vec![1, 13, 25, 30]);

        let thirteen = &points[1];
        let schedule = &calculation.amortization_schedule[..13];
        let interest: f64 = schedule.iter().map(|p| p.interest).sum();
        assert!((thirteen.cumulative_payment - calculation.monthly_payment * 13.0).abs() < 1e-6);
        assert!((thirteen.cumulative_interest - interest).abs() < 1e-6);
        assert_eq!(thirteen.year, 2);
        assert_eq!(thirteen.adjusted_property_value, schedule[12].adjusted_property_value);
    }

    #[test]
    fn test_table_rows_sampling() {
        let short = calculate_mortgage(5_000_000.0, 8.0, 120, None, None);
        assert_eq!(table_rows(&short).len(), 120);

        let long = calculate_mortgage(25_000_000.0, 7.5, 240, None, None);
        let rows = table_rows(&long);
        assert_eq!(rows.len(), 21);
        assert_eq!(rows[1].month, 13);
        assert_eq!(rows.last().unwrap().month, 240);
    }

    #[test]
    fn test_principal_interest_split() {
        let calculation = calculate_mortgage(1_000_000.0, 10.0, 12, None, None);
        let split = PrincipalInterestSplit::new(1_000_000.0, &calculation);

        assert_eq!(split.total(), calculation.total_amount);
        assert!((split.principal_share() + split.interest_share() - 1.0).abs() < 1e-12);
        assert!(split.interest_share() > 0.05 && split.interest_share() < 0.06);
    }

    #[test]
    fn test_schedule_csv() {
        let calculation = calculate_mortgage(1_000_000.0, 10.0, 12, None, None);
        let csv = schedule_csv(&calculation, translations(Language::En));
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "Month,Payment,Principal,Interest,Balance");
        assert_eq!(lines[1], "1,87916,79583,8333,920417");
        assert!(lines[12].ends_with(",0"));
    }

    #[test]
    fn test_schedule_csv_with_property_value() {
        let calculation = calculate_mortgage(1_000_000.0, 10.0, 12, Some(30_000_000.0), Some(3.5));
        let csv = schedule_csv(&calculation, translations(Language::Hu));
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Hónap,Törlesztés,Tőke,Kamat,Fennmaradó tartozás,Becsült ingatlanérték"
        );
        assert!(lines[12].ends_with(",31050000"));
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Balance, Interest & Payment"), "\"Balance, Interest & Payment\"");
        assert_eq!(csv_field("Plain"), "Plain");
    }
}
