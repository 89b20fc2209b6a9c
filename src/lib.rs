//! `hitel` is a Rust library for calculating fixed payment (annuity) mortgages.
//!
//! Given a principal, an annual interest rate and a term in months it computes:
//! - the fixed **monthly payment**,
//! - the **total amount** and **total interest** paid over the nominal term,
//! - the month-by-month **amortization schedule**, optionally with a property
//!   value projected under a yearly inflation rate.
//!
//! Around the engine it provides the pieces a calculator front end needs:
//! validation of the raw form input, persistence of that input, share links,
//! localized labels, currency formatting and derived report data.
//!
//! ## Usage
//!
//! Add `hitel` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! hitel = "0.1.0"
//! ```
//!
//! Then build validated [`LoanParameters`] and calculate:
//!
//! ```rust
//! use hitel::{CurrencyFormatter, Language, LoanParameters};
//!
//! fn main() {
//!     let params = match LoanParameters::new(25_000_000.0, 7.5, 240) {
//!         Ok(params) => params.with_inflation(Some(30_000_000.0), Some(3.5)),
//!         Err(e) => {
//!             eprintln!("Invalid loan: {}", e);
//!             return;
//!         }
//!     };
//!
//!     let result = params.calculate();
//!     let formatter = CurrencyFormatter::new(Language::En);
//!
//!     println!("Monthly Payment: {}", formatter.format(result.monthly_payment));
//!     println!("Total Interest:  {}", formatter.format(result.total_interest));
//!     println!("Payments:        {}", result.amortization_schedule.len());
//! }
//! ```
//!
//! [`calculate_mortgage`] is the unchecked entry point; it performs no
//! validation, so a zero rate or a zero term give NaN or infinite figures.

pub mod amortization;
pub mod format;
pub mod i18n;
pub mod inputs;
pub mod report;
pub mod share;
pub mod storage;
pub mod term;
pub mod validation;

pub use amortization::{
    calculate_inflation_adjusted_value, calculate_mortgage, monthly_rate, AmortizationPayment,
    InflationAdjustment, MortgageCalculation,
};
pub use format::{format_percent, CurrencyFormatter};
pub use i18n::{translations, Language, Translations};
pub use inputs::{MortgageInputs, AMOUNT_MULTIPLIER};
pub use report::{
    chart_points, schedule_csv, table_rows, yearly_summaries, ChartPoint, PrincipalInterestSplit,
    YearSummary,
};
pub use share::ShareParams;
pub use storage::{KeyValueStore, MemoryStore, MortgageData, MortgageStorage, STORAGE_KEY};
pub use term::{to_total_months, to_years_and_months, LoanTerm, MAX_TERM_MONTHS};
pub use validation::{validate_inputs, LoanParameters, ValidationError, ValidationErrors};
