//! Static translation tables for the two supported languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Hu,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Hu, Language::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Hu => "hu",
            Language::En => "en",
        }
    }

    /// BCP 47 locale used for number formatting.
    pub fn locale(&self) -> &'static str {
        match self {
            Language::Hu => "hu-HU",
            Language::En => "en-US",
        }
    }

    /// The language's own name, as shown in a language picker.
    pub fn display_name(&self) -> &'static str {
        let t = translations(*self);
        match self {
            Language::Hu => t.language_hu,
            Language::En => t.language_en,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    /// Accepts a bare tag (`"en"`) or a region-tagged one (`"en-US"`, `"hu_HU"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "hu" => Ok(Language::Hu),
            "en" => Ok(Language::En),
            _ => Err(anyhow::anyhow!("Unsupported language tag: {s:?}")),
        }
    }
}

#[derive(Debug)]
pub struct Translations {
    pub page_title: &'static str,
    pub page_description: &'static str,
    pub title: &'static str,

    pub loan_amount: &'static str,
    pub loan_term_months: &'static str,
    pub loan_term_years: &'static str,
    pub interest_rate: &'static str,

    pub calculate: &'static str,
    pub reset: &'static str,
    pub show_details: &'static str,
    pub hide_details: &'static str,
    pub share: &'static str,

    pub monthly_payment: &'static str,
    pub total_interest: &'static str,
    pub total_amount: &'static str,

    pub amortization_schedule: &'static str,
    pub payment: &'static str,
    pub principal: &'static str,
    pub interest: &'static str,
    pub balance: &'static str,
    pub month: &'static str,
    pub yearly_payments_note: &'static str,
    /// Contains a `{count}` placeholder, see [`Translations::full_schedule_note`].
    pub full_schedule_note: &'static str,

    pub share_calculation: &'static str,
    pub copy_url: &'static str,
    pub url_copied: &'static str,
    pub share_via: &'static str,

    pub invalid_loan_amount: &'static str,
    pub invalid_loan_term: &'static str,
    pub invalid_interest_rate: &'static str,
    pub zero_interest_rate: &'static str,

    pub language_hu: &'static str,
    pub language_en: &'static str,

    pub select_years_placeholder: &'static str,
    pub years: &'static str,
    pub months: &'static str,
    pub enter_total_months_placeholder: &'static str,

    pub expand_all: &'static str,
    pub collapse_all: &'static str,
    pub year: &'static str,
    pub payments_count: &'static str,
    pub total: &'static str,
    pub download_csv: &'static str,

    pub principal_vs_interest: &'static str,
    pub balance_interest_payment: &'static str,

    pub advanced_features: &'static str,
    pub current_property_value: &'static str,
    pub expected_yearly_inflation: &'static str,
    pub adjusted_property_value: &'static str,
}

impl Translations {
    pub fn full_schedule_note(&self, count: usize) -> String {
        self.full_schedule_note.replace("{count}", &count.to_string())
    }
}

static HU: Translations = Translations {
    page_title: "Lakáshitel kalkulátor",
    page_description: "Egyszerű és gyors magyar lakáshitel kalkulátor. Számítsa ki havi törlesztőrészletét, kamatterhét és törlesztési ütemtervét.",
    title: "Lakáshitel kalkulátor",

    loan_amount: "Hitel összege (millió)",
    loan_term_months: "Összes hónap",
    loan_term_years: "Futamidő",
    interest_rate: "Kamatláb (%)",

    calculate: "Számítás",
    reset: "Törlés",
    show_details: "Részletek mutatása",
    hide_details: "Részletek elrejtése",
    share: "Megosztás",

    monthly_payment: "Havi törlesztőrészlet",
    total_interest: "Összes kamat",
    total_amount: "Összes visszafizetendő",

    amortization_schedule: "Törlesztési ütemterv",
    payment: "Törlesztés",
    principal: "Tőke",
    interest: "Kamat",
    balance: "Fennmaradó tartozás",
    month: "Hónap",
    yearly_payments_note: "Az áttekinthetőség kedvéért évenkénti törlesztések láthatók.",
    full_schedule_note: "A teljes ütemterv {count} fizetést tartalmaz.",

    share_calculation: "Számítás megosztása",
    copy_url: "URL másolása",
    url_copied: "URL másolva!",
    share_via: "Megosztás...",

    invalid_loan_amount: "Érvényes hitel összeget adj meg",
    invalid_loan_term: "Érvényes futamidőt adj meg",
    invalid_interest_rate: "Érvényes kamatlábat adj meg",
    zero_interest_rate: "A kamatláb nem lehet nulla",

    language_hu: "Magyar",
    language_en: "English",

    select_years_placeholder: "Válassz évet",
    years: "év",
    months: "hónap",
    enter_total_months_placeholder: "Vagy add meg hónapban",

    expand_all: "Összes kinyitása",
    collapse_all: "Összes bezárása",
    year: "év",
    payments_count: "fizetés",
    total: "Összesen",
    download_csv: "CSV letöltése",

    principal_vs_interest: "Tőke vs Kamat",
    balance_interest_payment: "Egyenleg, Kamat és Törlesztés",

    advanced_features: "További beállítások",
    current_property_value: "Jelenlegi ingatlanérték (millió)",
    expected_yearly_inflation: "Várható éves infláció (%)",
    adjusted_property_value: "Becsült ingatlanérték",
};

static EN: Translations = Translations {
    page_title: "Mortgage Calculator",
    page_description: "Simple and fast Hungarian mortgage calculator. Calculate your monthly payment, interest costs, and amortization schedule.",
    title: "Mortgage Calculator",

    loan_amount: "Loan Amount (millions)",
    loan_term_months: "Total Months",
    loan_term_years: "Loan Term",
    interest_rate: "Interest Rate (%)",

    calculate: "Calculate",
    reset: "Reset",
    show_details: "Show Details",
    hide_details: "Hide Details",
    share: "Share",

    monthly_payment: "Monthly Payment",
    total_interest: "Total Interest",
    total_amount: "Total Amount",

    amortization_schedule: "Amortization Schedule",
    payment: "Payment",
    principal: "Principal",
    interest: "Interest",
    balance: "Balance",
    month: "Month",
    yearly_payments_note: "Yearly payments are shown for readability.",
    full_schedule_note: "The full schedule has {count} payments.",

    share_calculation: "Share Calculation",
    copy_url: "Copy URL",
    url_copied: "URL Copied!",
    share_via: "Share via...",

    invalid_loan_amount: "Please enter a valid loan amount",
    invalid_loan_term: "Please enter a valid loan term",
    invalid_interest_rate: "Please enter a valid interest rate",
    zero_interest_rate: "Interest rate cannot be zero",

    language_hu: "Magyar",
    language_en: "English",

    select_years_placeholder: "Select years",
    years: "years",
    months: "months",
    enter_total_months_placeholder: "Or enter total months",

    expand_all: "Expand All",
    collapse_all: "Collapse All",
    year: "Year",
    payments_count: "payments",
    total: "Total",
    download_csv: "Download CSV",

    principal_vs_interest: "Principal vs Interest",
    balance_interest_payment: "Balance, Interest & Payment",

    advanced_features: "Advanced Features",
    current_property_value: "Current Property Value (millions)",
    expected_yearly_inflation: "Expected Yearly Inflation (%)",
    adjusted_property_value: "Adjusted Property Value",
};

pub fn translations(language: Language) -> &'static Translations {
    match language {
        Language::Hu => &HU,
        Language::En => &EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hu", Language::Hu)]
    #[case("en", Language::En)]
    #[case("EN", Language::En)]
    #[case("en-US", Language::En)]
    #[case(" hu_HU ", Language::Hu)]
    fn test_parse_language(#[case] tag: &str, #[case] expected: Language) {
        assert_eq!(tag.parse::<Language>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_language() {
        assert!("de".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(translations(Language::Hu).monthly_payment, "Havi törlesztőrészlet");
        assert_eq!(translations(Language::En).monthly_payment, "Monthly Payment");
        assert_eq!(Language::default(), Language::Hu);
    }

    #[test]
    fn test_display_names_are_native() {
        assert_eq!(Language::Hu.display_name(), "Magyar");
        assert_eq!(Language::En.display_name(), "English");
    }

    #[test]
    fn test_full_schedule_note() {
        let note = translations(Language::En).full_schedule_note(240);
        assert_eq!(note, "The full schedule has 240 payments.");
    }

    #[test]
    fn test_serde_tag() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        assert_eq!(serde_json::from_str::<Language>("\"hu\"").unwrap(), Language::Hu);
    }
}
