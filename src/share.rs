//! Encoding of calculator inputs into a shareable URL query string.

use crate::inputs::MortgageInputs;

const AMOUNT_KEY: &str = "amt";
const TERM_KEY: &str = "term";
const RATE_KEY: &str = "rate";
const PROPERTY_VALUE_KEY: &str = "pv";
const INFLATION_KEY: &str = "infl";

/// The subset of raw inputs carried in a share link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareParams {
    /// Loan amount in millions, as typed.
    pub amount: Option<String>,
    /// Combined term in months.
    pub term_months: Option<u32>,
    pub rate: Option<String>,
    /// Property value in millions, as typed.
    pub property_value: Option<String>,
    pub inflation: Option<String>,
}

impl ShareParams {
    /// Captures the non-empty fields of the form.
    pub fn from_inputs(inputs: &MortgageInputs) -> Self {
        let total_months = inputs.total_months();
        Self {
            amount: non_empty(&inputs.loan_amount),
            term_months: (total_months > 0).then_some(total_months),
            rate: non_empty(&inputs.interest_rate),
            property_value: non_empty(&inputs.current_property_value),
            inflation: non_empty(&inputs.expected_yearly_inflation),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Form-urlencoded `key=value` pairs in a fixed order. Absent fields and a
    /// zero term are left out.
    pub fn to_query_string(&self) -> String {
        let term = self.term_months.filter(|months| *months > 0).map(|months| months.to_string());
        let pairs = [
            (AMOUNT_KEY, self.amount.as_deref()),
            (TERM_KEY, term.as_deref()),
            (RATE_KEY, self.rate.as_deref()),
            (PROPERTY_VALUE_KEY, self.property_value.as_deref()),
            (INFLATION_KEY, self.inflation.as_deref()),
        ];

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// `base?query`, or just `base` when there is nothing to share.
    pub fn share_url(&self, base: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{query}")
        }
    }

    /// Reads parameters back from a query string, with or without the leading `?`.
    /// Unknown keys are ignored; a `term` that is not a whole month count is dropped.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let value = value.into_owned();

            match &*key {
                AMOUNT_KEY => params.amount = Some(value),
                TERM_KEY => match value.trim().parse::<u32>() {
                    Ok(months) => params.term_months = Some(months),
                    Err(e) => log::debug!("Ignoring share term {value:?}: {e}"),
                },
                RATE_KEY => params.rate = Some(value),
                PROPERTY_VALUE_KEY => params.property_value = Some(value),
                INFLATION_KEY => params.inflation = Some(value),
                _ => {}
            }
        }

        params
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_order_and_omissions() {
        let params = ShareParams {
            amount: Some("25".to_string()),
            term_months: Some(240),
            rate: Some("7.5".to_string()),
            property_value: None,
            inflation: Some(String::new()),
        };

        assert_eq!(params.to_query_string(), "amt=25&term=240&rate=7.5");
        assert_eq!(
            params.share_url("https://example.com/"),
            "https://example.com/?amt=25&term=240&rate=7.5"
        );
    }

    #[test]
    fn test_empty_params_give_bare_url() {
        let params = ShareParams {
            term_months: Some(0),
            ..ShareParams::default()
        };
        assert_eq!(params.share_url("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn test_from_query() {
        let params = ShareParams::from_query("?amt=30&term=300&rate=6.5&pv=45&infl=-1.5&utm=x");

        assert_eq!(params.amount.as_deref(), Some("30"));
        assert_eq!(params.term_months, Some(300));
        assert_eq!(params.rate.as_deref(), Some("6.5"));
        assert_eq!(params.property_value.as_deref(), Some("45"));
        assert_eq!(params.inflation.as_deref(), Some("-1.5"));
    }

    #[test]
    fn test_from_query_drops_bad_term() {
        let params = ShareParams::from_query("term=twenty&amt=");
        assert_eq!(params.term_months, None);
        assert_eq!(params.amount, None);
        assert!(params.is_empty());
    }

    #[test]
    fn test_percent_encoding_survives_round_trip() {
        let params = ShareParams {
            amount: Some("12,5 M".to_string()),
            rate: Some("7%".to_string()),
            ..ShareParams::default()
        };
        let query = params.to_query_string();

        assert_eq!(query, "amt=12%2C5+M&rate=7%25");
        assert_eq!(ShareParams::from_query(&query), params);
    }

    #[test]
    fn test_malformed_escapes_are_kept_literally() {
        let params = ShareParams::from_query("amt=25%&rate=7%2&pv=%zz4&infl=%C3%A9");

        assert_eq!(params.amount.as_deref(), Some("25%"));
        assert_eq!(params.rate.as_deref(), Some("7%2"));
        assert_eq!(params.property_value.as_deref(), Some("%zz4"));
        assert_eq!(params.inflation.as_deref(), Some("\u{e9}"));
    }

    #[test]
    fn test_from_inputs() {
        let inputs = MortgageInputs {
            loan_amount: "25".to_string(),
            loan_term_years: "20".to_string(),
            loan_term_months: "6".to_string(),
            interest_rate: "7.5".to_string(),
            ..MortgageInputs::default()
        };
        let params = ShareParams::from_inputs(&inputs);

        assert_eq!(params.term_months, Some(246));
        assert_eq!(params.property_value, None);
        assert_eq!(params.to_query_string(), "amt=25&term=246&rate=7.5");
    }
}
