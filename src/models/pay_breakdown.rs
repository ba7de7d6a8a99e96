//! Pay breakdown models.
//!
//! [`PayBreakdown`] is the rounded, client-facing result of a calculation.
//! [`MonthlyAmounts`] carries the same monthly figures before rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annual view of a pay breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualPay {
    /// The gross annual salary as submitted.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross: Decimal,
    /// Annual take-home pay: the unrounded monthly net times twelve, not rounded.
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
}

/// Monthly view of a pay breakdown, every field in whole won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPay {
    /// Gross monthly pay.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross: Decimal,
    /// National pension contribution.
    #[serde(with = "rust_decimal::serde::float")]
    pub national_pension: Decimal,
    /// Health insurance premium.
    #[serde(with = "rust_decimal::serde::float")]
    pub health_insurance: Decimal,
    /// Long-term-care premium.
    #[serde(with = "rust_decimal::serde::float")]
    pub long_term_care: Decimal,
    /// Employment insurance premium.
    #[serde(with = "rust_decimal::serde::float")]
    pub employment_insurance: Decimal,
    /// Sum of the four insurance components.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_insurance: Decimal,
    /// Monthly share of annual income tax.
    #[serde(with = "rust_decimal::serde::float")]
    pub income_tax: Decimal,
    /// Local income tax surcharge.
    #[serde(with = "rust_decimal::serde::float")]
    pub local_income_tax: Decimal,
    /// Insurance plus income tax plus local income tax.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deductions: Decimal,
    /// Take-home monthly pay.
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
}

/// The result of a net pay calculation.
///
/// Created once per calculation and never modified afterwards.
///
/// # Example
///
/// ```
/// use salary_calculator::models::{AnnualPay, MonthlyPay, PayBreakdown};
/// use rust_decimal::Decimal;
///
/// let breakdown = PayBreakdown {
///     annual: AnnualPay { gross: Decimal::new(12_000_000, 0), net: Decimal::new(10_154_624, 0) },
///     monthly: MonthlyPay {
///         gross: Decimal::new(1_000_000, 0),
///         national_pension: Decimal::new(45_000, 0),
///         health_insurance: Decimal::new(35_400, 0),
///         long_term_care: Decimal::new(4_584, 0),
///         employment_insurance: Decimal::new(9_000, 0),
///         total_insurance: Decimal::new(93_984, 0),
///         income_tax: Decimal::new(54_361, 0),
///         local_income_tax: Decimal::new(5_436, 0),
///         total_deductions: Decimal::new(153_781, 0),
///         net: Decimal::new(846_219, 0),
///     },
/// };
/// let json = serde_json::to_value(&breakdown).unwrap();
/// assert_eq!(json["monthly"]["nationalPension"], 45000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayBreakdown {
    /// Annual figures.
    pub annual: AnnualPay,
    /// Monthly figures.
    pub monthly: MonthlyPay,
}

/// Unrounded monthly amounts carried through the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyAmounts {
    /// Gross monthly pay.
    pub gross: Decimal,
    /// National pension contribution (after the cap).
    pub national_pension: Decimal,
    /// Health insurance premium.
    pub health_insurance: Decimal,
    /// Long-term-care premium.
    pub long_term_care: Decimal,
    /// Employment insurance premium.
    pub employment_insurance: Decimal,
    /// Sum of the four insurance components.
    pub total_insurance: Decimal,
    /// Monthly share of annual income tax.
    pub income_tax: Decimal,
    /// Local income tax surcharge.
    pub local_income_tax: Decimal,
    /// Insurance plus income tax plus local income tax.
    pub total_deductions: Decimal,
    /// Take-home monthly pay.
    pub net: Decimal,
}

impl MonthlyAmounts {
    /// Rounds every field independently with `round`.
    pub fn map(&self, round: impl Fn(Decimal) -> Decimal) -> MonthlyPay {
        MonthlyPay {
            gross: round(self.gross),
            national_pension: round(self.national_pension),
            health_insurance: round(self.health_insurance),
            long_term_care: round(self.long_term_care),
            employment_insurance: round(self.employment_insurance),
            total_insurance: round(self.total_insurance),
            income_tax: round(self.income_tax),
            local_income_tax: round(self.local_income_tax),
            total_deductions: round(self.total_deductions),
            net: round(self.net),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_amounts() -> MonthlyAmounts {
        MonthlyAmounts {
            gross: dec("2500000"),
            national_pension: dec("112500"),
            health_insurance: dec("88500"),
            long_term_care: dec("11460.75"),
            employment_insurance: dec("22500"),
            total_insurance: dec("234960.75"),
            income_tax: dec("234755.8875"),
            local_income_tax: dec("23475.58875"),
            total_deductions: dec("493192.22625"),
            net: dec("2006807.77375"),
        }
    }

    #[test]
    fn test_map_applies_to_every_field() {
        let monthly = sample_amounts().map(|d| d.trunc());

        assert_eq!(monthly.long_term_care, dec("11460"));
        assert_eq!(monthly.income_tax, dec("234755"));
        assert_eq!(monthly.local_income_tax, dec("23475"));
        assert_eq!(monthly.total_deductions, dec("493192"));
        assert_eq!(monthly.net, dec("2006807"));
    }

    #[test]
    fn test_breakdown_serializes_camel_case_numbers() {
        let breakdown = PayBreakdown {
            annual: AnnualPay {
                gross: dec("30000000"),
                net: dec("24081693"),
            },
            monthly: sample_amounts().map(|d| d.round()),
        };
        let json = serde_json::to_value(&breakdown).unwrap();

        assert_eq!(json["annual"]["gross"], 30000000.0);
        assert_eq!(json["monthly"]["longTermCare"], 11461.0);
        assert_eq!(json["monthly"]["localIncomeTax"], 23476.0);
        assert!(json["monthly"]["totalInsurance"].is_number());
        assert!(json["monthly"].get("total_insurance").is_none());
    }

    #[test]
    fn test_breakdown_deserializes_from_wire_json() {
        let json = r#"{
            "annual": { "gross": 30000000, "net": 24081693 },
            "monthly": {
                "gross": 2500000, "nationalPension": 112500, "healthInsurance": 88500,
                "longTermCare": 11461, "employmentInsurance": 22500, "totalInsurance": 234961,
                "incomeTax": 234756, "localIncomeTax": 23476, "totalDeductions": 493192,
                "net": 2006808
            }
        }"#;

        let breakdown: PayBreakdown = serde_json::from_str(json).unwrap();
        assert_eq!(breakdown.monthly.net, dec("2006808"));
        assert_eq!(breakdown.annual.gross, dec("30000000"));
    }
}
