//! Request types for the salary calculator API.
//!
//! This module defines the JSON request body for `POST /api/calculate`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dependents assumed when the request leaves the field out.
pub const DEFAULT_DEPENDENTS: u32 = 1;

/// Request body for `POST /api/calculate`.
///
/// `annual_salary` is optional at the parsing layer so that a missing
/// salary is reported as a validation error rather than a JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// Gross annual salary in won.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub annual_salary: Option<Decimal>,
    /// Number of dependents including the employee. `null` counts as absent.
    #[serde(default)]
    pub dependents: Option<u32>,
    /// Whether to include the audit trace in the response.
    #[serde(default)]
    pub include_trace: bool,
}

impl CalculationRequest {
    /// Creates a request for a salary with the default dependents.
    pub fn new(annual_salary: Decimal) -> Self {
        Self {
            annual_salary: Some(annual_salary),
            ..Self::default()
        }
    }

    /// Returns the dependent count, falling back to [`DEFAULT_DEPENDENTS`].
    pub fn dependents_or_default(&self) -> u32 {
        self.dependents.unwrap_or(DEFAULT_DEPENDENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_full_request() {
        let json = r#"{ "annualSalary": 40000000, "dependents": 3, "includeTrace": true }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.annual_salary, Some(dec("40000000")));
        assert_eq!(request.dependents_or_default(), 3);
        assert!(request.include_trace);
    }

    #[test]
    fn test_dependents_default_to_one() {
        let json = r#"{ "annualSalary": 40000000 }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.dependents, None);
        assert_eq!(request.dependents_or_default(), 1);
        assert!(!request.include_trace);
    }

    #[test]
    fn test_null_dependents_default_to_one() {
        let json = r#"{ "annualSalary": 40000000, "dependents": null }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.dependents_or_default(), 1);
    }

    #[test]
    fn test_missing_salary_parses_as_none() {
        let request: CalculationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.annual_salary, None);
    }

    #[test]
    fn test_fractional_salary_parses() {
        let json = r#"{ "annualSalary": 36000000.5 }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.annual_salary, Some(dec("36000000.5")));
    }

    #[test]
    fn test_negative_dependents_rejected_by_parser() {
        let json = r#"{ "annualSalary": 40000000, "dependents": -1 }"#;

        assert!(serde_json::from_str::<CalculationRequest>(json).is_err());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let request = CalculationRequest::new(dec("30000000"));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["annualSalary"], 30000000.0);
        assert!(json.get("annual_salary").is_none());
    }
}
