//! Response types for the salary calculator API.
//!
//! This module defines the success bodies for both endpoints and the error
//! body shared by every failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{InsuranceRates, PayrollConfig, TaxBracket};
use crate::error::EngineError;
use crate::models::{AuditTrace, PayBreakdown};

/// Marker shown in place of the unbounded top bracket's `max` ("exceeds").
pub const UNBOUNDED_MARKER: &str = "초과";

/// Message shown to users when the annual salary is missing or invalid
/// ("please enter a valid annual salary").
pub const INVALID_SALARY_MESSAGE: &str = "유효한 연봉을 입력해주세요.";

/// API error response structure.
///
/// `error` carries the human-readable message; `code` is for programmatic
/// handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub code: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the error for a missing or invalid annual salary.
    ///
    /// `error` carries the user-facing Korean message; `details` says what
    /// was wrong.
    pub fn invalid_salary(details: impl Into<String>) -> Self {
        Self::with_details("VALIDATION_ERROR", INVALID_SALARY_MESSAGE, details)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidInput { field, message } if field == "annualSalary" => {
                ApiErrorResponse::bad_request(ApiError::invalid_salary(format!(
                    "annualSalary {}",
                    message
                )))
            }
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid {}: {}", field, message),
                    "The request contains an invalid value",
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid rate configuration", message),
            },
        }
    }
}

/// Success body for `POST /api/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    /// The pay breakdown, flattened into the top level.
    #[serde(flatten)]
    pub breakdown: PayBreakdown,
    /// The audit trace, present only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_trace: Option<AuditTrace>,
}

/// Insurance rates as shown by `GET /api/rates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceRatesView {
    /// National pension rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub national_pension: Decimal,
    /// Health insurance rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub health_insurance: Decimal,
    /// Long-term-care rate (of the health premium).
    #[serde(with = "rust_decimal::serde::float")]
    pub long_term_care: Decimal,
    /// Employment insurance rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub employment_insurance: Decimal,
}

impl From<&InsuranceRates> for InsuranceRatesView {
    fn from(rates: &InsuranceRates) -> Self {
        Self {
            national_pension: rates.national_pension,
            health_insurance: rates.health_insurance,
            long_term_care: rates.long_term_care,
            employment_insurance: rates.employment_insurance,
        }
    }
}

/// Upper bound of a bracket: a number, or the unbounded marker text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BracketLimit {
    /// A finite upper bound.
    Amount(#[serde(with = "rust_decimal::serde::float")] Decimal),
    /// The unbounded marker.
    Unbounded(String),
}

/// A tax bracket as shown by `GET /api/rates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBracketView {
    /// Lower bound of taxable income.
    #[serde(with = "rust_decimal::serde::float")]
    pub min: Decimal,
    /// Upper bound of taxable income.
    pub max: BracketLimit,
    /// Flat rate for the bracket.
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    /// Constant subtracted after applying the rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub deduction: Decimal,
}

impl From<&TaxBracket> for TaxBracketView {
    fn from(bracket: &TaxBracket) -> Self {
        Self {
            min: bracket.min,
            max: match bracket.max {
                Some(max) => BracketLimit::Amount(max),
                None => BracketLimit::Unbounded(UNBOUNDED_MARKER.to_string()),
            },
            rate: bracket.rate,
            deduction: bracket.deduction,
        }
    }
}

/// Success body for `GET /api/rates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesResponse {
    /// The insurance rates.
    pub insurance_rates: InsuranceRatesView,
    /// The tax brackets in ascending order.
    pub tax_brackets: Vec<TaxBracketView>,
}

impl From<&PayrollConfig> for RatesResponse {
    fn from(config: &PayrollConfig) -> Self {
        Self {
            insurance_rates: config.insurance_rates().into(),
            tax_brackets: config.tax_brackets().iter().map(Into::into).collect(),
        }
    }
}

/// Success body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"error\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_salary_error_uses_korean_message() {
        let error = ApiError::invalid_salary("annualSalary was not provided");
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.error, "유효한 연봉을 입력해주세요.");
        assert_eq!(error.details.as_deref(), Some("annualSalary was not provided"));
    }

    #[test]
    fn test_invalid_salary_input_maps_to_korean_message() {
        let engine_error = EngineError::InvalidInput {
            field: "annualSalary".to_string(),
            message: "must be greater than 0".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert_eq!(api_error.error.error, INVALID_SALARY_MESSAGE);
        assert!(api_error.error.details.unwrap().contains("greater than 0"));
    }

    #[test]
    fn test_invalid_dependents_maps_to_bad_request() {
        let engine_error = EngineError::InvalidInput {
            field: "dependents".to_string(),
            message: "must be at least 1 (the employee)".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert!(api_error.error.error.contains("dependents"));
    }

    #[test]
    fn test_config_error_maps_to_internal_error() {
        let engine_error = EngineError::InvalidConfig {
            message: "bad".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_rates_response_renders_unbounded_marker() {
        let config = ConfigLoader::embedded().unwrap().into_config();
        let response = RatesResponse::from(&config);
        let json = serde_json::to_value(&response).unwrap();

        let brackets = json["taxBrackets"].as_array().unwrap();
        assert_eq!(brackets.len(), 8);
        assert_eq!(brackets[0]["max"], 14000000.0);
        assert_eq!(brackets[7]["max"], UNBOUNDED_MARKER);
        assert_eq!(json["insuranceRates"]["nationalPension"], 0.045);
        assert_eq!(json["insuranceRates"]["longTermCare"], 0.1295);
    }

    #[test]
    fn test_calculation_response_omits_absent_trace() {
        let config = ConfigLoader::embedded().unwrap().into_config();
        let calculator = crate::calculation::PayrollCalculator::new(std::sync::Arc::new(config));
        let result = calculator
            .calculate(rust_decimal::Decimal::from(40_000_000), 1)
            .unwrap();

        let response = CalculationResponse {
            breakdown: result.breakdown,
            audit_trace: None,
        };
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("auditTrace").is_none());
        assert_eq!(json["monthly"]["net"], 2637244.0);
        assert_eq!(json["annual"]["gross"], 40000000.0);
    }
}
