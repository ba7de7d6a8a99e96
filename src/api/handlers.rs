//! HTTP request handlers for the salary calculator API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::request::CalculationRequest;
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, HealthResponse, RatesResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/calculate", post(calculate_handler))
        .route("/api/rates", get(rates_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for POST /api/calculate endpoint.
///
/// Accepts a salary and dependent count and returns the pay breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::validation_error(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let Some(annual_salary) = request.annual_salary else {
        warn!(correlation_id = %correlation_id, "Missing annual salary");
        return ApiErrorResponse::bad_request(ApiError::invalid_salary(
            "annualSalary was not provided",
        ))
        .into_response();
    };
    let dependents = request.dependents_or_default();

    match state.calculator().calculate(annual_salary, dependents) {
        Ok(result) => {
            for step in &result.audit_trace.steps {
                debug!(
                    correlation_id = %correlation_id,
                    step = step.step_number,
                    rule = %step.rule_id,
                    reasoning = %step.reasoning,
                    "Applied rule"
                );
            }
            info!(
                correlation_id = %correlation_id,
                calculation_id = %result.audit_trace.calculation_id,
                annual_salary = %annual_salary,
                dependents,
                monthly_net = %result.breakdown.monthly.net,
                duration_us = result.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            let body = CalculationResponse {
                breakdown: result.breakdown,
                audit_trace: request.include_trace.then_some(result.audit_trace),
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /api/rates endpoint.
///
/// Returns the insurance rates and tax brackets in use.
async fn rates_handler(State(state): State<AppState>) -> Json<RatesResponse> {
    Json(RatesResponse::from(state.config()))
}

/// Handler for GET /health endpoint.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
