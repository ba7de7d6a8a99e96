//! HTTP API module for the salary calculator.
//!
//! This module provides the REST endpoints for calculating net pay and
//! inspecting the rate tables in use.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, DEFAULT_DEPENDENTS};
pub use response::{
    ApiError, ApiErrorResponse, BracketLimit, CalculationResponse, HealthResponse,
    INVALID_SALARY_MESSAGE, InsuranceRatesView, RatesResponse, TaxBracketView, UNBOUNDED_MARKER,
};
pub use state::AppState;
