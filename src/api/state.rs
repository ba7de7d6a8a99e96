//! Application state for the salary calculator API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::PayrollCalculator;
use crate::config::{ConfigLoader, PayrollConfig};

/// Shared application state.
///
/// Holds the rate configuration, loaded once at startup, and the
/// calculator built over it.
#[derive(Clone)]
pub struct AppState {
    config: Arc<PayrollConfig>,
    calculator: Arc<PayrollCalculator>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(loader: ConfigLoader) -> Self {
        let config = Arc::new(loader.into_config());
        let calculator = Arc::new(PayrollCalculator::new(Arc::clone(&config)));
        Self { config, calculator }
    }

    /// Returns the rate configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the calculator.
    pub fn calculator(&self) -> &PayrollCalculator {
        &self.calculator
    }
}
