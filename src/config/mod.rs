//! Rate table configuration for the salary calculator.
//!
//! This module loads insurance rates, the deduction policy, and the
//! progressive tax brackets from YAML and validates their invariants.
//!
//! # Example
//!
//! ```
//! use salary_calculator::config::ConfigLoader;
//!
//! let config = ConfigLoader::embedded().unwrap();
//! println!("Loaded rates: {}", config.config().name());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DeductionPolicy, InsuranceRates, PayrollConfig, TaxBracket, TaxBracketTable};
