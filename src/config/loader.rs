//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll rate
//! tables from YAML, either the table compiled into the binary or a file
//! supplied at startup.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{PayrollConfig, RateDocument};

/// The 2024 rate table shipped with the crate.
const EMBEDDED_RATES: &str = include_str!("../../config/rates-2024.yaml");

/// Origin label used in errors for the embedded table.
const EMBEDDED_ORIGIN: &str = "<embedded rates-2024.yaml>";

/// Loads and provides access to the payroll rate configuration.
///
/// # Example
///
/// ```
/// use salary_calculator::config::ConfigLoader;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// assert_eq!(loader.config().tax_year(), 2024);
/// assert_eq!(loader.config().tax_brackets().brackets().len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads the rate table compiled into the crate.
    pub fn embedded() -> EngineResult<Self> {
        Self::from_yaml_str(EMBEDDED_RATES, EMBEDDED_ORIGIN)
    }

    /// Loads a rate table from a YAML file.
    ///
    /// Returns an error if the file is missing, is not valid YAML of the
    /// expected shape, or breaks a rate table invariant.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use salary_calculator::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/rates-2024.yaml")?;
    /// # Ok::<(), salary_calculator::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses and validates a rate table from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let document: RateDocument =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        let config = PayrollConfig::from_document(document)?;
        tracing::debug!(
            origin,
            name = config.name(),
            tax_year = config.tax_year(),
            brackets = config.tax_brackets().brackets().len(),
            "Loaded payroll rate table"
        );

        Ok(Self { config })
    }

    /// Returns the validated configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}
