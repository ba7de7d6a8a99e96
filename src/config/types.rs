//! Configuration types for net pay calculation.
//!
//! This module contains the strongly-typed rate tables that are
//! deserialized from YAML and validated once at startup.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Statutory social insurance rates (the employee's share).
///
/// `long_term_care` is a fraction of the health insurance premium,
/// not of salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct InsuranceRates {
    /// National pension rate applied to monthly gross pay.
    pub national_pension: Decimal,
    /// Health insurance rate applied to monthly gross pay.
    pub health_insurance: Decimal,
    /// Long-term-care rate applied to the health insurance premium.
    pub long_term_care: Decimal,
    /// Employment insurance rate applied to monthly gross pay.
    pub employment_insurance: Decimal,
}

impl InsuranceRates {
    fn validate(&self) -> EngineResult<()> {
        let named = [
            ("national_pension", self.national_pension),
            ("health_insurance", self.health_insurance),
            ("long_term_care", self.long_term_care),
            ("employment_insurance", self.employment_insurance),
        ];
        for (name, rate) in named {
            if !is_unit_rate(rate) {
                return Err(EngineError::invalid_config(format!(
                    "insurance rate '{}' must be in [0, 1), got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }
}

/// Fixed amounts and surtax rates applied around the bracket calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeductionPolicy {
    /// Monthly ceiling on the national pension contribution.
    pub national_pension_monthly_cap: Decimal,
    /// Deduction base per dependent beyond the employee.
    pub dependent_deduction_base: Decimal,
    /// Rate applied to the dependent deduction base.
    pub dependent_deduction_rate: Decimal,
    /// Local income tax as a fraction of income tax.
    pub local_income_tax_rate: Decimal,
}

impl DeductionPolicy {
    /// Income tax credit for each dependent after the first.
    pub fn per_dependent_deduction(&self) -> Decimal {
        self.dependent_deduction_base * self.dependent_deduction_rate
    }

    fn validate(&self) -> EngineResult<()> {
        if self.national_pension_monthly_cap < Decimal::ZERO {
            return Err(EngineError::invalid_config(
                "national_pension_monthly_cap must not be negative",
            ));
        }
        if self.dependent_deduction_base < Decimal::ZERO {
            return Err(EngineError::invalid_config(
                "dependent_deduction_base must not be negative",
            ));
        }
        if !is_unit_rate(self.dependent_deduction_rate) {
            return Err(EngineError::invalid_config(
                "dependent_deduction_rate must be in [0, 1)",
            ));
        }
        if !is_unit_rate(self.local_income_tax_rate) {
            return Err(EngineError::invalid_config(
                "local_income_tax_rate must be in [0, 1)",
            ));
        }
        Ok(())
    }
}

/// One progressive income tax bracket.
///
/// Within the bracket, `tax = taxable_income * rate - deduction`.
/// A `max` of `None` marks the unbounded top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of taxable annual income.
    pub min: Decimal,
    /// Upper bound of taxable annual income, or `None` when unbounded.
    pub max: Option<Decimal>,
    /// Flat rate for the bracket.
    pub rate: Decimal,
    /// Constant subtracted after applying the rate.
    pub deduction: Decimal,
}

impl TaxBracket {
    /// Returns true when the bracket's upper bound covers `income`.
    ///
    /// The bound is inclusive, so an income equal to `max` stays in this bracket.
    pub fn covers(&self, income: Decimal) -> bool {
        self.max.is_none_or(|max| income <= max)
    }

    /// Applies the bracket's rate and deduction to `income`.
    pub fn tax_for(&self, income: Decimal) -> Decimal {
        income * self.rate - self.deduction
    }
}

/// Validated, ascending sequence of tax brackets.
///
/// Construction enforces:
/// - at least one bracket, the first starting at 0
/// - each bracket starts where the previous one ends
/// - only the last bracket is unbounded
/// - rates in `[0, 1)` and non-decreasing deductions
/// - the tax curve is continuous at every boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxBracketTable {
    brackets: Vec<TaxBracket>,
}

impl TaxBracketTable {
    /// Builds a table, checking every invariant.
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        let first = brackets
            .first()
            .ok_or_else(|| EngineError::invalid_config("at least one tax bracket is required"))?;
        if !first.min.is_zero() {
            return Err(EngineError::invalid_config(format!(
                "first tax bracket must start at 0, got {}",
                first.min
            )));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if !is_unit_rate(bracket.rate) {
                return Err(EngineError::invalid_config(format!(
                    "tax bracket {} rate must be in [0, 1), got {}",
                    index, bracket.rate
                )));
            }
            let is_last = index + 1 == brackets.len();
            match (bracket.max, is_last) {
                (None, false) => {
                    return Err(EngineError::invalid_config(format!(
                        "only the last tax bracket may be unbounded (bracket {})",
                        index
                    )));
                }
                (Some(_), true) => {
                    return Err(EngineError::invalid_config(
                        "the last tax bracket must be unbounded",
                    ));
                }
                (Some(max), false) if max <= bracket.min => {
                    return Err(EngineError::invalid_config(format!(
                        "tax bracket {} max {} must exceed min {}",
                        index, max, bracket.min
                    )));
                }
                _ => {}
            }
        }

        for (index, pair) in brackets.windows(2).enumerate() {
            let (lower, upper) = (&pair[0], &pair[1]);
            // Non-last brackets were checked to be bounded above.
            let boundary = lower.max.unwrap_or(upper.min);
            if boundary != upper.min {
                return Err(EngineError::invalid_config(format!(
                    "tax bracket {} starts at {} but the previous one ends at {}",
                    index + 1,
                    upper.min,
                    boundary
                )));
            }
            if upper.deduction < lower.deduction {
                return Err(EngineError::invalid_config(format!(
                    "tax bracket {} deduction decreases from {} to {}",
                    index + 1,
                    lower.deduction,
                    upper.deduction
                )));
            }
            if lower.tax_for(boundary) != upper.tax_for(boundary) {
                return Err(EngineError::invalid_config(format!(
                    "tax curve is discontinuous at {}: {} vs {}",
                    boundary,
                    lower.tax_for(boundary),
                    upper.tax_for(boundary)
                )));
            }
        }

        Ok(Self { brackets })
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Iterates over the brackets in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, TaxBracket> {
        self.brackets.iter()
    }
}

impl<'a> IntoIterator for &'a TaxBracketTable {
    type Item = &'a TaxBracket;
    type IntoIter = std::slice::Iter<'a, TaxBracket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Raw YAML document shape before validation.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RateDocument {
    pub name: String,
    pub tax_year: i32,
    pub insurance_rates: InsuranceRates,
    pub policy: DeductionPolicy,
    pub tax_brackets: Vec<TaxBracket>,
}

/// The complete, validated rate configuration.
///
/// Constructed once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollConfig {
    name: String,
    tax_year: i32,
    insurance_rates: InsuranceRates,
    policy: DeductionPolicy,
    tax_brackets: TaxBracketTable,
}

impl PayrollConfig {
    /// Creates a configuration from its component parts, validating each.
    pub fn new(
        name: impl Into<String>,
        tax_year: i32,
        insurance_rates: InsuranceRates,
        policy: DeductionPolicy,
        tax_brackets: TaxBracketTable,
    ) -> EngineResult<Self> {
        insurance_rates.validate()?;
        policy.validate()?;
        Ok(Self {
            name: name.into(),
            tax_year,
            insurance_rates,
            policy,
            tax_brackets,
        })
    }

    pub(crate) fn from_document(doc: RateDocument) -> EngineResult<Self> {
        let table = TaxBracketTable::new(doc.tax_brackets)?;
        Self::new(doc.name, doc.tax_year, doc.insurance_rates, doc.policy, table)
    }

    /// Human-readable name of the rate table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tax year the rates belong to.
    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// Returns the insurance rates.
    pub fn insurance_rates(&self) -> &InsuranceRates {
        &self.insurance_rates
    }

    /// Returns the deduction policy.
    pub fn policy(&self) -> &DeductionPolicy {
        &self.policy
    }

    /// Returns the tax bracket table.
    pub fn tax_brackets(&self) -> &TaxBracketTable {
        &self.tax_brackets
    }
}

fn is_unit_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate < Decimal::ONE
}
