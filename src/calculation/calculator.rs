//! The payroll calculator.
//!
//! [`PayrollCalculator`] combines the insurance and income tax rules into a
//! single net pay calculation. Intermediate amounts are carried unrounded;
//! monthly fields are rounded to whole won when the breakdown is assembled.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AnnualPay, AuditStep, AuditTrace, MonthlyAmounts, PayBreakdown};

use super::income_tax::{
    MONTHS_PER_YEAR, apply_dependent_deduction, calculate_bracket_tax, calculate_monthly_tax,
    calculate_taxable_income,
};
use super::insurance::calculate_insurance;
use super::rounding::round_won;

/// Largest accepted annual salary (1,000조 won).
pub const MAX_ANNUAL_SALARY: Decimal = dec!(1000000000000000);

/// Everything produced by one calculation.
#[derive(Debug, Clone)]
pub struct PayCalculation {
    /// The breakdown returned to clients.
    pub breakdown: PayBreakdown,
    /// The same monthly figures before rounding.
    pub unrounded: MonthlyAmounts,
    /// Annual taxable income used for the bracket lookup.
    pub taxable_income: Decimal,
    /// Annual income tax after the dependent deduction.
    pub annual_income_tax: Decimal,
    /// Record of every rule applied.
    pub audit_trace: AuditTrace,
}

/// Computes net take-home pay from an annual salary and dependent count.
///
/// The calculator holds no mutable state; one instance can serve any number
/// of concurrent callers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use salary_calculator::calculation::PayrollCalculator;
/// use salary_calculator::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::embedded().unwrap().into_config();
/// let calculator = PayrollCalculator::new(Arc::new(config));
///
/// let result = calculator.calculate(Decimal::from(40_000_000), 1).unwrap();
/// assert_eq!(result.breakdown.monthly.gross, Decimal::from(3_333_333));
/// assert_eq!(result.breakdown.monthly.net, Decimal::from(2_637_244));
/// ```
#[derive(Debug, Clone)]
pub struct PayrollCalculator {
    config: Arc<PayrollConfig>,
}

impl PayrollCalculator {
    /// Creates a calculator over the given rate configuration.
    pub fn new(config: Arc<PayrollConfig>) -> Self {
        Self { config }
    }

    /// Returns the rate configuration in use.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Calculates the pay breakdown for `annual_salary` and `dependents`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when `annual_salary` is not
    /// positive or exceeds [`MAX_ANNUAL_SALARY`], or when `dependents` is 0.
    pub fn calculate(&self, annual_salary: Decimal, dependents: u32) -> EngineResult<PayCalculation> {
        validate_salary(annual_salary)?;
        if dependents < 1 {
            return Err(EngineError::invalid_input(
                "dependents",
                "must be at least 1 (the employee)",
            ));
        }

        let start_time = Instant::now();
        let rates = self.config.insurance_rates();
        let policy = self.config.policy();
        let mut steps: Vec<AuditStep> = Vec::new();
        let mut step_number: u32 = 1;

        let monthly_gross = annual_salary / MONTHS_PER_YEAR;
        steps.push(AuditStep {
            step_number,
            rule_id: "monthly_gross".to_string(),
            rule_name: "Monthly Gross Pay".to_string(),
            input: serde_json::json!({
                "annual_salary": annual_salary.normalize().to_string()
            }),
            output: serde_json::json!({
                "monthly_gross": monthly_gross.normalize().to_string()
            }),
            reasoning: format!(
                "₩{} / 12 = ₩{}",
                annual_salary.normalize(),
                monthly_gross.round_dp(2)
            ),
        });
        step_number += 1;

        let insurance = calculate_insurance(monthly_gross, rates, policy, step_number);
        step_number += insurance.audit_steps.len() as u32;
        steps.extend(insurance.audit_steps);
        let contributions = insurance.contributions;
        let total_insurance = contributions.total();

        let taxable = calculate_taxable_income(annual_salary, total_insurance, step_number);
        steps.push(taxable.audit_step);
        step_number += 1;

        let bracket_tax =
            calculate_bracket_tax(taxable.taxable_income, self.config.tax_brackets(), step_number);
        steps.push(bracket_tax.audit_step);
        step_number += 1;

        let after_dependents =
            apply_dependent_deduction(bracket_tax.tax, dependents, policy, step_number);
        steps.push(after_dependents.audit_step);
        step_number += 1;

        let monthly_tax = calculate_monthly_tax(after_dependents.tax, policy, step_number);
        steps.push(monthly_tax.audit_step);

        let total_deductions =
            total_insurance + monthly_tax.income_tax + monthly_tax.local_income_tax;
        let net = monthly_gross - total_deductions;

        let unrounded = MonthlyAmounts {
            gross: monthly_gross,
            national_pension: contributions.national_pension,
            health_insurance: contributions.health_insurance,
            long_term_care: contributions.long_term_care,
            employment_insurance: contributions.employment_insurance,
            total_insurance,
            income_tax: monthly_tax.income_tax,
            local_income_tax: monthly_tax.local_income_tax,
            total_deductions,
            net,
        };

        // Annual net is the unrounded monthly net times twelve, left unrounded.
        let breakdown = PayBreakdown {
            annual: AnnualPay {
                gross: annual_salary,
                net: (net * MONTHS_PER_YEAR).normalize(),
            },
            monthly: unrounded.map(round_won),
        };

        Ok(PayCalculation {
            breakdown,
            unrounded,
            taxable_income: taxable.taxable_income,
            annual_income_tax: after_dependents.tax,
            audit_trace: AuditTrace {
                calculation_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                steps,
                duration_us: start_time.elapsed().as_micros() as u64,
            },
        })
    }
}

fn validate_salary(annual_salary: Decimal) -> EngineResult<()> {
    if annual_salary <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "annualSalary",
            "must be greater than 0",
        ));
    }
    if annual_salary > MAX_ANNUAL_SALARY {
        return Err(EngineError::invalid_input(
            "annualSalary",
            format!("must not exceed {}", MAX_ANNUAL_SALARY),
        ));
    }
    Ok(())
}
