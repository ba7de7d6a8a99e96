//! Social insurance contribution calculation.
//!
//! This module computes the employee's monthly share of the four statutory
//! insurances: national pension (capped), health insurance, long-term-care
//! (charged on the health premium), and employment insurance.

use rust_decimal::Decimal;

use crate::config::{DeductionPolicy, InsuranceRates};
use crate::models::AuditStep;

/// The four monthly insurance contributions, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsuranceContributions {
    /// National pension contribution after the monthly cap.
    pub national_pension: Decimal,
    /// Health insurance premium.
    pub health_insurance: Decimal,
    /// Long-term-care premium.
    pub long_term_care: Decimal,
    /// Employment insurance premium.
    pub employment_insurance: Decimal,
}

impl InsuranceContributions {
    /// Sum of all four contributions.
    pub fn total(&self) -> Decimal {
        self.national_pension + self.health_insurance + self.long_term_care + self.employment_insurance
    }
}

/// The result of computing a single contribution.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// The contribution amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of computing all insurance contributions.
#[derive(Debug, Clone)]
pub struct InsuranceResult {
    /// The individual contributions.
    pub contributions: InsuranceContributions,
    /// Audit steps, one per contribution plus the total.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates the national pension contribution.
///
/// The contribution is `monthly_gross * rate`, limited to
/// `policy.national_pension_monthly_cap`.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_national_pension;
/// use salary_calculator::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::embedded().unwrap().into_config();
/// let result = calculate_national_pension(
///     Decimal::from(10_000_000),
///     config.insurance_rates(),
///     config.policy(),
///     1,
/// );
/// assert_eq!(result.amount, Decimal::from(265_500));
/// ```
pub fn calculate_national_pension(
    monthly_gross: Decimal,
    rates: &InsuranceRates,
    policy: &DeductionPolicy,
    step_number: u32,
) -> ContributionResult {
    let uncapped = monthly_gross * rates.national_pension;
    let cap = policy.national_pension_monthly_cap;
    let capped = uncapped > cap;
    let amount = if capped { cap } else { uncapped };

    let reasoning = if capped {
        format!(
            "₩{} x {} = ₩{}, capped at ₩{}",
            monthly_gross.round_dp(2),
            rates.national_pension.normalize(),
            uncapped.round_dp(2),
            cap.normalize()
        )
    } else {
        format!(
            "₩{} x {} = ₩{} (under the ₩{} cap)",
            monthly_gross.round_dp(2),
            rates.national_pension.normalize(),
            amount.round_dp(2),
            cap.normalize()
        )
    };

    ContributionResult {
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: "national_pension".to_string(),
            rule_name: "National Pension".to_string(),
            input: serde_json::json!({
                "monthly_gross": monthly_gross.normalize().to_string(),
                "rate": rates.national_pension.normalize().to_string(),
                "monthly_cap": cap.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": amount.normalize().to_string(),
                "cap_applied": capped
            }),
            reasoning,
        },
    }
}

/// Calculates the health insurance premium, `monthly_gross * rate`.
pub fn calculate_health_insurance(
    monthly_gross: Decimal,
    rates: &InsuranceRates,
    step_number: u32,
) -> ContributionResult {
    let amount = monthly_gross * rates.health_insurance;

    ContributionResult {
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: "health_insurance".to_string(),
            rule_name: "Health Insurance".to_string(),
            input: serde_json::json!({
                "monthly_gross": monthly_gross.normalize().to_string(),
                "rate": rates.health_insurance.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "₩{} x {} = ₩{}",
                monthly_gross.round_dp(2),
                rates.health_insurance.normalize(),
                amount.round_dp(2)
            ),
        },
    }
}

/// Calculates the long-term-care premium.
///
/// The premium is charged on the health insurance premium, not on salary.
pub fn calculate_long_term_care(
    health_insurance: Decimal,
    rates: &InsuranceRates,
    step_number: u32,
) -> ContributionResult {
    let amount = health_insurance * rates.long_term_care;

    ContributionResult {
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: "long_term_care".to_string(),
            rule_name: "Long-Term Care Insurance".to_string(),
            input: serde_json::json!({
                "health_insurance": health_insurance.normalize().to_string(),
                "rate": rates.long_term_care.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "₩{} (health insurance) x {} = ₩{}",
                health_insurance.round_dp(2),
                rates.long_term_care.normalize(),
                amount.round_dp(2)
            ),
        },
    }
}

/// Calculates the employment insurance premium, `monthly_gross * rate`.
pub fn calculate_employment_insurance(
    monthly_gross: Decimal,
    rates: &InsuranceRates,
    step_number: u32,
) -> ContributionResult {
    let amount = monthly_gross * rates.employment_insurance;

    ContributionResult {
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: "employment_insurance".to_string(),
            rule_name: "Employment Insurance".to_string(),
            input: serde_json::json!({
                "monthly_gross": monthly_gross.normalize().to_string(),
                "rate": rates.employment_insurance.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "₩{} x {} = ₩{}",
                monthly_gross.round_dp(2),
                rates.employment_insurance.normalize(),
                amount.round_dp(2)
            ),
        },
    }
}

/// Calculates all four insurance contributions for a monthly gross amount.
///
/// Steps are numbered consecutively from `step_number`; five steps are
/// recorded (one per contribution and one for the total).
pub fn calculate_insurance(
    monthly_gross: Decimal,
    rates: &InsuranceRates,
    policy: &DeductionPolicy,
    step_number: u32,
) -> InsuranceResult {
    let pension = calculate_national_pension(monthly_gross, rates, policy, step_number);
    let health = calculate_health_insurance(monthly_gross, rates, step_number + 1);
    let care = calculate_long_term_care(health.amount, rates, step_number + 2);
    let employment = calculate_employment_insurance(monthly_gross, rates, step_number + 3);

    let contributions = InsuranceContributions {
        national_pension: pension.amount,
        health_insurance: health.amount,
        long_term_care: care.amount,
        employment_insurance: employment.amount,
    };
    let total = contributions.total();

    let total_step = AuditStep {
        step_number: step_number + 4,
        rule_id: "total_insurance".to_string(),
        rule_name: "Total Insurance".to_string(),
        input: serde_json::json!({
            "national_pension": contributions.national_pension.normalize().to_string(),
            "health_insurance": contributions.health_insurance.normalize().to_string(),
            "long_term_care": contributions.long_term_care.normalize().to_string(),
            "employment_insurance": contributions.employment_insurance.normalize().to_string()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!("Sum of four contributions = ₩{}", total.round_dp(2)),
    };

    InsuranceResult {
        contributions,
        audit_steps: vec![
            pension.audit_step,
            health.audit_step,
            care.audit_step,
            employment.audit_step,
            total_step,
        ],
    }
}
