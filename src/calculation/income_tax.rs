//! Income tax calculation.
//!
//! Annual income tax is taken from the progressive bracket table, reduced by
//! a flat per-dependent deduction, then spread over twelve months with a
//! local income tax surcharge on top.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::{DeductionPolicy, TaxBracket, TaxBracketTable};
use crate::models::AuditStep;

/// Months per year.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// The result of estimating annual taxable income.
#[derive(Debug, Clone)]
pub struct TaxableIncomeResult {
    /// Annual gross minus twelve months of insurance. May be negative.
    pub taxable_income: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of the bracket lookup.
#[derive(Debug, Clone)]
pub struct BracketTaxResult {
    /// Annual income tax before the dependent deduction.
    pub tax: Decimal,
    /// The bracket the scan settled on, if any applied.
    pub bracket: Option<TaxBracket>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of applying the dependent deduction.
#[derive(Debug, Clone)]
pub struct DependentDeductionResult {
    /// Annual income tax after the deduction, never negative.
    pub tax: Decimal,
    /// The deduction amount requested (before flooring at zero).
    pub deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of splitting annual tax into monthly income and local tax.
#[derive(Debug, Clone)]
pub struct MonthlyTaxResult {
    /// Monthly share of annual income tax.
    pub income_tax: Decimal,
    /// Local income tax on the monthly income tax.
    pub local_income_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Estimates annual taxable income as `annual_gross - monthly_insurance * 12`.
pub fn calculate_taxable_income(
    annual_gross: Decimal,
    monthly_insurance: Decimal,
    step_number: u32,
) -> TaxableIncomeResult {
    let annual_insurance = monthly_insurance * MONTHS_PER_YEAR;
    let taxable_income = annual_gross - annual_insurance;

    TaxableIncomeResult {
        taxable_income,
        audit_step: AuditStep {
            step_number,
            rule_id: "taxable_income".to_string(),
            rule_name: "Taxable Income".to_string(),
            input: serde_json::json!({
                "annual_gross": annual_gross.normalize().to_string(),
                "monthly_insurance": monthly_insurance.normalize().to_string()
            }),
            output: serde_json::json!({
                "taxable_income": taxable_income.normalize().to_string()
            }),
            reasoning: format!(
                "₩{} - ₩{} x 12 = ₩{}",
                annual_gross.normalize(),
                monthly_insurance.round_dp(2),
                taxable_income.round_dp(2)
            ),
        },
    }
}

/// Computes annual income tax from the bracket table.
///
/// Brackets are scanned in ascending order. Every bracket whose `min` is
/// strictly below `taxable_income` recomputes the tax with its own rate and
/// deduction, and the scan stops at the first of those whose `max` is at or
/// above `taxable_income`. Income of zero or less matches no bracket and
/// owes no tax.
///
/// # Examples
///
/// ```
/// use salary_calculator::calculation::calculate_bracket_tax;
/// use salary_calculator::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = ConfigLoader::embedded().unwrap().into_config();
/// let result = calculate_bracket_tax(Decimal::from(36_240_628), config.tax_brackets(), 1);
/// assert_eq!(result.tax, Decimal::from_str("4176094.2").unwrap());
/// ```
pub fn calculate_bracket_tax(
    taxable_income: Decimal,
    table: &TaxBracketTable,
    step_number: u32,
) -> BracketTaxResult {
    let mut tax = Decimal::ZERO;
    let mut applied: Option<TaxBracket> = None;

    for bracket in table {
        if taxable_income > bracket.min {
            tax = bracket.tax_for(taxable_income);
            applied = Some(*bracket);
            if bracket.covers(taxable_income) {
                break;
            }
        }
    }

    let (bracket_json, reasoning) = match &applied {
        Some(b) => (
            serde_json::json!({
                "min": b.min.normalize().to_string(),
                "max": b.max.map(|m| m.normalize().to_string()),
                "rate": b.rate.normalize().to_string(),
                "deduction": b.deduction.normalize().to_string()
            }),
            format!(
                "₩{} x {} - ₩{} = ₩{}",
                taxable_income.round_dp(2),
                b.rate.normalize(),
                b.deduction.normalize(),
                tax.round_dp(2)
            ),
        ),
        None => (
            serde_json::Value::Null,
            format!(
                "No tax - taxable income ₩{} is not above 0",
                taxable_income.round_dp(2)
            ),
        ),
    };

    BracketTaxResult {
        tax,
        bracket: applied,
        audit_step: AuditStep {
            step_number,
            rule_id: "bracket_tax".to_string(),
            rule_name: "Progressive Income Tax".to_string(),
            input: serde_json::json!({
                "taxable_income": taxable_income.normalize().to_string()
            }),
            output: serde_json::json!({
                "annual_tax": tax.normalize().to_string(),
                "bracket": bracket_json
            }),
            reasoning,
        },
    }
}

/// Reduces annual income tax by `(dependents - 1) * per-dependent deduction`.
///
/// The result is floored at zero. `dependents` must be at least 1; the
/// calculator rejects smaller values before getting here.
pub fn apply_dependent_deduction(
    annual_tax: Decimal,
    dependents: u32,
    policy: &DeductionPolicy,
    step_number: u32,
) -> DependentDeductionResult {
    let extra_dependents = Decimal::from(dependents.saturating_sub(1));
    let deduction = extra_dependents * policy.per_dependent_deduction();
    let tax = (annual_tax - deduction).max(Decimal::ZERO);

    DependentDeductionResult {
        tax,
        deduction,
        audit_step: AuditStep {
            step_number,
            rule_id: "dependent_deduction".to_string(),
            rule_name: "Dependent Deduction".to_string(),
            input: serde_json::json!({
                "annual_tax": annual_tax.normalize().to_string(),
                "dependents": dependents,
                "per_dependent": policy.per_dependent_deduction().normalize().to_string()
            }),
            output: serde_json::json!({
                "deduction": deduction.normalize().to_string(),
                "annual_tax": tax.normalize().to_string()
            }),
            reasoning: format!(
                "max(0, ₩{} - {} x ₩{}) = ₩{}",
                annual_tax.round_dp(2),
                extra_dependents,
                policy.per_dependent_deduction().normalize(),
                tax.round_dp(2)
            ),
        },
    }
}

/// Splits annual income tax into a monthly amount and adds local income tax.
pub fn calculate_monthly_tax(
    annual_tax: Decimal,
    policy: &DeductionPolicy,
    step_number: u32,
) -> MonthlyTaxResult {
    let income_tax = annual_tax / MONTHS_PER_YEAR;
    let local_income_tax = income_tax * policy.local_income_tax_rate;

    MonthlyTaxResult {
        income_tax,
        local_income_tax,
        audit_step: AuditStep {
            step_number,
            rule_id: "monthly_tax".to_string(),
            rule_name: "Monthly Income and Local Income Tax".to_string(),
            input: serde_json::json!({
                "annual_tax": annual_tax.normalize().to_string(),
                "local_rate": policy.local_income_tax_rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "income_tax": income_tax.normalize().to_string(),
                "local_income_tax": local_income_tax.normalize().to_string()
            }),
            reasoning: format!(
                "₩{} / 12 = ₩{}; local tax ₩{} x {} = ₩{}",
                annual_tax.round_dp(2),
                income_tax.round_dp(2),
                income_tax.round_dp(2),
                policy.local_income_tax_rate.normalize(),
                local_income_tax.round_dp(2)
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn table() -> TaxBracketTable {
        ConfigLoader::embedded()
            .unwrap()
            .config()
            .tax_brackets()
            .clone()
    }

    fn policy() -> DeductionPolicy {
        *ConfigLoader::embedded().unwrap().config().policy()
    }

    #[test]
    fn test_months_per_year_is_twelve() {
        assert_eq!(MONTHS_PER_YEAR, dec("12"));
    }

    #[test]
    fn test_taxable_income() {
        let result = calculate_taxable_income(dec("40000000"), dec("313281"), 7);

        assert_eq!(result.taxable_income, dec("36240628"));
        assert_eq!(result.audit_step.rule_id, "taxable_income");
        assert_eq!(result.audit_step.step_number, 7);
    }

    #[test]
    fn test_bracket_tax_second_bracket() {
        let result = calculate_bracket_tax(dec("36240628"), &table(), 1);

        assert_eq!(result.tax, dec("4176094.2"));
        let bracket = result.bracket.unwrap();
        assert_eq!(bracket.rate, dec("0.15"));
        assert_eq!(bracket.deduction, dec("1260000"));
    }

    #[test]
    fn test_bracket_tax_first_bracket() {
        let result = calculate_bracket_tax(dec("10000000"), &table(), 1);

        assert_eq!(result.tax, dec("600000"));
        assert_eq!(result.bracket.unwrap().rate, dec("0.06"));
    }

    #[test]
    fn test_bracket_tax_boundary_stays_in_lower_bracket() {
        let result = calculate_bracket_tax(dec("14000000"), &table(), 1);

        assert_eq!(result.bracket.unwrap().rate, dec("0.06"));
        assert_eq!(result.tax, dec("840000"));
    }

    #[test]
    fn test_bracket_tax_just_above_boundary_moves_up() {
        let result = calculate_bracket_tax(dec("14000001"), &table(), 1);

        assert_eq!(result.bracket.unwrap().rate, dec("0.15"));
        assert_eq!(result.tax, dec("840000.15"));
    }

    #[test]
    fn test_bracket_tax_top_bracket() {
        let result = calculate_bracket_tax(dec("2000000000"), &table(), 1);

        let bracket = result.bracket.unwrap();
        assert_eq!(bracket.max, None);
        assert_eq!(result.tax, dec("834060000"));
    }

    #[test]
    fn test_bracket_tax_zero_income() {
        let result = calculate_bracket_tax(Decimal::ZERO, &table(), 1);

        assert_eq!(result.tax, Decimal::ZERO);
        assert!(result.bracket.is_none());
        assert!(result.audit_step.output["bracket"].is_null());
    }

    #[test]
    fn test_bracket_tax_negative_income() {
        let result = calculate_bracket_tax(dec("-5000"), &table(), 1);

        assert_eq!(result.tax, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("No tax"));
    }

    #[test]
    fn test_bracket_tax_is_continuous_at_every_boundary() {
        let table = table();
        for bracket in table.brackets() {
            if let Some(max) = bracket.max {
                let at = calculate_bracket_tax(max, &table, 1).tax;
                let above = calculate_bracket_tax(max + dec("0.01"), &table, 1).tax;
                assert!(above >= at, "tax drops across boundary {}", max);
                assert!(above - at < dec("0.01"), "tax jumps across boundary {}", max);
            }
        }
    }

    #[test]
    fn test_single_dependent_has_no_deduction() {
        let result = apply_dependent_deduction(dec("4176094.2"), 1, &policy(), 1);

        assert_eq!(result.deduction, Decimal::ZERO);
        assert_eq!(result.tax, dec("4176094.2"));
    }

    #[test]
    fn test_three_dependents_deduct_450000() {
        let result = apply_dependent_deduction(dec("4176094.2"), 3, &policy(), 1);

        assert_eq!(result.deduction, dec("450000"));
        assert_eq!(result.tax, dec("3726094.2"));
    }

    #[test]
    fn test_dependent_deduction_floors_at_zero() {
        let result = apply_dependent_deduction(dec("100000"), 5, &policy(), 1);

        assert_eq!(result.deduction, dec("900000"));
        assert_eq!(result.tax, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_tax_and_local_tax() {
        let result = calculate_monthly_tax(dec("4176094.2"), &policy(), 1);

        assert_eq!(result.income_tax, dec("348007.85"));
        assert_eq!(result.local_income_tax, dec("34800.785"));
        assert_eq!(result.audit_step.rule_id, "monthly_tax");
    }
}
