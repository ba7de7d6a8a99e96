//! Property tests for the pay calculation.
//!
//! These check relationships that must hold for every salary and dependent
//! count rather than specific figures.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use salary_calculator::calculation::{PayCalculation, PayrollCalculator, calculate_bracket_tax};
use salary_calculator::config::{ConfigLoader, PayrollConfig};

fn config() -> Arc<PayrollConfig> {
    Arc::new(
        ConfigLoader::embedded()
            .expect("Failed to load config")
            .into_config(),
    )
}

fn calculate(salary: u64, dependents: u32) -> PayCalculation {
    PayrollCalculator::new(config())
        .calculate(Decimal::from(salary), dependents)
        .expect("calculation failed")
}

proptest! {
    #[test]
    fn net_never_exceeds_gross(salary in 1u64..5_000_000_000, dependents in 1u32..=20) {
        let result = calculate(salary, dependents);
        let monthly = &result.breakdown.monthly;

        prop_assert!(monthly.net <= monthly.gross);
        prop_assert!(result.breakdown.annual.net <= result.breakdown.annual.gross);
    }

    #[test]
    fn components_are_never_negative(salary in 1u64..5_000_000_000, dependents in 1u32..=20) {
        let monthly = calculate(salary, dependents).breakdown.monthly;

        for value in [
            monthly.national_pension,
            monthly.health_insurance,
            monthly.long_term_care,
            monthly.employment_insurance,
            monthly.total_insurance,
            monthly.income_tax,
            monthly.local_income_tax,
            monthly.total_deductions,
        ] {
            prop_assert!(value >= Decimal::ZERO);
        }
    }

    #[test]
    fn national_pension_never_exceeds_cap(salary in 1u64..5_000_000_000) {
        let monthly = calculate(salary, 1).breakdown.monthly;
        prop_assert!(monthly.national_pension <= Decimal::from(265_500));
    }

    #[test]
    fn unrounded_amounts_balance_exactly(salary in 1u64..5_000_000_000, dependents in 1u32..=20) {
        let m = calculate(salary, dependents).unrounded;

        prop_assert_eq!(
            m.total_insurance,
            m.national_pension + m.health_insurance + m.long_term_care + m.employment_insurance
        );
        prop_assert_eq!(m.total_deductions, m.total_insurance + m.income_tax + m.local_income_tax);
        prop_assert_eq!(m.net, m.gross - m.total_deductions);
    }

    #[test]
    fn rounded_net_is_within_one_won_of_rounded_parts(
        salary in 1u64..5_000_000_000,
        dependents in 1u32..=20,
    ) {
        let monthly = calculate(salary, dependents).breakdown.monthly;
        let drift = (monthly.gross - monthly.total_deductions - monthly.net).abs();
        prop_assert!(drift <= Decimal::ONE, "drift {} too large", drift);
    }

    #[test]
    fn income_tax_never_falls_as_salary_rises(
        salary in 1u64..2_000_000_000,
        raise in 1u64..50_000_000,
        dependents in 1u32..=10,
    ) {
        let lower = calculate(salary, dependents);
        let higher = calculate(salary + raise, dependents);

        prop_assert!(higher.taxable_income > lower.taxable_income);
        prop_assert!(higher.annual_income_tax >= lower.annual_income_tax);
    }

    #[test]
    fn extra_dependent_never_raises_tax(salary in 1u64..2_000_000_000, dependents in 1u32..=19) {
        let fewer = calculate(salary, dependents);
        let more = calculate(salary, dependents + 1);

        prop_assert!(more.annual_income_tax <= fewer.annual_income_tax);
        prop_assert_eq!(more.breakdown.monthly.total_insurance, fewer.breakdown.monthly.total_insurance);
    }

    #[test]
    fn bracket_tax_is_monotonic_in_taxable_income(
        income in 0i64..3_000_000_000,
        step in 1i64..100_000_000,
    ) {
        let config = config();
        let table = config.tax_brackets();
        let lower = calculate_bracket_tax(Decimal::from(income), table, 1).tax;
        let higher = calculate_bracket_tax(Decimal::from(income + step), table, 1).tax;

        prop_assert!(lower >= Decimal::ZERO);
        prop_assert!(higher >= lower);
    }
}
