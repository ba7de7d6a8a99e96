//! Calculation logic for the salary calculator.
//!
//! This module contains the rule functions for the four social insurance
//! contributions, taxable income, progressive bracket tax, the dependent
//! deduction, monthly and local income tax, and the [`PayrollCalculator`]
//! that sequences them into a pay breakdown.

mod calculator;
mod income_tax;
mod insurance;
mod rounding;

pub use calculator::{MAX_ANNUAL_SALARY, PayCalculation, PayrollCalculator};
pub use income_tax::{
    BracketTaxResult, DependentDeductionResult, MONTHS_PER_YEAR, MonthlyTaxResult,
    TaxableIncomeResult, apply_dependent_deduction, calculate_bracket_tax, calculate_monthly_tax,
    calculate_taxable_income,
};
pub use insurance::{
    ContributionResult, InsuranceContributions, InsuranceResult, calculate_employment_insurance,
    calculate_health_insurance, calculate_insurance, calculate_long_term_care,
    calculate_national_pension,
};
pub use rounding::round_won;
