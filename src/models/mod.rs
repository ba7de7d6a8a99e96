//! Core data models for the salary calculator.
//!
//! This module contains the result types produced by a calculation.

mod audit;
mod pay_breakdown;

pub use audit::{AuditStep, AuditTrace};
pub use pay_breakdown::{AnnualPay, MonthlyAmounts, MonthlyPay, PayBreakdown};
