//! Korean won formatting for display.
//!
//! Amounts are shown as whole won with comma-grouped digits and a `원`
//! suffix, matching how salaries are written in Korean payroll documents.

use rust_decimal::Decimal;

use crate::calculation::round_won;
use crate::models::PayBreakdown;

/// Formats an amount as whole won with grouped digits.
///
/// # Examples
///
/// ```
/// use salary_calculator::format::format_won;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_won(Decimal::from(2_637_244)), "2,637,244원");
/// assert_eq!(format_won(Decimal::from(-1_500)), "-1,500원");
/// ```
pub fn format_won(amount: Decimal) -> String {
    let rounded = round_won(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push('원');
    grouped
}

/// Parses user-typed salary text, ignoring everything but ASCII digits.
///
/// Returns `None` when no digits remain.
///
/// # Examples
///
/// ```
/// use salary_calculator::format::parse_won;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_won("40,000,000원"), Some(Decimal::from(40_000_000)));
/// assert_eq!(parse_won("연봉"), None);
/// ```
pub fn parse_won(input: &str) -> Option<Decimal> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<Decimal>().ok()
}

/// Renders every field of a breakdown as an aligned text report.
pub fn render_breakdown(breakdown: &PayBreakdown) -> String {
    let monthly = &breakdown.monthly;
    let rows = [
        ("Monthly gross", monthly.gross),
        ("National pension", monthly.national_pension),
        ("Health insurance", monthly.health_insurance),
        ("Long-term care", monthly.long_term_care),
        ("Employment insurance", monthly.employment_insurance),
        ("Total insurance", monthly.total_insurance),
        ("Income tax", monthly.income_tax),
        ("Local income tax", monthly.local_income_tax),
        ("Total deductions", monthly.total_deductions),
        ("Monthly net", monthly.net),
    ];

    let mut out = report_line("Annual gross", breakdown.annual.gross);
    out.push_str(&report_line("Annual net", breakdown.annual.net));
    out.push_str(&"-".repeat(REPORT_WIDTH));
    out.push('\n');
    for (label, amount) in rows {
        out.push_str(&report_line(label, amount));
    }
    out
}

const REPORT_WIDTH: usize = 42;

fn report_line(label: &str, amount: Decimal) -> String {
    format!("{:<22}{:>20}\n", label, format_won(amount))
}
