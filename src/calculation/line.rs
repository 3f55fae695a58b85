//! Payroll line totals.
//!
//! The single pure gross/net computation shared by the initial preview,
//! client-edit recomputes, and server-side confirmation. Having exactly one
//! implementation is what rules out preview/confirm drift.

use rust_decimal::Decimal;

use crate::models::{PayrollPreviewLine, PreviewWarning};

use super::rounding::round_currency;

/// Warning code attached to lines whose net salary is negative.
pub const NEGATIVE_NET_WARNING: &str = "NEGATIVE_NET_SALARY";

/// The computed totals of one payroll line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTotals {
    /// `basic + allowances + overtime + bonus`.
    pub gross_salary: Decimal,
    /// Sum of all seven deduction fields.
    pub total_deductions_sum: Decimal,
    /// `gross - total_deductions_sum`. May be negative.
    pub net_salary: Decimal,
    /// True when the net is negative and the line needs review.
    pub needs_review: bool,
}

/// Computes gross and net for one payroll line.
///
/// Pure function, no I/O. A negative net salary is propagated and flagged
/// for review, never clamped to zero. Outputs are rounded half-up to two
/// decimal places at this emission point; inputs are used exactly as given.
///
/// ```text
/// gross = basic + total_allowances + overtime + bonus
/// total_deductions_sum = total_deductions + tax + attendance + loan
///                        + advance + eobi + provident_fund
/// net = gross - total_deductions_sum
/// ```
#[allow(clippy::too_many_arguments)]
pub fn compute_line_totals(
    basic_salary: Decimal,
    total_allowances: Decimal,
    overtime_amount: Decimal,
    bonus_amount: Decimal,
    total_deductions: Decimal,
    tax_deduction: Decimal,
    attendance_deduction: Decimal,
    loan_deduction: Decimal,
    advance_salary_deduction: Decimal,
    eobi_deduction: Decimal,
    provident_fund_deduction: Decimal,
) -> LineTotals {
    let gross_salary =
        round_currency(basic_salary + total_allowances + overtime_amount + bonus_amount);

    let total_deductions_sum = round_currency(
        total_deductions
            + tax_deduction
            + attendance_deduction
            + loan_deduction
            + advance_salary_deduction
            + eobi_deduction
            + provident_fund_deduction,
    );

    let net_salary = gross_salary - total_deductions_sum;

    LineTotals {
        gross_salary,
        total_deductions_sum,
        net_salary,
        needs_review: net_salary < Decimal::ZERO,
    }
}

/// Recomputes a preview line's gross and net in place.
///
/// Called after any edit to the adjustable fields (`total_allowances`,
/// `overtime_amount`, `bonus_amount`, `total_deductions`) and again at
/// confirm time. Uses [`compute_line_totals`], so an edited line can never
/// disagree with what confirmation would compute.
pub fn recompute_line(line: &mut PayrollPreviewLine) {
    let totals = compute_line_totals(
        line.basic_salary,
        line.total_allowances,
        line.overtime_amount,
        line.bonus_amount,
        line.total_deductions,
        line.tax_deduction,
        line.attendance_deduction,
        line.loan_deduction,
        line.advance_salary_deduction,
        line.eobi_deduction,
        line.provident_fund_deduction,
    );

    line.gross_salary = totals.gross_salary;
    line.net_salary = totals.net_salary;
    line.needs_review = totals.needs_review;

    line.warnings.retain(|w| w.code != NEGATIVE_NET_WARNING);
    if totals.needs_review {
        line.warnings.push(PreviewWarning::new(
            NEGATIVE_NET_WARNING,
            format!(
                "net salary {} is negative; line requires review before confirmation",
                totals.net_salary
            ),
        ));
    }
}
