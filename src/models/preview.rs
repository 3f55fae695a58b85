//! Payroll preview line model.
//!
//! A [`PayrollPreviewLine`] is the editable, per-employee row produced by
//! the preview phase. Lines live only in the preview; nothing is persisted
//! until the batch is confirmed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ResolvedComponent;

/// A warning attached to a preview line.
///
/// Warnings indicate conditions that do not prevent calculation but should
/// be visible during review (a breakup not summing to 100%, a percentage
/// bonus resolved without salary data, a negative net).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

impl PreviewWarning {
    /// Creates a new warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The computed payroll row for one employee and period.
///
/// The four adjustable fields (`total_allowances`, `overtime_amount`,
/// `bonus_amount`, `total_deductions`) may be edited during the preview
/// phase; gross and net are then recomputed with the same pure function
/// used to build the line, so the preview and the confirmed record can
/// never drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollPreviewLine {
    /// The employee this line is for.
    pub employee_id: String,
    /// The employee's base salary for the period.
    pub basic_salary: Decimal,
    /// The resolved salary breakup components.
    pub salary_breakup: Vec<ResolvedComponent>,
    /// Sum of allowance adjustments for the period. Adjustable.
    pub total_allowances: Decimal,
    /// Sum of overtime adjustments for the period. Adjustable.
    pub overtime_amount: Decimal,
    /// Sum of bonus adjustments for the period. Adjustable.
    pub bonus_amount: Decimal,
    /// Sum of ad-hoc (non-tax, non-statutory) deductions. Adjustable.
    pub total_deductions: Decimal,
    /// Tax computed by the configured tax policy.
    pub tax_deduction: Decimal,
    /// Attendance-based deduction for the period.
    pub attendance_deduction: Decimal,
    /// Loan installment deduction, truncated to the outstanding balance.
    pub loan_deduction: Decimal,
    /// Advance-salary installment deduction, truncated to the outstanding
    /// balance.
    pub advance_salary_deduction: Decimal,
    /// Statutory EOBI deduction.
    pub eobi_deduction: Decimal,
    /// Provident fund deduction.
    pub provident_fund_deduction: Decimal,
    /// Gross salary: basic + allowances + overtime + bonus.
    pub gross_salary: Decimal,
    /// Net salary: gross minus all deductions. May be negative.
    pub net_salary: Decimal,
    /// Warnings surfaced during calculation.
    #[serde(default)]
    pub warnings: Vec<PreviewWarning>,
    /// Set when the line could not be calculated (e.g. missing salary
    /// data). Error-flagged lines block confirmation of the batch.
    #[serde(default)]
    pub error: Option<String>,
    /// Set when the line needs human review before confirmation is
    /// advisable (currently: negative net salary).
    #[serde(default)]
    pub needs_review: bool,
}

impl PayrollPreviewLine {
    /// Returns true when this line failed to calculate and must be
    /// resolved before the batch can be confirmed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
