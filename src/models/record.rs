//! Confirmed payroll record model.
//!
//! A [`PayrollRecord`] is the immutable counterpart of a preview line,
//! created exactly once per `(employee_id, period)` by the confirm step.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayPeriod, PayrollPreviewLine, ResolvedComponent};

/// An immutable, confirmed payroll line.
///
/// Subsequent confirm attempts for the same `(employee_id, period)` are
/// rejected, never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// The employee this record is for.
    pub employee_id: String,
    /// The period this record covers.
    pub period: PayPeriod,
    /// The employee's base salary at confirmation time.
    pub basic_salary: Decimal,
    /// The resolved salary breakup components.
    pub salary_breakup: Vec<ResolvedComponent>,
    /// Sum of allowance adjustments.
    pub total_allowances: Decimal,
    /// Sum of overtime adjustments.
    pub overtime_amount: Decimal,
    /// Sum of bonus adjustments.
    pub bonus_amount: Decimal,
    /// Sum of ad-hoc deductions.
    pub total_deductions: Decimal,
    /// Tax deduction.
    pub tax_deduction: Decimal,
    /// Attendance-based deduction.
    pub attendance_deduction: Decimal,
    /// Loan installment deduction.
    pub loan_deduction: Decimal,
    /// Advance-salary installment deduction.
    pub advance_salary_deduction: Decimal,
    /// Statutory EOBI deduction.
    pub eobi_deduction: Decimal,
    /// Provident fund deduction.
    pub provident_fund_deduction: Decimal,
    /// Gross salary.
    pub gross_salary: Decimal,
    /// Net salary. Negative values are preserved and flagged for review
    /// upstream, never clamped.
    pub net_salary: Decimal,
    /// Whether the line was flagged as needing review at confirmation.
    pub needs_review: bool,
    /// The authenticated actor who confirmed the run.
    pub generated_by: String,
    /// When the record was confirmed.
    pub confirmed_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Builds a record from a finalized preview line.
    pub fn from_line(
        line: &PayrollPreviewLine,
        period: PayPeriod,
        generated_by: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: line.employee_id.clone(),
            period,
            basic_salary: line.basic_salary,
            salary_breakup: line.salary_breakup.clone(),
            total_allowances: line.total_allowances,
            overtime_amount: line.overtime_amount,
            bonus_amount: line.bonus_amount,
            total_deductions: line.total_deductions,
            tax_deduction: line.tax_deduction,
            attendance_deduction: line.attendance_deduction,
            loan_deduction: line.loan_deduction,
            advance_salary_deduction: line.advance_salary_deduction,
            eobi_deduction: line.eobi_deduction,
            provident_fund_deduction: line.provident_fund_deduction,
            gross_salary: line.gross_salary,
            net_salary: line.net_salary,
            needs_review: line.needs_review,
            generated_by: generated_by.to_string(),
            confirmed_at,
        }
    }
}
