//! Ad-hoc adjustment and installment models.
//!
//! Adjustments (allowances, overtime, bonuses, ad-hoc deductions) and
//! loan/advance installments are created by upstream workflows before a
//! payroll run reads them. The engine never mutates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayPeriod;

/// The kind of an ad-hoc payroll adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// A one-off allowance added to gross pay.
    Allowance,
    /// An overtime payment added to gross pay.
    Overtime,
    /// A bonus added to gross pay.
    Bonus,
    /// An ad-hoc deduction (non-tax, non-statutory).
    Deduction,
}

/// A one-off adjustment entered for a specific employee and period.
///
/// Percentage-based bonuses and allowances carry `percentage` instead of a
/// pre-resolved amount; they are resolved against the employee's base salary
/// at aggregation time, so a salary change before the payroll run changes
/// the computed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollAdjustment {
    /// The employee this adjustment applies to.
    pub employee_id: String,
    /// The period this adjustment applies to.
    pub period: PayPeriod,
    /// The kind of adjustment.
    pub kind: AdjustmentKind,
    /// The fixed amount. Ignored when `percentage` is set.
    pub amount: Decimal,
    /// Optional percentage of base salary (for percentage-based bonus or
    /// allowance types).
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// Whether the adjustment is subject to tax.
    pub is_taxable: bool,
}

/// A loan repayment installment scheduled for a period.
///
/// Derived from an amortization schedule maintained outside this engine.
/// The outstanding balance travels with the installment so the deduction
/// can be truncated locally without consulting the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInstallment {
    /// The employee repaying the loan.
    pub employee_id: String,
    /// The period the installment falls due in.
    pub period: PayPeriod,
    /// The scheduled installment amount.
    pub amount: Decimal,
    /// The remaining outstanding balance before this installment.
    pub outstanding: Decimal,
}

/// An advance-salary repayment installment scheduled for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceInstallment {
    /// The employee repaying the advance.
    pub employee_id: String,
    /// The period the installment falls due in.
    pub period: PayPeriod,
    /// The scheduled installment amount.
    pub amount: Decimal,
    /// The remaining outstanding balance before this installment.
    pub outstanding: Decimal,
}

/// Per-employee attendance counts for a period, read from the attendance
/// module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days the employee was absent.
    pub absent_days: u32,
    /// Days the employee worked a short day.
    pub short_days: u32,
    /// Days the employee arrived late.
    pub late_days: u32,
}
