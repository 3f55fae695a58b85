//! Deduction calculation.
//!
//! This module computes the per-period deductions for one employee: tax,
//! attendance-based deduction, loan and advance installments, EOBI, and
//! provident fund.

use rust_decimal::Decimal;

use crate::config::{AttendancePolicy, StatutoryConfig};
use crate::models::{AdvanceInstallment, AttendanceSummary, LoanInstallment, PayPeriod};

use super::rounding::round_currency;
use super::tax::TaxPolicy;

/// The computed deduction fields for one employee and period.
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionTotals {
    /// Tax computed by the tax policy collaborator.
    pub tax_deduction: Decimal,
    /// Pro-rated attendance deduction.
    pub attendance_deduction: Decimal,
    /// Loan installment, truncated to the outstanding balance.
    pub loan_deduction: Decimal,
    /// Advance-salary installment, truncated to the outstanding balance.
    pub advance_salary_deduction: Decimal,
    /// Statutory EOBI contribution.
    pub eobi_deduction: Decimal,
    /// Provident fund contribution.
    pub provident_fund_deduction: Decimal,
}

impl DeductionTotals {
    /// Sum of all deduction fields.
    pub fn sum(&self) -> Decimal {
        self.tax_deduction
            + self.attendance_deduction
            + self.loan_deduction
            + self.advance_salary_deduction
            + self.eobi_deduction
            + self.provident_fund_deduction
    }
}

/// Computes the attendance deduction as a pro-rated fraction of gross.
///
/// The weighted missed-day count is
/// `absent + short × short_day_fraction + late × late_day_fraction`, and
/// the deduction is `gross × weighted / scheduled_days`. The weights and
/// the scheduled-day policy come from [`AttendancePolicy`]; scheduled days
/// default to the calendar days of the period's month.
pub fn calculate_attendance_deduction(
    gross: Decimal,
    attendance: AttendanceSummary,
    policy: &AttendancePolicy,
    period: PayPeriod,
) -> Decimal {
    let scheduled_days = policy
        .scheduled_days
        .unwrap_or_else(|| period.days_in_month());
    if scheduled_days == 0 {
        return Decimal::ZERO;
    }

    let weighted = Decimal::from(attendance.absent_days)
        + Decimal::from(attendance.short_days) * policy.short_day_fraction
        + Decimal::from(attendance.late_days) * policy.late_day_fraction;

    round_currency(gross * weighted / Decimal::from(scheduled_days))
}

/// Truncates an installment to the remaining outstanding balance.
///
/// Partial final installments deduct only what is still owed; an
/// installment never overpays, and exhausted or negative balances deduct
/// nothing.
pub fn truncate_installment(amount: Decimal, outstanding: Decimal) -> Decimal {
    amount.min(outstanding).max(Decimal::ZERO)
}

/// Computes all deduction fields for one employee and period.
///
/// Tax comes from the pluggable [`TaxPolicy`]; EOBI and provident fund
/// apply only when the corresponding employee flags are set, using the
/// configured statutory amounts.
#[allow(clippy::too_many_arguments)]
pub fn calculate_deductions(
    gross_so_far: Decimal,
    basic_salary: Decimal,
    attendance: AttendanceSummary,
    loan_installment: Option<&LoanInstallment>,
    advance_installment: Option<&AdvanceInstallment>,
    eobi: bool,
    provident_fund: bool,
    attendance_policy: &AttendancePolicy,
    statutory: &StatutoryConfig,
    tax_policy: &dyn TaxPolicy,
    period: PayPeriod,
) -> DeductionTotals {
    let tax_deduction = round_currency(tax_policy.monthly_tax(gross_so_far));

    let attendance_deduction =
        calculate_attendance_deduction(gross_so_far, attendance, attendance_policy, period);

    let loan_deduction = loan_installment
        .map(|i| round_currency(truncate_installment(i.amount, i.outstanding)))
        .unwrap_or(Decimal::ZERO);

    let advance_salary_deduction = advance_installment
        .map(|i| round_currency(truncate_installment(i.amount, i.outstanding)))
        .unwrap_or(Decimal::ZERO);

    let eobi_deduction = if eobi {
        round_currency(statutory.eobi_amount)
    } else {
        Decimal::ZERO
    };

    let provident_fund_deduction = if provident_fund {
        round_currency(basic_salary * statutory.provident_fund_rate / Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    DeductionTotals {
        tax_deduction,
        attendance_deduction,
        loan_deduction,
        advance_salary_deduction,
        eobi_deduction,
        provident_fund_deduction,
    }
}
