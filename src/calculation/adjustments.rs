//! Ad-hoc adjustment aggregation.
//!
//! This module sums the allowances, overtime, bonuses, and ad-hoc
//! deductions entered for an employee and period by upstream workflows.

use rust_decimal::Decimal;

use crate::models::{AdjustmentKind, PayrollAdjustment, PreviewWarning};

use super::rounding::round_currency;

/// Warning code emitted when a percentage adjustment cannot be resolved
/// because the employee has no base salary configured.
pub const PERCENTAGE_WITHOUT_SALARY_WARNING: &str = "PERCENTAGE_ADJUSTMENT_WITHOUT_SALARY";

/// The aggregated adjustment totals for one employee and period.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentTotals {
    /// Sum of allowance adjustments.
    pub total_allowances: Decimal,
    /// Sum of overtime adjustments.
    pub overtime_amount: Decimal,
    /// Sum of bonus adjustments.
    pub bonus_amount: Decimal,
    /// Sum of ad-hoc deductions (non-tax, non-statutory).
    pub total_deductions: Decimal,
    /// Warnings raised while resolving percentage-based adjustments.
    pub warnings: Vec<PreviewWarning>,
}

/// Sums all adjustments for an employee, resolving percentage-based
/// entries against the base salary.
///
/// Percentage-based bonuses and allowances are resolved at aggregation
/// time, not at entry time: a salary change before the payroll run changes
/// the computed amount. This is deliberate, documented behavior.
///
/// When `base_salary` is `None` and a percentage adjustment is present,
/// that adjustment contributes zero and a warning is recorded; the
/// aggregation itself never fails.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_adjustments;
/// use payroll_engine::models::{AdjustmentKind, PayPeriod, PayrollAdjustment};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let period = PayPeriod::new(2026, 3).unwrap();
/// let adjustments = vec![PayrollAdjustment {
///     employee_id: "emp_001".to_string(),
///     period,
///     kind: AdjustmentKind::Bonus,
///     amount: Decimal::ZERO,
///     percentage: Some(Decimal::from_str("10").unwrap()),
///     is_taxable: true,
/// }];
///
/// let totals = aggregate_adjustments(
///     Some(Decimal::from_str("30000").unwrap()),
///     &adjustments,
/// );
/// assert_eq!(totals.bonus_amount, Decimal::from_str("3000.00").unwrap());
/// ```
pub fn aggregate_adjustments(
    base_salary: Option<Decimal>,
    adjustments: &[PayrollAdjustment],
) -> AdjustmentTotals {
    let mut totals = AdjustmentTotals {
        total_allowances: Decimal::ZERO,
        overtime_amount: Decimal::ZERO,
        bonus_amount: Decimal::ZERO,
        total_deductions: Decimal::ZERO,
        warnings: Vec::new(),
    };

    for adjustment in adjustments {
        let amount = match adjustment.percentage {
            Some(percentage) => match base_salary {
                Some(salary) => salary * percentage / Decimal::ONE_HUNDRED,
                None => {
                    totals.warnings.push(PreviewWarning::new(
                        PERCENTAGE_WITHOUT_SALARY_WARNING,
                        format!(
                            "{:?} adjustment of {percentage}% for employee '{}' resolved to 0: no base salary configured",
                            adjustment.kind, adjustment.employee_id
                        ),
                    ));
                    Decimal::ZERO
                }
            },
            None => adjustment.amount,
        };

        match adjustment.kind {
            AdjustmentKind::Allowance => totals.total_allowances += amount,
            AdjustmentKind::Overtime => totals.overtime_amount += amount,
            AdjustmentKind::Bonus => totals.bonus_amount += amount,
            AdjustmentKind::Deduction => totals.total_deductions += amount,
        }
    }

    totals.total_allowances = round_currency(totals.total_allowances);
    totals.overtime_amount = round_currency(totals.overtime_amount);
    totals.bonus_amount = round_currency(totals.bonus_amount);
    totals.total_deductions = round_currency(totals.total_deductions);
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayPeriod;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn adjustment(kind: AdjustmentKind, amount: &str) -> PayrollAdjustment {
        PayrollAdjustment {
            employee_id: "emp_001".to_string(),
            period: PayPeriod::new(2026, 3).unwrap(),
            kind,
            amount: dec(amount),
            percentage: None,
            is_taxable: true,
        }
    }

    fn percentage_adjustment(kind: AdjustmentKind, percentage: &str) -> PayrollAdjustment {
        PayrollAdjustment {
            employee_id: "emp_001".to_string(),
            period: PayPeriod::new(2026, 3).unwrap(),
            kind,
            amount: Decimal::ZERO,
            percentage: Some(dec(percentage)),
            is_taxable: true,
        }
    }

    /// AG-001: fixed adjustments sum per kind
    #[test]
    fn test_fixed_adjustments_sum_per_kind() {
        let adjustments = vec![
            adjustment(AdjustmentKind::Allowance, "1500"),
            adjustment(AdjustmentKind::Allowance, "500"),
            adjustment(AdjustmentKind::Overtime, "1200"),
            adjustment(AdjustmentKind::Bonus, "5000"),
            adjustment(AdjustmentKind::Deduction, "750"),
        ];

        let totals = aggregate_adjustments(Some(dec("50000")), &adjustments);

        assert_eq!(totals.total_allowances, dec("2000"));
        assert_eq!(totals.overtime_amount, dec("1200"));
        assert_eq!(totals.bonus_amount, dec("5000"));
        assert_eq!(totals.total_deductions, dec("750"));
        assert!(totals.warnings.is_empty());
    }

    /// AG-002: percentage bonus resolves against current base salary
    #[test]
    fn test_percentage_bonus_resolves_against_current_salary() {
        let adjustments = vec![percentage_adjustment(AdjustmentKind::Bonus, "10")];

        let before = aggregate_adjustments(Some(dec("30000")), &adjustments);
        assert_eq!(before.bonus_amount, dec("3000.00"));

        // A salary change before the run changes the computed bonus.
        let after = aggregate_adjustments(Some(dec("40000")), &adjustments);
        assert_eq!(after.bonus_amount, dec("4000.00"));
    }

    /// AG-003: percentage adjustment without salary degrades to zero + warning
    #[test]
    fn test_percentage_without_salary_warns_and_yields_zero() {
        let adjustments = vec![percentage_adjustment(AdjustmentKind::Bonus, "10")];

        let totals = aggregate_adjustments(None, &adjustments);

        assert_eq!(totals.bonus_amount, dec("0"));
        assert_eq!(totals.warnings.len(), 1);
        assert_eq!(totals.warnings[0].code, PERCENTAGE_WITHOUT_SALARY_WARNING);
    }

    /// AG-004: no adjustments yields all-zero totals
    #[test]
    fn test_empty_adjustments_yield_zero_totals() {
        let totals = aggregate_adjustments(Some(dec("50000")), &[]);
        assert_eq!(totals.total_allowances, dec("0"));
        assert_eq!(totals.overtime_amount, dec("0"));
        assert_eq!(totals.bonus_amount, dec("0"));
        assert_eq!(totals.total_deductions, dec("0"));
    }

    #[test]
    fn test_percentage_allowance_also_resolves() {
        let adjustments = vec![percentage_adjustment(AdjustmentKind::Allowance, "5")];
        let totals = aggregate_adjustments(Some(dec("40000")), &adjustments);
        assert_eq!(totals.total_allowances, dec("2000.00"));
    }

    #[test]
    fn test_mixed_fixed_and_percentage_bonuses() {
        let adjustments = vec![
            adjustment(AdjustmentKind::Bonus, "2500"),
            percentage_adjustment(AdjustmentKind::Bonus, "10"),
        ];
        let totals = aggregate_adjustments(Some(dec("30000")), &adjustments);
        assert_eq!(totals.bonus_amount, dec("5500.00"));
    }

    #[test]
    fn test_totals_round_half_up_at_emission() {
        // 3.335% of 10000 = 333.50 after the half-up rule.
        let adjustments = vec![percentage_adjustment(AdjustmentKind::Allowance, "3.335")];
        let totals = aggregate_adjustments(Some(dec("10000")), &adjustments);
        assert_eq!(totals.total_allowances, dec("333.50"));
    }
}
