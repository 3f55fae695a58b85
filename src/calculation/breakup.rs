//! Salary breakup resolution.
//!
//! This module turns an employee's configured percentage-based salary
//! components into absolute currency amounts against a base salary.

use rust_decimal::Decimal;

use crate::models::{PreviewWarning, ResolvedComponent, SalaryBreakupComponent};

use super::rounding::round_currency;

/// Name given to the fallback component when no breakup is configured.
pub const FALLBACK_COMPONENT_NAME: &str = "basicSalary";

/// Warning code emitted when the configured percentages do not sum to 100.
pub const BREAKUP_DEVIATION_WARNING: &str = "BREAKUP_PERCENTAGE_DEVIATION";

/// The result of resolving a salary breakup.
#[derive(Debug, Clone)]
pub struct BreakupResolution {
    /// The resolved components with absolute amounts.
    pub components: Vec<ResolvedComponent>,
    /// The sum of the configured percentages.
    pub total_percentage: Decimal,
    /// `total_percentage - 100`. Zero when the configuration is complete.
    pub deviation: Decimal,
    /// A deviation warning, when the percentages do not sum to 100.
    pub warning: Option<PreviewWarning>,
}

/// Resolves a salary breakup against a base salary.
///
/// Each component resolves to `round(base_salary × percentage / 100)` with
/// the engine's half-up currency rounding. Percentage totals are NOT
/// re-validated here (that is a setup-time concern); a total ≠ 100% is
/// passed through and reported as a deviation warning so the discrepancy
/// stays visible downstream instead of being masked.
///
/// # Edge case
///
/// An employee with zero configured components yields a single fallback
/// component named `basicSalary` at 100%, equal to the base salary, so the
/// employee never gets a zero-pay line from missing setup.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_salary_breakup;
/// use payroll_engine::models::SalaryBreakupComponent;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let components = vec![
///     SalaryBreakupComponent {
///         name: "basic".to_string(),
///         percentage: Decimal::from_str("60").unwrap(),
///         is_taxable: true,
///     },
///     SalaryBreakupComponent {
///         name: "house_rent".to_string(),
///         percentage: Decimal::from_str("40").unwrap(),
///         is_taxable: false,
///     },
/// ];
///
/// let resolution =
///     resolve_salary_breakup(Decimal::from_str("50000").unwrap(), &components);
/// assert_eq!(resolution.components[0].amount, Decimal::from_str("30000.00").unwrap());
/// assert_eq!(resolution.components[1].amount, Decimal::from_str("20000.00").unwrap());
/// assert!(resolution.warning.is_none());
/// ```
pub fn resolve_salary_breakup(
    base_salary: Decimal,
    components: &[SalaryBreakupComponent],
) -> BreakupResolution {
    if components.is_empty() {
        return BreakupResolution {
            components: vec![ResolvedComponent {
                name: FALLBACK_COMPONENT_NAME.to_string(),
                percentage: Decimal::ONE_HUNDRED,
                amount: round_currency(base_salary),
                is_taxable: true,
            }],
            total_percentage: Decimal::ONE_HUNDRED,
            deviation: Decimal::ZERO,
            warning: None,
        };
    }

    let resolved: Vec<ResolvedComponent> = components
        .iter()
        .map(|c| ResolvedComponent {
            name: c.name.clone(),
            percentage: c.percentage,
            amount: round_currency(base_salary * c.percentage / Decimal::ONE_HUNDRED),
            is_taxable: c.is_taxable,
        })
        .collect();

    let total_percentage: Decimal = components.iter().map(|c| c.percentage).sum();
    let deviation = total_percentage - Decimal::ONE_HUNDRED;

    let warning = if deviation.is_zero() {
        None
    } else {
        Some(PreviewWarning::new(
            BREAKUP_DEVIATION_WARNING,
            format!(
                "salary breakup percentages sum to {total_percentage}% (deviation {deviation}%)"
            ),
        ))
    };

    BreakupResolution {
        components: resolved,
        total_percentage,
        deviation,
        warning,
    }
}
