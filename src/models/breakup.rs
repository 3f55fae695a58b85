//! Salary breakup models.
//!
//! A salary breakup decomposes a base salary into named percentage-based
//! components (e.g. basic, house rent, medical). Components are configured
//! by payroll setup and read-only during a payroll run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A configured percentage-based salary component.
///
/// # Example
///
/// ```
/// use payroll_engine::models::SalaryBreakupComponent;
/// use rust_decimal::Decimal;
///
/// let component = SalaryBreakupComponent {
///     name: "house_rent".to_string(),
///     percentage: Decimal::new(40, 0),
///     is_taxable: false,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakupComponent {
    /// The component name (e.g. "basic", "house_rent").
    pub name: String,
    /// The percentage of base salary this component represents (0-100).
    pub percentage: Decimal,
    /// Whether this component is subject to tax.
    pub is_taxable: bool,
}

/// A salary component resolved to an absolute currency amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedComponent {
    /// The component name.
    pub name: String,
    /// The configured percentage of base salary.
    pub percentage: Decimal,
    /// The absolute amount: `round(base_salary * percentage / 100)`.
    pub amount: Decimal,
    /// Whether this component is subject to tax.
    pub is_taxable: bool,
}
