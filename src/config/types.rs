//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::TaxBracket;

/// Attendance deduction policy.
///
/// Controls how absent, short, and late days pro-rate against gross salary.
/// Every knob is deterministic: the same summary and policy always produce
/// the same deduction.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendancePolicy {
    /// Scheduled working days per period. When absent, the calendar days
    /// of the period's month are used.
    #[serde(default)]
    pub scheduled_days: Option<u32>,
    /// How much of a day a short day counts as.
    #[serde(default = "default_short_day_fraction")]
    pub short_day_fraction: Decimal,
    /// How much of a day a late arrival counts as.
    #[serde(default = "default_late_day_fraction")]
    pub late_day_fraction: Decimal,
}

fn default_short_day_fraction() -> Decimal {
    Decimal::new(5, 1)
}

fn default_late_day_fraction() -> Decimal {
    Decimal::ZERO
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            scheduled_days: None,
            short_day_fraction: default_short_day_fraction(),
            late_day_fraction: default_late_day_fraction(),
        }
    }
}

/// Statutory deduction amounts.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryConfig {
    /// The fixed monthly EOBI contribution for flagged employees.
    pub eobi_amount: Decimal,
    /// The provident fund rate as a percentage of basic salary.
    pub provident_fund_rate: Decimal,
}

impl Default for StatutoryConfig {
    fn default() -> Self {
        Self {
            eobi_amount: Decimal::ZERO,
            provident_fund_rate: Decimal::ZERO,
        }
    }
}

/// Payroll policy from policy.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollPolicy {
    /// Attendance deduction policy.
    #[serde(default)]
    pub attendance: AttendancePolicy,
    /// Statutory deduction amounts.
    #[serde(default)]
    pub statutory: StatutoryConfig,
}

/// Tax bracket table from tax.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxConfig {
    /// The bracket table, any order; sorted when the policy is built.
    pub brackets: Vec<TaxBracket>,
}
