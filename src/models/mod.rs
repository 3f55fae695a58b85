//! Core data models for the payroll generation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod adjustment;
mod breakup;
mod employee;
mod period;
mod preview;
mod record;

pub use adjustment::{
    AdjustmentKind, AdvanceInstallment, AttendanceSummary, LoanInstallment, PayrollAdjustment,
};
pub use breakup::{ResolvedComponent, SalaryBreakupComponent};
pub use employee::EmployeeProfile;
pub use period::PayPeriod;
pub use preview::{PayrollPreviewLine, PreviewWarning};
pub use record::PayrollRecord;
