//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the
//! `/payroll/preview` and `/payroll/confirm` endpoints. Preview requests
//! carry a snapshot of the external collaborator data (employees,
//! breakups, adjustments, attendance, installments) alongside the period
//! and selection.

use serde::{Deserialize, Serialize};

use crate::engine::{EmployeeSelection, InMemoryDataSource};
use crate::error::EngineResult;
use crate::models::{
    AdvanceInstallment, AttendanceSummary, EmployeeProfile, LoanInstallment, PayPeriod,
    PayrollAdjustment, PayrollPreviewLine, SalaryBreakupComponent,
};

/// Request body for the `/payroll/preview` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    /// The calendar month to preview (1-12).
    pub month: u32,
    /// The calendar year to preview.
    pub year: i32,
    /// Explicit employee ids to preview. Takes precedence over the
    /// department filter. Omit both to preview all active employees.
    #[serde(default)]
    pub employee_ids: Option<Vec<String>>,
    /// Department filter applied when no explicit ids are given.
    #[serde(default)]
    pub department: Option<String>,
    /// Sub-department filter, only meaningful with `department`.
    #[serde(default)]
    pub sub_department: Option<String>,
    /// The collaborator data snapshot the run reads from.
    pub data: CollaboratorData,
}

impl PreviewRequest {
    /// Validates and builds the pay period.
    pub fn period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.year, self.month)
    }

    /// Resolves the selection fields into an [`EmployeeSelection`].
    pub fn selection(&self) -> EmployeeSelection {
        if let Some(ids) = &self.employee_ids {
            return EmployeeSelection::Ids(ids.clone());
        }
        if let Some(department) = &self.department {
            return EmployeeSelection::Department {
                department: department.clone(),
                sub_department: self.sub_department.clone(),
            };
        }
        EmployeeSelection::AllActive
    }
}

/// The external collaborator data carried by a preview request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollaboratorData {
    /// Employee directory entries.
    #[serde(default)]
    pub employees: Vec<EmployeeProfile>,
    /// Salary breakup configuration per employee.
    #[serde(default)]
    pub salary_breakups: Vec<SalaryBreakupEntry>,
    /// Ad-hoc adjustments.
    #[serde(default)]
    pub adjustments: Vec<PayrollAdjustment>,
    /// Attendance summaries for the requested period.
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
    /// Loan installments.
    #[serde(default)]
    pub loan_installments: Vec<LoanInstallment>,
    /// Advance-salary installments.
    #[serde(default)]
    pub advance_installments: Vec<AdvanceInstallment>,
}

impl CollaboratorData {
    /// Converts the snapshot into an engine data source.
    ///
    /// Attendance entries in the request are implicitly for the requested
    /// period, so the period is attached here.
    pub fn into_source(self, period: PayPeriod) -> InMemoryDataSource {
        InMemoryDataSource {
            employees: self.employees,
            breakups: self
                .salary_breakups
                .into_iter()
                .map(|entry| (entry.employee_id, entry.components))
                .collect(),
            adjustments: self.adjustments,
            attendance: self
                .attendance
                .into_iter()
                .map(|entry| {
                    (
                        entry.employee_id,
                        period,
                        AttendanceSummary {
                            absent_days: entry.absent_days,
                            short_days: entry.short_days,
                            late_days: entry.late_days,
                        },
                    )
                })
                .collect(),
            loan_installments: self.loan_installments,
            advance_installments: self.advance_installments,
        }
    }
}

/// Salary breakup configuration for one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryBreakupEntry {
    /// The employee the components belong to.
    pub employee_id: String,
    /// The configured components.
    pub components: Vec<SalaryBreakupComponent>,
}

/// Attendance counts for one employee in the requested period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// The employee the counts belong to.
    pub employee_id: String,
    /// Days absent.
    #[serde(default)]
    pub absent_days: u32,
    /// Short days.
    #[serde(default)]
    pub short_days: u32,
    /// Late days.
    #[serde(default)]
    pub late_days: u32,
}

/// Request body for the `/payroll/confirm` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmRequest {
    /// The calendar month being confirmed (1-12).
    pub month: u32,
    /// The calendar year being confirmed.
    pub year: i32,
    /// The authenticated actor confirming the run.
    pub generated_by: String,
    /// The (possibly edited) preview lines to commit.
    pub lines: Vec<PayrollPreviewLine>,
}

impl ConfirmRequest {
    /// Validates and builds the pay period.
    pub fn period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.year, self.month)
    }
}
