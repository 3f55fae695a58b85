//! Data-source seam for external collaborators.
//!
//! The employee directory, salary breakup configuration, attendance module,
//! and bonus/deduction/loan/advance modules are external to the engine and
//! consumed read-only through the [`PayrollDataSource`] trait.
//! [`InMemoryDataSource`] backs tests and the HTTP surface, which carries a
//! snapshot of the collaborator data in each request.

use crate::models::{
    AdvanceInstallment, AttendanceSummary, EmployeeProfile, LoanInstallment, PayPeriod,
    PayrollAdjustment, SalaryBreakupComponent,
};

/// Read-only view over the external collaborators a payroll run consumes.
pub trait PayrollDataSource: Send + Sync {
    /// All employees visible to the engine.
    fn employees(&self) -> Vec<EmployeeProfile>;

    /// Looks up a single employee by id.
    fn employee(&self, employee_id: &str) -> Option<EmployeeProfile> {
        self.employees().into_iter().find(|e| e.id == employee_id)
    }

    /// The configured salary breakup for an employee. Empty when none is
    /// configured (the resolver then falls back to a single component).
    fn salary_breakup(&self, employee_id: &str) -> Vec<SalaryBreakupComponent>;

    /// All ad-hoc adjustments for an employee and period.
    fn adjustments(&self, employee_id: &str, period: PayPeriod) -> Vec<PayrollAdjustment>;

    /// The attendance summary for an employee and period.
    fn attendance(&self, employee_id: &str, period: PayPeriod) -> AttendanceSummary;

    /// The loan installment due for an employee in a period, if any.
    fn loan_installment(&self, employee_id: &str, period: PayPeriod) -> Option<LoanInstallment>;

    /// The advance-salary installment due for an employee in a period, if
    /// any.
    fn advance_installment(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> Option<AdvanceInstallment>;
}

/// In-memory collaborator snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    /// Employee directory entries.
    pub employees: Vec<EmployeeProfile>,
    /// Salary breakups keyed by the component owner's employee id.
    pub breakups: Vec<(String, Vec<SalaryBreakupComponent>)>,
    /// Ad-hoc adjustments.
    pub adjustments: Vec<PayrollAdjustment>,
    /// Attendance summaries per employee and period.
    pub attendance: Vec<(String, PayPeriod, AttendanceSummary)>,
    /// Loan installments.
    pub loan_installments: Vec<LoanInstallment>,
    /// Advance-salary installments.
    pub advance_installments: Vec<AdvanceInstallment>,
}

impl InMemoryDataSource {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayrollDataSource for InMemoryDataSource {
    fn employees(&self) -> Vec<EmployeeProfile> {
        self.employees.clone()
    }

    fn salary_breakup(&self, employee_id: &str) -> Vec<SalaryBreakupComponent> {
        self.breakups
            .iter()
            .find(|(id, _)| id == employee_id)
            .map(|(_, components)| components.clone())
            .unwrap_or_default()
    }

    fn adjustments(&self, employee_id: &str, period: PayPeriod) -> Vec<PayrollAdjustment> {
        self.adjustments
            .iter()
            .filter(|a| a.employee_id == employee_id && a.period == period)
            .cloned()
            .collect()
    }

    fn attendance(&self, employee_id: &str, period: PayPeriod) -> AttendanceSummary {
        self.attendance
            .iter()
            .find(|(id, p, _)| id == employee_id && *p == period)
            .map(|(_, _, summary)| *summary)
            .unwrap_or_default()
    }

    fn loan_installment(&self, employee_id: &str, period: PayPeriod) -> Option<LoanInstallment> {
        self.loan_installments
            .iter()
            .find(|i| i.employee_id == employee_id && i.period == period)
            .cloned()
    }

    fn advance_installment(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> Option<AdvanceInstallment> {
        self.advance_installments
            .iter()
            .find(|i| i.employee_id == employee_id && i.period == period)
            .cloned()
    }
}
