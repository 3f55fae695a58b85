//! Employee profile model.
//!
//! This module defines the engine-visible slice of the employee directory.
//! The directory itself is an external collaborator; the engine reads a
//! snapshot of the fields payroll generation needs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The payroll-relevant snapshot of an employee directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The monthly base salary. `None` when the directory has no salary
    /// configured; percentage adjustments then resolve to zero with a
    /// warning instead of failing the whole preview.
    pub base_salary: Option<Decimal>,
    /// The employee's department.
    pub department: Option<String>,
    /// The employee's sub-department, if any.
    #[serde(default)]
    pub sub_department: Option<String>,
    /// Whether the employee is active. Inactive employees are excluded
    /// from department-filter selections.
    pub active: bool,
    /// Whether the statutory EOBI contribution applies to this employee.
    #[serde(default)]
    pub eobi: bool,
    /// Whether the provident fund deduction applies to this employee.
    #[serde(default)]
    pub provident_fund: bool,
}

impl EmployeeProfile {
    /// Returns true when the employee belongs to the given department and,
    /// if a sub-department is given, to that sub-department too.
    pub fn in_department(&self, department: &str, sub_department: Option<&str>) -> bool {
        let dept_matches = self.department.as_deref() == Some(department);
        match sub_department {
            Some(sub) => dept_matches && self.sub_department.as_deref() == Some(sub),
            None => dept_matches,
        }
    }
}
