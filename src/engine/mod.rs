//! Preview/confirm orchestration.
//!
//! The [`Engine`] fans the per-employee calculation out over a selected
//! employee set for a period, producing editable preview lines. Only on
//! explicit confirmation does it persist the finalized payroll batch,
//! through the store's transactional boundary.

mod run;
mod sources;

pub use run::{LineEdit, PayrollRun, RunState};
pub use sources::{InMemoryDataSource, PayrollDataSource};

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{
    aggregate_adjustments, calculate_deductions, compute_line_totals, recompute_line,
    resolve_salary_breakup,
};
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeProfile, PayPeriod, PayrollPreviewLine, PayrollRecord};
use crate::store::PayrollStore;

/// How the caller selects the employees for a payroll run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeSelection {
    /// All active employees.
    AllActive,
    /// An explicit list of employee ids.
    Ids(Vec<String>),
    /// All active employees of a department, optionally narrowed to a
    /// sub-department.
    Department {
        /// The department name.
        department: String,
        /// Optional sub-department name.
        sub_department: Option<String>,
    },
}

/// The payroll generation engine.
///
/// Holds the configuration and the payroll store; data sources are passed
/// per call since each preview reads a fresh collaborator snapshot.
#[derive(Clone)]
pub struct Engine {
    config: Arc<PayrollConfig>,
    store: Arc<dyn PayrollStore>,
}

impl Engine {
    /// Creates an engine over a configuration and a store.
    pub fn new(config: Arc<PayrollConfig>, store: Arc<dyn PayrollStore>) -> Self {
        Self { config, store }
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the engine's store.
    pub fn store(&self) -> &dyn PayrollStore {
        self.store.as_ref()
    }

    /// Computes the preview lines for a period and selection.
    ///
    /// Non-mutating. A selection that resolves to zero employees is
    /// rejected with a `Validation` error rather than producing a silent
    /// empty preview. Per-employee missing data degrades that employee's
    /// line to an error-flagged row; the rest of the batch still previews.
    pub fn preview(
        &self,
        source: &dyn PayrollDataSource,
        period: PayPeriod,
        selection: &EmployeeSelection,
    ) -> EngineResult<Vec<PayrollPreviewLine>> {
        let selected = self.resolve_selection(source, selection)?;

        info!(
            period = %period,
            employees = selected.len(),
            "Generating payroll preview"
        );

        // Per-employee calculations are independent; each reads only its
        // own slice of the snapshot.
        let lines = selected
            .iter()
            .map(|employee| self.calculate_line(source, period, employee))
            .collect();

        Ok(lines)
    }

    /// Confirms a previewed batch, persisting one immutable record per
    /// line.
    ///
    /// Gross and net are recomputed here with the same pure function used
    /// by the preview, so edited lines cannot drift from what is stored.
    /// The batch is all-or-nothing: on any error zero records are written
    /// and the caller retries from the preview state.
    pub fn confirm(
        &self,
        period: PayPeriod,
        generated_by: &str,
        lines: &[PayrollPreviewLine],
    ) -> EngineResult<Vec<PayrollRecord>> {
        if generated_by.trim().is_empty() {
            return Err(EngineError::Validation {
                message: "generated_by must identify the confirming actor".to_string(),
            });
        }
        if lines.is_empty() {
            return Err(EngineError::Validation {
                message: "cannot confirm an empty payroll batch".to_string(),
            });
        }

        let unresolved: Vec<&str> = lines
            .iter()
            .filter(|l| l.is_error())
            .map(|l| l.employee_id.as_str())
            .collect();
        if !unresolved.is_empty() {
            warn!(period = %period, employees = ?unresolved, "Confirm refused: unresolved rows");
            return Err(EngineError::Validation {
                message: format!(
                    "batch contains {} unresolved error-flagged row(s): {}",
                    unresolved.len(),
                    unresolved.join(", ")
                ),
            });
        }

        let confirmed_at = Utc::now();
        let records: Vec<PayrollRecord> = lines
            .iter()
            .map(|line| {
                let mut line = line.clone();
                recompute_line(&mut line);
                PayrollRecord::from_line(&line, period, generated_by, confirmed_at)
            })
            .collect();

        self.store.insert_batch(records.clone())?;

        info!(
            period = %period,
            records = records.len(),
            generated_by,
            "Payroll batch confirmed"
        );
        Ok(records)
    }

    /// Resolves a selection against the employee directory.
    fn resolve_selection(
        &self,
        source: &dyn PayrollDataSource,
        selection: &EmployeeSelection,
    ) -> EngineResult<Vec<EmployeeProfile>> {
        let selected: Vec<EmployeeProfile> = match selection {
            EmployeeSelection::AllActive => source
                .employees()
                .into_iter()
                .filter(|e| e.active)
                .collect(),
            EmployeeSelection::Ids(ids) => {
                if ids.is_empty() {
                    return Err(EngineError::Validation {
                        message: "employee selection is empty".to_string(),
                    });
                }
                // Unknown ids degrade to error-flagged lines downstream,
                // so keep a placeholder profile for them.
                ids.iter()
                    .map(|id| {
                        source.employee(id).unwrap_or_else(|| EmployeeProfile {
                            id: id.clone(),
                            name: String::new(),
                            base_salary: None,
                            department: None,
                            sub_department: None,
                            active: false,
                            eobi: false,
                            provident_fund: false,
                        })
                    })
                    .collect()
            }
            EmployeeSelection::Department {
                department,
                sub_department,
            } => source
                .employees()
                .into_iter()
                .filter(|e| e.active && e.in_department(department, sub_department.as_deref()))
                .collect(),
        };

        if selected.is_empty() {
            return Err(EngineError::Validation {
                message: "selection resolved to zero employees".to_string(),
            });
        }
        Ok(selected)
    }

    /// Calculates one employee's preview line.
    fn calculate_line(
        &self,
        source: &dyn PayrollDataSource,
        period: PayPeriod,
        employee: &EmployeeProfile,
    ) -> PayrollPreviewLine {
        let mut warnings = Vec::new();

        let adjustments = source.adjustments(&employee.id, period);
        let totals = aggregate_adjustments(employee.base_salary, &adjustments);
        warnings.extend(totals.warnings.clone());

        let Some(basic_salary) = employee.base_salary else {
            // No salary at all: the whole line degrades rather than
            // aborting the batch.
            let error = EngineError::DataMissing {
                employee_id: employee.id.clone(),
                what: "base salary".to_string(),
            };
            warn!(employee_id = %employee.id, "Preview line degraded: {error}");
            return PayrollPreviewLine {
                employee_id: employee.id.clone(),
                basic_salary: Decimal::ZERO,
                salary_breakup: vec![],
                total_allowances: totals.total_allowances,
                overtime_amount: totals.overtime_amount,
                bonus_amount: totals.bonus_amount,
                total_deductions: totals.total_deductions,
                tax_deduction: Decimal::ZERO,
                attendance_deduction: Decimal::ZERO,
                loan_deduction: Decimal::ZERO,
                advance_salary_deduction: Decimal::ZERO,
                eobi_deduction: Decimal::ZERO,
                provident_fund_deduction: Decimal::ZERO,
                gross_salary: Decimal::ZERO,
                net_salary: Decimal::ZERO,
                warnings,
                error: Some(error.to_string()),
                needs_review: false,
            };
        };

        let resolution = resolve_salary_breakup(basic_salary, &source.salary_breakup(&employee.id));
        if let Some(warning) = resolution.warning {
            warnings.push(warning);
        }

        // Gross so far feeds the tax bracket lookup and attendance
        // pro-ration before the deduction side of the line exists.
        let gross_so_far = compute_line_totals(
            basic_salary,
            totals.total_allowances,
            totals.overtime_amount,
            totals.bonus_amount,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
        .gross_salary;

        let deductions = calculate_deductions(
            gross_so_far,
            basic_salary,
            source.attendance(&employee.id, period),
            source.loan_installment(&employee.id, period).as_ref(),
            source.advance_installment(&employee.id, period).as_ref(),
            employee.eobi,
            employee.provident_fund,
            &self.config.policy().attendance,
            &self.config.policy().statutory,
            self.config.tax(),
            period,
        );

        let mut line = PayrollPreviewLine {
            employee_id: employee.id.clone(),
            basic_salary,
            salary_breakup: resolution.components,
            total_allowances: totals.total_allowances,
            overtime_amount: totals.overtime_amount,
            bonus_amount: totals.bonus_amount,
            total_deductions: totals.total_deductions,
            tax_deduction: deductions.tax_deduction,
            attendance_deduction: deductions.attendance_deduction,
            loan_deduction: deductions.loan_deduction,
            advance_salary_deduction: deductions.advance_salary_deduction,
            eobi_deduction: deductions.eobi_deduction,
            provident_fund_deduction: deductions.provident_fund_deduction,
            gross_salary: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            warnings,
            error: None,
            needs_review: false,
        };
        recompute_line(&mut line);
        line
    }
}
