//! Payroll run session state machine.
//!
//! A [`PayrollRun`] walks the `Selecting → Previewing → Confirmed` workflow
//! for one payroll batch. Nothing is persisted until confirmation, so a
//! run abandoned in `Previewing` has no side effects, and re-entering
//! selection discards all preview state.

use rust_decimal::Decimal;

use crate::calculation::recompute_line;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PayrollPreviewLine, PayrollRecord};

use super::{Engine, EmployeeSelection, PayrollDataSource};

/// An edit to the adjustable fields of one preview line.
///
/// Fields left as `None` are unchanged. Gross and net are recomputed after
/// the edit with the same function confirmation uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineEdit {
    /// New total allowances.
    pub total_allowances: Option<Decimal>,
    /// New overtime amount.
    pub overtime_amount: Option<Decimal>,
    /// New bonus amount.
    pub bonus_amount: Option<Decimal>,
    /// New ad-hoc deduction total.
    pub total_deductions: Option<Decimal>,
}

/// The workflow state of a payroll run.
#[derive(Debug, Clone)]
pub enum RunState {
    /// No preview has been generated yet.
    Selecting,
    /// A preview exists and its lines are editable.
    Previewing {
        /// The period being previewed.
        period: PayPeriod,
        /// The editable preview lines.
        lines: Vec<PayrollPreviewLine>,
    },
    /// The batch was committed.
    Confirmed {
        /// The persisted records.
        records: Vec<PayrollRecord>,
    },
}

/// A preview/confirm session for one payroll batch.
#[derive(Debug, Clone)]
pub struct PayrollRun {
    state: RunState,
}

impl PayrollRun {
    /// Starts a new run in the `Selecting` state.
    pub fn new() -> Self {
        Self {
            state: RunState::Selecting,
        }
    }

    /// Returns the current workflow state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Generates a preview, entering `Previewing`.
    ///
    /// Calling this again while already previewing discards the previous
    /// preview (equivalent to re-entering `Selecting` first). Not allowed
    /// after confirmation.
    pub fn preview(
        &mut self,
        engine: &Engine,
        source: &dyn PayrollDataSource,
        period: PayPeriod,
        selection: &EmployeeSelection,
    ) -> EngineResult<&[PayrollPreviewLine]> {
        if matches!(self.state, RunState::Confirmed { .. }) {
            return Err(EngineError::Validation {
                message: "run is already confirmed; start a new run".to_string(),
            });
        }

        let lines = engine.preview(source, period, selection)?;
        self.state = RunState::Previewing { period, lines };
        match &self.state {
            RunState::Previewing { lines, .. } => Ok(lines),
            _ => unreachable!("state set to Previewing above"),
        }
    }

    /// Edits one line's adjustable fields and recomputes its totals.
    pub fn edit_line(&mut self, employee_id: &str, edit: LineEdit) -> EngineResult<()> {
        let RunState::Previewing { lines, .. } = &mut self.state else {
            return Err(EngineError::Validation {
                message: "no preview to edit".to_string(),
            });
        };

        let line = lines
            .iter_mut()
            .find(|l| l.employee_id == employee_id)
            .ok_or_else(|| EngineError::Validation {
                message: format!("employee '{employee_id}' is not in the preview"),
            })?;

        if let Some(value) = edit.total_allowances {
            line.total_allowances = value;
        }
        if let Some(value) = edit.overtime_amount {
            line.overtime_amount = value;
        }
        if let Some(value) = edit.bonus_amount {
            line.bonus_amount = value;
        }
        if let Some(value) = edit.total_deductions {
            line.total_deductions = value;
        }

        recompute_line(line);
        Ok(())
    }

    /// Discards the preview and returns to `Selecting`.
    ///
    /// Has no side effects: nothing was persisted.
    pub fn back_to_selecting(&mut self) {
        if matches!(self.state, RunState::Previewing { .. }) {
            self.state = RunState::Selecting;
        }
    }

    /// Confirms the previewed batch, entering `Confirmed` on success.
    ///
    /// On failure the run stays in `Previewing` with its lines intact so
    /// the caller can correct and retry.
    pub fn confirm(
        &mut self,
        engine: &Engine,
        generated_by: &str,
    ) -> EngineResult<&[PayrollRecord]> {
        let RunState::Previewing { period, lines } = &self.state else {
            return Err(EngineError::Validation {
                message: "no preview to confirm".to_string(),
            });
        };

        let records = engine.confirm(*period, generated_by, lines)?;
        self.state = RunState::Confirmed { records };
        match &self.state {
            RunState::Confirmed { records } => Ok(records),
            _ => unreachable!("state set to Confirmed above"),
        }
    }
}

impl Default for PayrollRun {
    fn default() -> Self {
        Self::new()
    }
}
