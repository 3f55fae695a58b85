//! Error types for the payroll generation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while previewing or confirming
//! a payroll run.

use thiserror::Error;

use crate::models::PayPeriod;

/// The main error type for the payroll generation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     message: "employee selection is empty".to_string(),
/// };
/// assert_eq!(error.to_string(), "Validation error: employee selection is empty");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request itself was invalid (empty employee selection, malformed
    /// period, unresolved preview rows submitted for confirmation).
    #[error("Validation error: {message}")]
    Validation {
        /// A description of what failed validation.
        message: String,
    },

    /// An employee lacks data required for the calculation. During preview
    /// this degrades a single line rather than aborting the batch.
    #[error("Missing data for employee '{employee_id}': {what}")]
    DataMissing {
        /// The employee whose data is incomplete.
        employee_id: String,
        /// A description of the missing data.
        what: String,
    },

    /// A payroll record already exists for this employee and period.
    /// Batch-fatal during confirm.
    #[error("Payroll already generated for employee '{employee_id}' in {period}")]
    DuplicateConfirmation {
        /// The employee whose payroll was already confirmed.
        employee_id: String,
        /// The period that was already confirmed.
        period: PayPeriod,
    },

    /// The payroll store failed while committing a batch. Batch-fatal and
    /// triggers a full rollback.
    #[error("Persistence error: {message}")]
    Persistence {
        /// A description of the storage failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
