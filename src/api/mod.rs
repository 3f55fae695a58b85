//! HTTP API module for the payroll generation engine.
//!
//! This module provides the REST API endpoints wrapping the two engine
//! operations: `POST /payroll/preview` and `POST /payroll/confirm`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AttendanceEntry, CollaboratorData, ConfirmRequest, PreviewRequest, SalaryBreakupEntry};
pub use response::{ApiError, ConfirmResponse, PreviewResponse};
pub use state::AppState;
