//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::{ConfirmRequest, PreviewRequest};
use super::response::{ApiError, ApiErrorResponse, ConfirmResponse, PreviewResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/preview", post(preview_handler))
        .route("/payroll/confirm", post(confirm_handler))
        .with_state(state)
}

/// Turns a JSON extraction rejection into an API error body.
fn rejection_to_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for POST /payroll/preview.
///
/// Non-mutating: computes preview lines for the requested period and
/// selection from the collaborator snapshot in the request.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll preview request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let period = match request.period() {
        Ok(period) => period,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid period");
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    let selection = request.selection();
    let source = request.data.into_source(period);

    match state.engine().preview(&source, period, &selection) {
        Ok(lines) => {
            info!(
                correlation_id = %correlation_id,
                period = %period,
                lines = lines.len(),
                flagged = lines.iter().filter(|l| l.is_error()).count(),
                "Preview generated"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(PreviewResponse { period, lines }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Preview failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for POST /payroll/confirm.
///
/// Mutating: commits the submitted lines as one transactional batch,
/// idempotent per (employee, period).
async fn confirm_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConfirmRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll confirm request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let period = match request.period() {
        Ok(period) => period,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid period");
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    match state
        .engine()
        .confirm(period, &request.generated_by, &request.lines)
    {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                period = %period,
                records = records.len(),
                generated_by = %request.generated_by,
                "Payroll confirmed"
            );
            (
                StatusCode::CREATED,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ConfirmResponse { period, records }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Confirm failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}
