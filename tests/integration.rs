//! Comprehensive integration tests for the payroll generation engine.
//!
//! This test suite covers the full preview/confirm pipeline through the
//! HTTP surface:
//! - Salary breakup resolution in preview lines
//! - Ad-hoc adjustments, percentage bonuses, and statutory deductions
//! - Client-side edits recomputed server-side at confirm time
//! - Degraded rows for missing data and the confirm refusal they cause
//! - Idempotent, all-or-nothing confirmation
//! - Error cases and status mapping

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::TaxBracket;
use payroll_engine::config::{PayrollConfig, PayrollPolicy, TaxConfig};
use payroll_engine::store::InMemoryPayrollStore;

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn create_test_state() -> AppState {
    let policy: PayrollPolicy = serde_yaml::from_str(
        r#"
attendance:
  scheduled_days: 30
statutory:
  eobi_amount: "370"
  provident_fund_rate: "8.33"
"#,
    )
    .expect("Failed to parse test policy");

    let tax = TaxConfig {
        brackets: vec![
            TaxBracket {
                from: decimal("0"),
                rate: decimal("0"),
                fixed: decimal("0"),
            },
            TaxBracket {
                from: decimal("50000"),
                rate: decimal("5"),
                fixed: decimal("0"),
            },
        ],
    };

    AppState::new(
        PayrollConfig::new(policy, tax),
        Arc::new(InMemoryPayrollStore::new()),
    )
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn employee(id: &str, salary: Option<&str>, department: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Employee {id}"),
        "base_salary": salary,
        "department": department,
        "active": true
    })
}

fn preview_request(data: Value) -> Value {
    json!({
        "month": 3,
        "year": 2026,
        "data": data
    })
}

fn confirm_request(lines: &Value) -> Value {
    json!({
        "month": 3,
        "year": 2026,
        "generated_by": "admin_01",
        "lines": lines
    })
}

fn line_for<'a>(preview: &'a Value, employee_id: &str) -> &'a Value {
    preview["lines"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["employee_id"] == employee_id)
        .unwrap_or_else(|| panic!("no line for {employee_id}"))
}

// =============================================================================
// Preview
// =============================================================================

#[tokio::test]
async fn test_preview_resolves_salary_breakup() {
    let router = create_router(create_test_state());

    let body = preview_request(json!({
        "employees": [employee("emp_001", Some("50000"), "Engineering")],
        "salary_breakups": [{
            "employee_id": "emp_001",
            "components": [
                {"name": "basic", "percentage": "60", "is_taxable": true},
                {"name": "house_rent", "percentage": "40", "is_taxable": false}
            ]
        }]
    }));

    let (status, preview) = post(router, "/payroll/preview", body).await;
    assert_eq!(status, StatusCode::OK);

    let line = line_for(&preview, "emp_001");
    let breakup = line["salary_breakup"].as_array().unwrap();
    assert_eq!(breakup.len(), 2);
    assert_eq!(breakup[0]["amount"], "30000.00");
    assert_eq!(breakup[1]["amount"], "20000.00");

    // The two components sum exactly to the base salary.
    let sum = decimal(breakup[0]["amount"].as_str().unwrap())
        + decimal(breakup[1]["amount"].as_str().unwrap());
    assert_eq!(sum, decimal("50000.00"));
}

#[tokio::test]
async fn test_preview_without_breakup_falls_back_to_basic() {
    let router = create_router(create_test_state());

    let body = preview_request(json!({
        "employees": [employee("emp_001", Some("42000"), "Engineering")]
    }));

    let (status, preview) = post(router, "/payroll/preview", body).await;
    assert_eq!(status, StatusCode::OK);

    let breakup = line_for(&preview, "emp_001")["salary_breakup"]
        .as_array()
        .unwrap();
    assert_eq!(breakup.len(), 1);
    assert_eq!(breakup[0]["name"], "basicSalary");
    assert_eq!(breakup[0]["amount"], "42000.00");
}

#[tokio::test]
async fn test_preview_reports_breakup_deviation() {
    let router = create_router(create_test_state());

    let body = preview_request(json!({
        "employees": [employee("emp_001", Some("50000"), "Engineering")],
        "salary_breakups": [{
            "employee_id": "emp_001",
            "components": [
                {"name": "basic", "percentage": "60", "is_taxable": true},
                {"name": "house_rent", "percentage": "30", "is_taxable": false}
            ]
        }]
    }));

    let (_, preview) = post(router, "/payroll/preview", body).await;
    let warnings = line_for(&preview, "emp_001")["warnings"].as_array().unwrap();
    assert!(
        warnings
            .iter()
            .any(|w| w["code"] == "BREAKUP_PERCENTAGE_DEVIATION")
    );
}

#[tokio::test]
async fn test_preview_full_deduction_stack() {
    let router = create_router(create_test_state());

    let body = preview_request(json!({
        "employees": [{
            "id": "emp_001",
            "name": "Ayesha Khan",
            "base_salary": "60000",
            "department": "Engineering",
            "active": true,
            "eobi": true,
            "provident_fund": true
        }],
        "adjustments": [
            {
                "employee_id": "emp_001",
                "period": {"year": 2026, "month": 3},
                "kind": "allowance",
                "amount": "5000",
                "is_taxable": true
            },
            {
                "employee_id": "emp_001",
                "period": {"year": 2026, "month": 3},
                "kind": "deduction",
                "amount": "1000",
                "is_taxable": false
            }
        ],
        "attendance": [{"employee_id": "emp_001", "absent_days": 3}],
        "loan_installments": [{
            "employee_id": "emp_001",
            "period": {"year": 2026, "month": 3},
            "amount": "5000",
            "outstanding": "3200"
        }]
    }));

    let (status, preview) = post(router, "/payroll/preview", body).await;
    assert_eq!(status, StatusCode::OK);

    let line = line_for(&preview, "emp_001");
    // Gross: 60000 + 5000 allowance.
    assert_eq!(line["gross_salary"], "65000.00");
    // Tax: 5% of (65000 - 50000).
    assert_eq!(line["tax_deduction"], "750.00");
    // Attendance: 65000 * 3/30.
    assert_eq!(line["attendance_deduction"], "6500.00");
    // Loan truncated to the outstanding balance.
    assert_eq!(line["loan_deduction"], "3200.00");
    assert_eq!(line["eobi_deduction"], "370.00");
    // PF: 8.33% of 60000.
    assert_eq!(line["provident_fund_deduction"], "4998.00");
    // Net: 65000 - (1000 + 750 + 6500 + 3200 + 370 + 4998).
    assert_eq!(line["net_salary"], "48182.00");
}

#[tokio::test]
async fn test_preview_percentage_bonus_tracks_salary() {
    let state = create_test_state();

    let data = |salary: &str| {
        json!({
            "employees": [employee("emp_001", Some(salary), "Engineering")],
            "adjustments": [{
                "employee_id": "emp_001",
                "period": {"year": 2026, "month": 3},
                "kind": "bonus",
                "amount": "0",
                "percentage": "10",
                "is_taxable": true
            }]
        })
    };

    let (_, preview) = post(
        create_router(state.clone()),
        "/payroll/preview",
        preview_request(data("30000")),
    )
    .await;
    assert_eq!(line_for(&preview, "emp_001")["bonus_amount"], "3000.00");

    let (_, preview) = post(
        create_router(state),
        "/payroll/preview",
        preview_request(data("40000")),
    )
    .await;
    assert_eq!(line_for(&preview, "emp_001")["bonus_amount"], "4000.00");
}

#[tokio::test]
async fn test_preview_degrades_missing_salary_row() {
    let router = create_router(create_test_state());

    let body = preview_request(json!({
        "employees": [
            employee("emp_001", Some("50000"), "Engineering"),
            employee("emp_002", None, "Engineering")
        ]
    }));

    let (status, preview) = post(router, "/payroll/preview", body).await;
    assert_eq!(status, StatusCode::OK);

    let lines = preview["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert!(line_for(&preview, "emp_002")["error"].is_string());
    assert!(line_for(&preview, "emp_001")["error"].is_null());
}

#[tokio::test]
async fn test_preview_empty_selection_rejected() {
    let router = create_router(create_test_state());

    let mut body = preview_request(json!({
        "employees": [employee("emp_001", Some("50000"), "Engineering")]
    }));
    body["employee_ids"] = json!([]);

    let (status, error) = post(router, "/payroll/preview", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_preview_department_filter() {
    let router = create_router(create_test_state());

    let mut body = preview_request(json!({
        "employees": [
            employee("emp_001", Some("50000"), "Engineering"),
            employee("emp_002", Some("30000"), "Finance")
        ]
    }));
    body["department"] = json!("Finance");

    let (status, preview) = post(router, "/payroll/preview", body).await;
    assert_eq!(status, StatusCode::OK);
    let lines = preview["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["employee_id"], "emp_002");
}

// =============================================================================
// Confirm
// =============================================================================

#[tokio::test]
async fn test_confirm_persists_edited_lines_recomputed() {
    let state = create_test_state();

    let (_, preview) = post(
        create_router(state.clone()),
        "/payroll/preview",
        preview_request(json!({
            "employees": [employee("emp_001", Some("40000"), "Engineering")]
        })),
    )
    .await;

    // Client edits the bonus but leaves stale gross/net in the payload.
    let mut lines = preview["lines"].clone();
    lines[0]["bonus_amount"] = json!("5000");

    let (status, confirm) = post(
        create_router(state),
        "/payroll/confirm",
        confirm_request(&lines),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let record = &confirm["records"][0];
    assert_eq!(record["gross_salary"], "45000.00");
    assert_eq!(record["net_salary"], "45000.00");
    assert_eq!(record["generated_by"], "admin_01");
}

#[tokio::test]
async fn test_confirm_negative_net_flagged_not_clamped() {
    let state = create_test_state();

    let (_, preview) = post(
        create_router(state.clone()),
        "/payroll/preview",
        preview_request(json!({
            "employees": [employee("emp_001", Some("20000"), "Engineering")]
        })),
    )
    .await;

    // Push deductions past gross through the editable ad-hoc field.
    let mut lines = preview["lines"].clone();
    lines[0]["total_deductions"] = json!("25000");

    let (status, confirm) = post(
        create_router(state),
        "/payroll/confirm",
        confirm_request(&lines),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let record = &confirm["records"][0];
    assert_eq!(record["net_salary"], "-5000.00");
    assert_eq!(record["needs_review"], true);
}

#[tokio::test]
async fn test_confirm_twice_returns_conflict_and_keeps_first() {
    let state = create_test_state();

    let (_, preview) = post(
        create_router(state.clone()),
        "/payroll/preview",
        preview_request(json!({
            "employees": [employee("emp_001", Some("50000"), "Engineering")]
        })),
    )
    .await;

    let body = confirm_request(&preview["lines"]);

    let (status, _) = post(create_router(state.clone()), "/payroll/confirm", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = post(create_router(state), "/payroll/confirm", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "ALREADY_GENERATED");
    assert!(error["message"].as_str().unwrap().contains("emp_001"));
}

#[tokio::test]
async fn test_confirm_batch_is_all_or_nothing() {
    let state = create_test_state();

    // Confirm emp_001 alone for the period.
    let (_, first) = post(
        create_router(state.clone()),
        "/payroll/preview",
        preview_request(json!({
            "employees": [employee("emp_001", Some("50000"), "Engineering")]
        })),
    )
    .await;
    let (status, _) = post(
        create_router(state.clone()),
        "/payroll/confirm",
        confirm_request(&first["lines"]),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // A batch containing emp_002 (new) and emp_001 (duplicate) must write
    // nothing for emp_002.
    let (_, both) = post(
        create_router(state.clone()),
        "/payroll/preview",
        preview_request(json!({
            "employees": [
                employee("emp_002", Some("30000"), "Engineering"),
                employee("emp_001", Some("50000"), "Engineering")
            ]
        })),
    )
    .await;
    let (status, error) = post(
        create_router(state.clone()),
        "/payroll/confirm",
        confirm_request(&both["lines"]),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "ALREADY_GENERATED");

    // Retrying with only the new employee succeeds: nothing from the
    // failed batch was committed.
    let (_, retry) = post(
        create_router(state.clone()),
        "/payroll/preview",
        preview_request(json!({
            "employees": [employee("emp_002", Some("30000"), "Engineering")]
        })),
    )
    .await;
    let (status, _) = post(
        create_router(state),
        "/payroll/confirm",
        confirm_request(&retry["lines"]),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_confirm_refuses_unresolved_rows() {
    let state = create_test_state();

    let (_, preview) = post(
        create_router(state.clone()),
        "/payroll/preview",
        preview_request(json!({
            "employees": [
                employee("emp_001", Some("50000"), "Engineering"),
                employee("emp_002", None, "Engineering")
            ]
        })),
    )
    .await;

    let (status, error) = post(
        create_router(state),
        "/payroll/confirm",
        confirm_request(&preview["lines"]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("emp_002"));
}

#[tokio::test]
async fn test_confirm_empty_batch_rejected() {
    let router = create_router(create_test_state());

    let (status, error) = post(router, "/payroll/confirm", confirm_request(&json!([]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let router = create_router(create_test_state());

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll/preview")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_field_mentions_field() {
    let router = create_router(create_test_state());

    // Confirm request without generated_by.
    let body = json!({
        "month": 3,
        "year": 2026,
        "lines": []
    });

    let (status, error) = post(router, "/payroll/confirm", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        error["message"]
            .as_str()
            .unwrap()
            .contains("generated_by"),
        "Expected error to mention the missing field, got: {}",
        error["message"]
    );
}

#[tokio::test]
async fn test_invalid_month_returns_validation_error() {
    let router = create_router(create_test_state());

    let body = json!({
        "month": 0,
        "year": 2026,
        "generated_by": "admin_01",
        "lines": []
    });

    let (status, error) = post(router, "/payroll/confirm", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}
