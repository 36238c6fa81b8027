//! End-to-end tests for the payroll engine HTTP API.
//!
//! This suite drives the router the way a client would:
//! - Salary calculation
//! - Payroll creation and period conflicts
//! - Payment lifecycle
//! - Employee, department and user uniqueness
//! - Reports
//! - Store outages

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::store::InMemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

struct TestApp {
    store: Arc<InMemoryStore>,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(store.clone(), ConfigLoader::default());
        TestApp {
            store,
            router: create_router(state),
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };
        (status, json)
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    async fn create_department(&self, code: &str, budget: Option<&str>) -> u64 {
        let (status, body) = self
            .post(
                "/departments",
                json!({ "code": code, "name": "Engineering", "budget": budget }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_u64().unwrap()
    }

    async fn create_employee(&self, code: &str, salary: &str, department: Option<u64>) -> u64 {
        let (status, body) = self
            .post(
                "/employees",
                json!({
                    "code": code,
                    "first_name": "Jane",
                    "last_name": "Doe",
                    "email": format!("{}@example.com", code.to_lowercase()),
                    "base_salary": salary,
                    "department_id": department,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_u64().unwrap()
    }

    async fn create_payroll(&self, employee_id: u64, start: &str, end: &str) -> (StatusCode, Value) {
        self.post(
            "/payroll",
            json!({
                "employee_id": employee_id,
                "start_date": start,
                "end_date": end,
                "overtime_hours": "10",
            }),
        )
        .await
    }
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// =============================================================================
// Salary calculation
// =============================================================================

#[tokio::test]
async fn test_calculate_full_breakdown() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/payroll/calculate",
            json!({
                "base_salary": "4000.00",
                "overtime_hours": "8",
                "overtime_rate": "2",
                "bonus": "250.00",
                "allowances": "100.00",
                "tax_deduction": "600.00",
                "insurance_deduction": "120.00",
                "other_deductions": "30.00",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    // 4000 / 160 * 8 * 2 = 400
    assert_eq!(decimal(&body["overtime_pay"]), dec("400"));
    assert_eq!(decimal(&body["gross_salary"]), dec("4750"));
    assert_eq!(decimal(&body["total_deductions"]), dec("750"));
    assert_eq!(decimal(&body["net_salary"]), dec("4000"));
}

#[tokio::test]
async fn test_calculate_negative_net_is_reported_not_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/payroll/calculate",
            json!({ "base_salary": "100.00", "tax_deduction": "250.00" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["net_salary"]), dec("-150"));
}

#[tokio::test]
async fn test_calculate_rejects_negative_overtime() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/payroll/calculate",
            json!({ "base_salary": "100.00", "overtime_hours": "-1" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"], "overtime_hours");
}

// =============================================================================
// Payroll records and period conflicts
// =============================================================================

#[tokio::test]
async fn test_create_payroll_snapshots_salary() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;

    let (status, body) = app.create_payroll(employee, "2024-01-01", "2024-01-31").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["payment_status"], "PENDING");
    assert_eq!(decimal(&body["input"]["base_salary"]), dec("3200"));
    assert_eq!(decimal(&body["input"]["overtime_rate"]), dec("1.5"));
    assert_eq!(decimal(&body["breakdown"]["net_salary"]), dec("3500"));
}

#[tokio::test]
async fn test_overlapping_period_returns_409() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;
    let (status, _) = app.create_payroll(employee, "2024-01-01", "2024-01-31").await;
    assert_eq!(status, StatusCode::CREATED);

    // Shares the boundary day 2024-01-31
    let (status, body) = app.create_payroll(employee, "2024-01-31", "2024-02-15").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PERIOD_CONFLICT");

    let (status, _) = app.create_payroll(employee, "2024-02-01", "2024-02-29").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_other_employees_do_not_conflict() {
    let app = TestApp::new();
    let first = app.create_employee("EMP001", "3200.00", None).await;
    let second = app.create_employee("EMP002", "3200.00", None).await;

    let (status, _) = app.create_payroll(first, "2024-01-01", "2024-01-31").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.create_payroll(second, "2024-01-01", "2024-01-31").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_inverted_period_is_rejected() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;

    let (status, body) = app.create_payroll(employee, "2024-02-01", "2024-01-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_payroll_can_keep_its_own_period() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;
    let (_, record) = app.create_payroll(employee, "2024-01-01", "2024-01-31").await;
    let id = record["id"].as_u64().unwrap();

    let (status, body) = app
        .send(
            "PUT",
            &format!("/payroll/{id}"),
            Some(json!({
                "employee_id": employee,
                "start_date": "2024-01-01",
                "end_date": "2024-01-31",
                "bonus": "100.00",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(decimal(&body["breakdown"]["net_salary"]), dec("3300"));
}

// =============================================================================
// Payment lifecycle
// =============================================================================

#[tokio::test]
async fn test_pay_then_cancel_is_rejected() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;
    let (_, record) = app.create_payroll(employee, "2024-01-01", "2024-01-31").await;
    let id = record["id"].as_u64().unwrap();

    let (status, body) = app
        .post(
            &format!("/payroll/{id}/pay"),
            json!({ "payment_date": "2024-02-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_status"], "PAID");
    assert_eq!(body["payment_date"], "2024-02-01");

    let (status, body) = app.send("POST", &format!("/payroll/{id}/cancel"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");

    let (status, _) = app.send("POST", &format!("/payroll/{id}/pay"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_pay_without_body_uses_today() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;
    let (_, record) = app.create_payroll(employee, "2024-01-01", "2024-01-31").await;
    let id = record["id"].as_u64().unwrap();

    let (status, body) = app.send("POST", &format!("/payroll/{id}/pay"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["payment_date"].is_string());
}

#[tokio::test]
async fn test_cancelled_record_stays_terminal() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;
    let (_, record) = app.create_payroll(employee, "2024-01-01", "2024-01-31").await;
    let id = record["id"].as_u64().unwrap();

    let (status, body) = app.send("POST", &format!("/payroll/{id}/cancel"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_status"], "CANCELLED");

    let (status, _) = app.send("POST", &format!("/payroll/{id}/pay"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_paid_record_cannot_be_deleted() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;
    let (_, paid) = app.create_payroll(employee, "2024-01-01", "2024-01-31").await;
    let (_, pending) = app.create_payroll(employee, "2024-02-01", "2024-02-29").await;
    let paid_id = paid["id"].as_u64().unwrap();
    let pending_id = pending["id"].as_u64().unwrap();
    app.send("POST", &format!("/payroll/{paid_id}/pay"), None).await;

    let (status, _) = app.send("DELETE", &format!("/payroll/{paid_id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("DELETE", &format!("/payroll/{pending_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// =============================================================================
// Uniqueness
// =============================================================================

#[tokio::test]
async fn test_duplicate_employee_code_returns_409() {
    let app = TestApp::new();
    app.create_employee("EMP001", "3200.00", None).await;

    let (status, body) = app
        .post(
            "/employees",
            json!({
                "code": "EMP001",
                "first_name": "John",
                "last_name": "Smith",
                "email": "john@example.com",
                "base_salary": "2800.00",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_VALUE");
    assert_eq!(body["details"], "employee code");
}

#[tokio::test]
async fn test_duplicate_email_ignores_case() {
    let app = TestApp::new();
    app.create_employee("EMP001", "3200.00", None).await;

    let (status, body) = app
        .post(
            "/employees",
            json!({
                "code": "EMP002",
                "first_name": "John",
                "last_name": "Smith",
                "email": "EMP001@EXAMPLE.COM",
                "base_salary": "2800.00",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"], "email");
}

#[tokio::test]
async fn test_duplicate_username_returns_409() {
    let app = TestApp::new();
    let user = json!({ "username": "admin", "full_name": "Site Admin", "role": "ADMIN" });

    let (status, _) = app.post("/users", user.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = app.post("/users", user).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"], "username");
}

#[tokio::test]
async fn test_terminated_employee_cannot_be_paid() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;

    let (status, body) = app.send("DELETE", &format!("/employees/{employee}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "TERMINATED");

    let (status, body) = app.create_payroll(employee, "2024-01-01", "2024-01-31").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "employee_id");
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_department_utilization_report() {
    let app = TestApp::new();
    let department = app.create_department("ENG", Some("10000.00")).await;
    app.create_employee("EMP001", "1500.00", Some(department)).await;
    app.create_employee("EMP002", "1000.00", Some(department)).await;

    let (status, body) = app
        .get(&format!("/reports/departments/{department}/utilization"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active_employees"], 2);
    assert_eq!(decimal(&body["total_salary"]), dec("2500"));
    assert_eq!(body["utilization_display"], "25.0%");
    assert_eq!(body["total_salary_display"], "$2500.00");
    assert_eq!(body["budget_display"], "$10000.00");
}

#[tokio::test]
async fn test_department_without_budget_is_not_applicable() {
    let app = TestApp::new();
    let department = app.create_department("OPS", None).await;
    app.create_employee("EMP001", "1500.00", Some(department)).await;

    let (status, body) = app.get("/reports/departments").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["utilization_display"], "N/A");
    assert_eq!(rows[0]["budget_display"], "N/A");
}

#[tokio::test]
async fn test_summary_counts_paid_net_only() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;
    app.create_employee("EMP002", "2000.00", None).await;
    let (_, january) = app.create_payroll(employee, "2024-01-01", "2024-01-31").await;
    app.create_payroll(employee, "2024-02-01", "2024-02-29").await;
    let id = january["id"].as_u64().unwrap();
    app.send("POST", &format!("/payroll/{id}/pay"), None).await;

    let (status, body) = app.get("/reports/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employees"]["total"], 2);
    assert_eq!(body["employees"]["active"], 2);
    assert_eq!(body["payroll"]["record_count"], 2);
    assert_eq!(body["payroll"]["paid"], 1);
    assert_eq!(body["payroll"]["pending"], 1);
    assert_eq!(decimal(&body["payroll"]["total_paid"]), dec("3500"));
}

#[tokio::test]
async fn test_payroll_report_range_and_order() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;
    app.create_payroll(employee, "2024-01-01", "2024-01-31").await;
    app.create_payroll(employee, "2024-02-01", "2024-02-29").await;
    app.create_payroll(employee, "2024-03-01", "2024-03-31").await;

    let (status, body) = app
        .get("/reports/payroll?from=2024-01-01&to=2024-02-29")
        .await;

    assert_eq!(status, StatusCode::OK);
    let lines = body.as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["period"]["end_date"], "2024-02-29");
    assert_eq!(lines[1]["period"]["end_date"], "2024-01-31");
    assert_eq!(lines[0]["employee_code"], "EMP001");
}

#[tokio::test]
async fn test_payroll_report_rejects_inverted_range() {
    let app = TestApp::new();
    let (status, body) = app
        .get("/reports/payroll?from=2024-03-01&to=2024-01-01")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "from");
}

#[tokio::test]
async fn test_employee_report_filters_by_status() {
    let app = TestApp::new();
    app.create_employee("EMP001", "3200.00", None).await;
    let leaver = app.create_employee("EMP002", "2000.00", None).await;
    app.send("DELETE", &format!("/employees/{leaver}"), None).await;

    let (status, body) = app.get("/reports/employees?status=ACTIVE").await;

    assert_eq!(status, StatusCode::OK);
    let employees = body.as_array().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["code"], "EMP001");
}

// =============================================================================
// Store outages
// =============================================================================

#[tokio::test]
async fn test_store_outage_returns_503_and_leaves_no_partial_write() {
    let app = TestApp::new();
    let employee = app.create_employee("EMP001", "3200.00", None).await;

    app.store.set_available(false);
    let (status, body) = app.create_payroll(employee, "2024-01-01", "2024-01-31").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "STORE_UNAVAILABLE");

    app.store.set_available(true);
    let (_, summary) = app.get("/reports/summary").await;
    assert_eq!(summary["payroll"]["record_count"], 0);
}
