//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.
//! Every handler tags its log lines with a fresh correlation id and maps
//! engine errors through [`ApiErrorResponse`].

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_salary, department_budget_utilization, department_report, employee_report,
    payroll_report, summary_report,
};
use crate::error::EngineResult;
use crate::models::{
    DepartmentId, EmployeeId, NewDepartment, NewEmployee, NewUser, PayrollId,
};
use crate::service;

use super::request::{
    CalculateRequest, EmployeeReportQuery, PayRequest, PayrollReportQuery, PayrollRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll", post(create_payroll_handler))
        .route(
            "/payroll/:id",
            put(update_payroll_handler).delete(delete_payroll_handler),
        )
        .route("/payroll/:id/pay", post(pay_payroll_handler))
        .route("/payroll/:id/cancel", post(cancel_payroll_handler))
        .route("/employees", post(create_employee_handler))
        .route(
            "/employees/:id",
            put(update_employee_handler).delete(terminate_employee_handler),
        )
        .route("/departments", post(create_department_handler))
        .route(
            "/departments/:id",
            put(update_department_handler).delete(deactivate_department_handler),
        )
        .route("/users", post(create_user_handler))
        .route("/reports/summary", get(summary_handler))
        .route("/reports/departments", get(department_report_handler))
        .route(
            "/reports/departments/:id/utilization",
            get(department_utilization_handler),
        )
        .route("/reports/payroll", get(payroll_report_handler))
        .route("/reports/employees", get(employee_report_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Turns a JSON body rejection into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection_response(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::new("INVALID_QUERY", body_text)).into_response()
}

/// Logs the outcome of `operation` and renders it.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    success: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(correlation_id = %correlation_id, operation, "Request completed");
            json_response(success, body)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                retryable = err.is_retryable(),
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /payroll/calculate.
///
/// Computes a salary breakdown without touching the store.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let input = request.into_input(state.limits().default_overtime_rate);
    let result = calculate_salary(&input);
    if let Ok(breakdown) = &result {
        info!(
            correlation_id = %correlation_id,
            net_salary = %breakdown.net_salary,
            duration_us = start_time.elapsed().as_micros(),
            "Calculation completed successfully"
        );
    }
    respond(correlation_id, "calculate", StatusCode::OK, result)
}

/// Handler for POST /payroll.
async fn create_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll creation");

    let (draft, created_by) = match payload {
        Ok(Json(req)) => req.into_draft(),
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let result = service::create_payroll(state.store(), state.limits(), draft, created_by);
    respond(correlation_id, "create_payroll", StatusCode::CREATED, result)
}

/// Handler for PUT /payroll/:id.
async fn update_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<PayrollId>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, payroll_id = %id, "Processing payroll update");

    let (draft, _) = match payload {
        Ok(Json(req)) => req.into_draft(),
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let result = service::update_payroll(state.store(), state.limits(), id, draft);
    respond(correlation_id, "update_payroll", StatusCode::OK, result)
}

/// Handler for DELETE /payroll/:id.
async fn delete_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<PayrollId>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match service::delete_payroll(state.store(), id) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, payroll_id = %id, "Deleted payroll record");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => respond::<()>(correlation_id, "delete_payroll", StatusCode::OK, Err(err)),
    }
}

/// Handler for POST /payroll/:id/pay.
///
/// The body is optional; without one the record is paid today.
async fn pay_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<PayrollId>,
    payload: Result<Json<PayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, payroll_id = %id, "Processing payment");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => PayRequest::default(),
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let result = service::mark_payroll_paid(state.store(), id, request.payment_date);
    respond(correlation_id, "mark_paid", StatusCode::OK, result)
}

/// Handler for POST /payroll/:id/cancel.
async fn cancel_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<PayrollId>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = service::cancel_payroll(state.store(), id);
    respond(correlation_id, "cancel_payroll", StatusCode::OK, result)
}

/// Handler for POST /employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee = match payload {
        Ok(Json(employee)) => employee,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let result = service::create_employee(state.store(), state.limits(), employee);
    respond(correlation_id, "create_employee", StatusCode::CREATED, result)
}

/// Handler for PUT /employees/:id.
async fn update_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee = match payload {
        Ok(Json(employee)) => employee,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let result = service::update_employee(state.store(), state.limits(), id, employee);
    respond(correlation_id, "update_employee", StatusCode::OK, result)
}

/// Handler for DELETE /employees/:id.
///
/// Terminates rather than removes, so payroll history keeps its employee.
async fn terminate_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = service::terminate_employee(state.store(), id);
    respond(correlation_id, "terminate_employee", StatusCode::OK, result)
}

/// Handler for POST /departments.
async fn create_department_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewDepartment>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let department = match payload {
        Ok(Json(department)) => department,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let result = service::create_department(state.store(), state.limits(), department);
    respond(correlation_id, "create_department", StatusCode::CREATED, result)
}

/// Handler for PUT /departments/:id.
async fn update_department_handler(
    State(state): State<AppState>,
    Path(id): Path<DepartmentId>,
    payload: Result<Json<NewDepartment>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let department = match payload {
        Ok(Json(department)) => department,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let result = service::update_department(state.store(), state.limits(), id, department);
    respond(correlation_id, "update_department", StatusCode::OK, result)
}

/// Handler for DELETE /departments/:id.
async fn deactivate_department_handler(
    State(state): State<AppState>,
    Path(id): Path<DepartmentId>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = service::deactivate_department(state.store(), id);
    respond(correlation_id, "deactivate_department", StatusCode::OK, result)
}

/// Handler for POST /users.
async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let user = match payload {
        Ok(Json(user)) => user,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let result = service::create_user(state.store(), state.limits(), user);
    respond(correlation_id, "create_user", StatusCode::CREATED, result)
}

/// Handler for GET /reports/summary.
async fn summary_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(
        correlation_id,
        "summary_report",
        StatusCode::OK,
        summary_report(state.store()),
    )
}

/// Handler for GET /reports/departments.
async fn department_report_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(
        correlation_id,
        "department_report",
        StatusCode::OK,
        department_report(state.store()),
    )
}

/// Handler for GET /reports/departments/:id/utilization.
async fn department_utilization_handler(
    State(state): State<AppState>,
    Path(id): Path<DepartmentId>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(
        correlation_id,
        "department_utilization",
        StatusCode::OK,
        department_budget_utilization(state.store(), id),
    )
}

/// Handler for GET /reports/payroll?from=&to=.
async fn payroll_report_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    respond(
        correlation_id,
        "payroll_report",
        StatusCode::OK,
        payroll_report(state.store(), query.from, query.to),
    )
}

/// Handler for GET /reports/employees.
async fn employee_report_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeeReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    respond(
        correlation_id,
        "employee_report",
        StatusCode::OK,
        employee_report(state.store(), query.department_id, query.status),
    )
}
