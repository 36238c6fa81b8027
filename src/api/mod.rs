//! HTTP API module for the payroll engine.
//!
//! This module exposes the salary calculator, the payroll workflows and
//! the reports as JSON endpoints over a shared record store.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculateRequest, EmployeeReportQuery, PayRequest, PayrollReportQuery, PayrollRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
