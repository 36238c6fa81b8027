//! Calculation logic for the payroll engine.
//!
//! This module contains the pure salary calculator, pay period conflict
//! detection, payment status transitions, and the aggregation functions
//! behind the summary, department and payroll reports.

mod aggregation;
mod payment_lifecycle;
mod period_conflict;
mod salary;

pub use aggregation::{
    UTILIZATION_SCALE, budget_utilization, department_budget_utilization, department_report,
    employee_report, employee_statistics, payroll_report, payroll_totals, summary_report,
};
pub use payment_lifecycle::{cancel, check_transition, mark_paid};
pub use period_conflict::{ensure_no_period_conflict, find_conflict, has_period_conflict};
pub use salary::{STANDARD_MONTHLY_HOURS, calculate_salary};
