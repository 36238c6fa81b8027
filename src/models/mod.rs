//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod department;
mod employee;
mod keys;
mod pay_period;
mod payroll;
mod reports;
mod user;

pub use department::{Department, NewDepartment};
pub use employee::{Employee, EmploymentStatus, NewEmployee};
pub use keys::{DepartmentId, EmployeeId, PayrollId, UniqueField, UserId};
pub use pay_period::PayPeriod;
pub use payroll::{
    NewPayrollRecord, PaymentStatus, PayrollDraft, PayrollInput, PayrollRecord, SalaryBreakdown,
};
pub use reports::{
    BudgetUtilization, DepartmentSummary, EmployeeStatistics, PayrollReportLine, PayrollTotals,
    SummaryReport, format_currency,
};
pub use user::{NewUser, User};
