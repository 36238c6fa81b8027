//! Request types for the payroll engine API.
//!
//! This module defines the JSON request bodies and query strings accepted
//! by the HTTP endpoints. Employee, department and user bodies reuse the
//! model drafts directly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    DepartmentId, EmployeeId, EmploymentStatus, PayPeriod, PayrollDraft, PayrollInput, UserId,
};
use crate::money::Money;

/// Request body for `POST /payroll/calculate`.
///
/// Computes a salary breakdown without storing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Monthly base salary.
    pub base_salary: Money,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Overtime multiplier; the configured default when omitted.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Bonus.
    #[serde(default)]
    pub bonus: Money,
    /// Allowances.
    #[serde(default)]
    pub allowances: Money,
    /// Tax deduction.
    #[serde(default)]
    pub tax_deduction: Money,
    /// Insurance deduction.
    #[serde(default)]
    pub insurance_deduction: Money,
    /// Other deductions.
    #[serde(default)]
    pub other_deductions: Money,
}

impl CalculateRequest {
    /// Resolves the request into calculator input.
    pub fn into_input(self, default_overtime_rate: Decimal) -> PayrollInput {
        PayrollInput {
            base_salary: self.base_salary,
            overtime_hours: self.overtime_hours,
            overtime_rate: self.overtime_rate.unwrap_or(default_overtime_rate),
            bonus: self.bonus,
            allowances: self.allowances,
            tax_deduction: self.tax_deduction,
            insurance_deduction: self.insurance_deduction,
            other_deductions: self.other_deductions,
        }
    }
}

/// Request body for `POST /payroll` and `PUT /payroll/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee being paid.
    pub employee_id: EmployeeId,
    /// First day of the pay period.
    pub start_date: NaiveDate,
    /// Last day of the pay period.
    pub end_date: NaiveDate,
    /// Base salary override.
    #[serde(default)]
    pub base_salary: Option<Money>,
    /// Overtime hours.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Overtime multiplier override.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Bonus.
    #[serde(default)]
    pub bonus: Money,
    /// Allowances.
    #[serde(default)]
    pub allowances: Money,
    /// Tax deduction.
    #[serde(default)]
    pub tax_deduction: Money,
    /// Insurance deduction.
    #[serde(default)]
    pub insurance_deduction: Money,
    /// Other deductions.
    #[serde(default)]
    pub other_deductions: Money,
    /// The user creating the record; ignored on update.
    #[serde(default)]
    pub created_by: Option<UserId>,
}

impl PayrollRequest {
    /// Splits the request into a draft and its creator.
    pub fn into_draft(self) -> (PayrollDraft, Option<UserId>) {
        let draft = PayrollDraft {
            employee_id: self.employee_id,
            period: PayPeriod {
                start_date: self.start_date,
                end_date: self.end_date,
            },
            base_salary: self.base_salary,
            overtime_hours: self.overtime_hours,
            overtime_rate: self.overtime_rate,
            bonus: self.bonus,
            allowances: self.allowances,
            tax_deduction: self.tax_deduction,
            insurance_deduction: self.insurance_deduction,
            other_deductions: self.other_deductions,
        };
        (draft, self.created_by)
    }
}

/// Request body for `POST /payroll/:id/pay`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayRequest {
    /// Payment date; today when omitted.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

/// Query string for `GET /reports/payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollReportQuery {
    /// Earliest period start included.
    pub from: NaiveDate,
    /// Latest period end included.
    pub to: NaiveDate,
}

/// Query string for `GET /reports/employees`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeReportQuery {
    /// Restrict to one department.
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    /// Restrict to one employment status.
    #[serde(default)]
    pub status: Option<EmploymentStatus>,
}
