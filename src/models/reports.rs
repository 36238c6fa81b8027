//! Read-only report structures produced by the aggregation engine.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DepartmentId, EmployeeId, PayPeriod, PaymentStatus, PayrollId, PayrollInput, SalaryBreakdown};
use crate::money::Money;

/// Formats money for reports: `$` followed by the 2dp amount.
///
/// ```
/// use payroll_engine::models::format_currency;
/// use payroll_engine::money::Money;
///
/// assert_eq!(format_currency(Money::new(350000, 2)), "$3500.00");
/// ```
pub fn format_currency(amount: Money) -> String {
    format!("${}", amount)
}

/// Employee counts grouped by employment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeStatistics {
    /// Every employee regardless of status.
    pub total: u64,
    /// Employees with status `ACTIVE`.
    pub active: u64,
    /// Employees with status `INACTIVE`.
    pub inactive: u64,
    /// Employees with status `TERMINATED`.
    pub terminated: u64,
}

/// Totals across all payroll records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Sum of net salary over `PAID` records.
    pub total_paid: Money,
    /// Number of records regardless of status.
    pub record_count: u64,
    /// Records still `PENDING`.
    pub pending: u64,
    /// Records `PAID`.
    pub paid: u64,
    /// Records `CANCELLED`.
    pub cancelled: u64,
}

/// The combined figures shown on the summary report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Employee counts.
    pub employees: EmployeeStatistics,
    /// Payroll totals.
    pub payroll: PayrollTotals,
}

/// A department's salary spend relative to its budget.
///
/// `NotApplicable` is a normal result for departments with no budget or a
/// zero budget, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percentage", rename_all = "snake_case")]
pub enum BudgetUtilization {
    /// Percentage of the budget used, carrying 4 decimal places.
    Percentage(Decimal),
    /// No budget, or a zero budget.
    NotApplicable,
}

impl BudgetUtilization {
    /// Returns the percentage, if there is one.
    pub fn percentage(&self) -> Option<Decimal> {
        match self {
            BudgetUtilization::Percentage(p) => Some(*p),
            BudgetUtilization::NotApplicable => None,
        }
    }
}

impl fmt::Display for BudgetUtilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetUtilization::Percentage(p) => {
                let rounded = p.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
                write!(f, "{:.1}%", rounded)
            }
            BudgetUtilization::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// One row of the department report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    /// The department.
    pub department_id: DepartmentId,
    /// Department code.
    pub code: String,
    /// Department name.
    pub name: String,
    /// Manager name, if recorded.
    pub manager_name: Option<String>,
    /// Number of active employees linked to the department.
    pub active_employees: u64,
    /// Sum of those employees' current base salaries.
    pub total_salary: Money,
    /// `total_salary` formatted for display.
    pub total_salary_display: String,
    /// The department budget.
    pub budget: Option<Money>,
    /// `budget` formatted for display, `N/A` when there is none.
    pub budget_display: String,
    /// Salary spend against the budget.
    pub utilization: BudgetUtilization,
    /// `utilization` formatted for display.
    pub utilization_display: String,
}

/// One line of the payroll report, with derived fields recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollReportLine {
    /// The payroll record.
    pub record_id: PayrollId,
    /// The employee paid.
    pub employee_id: EmployeeId,
    /// The employee's code, when the employee still exists.
    pub employee_code: Option<String>,
    /// The employee's full name, when the employee still exists.
    pub employee_name: Option<String>,
    /// The period covered.
    pub period: PayPeriod,
    /// Entered amounts.
    pub input: PayrollInput,
    /// Derived amounts computed from `input` for this report.
    pub breakdown: SalaryBreakdown,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Payment date.
    pub payment_date: Option<NaiveDate>,
}
