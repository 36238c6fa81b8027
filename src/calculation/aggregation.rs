//! Report aggregation.
//!
//! Every function here re-scans the store on each call. Salary figures on
//! payroll records are recomputed from their inputs rather than read from
//! the cached breakdown.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Reverse;
use tracing::debug;

use super::salary::calculate_salary;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BudgetUtilization, Department, DepartmentId, DepartmentSummary, Employee, EmployeeStatistics,
    EmploymentStatus, PaymentStatus, PayrollReportLine, PayrollTotals, SummaryReport,
    format_currency,
};
use crate::money::Money;
use crate::store::RecordStore;

/// Decimal places kept on the budget ratio before it is scaled to a percentage.
pub const UTILIZATION_SCALE: u32 = 4;

/// Counts employees by employment status.
pub fn employee_statistics(store: &dyn RecordStore) -> EngineResult<EmployeeStatistics> {
    let employees = store.list_employees()?;
    let mut stats = EmployeeStatistics::default();
    for employee in &employees {
        stats.total += 1;
        match employee.status {
            EmploymentStatus::Active => stats.active += 1,
            EmploymentStatus::Inactive => stats.inactive += 1,
            EmploymentStatus::Terminated => stats.terminated += 1,
        }
    }
    debug!(total = stats.total, active = stats.active, "Computed employee statistics");
    Ok(stats)
}

/// Sums net salary over paid records and counts records by status.
///
/// `record_count` covers every record regardless of status.
pub fn payroll_totals(store: &dyn RecordStore) -> EngineResult<PayrollTotals> {
    let records = store.list_payroll_records()?;
    let mut totals = PayrollTotals::default();
    for record in &records {
        totals.record_count += 1;
        match record.payment_status {
            PaymentStatus::Pending => totals.pending += 1,
            PaymentStatus::Cancelled => totals.cancelled += 1,
            PaymentStatus::Paid => {
                totals.paid += 1;
                let breakdown = calculate_salary(&record.input)?;
                totals.total_paid = totals.total_paid.checked_add(breakdown.net_salary)?;
            }
        }
    }
    debug!(
        record_count = totals.record_count,
        total_paid = %totals.total_paid,
        "Computed payroll totals"
    );
    Ok(totals)
}

/// Employee statistics and payroll totals together.
pub fn summary_report(store: &dyn RecordStore) -> EngineResult<SummaryReport> {
    Ok(SummaryReport {
        employees: employee_statistics(store)?,
        payroll: payroll_totals(store)?,
    })
}

/// Expresses `total_salary` as a percentage of `budget`.
///
/// The ratio is rounded half-up to 4 decimal places and then multiplied by
/// 100. A missing or zero budget gives [`BudgetUtilization::NotApplicable`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::budget_utilization;
/// use payroll_engine::models::BudgetUtilization;
/// use payroll_engine::money::Money;
/// use rust_decimal::Decimal;
///
/// let used = budget_utilization(Money::new(250, 0), Some(Money::new(1000, 0))).unwrap();
/// assert_eq!(used, BudgetUtilization::Percentage(Decimal::new(250000, 4)));
/// assert_eq!(used.to_string(), "25.0%");
///
/// let none = budget_utilization(Money::new(250, 0), Some(Money::ZERO)).unwrap();
/// assert_eq!(none, BudgetUtilization::NotApplicable);
/// ```
pub fn budget_utilization(
    total_salary: Money,
    budget: Option<Money>,
) -> EngineResult<BudgetUtilization> {
    let budget = match budget {
        Some(budget) if !budget.is_zero() => budget,
        _ => return Ok(BudgetUtilization::NotApplicable),
    };
    let ratio = total_salary.ratio_to(budget, UTILIZATION_SCALE)?;
    let percentage = ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| EngineError::InvalidOperation {
            message: "utilization percentage overflowed".to_string(),
        })?;
    Ok(BudgetUtilization::Percentage(percentage))
}

fn summarize_department(
    store: &dyn RecordStore,
    department: &Department,
) -> EngineResult<DepartmentSummary> {
    let employees = store.list_active_employees_by_department(department.id)?;
    let mut total_salary = Money::ZERO;
    for employee in &employees {
        total_salary = total_salary.checked_add(employee.base_salary)?;
    }
    let utilization = budget_utilization(total_salary, department.budget)?;

    Ok(DepartmentSummary {
        department_id: department.id,
        code: department.code.clone(),
        name: department.name.clone(),
        manager_name: department.manager_name.clone(),
        active_employees: employees.len() as u64,
        total_salary,
        total_salary_display: format_currency(total_salary),
        budget: department.budget,
        budget_display: department
            .budget
            .map_or_else(|| "N/A".to_string(), format_currency),
        utilization,
        utilization_display: utilization.to_string(),
    })
}

/// Budget utilization for one department, from its active employees'
/// current base salaries.
pub fn department_budget_utilization(
    store: &dyn RecordStore,
    department_id: DepartmentId,
) -> EngineResult<DepartmentSummary> {
    let department = store
        .find_department_by_id(department_id)?
        .ok_or_else(|| EngineError::NotFound {
            entity: "department",
            id: department_id.to_string(),
        })?;
    let summary = summarize_department(store, &department)?;
    debug!(
        department_id = %department_id,
        utilization = %summary.utilization,
        "Computed department utilization"
    );
    Ok(summary)
}

/// One summary row per active department, in id order.
pub fn department_report(store: &dyn RecordStore) -> EngineResult<Vec<DepartmentSummary>> {
    let departments = store.list_departments()?;
    let rows = departments
        .iter()
        .filter(|d| d.is_active)
        .map(|d| summarize_department(store, d))
        .collect::<EngineResult<Vec<_>>>()?;
    debug!(rows = rows.len(), "Built department report");
    Ok(rows)
}

/// Payroll records whose period lies entirely within `[from, to]`,
/// latest period end first.
pub fn payroll_report(
    store: &dyn RecordStore,
    from: NaiveDate,
    to: NaiveDate,
) -> EngineResult<Vec<PayrollReportLine>> {
    if from > to {
        return Err(EngineError::validation(
            "from",
            format!("report start {} is after report end {}", from, to),
        ));
    }

    let mut records: Vec<_> = store
        .list_payroll_records()?
        .into_iter()
        .filter(|r| r.period.within(from, to))
        .collect();
    records.sort_by_key(|r| (Reverse(r.period.end_date), r.id));

    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        let employee = store.find_employee_by_id(record.employee_id)?;
        lines.push(PayrollReportLine {
            record_id: record.id,
            employee_id: record.employee_id,
            employee_code: employee.as_ref().map(|e| e.code.clone()),
            employee_name: employee.as_ref().map(Employee::full_name),
            period: record.period,
            input: record.input,
            breakdown: calculate_salary(&record.input)?,
            payment_status: record.payment_status,
            payment_date: record.payment_date,
        });
    }
    debug!(%from, %to, lines = lines.len(), "Built payroll report");
    Ok(lines)
}

/// Employees, optionally restricted to one department and/or one status.
pub fn employee_report(
    store: &dyn RecordStore,
    department_id: Option<DepartmentId>,
    status: Option<EmploymentStatus>,
) -> EngineResult<Vec<Employee>> {
    let employees = store
        .list_employees()?
        .into_iter()
        .filter(|e| department_id.is_none_or(|d| e.department_id == Some(d)))
        .filter(|e| status.is_none_or(|s| e.status == s))
        .collect();
    Ok(employees)
}
