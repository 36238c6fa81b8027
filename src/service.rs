//! Single-action workflows.
//!
//! Each function validates its input, runs the relevant calculation and
//! checks, then persists through the store. Nothing is held between calls;
//! the store and limits are passed in every time. Conflict pre-checks here
//! give early, specific errors, and the store repeats them atomically at
//! write time.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::calculation::{calculate_salary, cancel, ensure_no_period_conflict, mark_paid};
use crate::config::ValidationLimits;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Department, DepartmentId, Employee, EmployeeId, EmploymentStatus, NewDepartment, NewEmployee,
    NewPayrollRecord, NewUser, PaymentStatus, PayrollDraft, PayrollId, PayrollRecord, UniqueField,
    User, UserId,
};
use crate::store::RecordStore;
use crate::validation::{
    sanitize, validate_new_department, validate_new_employee, validate_new_user,
    validate_payroll_input, validate_salary,
};

fn not_found(entity: &'static str, id: impl ToString) -> EngineError {
    EngineError::NotFound {
        entity,
        id: id.to_string(),
    }
}

fn load_payroll(store: &dyn RecordStore, id: PayrollId) -> EngineResult<PayrollRecord> {
    store
        .find_payroll_by_id(id)?
        .ok_or_else(|| not_found("payroll record", id))
}

fn load_employee(store: &dyn RecordStore, id: EmployeeId) -> EngineResult<Employee> {
    store
        .find_employee_by_id(id)?
        .ok_or_else(|| not_found("employee", id))
}

fn load_department(store: &dyn RecordStore, id: DepartmentId) -> EngineResult<Department> {
    store
        .find_department_by_id(id)?
        .ok_or_else(|| not_found("department", id))
}

fn payable_employee(store: &dyn RecordStore, id: EmployeeId) -> EngineResult<Employee> {
    let employee = load_employee(store, id)?;
    if employee.status == EmploymentStatus::Terminated {
        warn!(employee_id = %id, "Rejected payroll for terminated employee");
        return Err(EngineError::validation(
            "employee_id",
            format!("employee {} is terminated", id),
        ));
    }
    Ok(employee)
}

fn ensure_unique(
    store: &dyn RecordStore,
    field: UniqueField,
    value: &str,
    exclude_id: Option<u32>,
) -> EngineResult<()> {
    if store.exists_unique_conflict(field, value, exclude_id)? {
        warn!(field = %field, value = %value, "Rejected duplicate value");
        return Err(EngineError::DuplicateValue {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_conflict(
    store: &dyn RecordStore,
    employee_id: EmployeeId,
    draft: &PayrollDraft,
    exclude: Option<PayrollId>,
) -> EngineResult<()> {
    ensure_no_period_conflict(store, employee_id, &draft.period, exclude).inspect_err(|_| {
        warn!(
            employee_id = %employee_id,
            start = %draft.period.start_date,
            end = %draft.period.end_date,
            "Rejected overlapping pay period"
        );
    })
}

/// Creates a pending payroll record.
///
/// An omitted base salary is snapshotted from the employee's current salary
/// and an omitted overtime rate comes from `limits`. The employee must exist
/// and must not be terminated. When `created_by` is given it must name an
/// existing user.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use payroll_engine::config::ValidationLimits;
/// use payroll_engine::models::{NewEmployee, PayPeriod, PayrollDraft, PaymentStatus};
/// use payroll_engine::money::Money;
/// use payroll_engine::service::{create_employee, create_payroll};
/// use payroll_engine::store::InMemoryStore;
/// use rust_decimal::Decimal;
///
/// let store = InMemoryStore::new();
/// let limits = ValidationLimits::default();
/// let employee = create_employee(&store, &limits, NewEmployee {
///     code: "EMP001".to_string(),
///     first_name: "Ada".to_string(),
///     last_name: "Lovelace".to_string(),
///     email: "ada@example.com".to_string(),
///     phone: None,
///     position: None,
///     hire_date: None,
///     department_id: None,
///     base_salary: Money::new(320000, 2),
///     status: Default::default(),
/// }).unwrap();
///
/// let draft = PayrollDraft {
///     employee_id: employee.id,
///     period: PayPeriod::new(
///         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
///     ).unwrap(),
///     base_salary: None,
///     overtime_hours: Decimal::new(10, 0),
///     overtime_rate: None,
///     bonus: Money::ZERO,
///     allowances: Money::ZERO,
///     tax_deduction: Money::ZERO,
///     insurance_deduction: Money::ZERO,
///     other_deductions: Money::ZERO,
/// };
///
/// let record = create_payroll(&store, &limits, draft, None).unwrap();
/// assert_eq!(record.payment_status, PaymentStatus::Pending);
/// assert_eq!(record.breakdown.net_salary.to_string(), "3500.00");
/// ```
pub fn create_payroll(
    store: &dyn RecordStore,
    limits: &ValidationLimits,
    draft: PayrollDraft,
    created_by: Option<UserId>,
) -> EngineResult<PayrollRecord> {
    let employee = payable_employee(store, draft.employee_id)?;
    if let Some(user_id) = created_by {
        store
            .find_user_by_id(user_id)?
            .ok_or_else(|| not_found("user", user_id))?;
    }

    let input = draft.to_input(employee.base_salary, limits.default_overtime_rate);
    validate_payroll_input(&input, &draft.period)?;
    validate_salary("base_salary", input.base_salary, limits)?;
    let breakdown = calculate_salary(&input)?;

    check_conflict(store, employee.id, &draft, None)?;

    let record = store.insert_payroll(NewPayrollRecord {
        employee_id: employee.id,
        period: draft.period,
        input,
        breakdown,
        payment_status: PaymentStatus::Pending,
        payment_date: None,
        created_by,
        created_at: Utc::now(),
    })?;

    info!(
        payroll_id = %record.id,
        employee_id = %record.employee_id,
        net_salary = %record.breakdown.net_salary,
        "Created payroll record"
    );
    Ok(record)
}

/// Edits a pending payroll record and recomputes its breakdown.
///
/// Omitted base salary and overtime rate keep the record's current values.
/// The conflict check excludes the record itself.
pub fn update_payroll(
    store: &dyn RecordStore,
    limits: &ValidationLimits,
    id: PayrollId,
    draft: PayrollDraft,
) -> EngineResult<PayrollRecord> {
    let mut record = load_payroll(store, id)?;
    if !record.is_editable() {
        warn!(payroll_id = %id, status = %record.payment_status, "Rejected edit of settled record");
        return Err(EngineError::validation(
            "payment_status",
            format!(
                "only PENDING records can be edited; record is {}",
                record.payment_status
            ),
        ));
    }
    let employee = payable_employee(store, draft.employee_id)?;

    let input = draft.to_input(record.input.base_salary, record.input.overtime_rate);
    validate_payroll_input(&input, &draft.period)?;
    validate_salary("base_salary", input.base_salary, limits)?;
    let breakdown = calculate_salary(&input)?;

    check_conflict(store, employee.id, &draft, Some(id))?;

    record.employee_id = employee.id;
    record.period = draft.period;
    record.input = input;
    record.breakdown = breakdown;
    store.update_payroll(&record, PaymentStatus::Pending)?;

    info!(
        payroll_id = %id,
        net_salary = %record.breakdown.net_salary,
        "Updated payroll record"
    );
    Ok(record)
}

/// Marks a pending record paid on `payment_date`, or today.
pub fn mark_payroll_paid(
    store: &dyn RecordStore,
    id: PayrollId,
    payment_date: Option<NaiveDate>,
) -> EngineResult<PayrollRecord> {
    let mut record = load_payroll(store, id)?;
    let expected = record.payment_status;
    mark_paid(&mut record, payment_date).inspect_err(|e| {
        warn!(payroll_id = %id, error = %e, "Rejected payment");
    })?;
    store.update_payroll(&record, expected).inspect_err(|e| {
        warn!(payroll_id = %id, error = %e, "Payment lost a race with another update");
    })?;

    info!(
        payroll_id = %id,
        payment_date = ?record.payment_date,
        "Marked payroll record paid"
    );
    Ok(record)
}

/// Cancels a pending record.
pub fn cancel_payroll(store: &dyn RecordStore, id: PayrollId) -> EngineResult<PayrollRecord> {
    let mut record = load_payroll(store, id)?;
    let expected = record.payment_status;
    cancel(&mut record).inspect_err(|e| {
        warn!(payroll_id = %id, error = %e, "Rejected cancellation");
    })?;
    store.update_payroll(&record, expected).inspect_err(|e| {
        warn!(payroll_id = %id, error = %e, "Cancellation lost a race with another update");
    })?;

    info!(payroll_id = %id, "Cancelled payroll record");
    Ok(record)
}

/// Deletes a payroll record that has not been paid.
///
/// Paid records stay for audit.
pub fn delete_payroll(store: &dyn RecordStore, id: PayrollId) -> EngineResult<()> {
    let record = load_payroll(store, id)?;
    if record.payment_status == PaymentStatus::Paid {
        warn!(payroll_id = %id, "Rejected deletion of paid record");
        return Err(EngineError::validation(
            "payment_status",
            "paid records cannot be deleted",
        ));
    }
    store.delete_payroll(id, record.payment_status)?;
    info!(payroll_id = %id, "Deleted payroll record");
    Ok(())
}

fn normalize_employee(mut employee: NewEmployee) -> NewEmployee {
    employee.code = sanitize(&employee.code);
    employee.first_name = sanitize(&employee.first_name);
    employee.last_name = sanitize(&employee.last_name);
    employee.email = sanitize(&employee.email);
    employee.phone = employee
        .phone
        .map(|p| sanitize(&p))
        .filter(|p| !p.is_empty());
    employee.position = employee
        .position
        .map(|p| sanitize(&p))
        .filter(|p| !p.is_empty());
    // Department 0 is how callers spell "unassigned".
    employee.department_id = employee.department_id.filter(|d| d.0 != 0);
    employee
}

fn check_employee(
    store: &dyn RecordStore,
    limits: &ValidationLimits,
    employee: &NewEmployee,
    exclude_id: Option<EmployeeId>,
) -> EngineResult<()> {
    validate_new_employee(employee, limits).inspect_err(|e| {
        warn!(error = %e, "Rejected employee input");
    })?;
    if let Some(department_id) = employee.department_id {
        load_department(store, department_id)?;
    }
    let exclude = exclude_id.map(|id| id.0);
    ensure_unique(store, UniqueField::EmployeeCode, &employee.code, exclude)?;
    ensure_unique(store, UniqueField::Email, &employee.email, exclude)
}

/// Creates an employee with a unique code and email.
pub fn create_employee(
    store: &dyn RecordStore,
    limits: &ValidationLimits,
    employee: NewEmployee,
) -> EngineResult<Employee> {
    let employee = normalize_employee(employee);
    check_employee(store, limits, &employee, None)?;

    let stored = store.insert_employee(employee)?;
    info!(employee_id = %stored.id, code = %stored.code, "Created employee");
    Ok(stored)
}

/// Replaces an employee's fields.
pub fn update_employee(
    store: &dyn RecordStore,
    limits: &ValidationLimits,
    id: EmployeeId,
    employee: NewEmployee,
) -> EngineResult<Employee> {
    load_employee(store, id)?;
    let employee = normalize_employee(employee);
    check_employee(store, limits, &employee, Some(id))?;

    let updated = Employee::from_new(id, employee);
    store.update_employee(&updated)?;
    info!(employee_id = %id, status = %updated.status, "Updated employee");
    Ok(updated)
}

/// Soft-deletes an employee by setting the status to `TERMINATED`.
///
/// Payroll history is kept.
pub fn terminate_employee(store: &dyn RecordStore, id: EmployeeId) -> EngineResult<Employee> {
    let mut employee = load_employee(store, id)?;
    employee.status = EmploymentStatus::Terminated;
    store.update_employee(&employee)?;
    info!(employee_id = %id, "Terminated employee");
    Ok(employee)
}

fn normalize_department(mut department: NewDepartment) -> NewDepartment {
    department.code = sanitize(&department.code);
    department.name = sanitize(&department.name);
    department.manager_name = department
        .manager_name
        .map(|m| sanitize(&m))
        .filter(|m| !m.is_empty());
    department
}

/// Creates a department with a unique code.
pub fn create_department(
    store: &dyn RecordStore,
    limits: &ValidationLimits,
    department: NewDepartment,
) -> EngineResult<Department> {
    let department = normalize_department(department);
    validate_new_department(&department, limits)?;
    ensure_unique(store, UniqueField::DepartmentCode, &department.code, None)?;

    let stored = store.insert_department(department)?;
    info!(department_id = %stored.id, code = %stored.code, "Created department");
    Ok(stored)
}

/// Replaces a department's fields.
pub fn update_department(
    store: &dyn RecordStore,
    limits: &ValidationLimits,
    id: DepartmentId,
    department: NewDepartment,
) -> EngineResult<Department> {
    load_department(store, id)?;
    let department = normalize_department(department);
    validate_new_department(&department, limits)?;
    ensure_unique(store, UniqueField::DepartmentCode, &department.code, Some(id.0))?;

    let updated = Department::from_new(id, department);
    store.update_department(&updated)?;
    info!(department_id = %id, "Updated department");
    Ok(updated)
}

/// Soft-deletes a department by clearing its active flag.
///
/// Employees keep their department reference.
pub fn deactivate_department(store: &dyn RecordStore, id: DepartmentId) -> EngineResult<Department> {
    let mut department = load_department(store, id)?;
    department.is_active = false;
    store.update_department(&department)?;
    info!(department_id = %id, "Deactivated department");
    Ok(department)
}

/// Creates a user with a unique username.
pub fn create_user(
    store: &dyn RecordStore,
    limits: &ValidationLimits,
    mut user: NewUser,
) -> EngineResult<User> {
    user.username = sanitize(&user.username);
    user.full_name = sanitize(&user.full_name);
    user.role = sanitize(&user.role);
    validate_new_user(&user, limits)?;
    ensure_unique(store, UniqueField::Username, &user.username, None)?;

    let stored = store.insert_user(user)?;
    info!(user_id = %stored.id, username = %stored.username, "Created user");
    Ok(stored)
}
