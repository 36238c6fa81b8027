//! In-memory record store.
//!
//! All tables sit behind one `RwLock`, so a write and the conflict checks
//! guarding it run under the same guard. Guards are dropped at the end of
//! each method on every exit path.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use super::RecordStore;
use crate::calculation::find_conflict;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Department, DepartmentId, Employee, EmployeeId, EmploymentStatus, NewDepartment, NewEmployee,
    NewPayrollRecord, NewUser, PayPeriod, PaymentStatus, PayrollId, PayrollRecord, UniqueField,
    User, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    employees: BTreeMap<EmployeeId, Employee>,
    departments: BTreeMap<DepartmentId, Department>,
    users: BTreeMap<UserId, User>,
    payroll: BTreeMap<PayrollId, PayrollRecord>,
    last_employee_id: u32,
    last_department_id: u32,
    last_user_id: u32,
    last_payroll_id: u32,
}

impl Tables {
    fn unique_conflict(&self, field: UniqueField, value: &str, exclude_id: Option<u32>) -> bool {
        let value = value.trim();
        let taken = |id: u32, existing: &str| {
            Some(id) != exclude_id && existing.trim().eq_ignore_ascii_case(value)
        };
        match field {
            UniqueField::EmployeeCode => self.employees.values().any(|e| taken(e.id.0, &e.code)),
            UniqueField::Email => self.employees.values().any(|e| taken(e.id.0, &e.email)),
            UniqueField::DepartmentCode => {
                self.departments.values().any(|d| taken(d.id.0, &d.code))
            }
            UniqueField::Username => self.users.values().any(|u| taken(u.id.0, &u.username)),
        }
    }

    fn ensure_unique(&self, field: UniqueField, value: &str, exclude_id: Option<u32>) -> EngineResult<()> {
        if self.unique_conflict(field, value, exclude_id) {
            return Err(EngineError::DuplicateValue {
                field,
                value: value.to_string(),
            });
        }
        Ok(())
    }

    fn employee_records(&self, employee_id: EmployeeId) -> Vec<PayrollRecord> {
        self.payroll
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect()
    }

    fn ensure_status(&self, id: PayrollId, expected: PaymentStatus, requested: PaymentStatus) -> EngineResult<()> {
        let current = self
            .payroll
            .get(&id)
            .map(|r| r.payment_status)
            .ok_or_else(|| not_found("payroll record", id))?;
        if current != expected {
            return Err(EngineError::InvalidTransition { current, requested });
        }
        Ok(())
    }

    fn ensure_no_overlap(
        &self,
        employee_id: EmployeeId,
        period: &PayPeriod,
        exclude: Option<PayrollId>,
    ) -> EngineResult<()> {
        let records = self.employee_records(employee_id);
        if find_conflict(&records, period, exclude).is_some() {
            return Err(EngineError::PeriodConflict {
                employee_id,
                start: period.start_date,
                end: period.end_date,
            });
        }
        Ok(())
    }
}

/// A [`RecordStore`] kept entirely in process memory.
///
/// Ids are assigned sequentially from 1 per entity kind.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{NewDepartment, DepartmentId};
/// use payroll_engine::store::{InMemoryStore, RecordStore};
///
/// let store = InMemoryStore::new();
/// let department = store.insert_department(NewDepartment {
///     code: "ENG".to_string(),
///     name: "Engineering".to_string(),
///     manager_name: None,
///     budget: None,
///     is_active: true,
/// }).unwrap();
///
/// assert_eq!(department.id, DepartmentId(1));
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    available: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Takes the store offline or brings it back; while offline every call
    /// fails with `StoreUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> EngineResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(EngineError::StoreUnavailable {
                message: "in-memory store is offline".to_string(),
            })
        }
    }
}

fn not_found(entity: &'static str, id: impl ToString) -> EngineError {
    EngineError::NotFound {
        entity,
        id: id.to_string(),
    }
}

impl RecordStore for InMemoryStore {
    fn find_payroll_records(&self, employee_id: EmployeeId) -> EngineResult<Vec<PayrollRecord>> {
        self.check_available()?;
        Ok(self.tables.read().employee_records(employee_id))
    }

    fn find_payroll_by_id(&self, id: PayrollId) -> EngineResult<Option<PayrollRecord>> {
        self.check_available()?;
        Ok(self.tables.read().payroll.get(&id).cloned())
    }

    fn list_payroll_records(&self) -> EngineResult<Vec<PayrollRecord>> {
        self.check_available()?;
        Ok(self.tables.read().payroll.values().cloned().collect())
    }

    fn insert_payroll(&self, record: NewPayrollRecord) -> EngineResult<PayrollRecord> {
        self.check_available()?;
        let mut tables = self.tables.write();
        tables.ensure_no_overlap(record.employee_id, &record.period, None)?;

        tables.last_payroll_id += 1;
        let id = PayrollId(tables.last_payroll_id);
        let stored = PayrollRecord::from_new(id, record);
        tables.payroll.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_payroll(&self, record: &PayrollRecord, expected: PaymentStatus) -> EngineResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write();
        tables.ensure_status(record.id, expected, record.payment_status)?;
        tables.ensure_no_overlap(record.employee_id, &record.period, Some(record.id))?;
        tables.payroll.insert(record.id, record.clone());
        Ok(())
    }

    fn delete_payroll(&self, id: PayrollId, expected: PaymentStatus) -> EngineResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write();
        tables.ensure_status(id, expected, expected)?;
        tables.payroll.remove(&id);
        Ok(())
    }

    fn find_employee_by_id(&self, id: EmployeeId) -> EngineResult<Option<Employee>> {
        self.check_available()?;
        Ok(self.tables.read().employees.get(&id).cloned())
    }

    fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        self.check_available()?;
        Ok(self.tables.read().employees.values().cloned().collect())
    }

    fn list_active_employees_by_department(
        &self,
        department_id: DepartmentId,
    ) -> EngineResult<Vec<Employee>> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .employees
            .values()
            .filter(|e| {
                e.department_id == Some(department_id) && e.status == EmploymentStatus::Active
            })
            .cloned()
            .collect())
    }

    fn insert_employee(&self, employee: NewEmployee) -> EngineResult<Employee> {
        self.check_available()?;
        let mut tables = self.tables.write();
        tables.ensure_unique(UniqueField::EmployeeCode, &employee.code, None)?;
        tables.ensure_unique(UniqueField::Email, &employee.email, None)?;

        tables.last_employee_id += 1;
        let id = EmployeeId(tables.last_employee_id);
        let stored = Employee::from_new(id, employee);
        tables.employees.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_employee(&self, employee: &Employee) -> EngineResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write();
        if !tables.employees.contains_key(&employee.id) {
            return Err(not_found("employee", employee.id));
        }
        tables.ensure_unique(UniqueField::EmployeeCode, &employee.code, Some(employee.id.0))?;
        tables.ensure_unique(UniqueField::Email, &employee.email, Some(employee.id.0))?;
        tables.employees.insert(employee.id, employee.clone());
        Ok(())
    }

    fn find_department_by_id(&self, id: DepartmentId) -> EngineResult<Option<Department>> {
        self.check_available()?;
        Ok(self.tables.read().departments.get(&id).cloned())
    }

    fn list_departments(&self) -> EngineResult<Vec<Department>> {
        self.check_available()?;
        Ok(self.tables.read().departments.values().cloned().collect())
    }

    fn insert_department(&self, department: NewDepartment) -> EngineResult<Department> {
        self.check_available()?;
        let mut tables = self.tables.write();
        tables.ensure_unique(UniqueField::DepartmentCode, &department.code, None)?;

        tables.last_department_id += 1;
        let id = DepartmentId(tables.last_department_id);
        let stored = Department::from_new(id, department);
        tables.departments.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_department(&self, department: &Department) -> EngineResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write();
        if !tables.departments.contains_key(&department.id) {
            return Err(not_found("department", department.id));
        }
        tables.ensure_unique(
            UniqueField::DepartmentCode,
            &department.code,
            Some(department.id.0),
        )?;
        tables.departments.insert(department.id, department.clone());
        Ok(())
    }

    fn find_user_by_id(&self, id: UserId) -> EngineResult<Option<User>> {
        self.check_available()?;
        Ok(self.tables.read().users.get(&id).cloned())
    }

    fn insert_user(&self, user: NewUser) -> EngineResult<User> {
        self.check_available()?;
        let mut tables = self.tables.write();
        tables.ensure_unique(UniqueField::Username, &user.username, None)?;

        tables.last_user_id += 1;
        let id = UserId(tables.last_user_id);
        let stored = User::from_new(id, user);
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    fn exists_unique_conflict(
        &self,
        field: UniqueField,
        value: &str,
        exclude_id: Option<u32>,
    ) -> EngineResult<bool> {
        self.check_available()?;
        Ok(self.tables.read().unique_conflict(field, value, exclude_id))
    }
}
