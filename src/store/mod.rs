//! Record store collaborator.
//!
//! The engine reads and writes employees, departments, users and payroll
//! records through [`RecordStore`]. Implementations must make each insert
//! and update atomic with its own conflict checks: a payroll write re-checks
//! period overlap and the stored payment status, and an employee, department
//! or user write re-checks uniqueness, under the same lock or transaction as
//! the write itself.

mod memory;

pub use memory::InMemoryStore;

use crate::error::EngineResult;
use crate::models::{
    Department, DepartmentId, Employee, EmployeeId, NewDepartment, NewEmployee, NewPayrollRecord,
    NewUser, PaymentStatus, PayrollId, PayrollRecord, UniqueField, User, UserId,
};

/// Persistence interface used by the workflows and the aggregation engine.
///
/// Every method returns [`crate::error::EngineError::StoreUnavailable`] when
/// the backing store cannot be reached.
pub trait RecordStore: Send + Sync {
    /// All payroll records of one employee.
    fn find_payroll_records(&self, employee_id: EmployeeId) -> EngineResult<Vec<PayrollRecord>>;

    /// A single payroll record.
    fn find_payroll_by_id(&self, id: PayrollId) -> EngineResult<Option<PayrollRecord>>;

    /// Every payroll record.
    fn list_payroll_records(&self) -> EngineResult<Vec<PayrollRecord>>;

    /// Inserts a record, failing with `PeriodConflict` if it overlaps
    /// another record of the same employee.
    fn insert_payroll(&self, record: NewPayrollRecord) -> EngineResult<PayrollRecord>;

    /// Replaces a record whose stored status is still `expected`.
    ///
    /// Fails with `InvalidTransition` if another write changed the status
    /// since the caller read the record, and with `PeriodConflict` if the
    /// period now overlaps another record of the same employee.
    fn update_payroll(&self, record: &PayrollRecord, expected: PaymentStatus) -> EngineResult<()>;

    /// Removes a record whose stored status is still `expected`.
    fn delete_payroll(&self, id: PayrollId, expected: PaymentStatus) -> EngineResult<()>;

    /// A single employee.
    fn find_employee_by_id(&self, id: EmployeeId) -> EngineResult<Option<Employee>>;

    /// Every employee, in id order.
    fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Active employees linked to a department.
    fn list_active_employees_by_department(
        &self,
        department_id: DepartmentId,
    ) -> EngineResult<Vec<Employee>>;

    /// Inserts an employee, failing with `DuplicateValue` on a taken code or email.
    fn insert_employee(&self, employee: NewEmployee) -> EngineResult<Employee>;

    /// Replaces an employee, failing with `DuplicateValue` on a taken code or email.
    fn update_employee(&self, employee: &Employee) -> EngineResult<()>;

    /// A single department.
    fn find_department_by_id(&self, id: DepartmentId) -> EngineResult<Option<Department>>;

    /// Every department, in id order.
    fn list_departments(&self) -> EngineResult<Vec<Department>>;

    /// Inserts a department, failing with `DuplicateValue` on a taken code.
    fn insert_department(&self, department: NewDepartment) -> EngineResult<Department>;

    /// Replaces a department, failing with `DuplicateValue` on a taken code.
    fn update_department(&self, department: &Department) -> EngineResult<()>;

    /// A single user.
    fn find_user_by_id(&self, id: UserId) -> EngineResult<Option<User>>;

    /// Inserts a user, failing with `DuplicateValue` on a taken username.
    fn insert_user(&self, user: NewUser) -> EngineResult<User>;

    /// Reports whether `value` is already used for `field` by a record
    /// other than `exclude_id`.
    fn exists_unique_conflict(
        &self,
        field: UniqueField,
        value: &str,
        exclude_id: Option<u32>,
    ) -> EngineResult<bool>;
}
