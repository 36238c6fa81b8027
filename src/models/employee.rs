//! Employee model and related types.
//!
//! This module defines the Employee struct and EmploymentStatus enum
//! for representing staff on the payroll.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DepartmentId, EmployeeId};
use crate::money::Money;

/// Represents where an employee is in their employment lifecycle.
///
/// `Terminated` is the soft-delete state: employees are never removed,
/// so their payroll history stays attached to a real record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    /// Currently employed and on the payroll.
    #[default]
    Active,
    /// Employed but temporarily off the payroll.
    Inactive,
    /// No longer employed.
    Terminated,
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EmploymentStatus::Active => "ACTIVE",
            EmploymentStatus::Inactive => "INACTIVE",
            EmploymentStatus::Terminated => "TERMINATED",
        };
        f.write_str(label)
    }
}

/// Represents an employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Unique employee code (e.g., "EMP001").
    pub code: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// Unique contact email.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional job title.
    #[serde(default)]
    pub position: Option<String>,
    /// The date the employee was hired.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// The department the employee belongs to; `None` means unassigned.
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    /// The current monthly base salary.
    pub base_salary: Money,
    /// The employment status.
    #[serde(default)]
    pub status: EmploymentStatus,
}

impl Employee {
    /// Builds a stored employee from its draft and the id the store assigned.
    pub fn from_new(id: EmployeeId, new: NewEmployee) -> Self {
        Employee {
            id,
            code: new.code,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            position: new.position,
            hire_date: new.hire_date,
            department_id: new.department_id,
            base_salary: new.base_salary,
            status: new.status,
        }
    }

    /// Returns the first and last name joined by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the employee is currently active.
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }
}

/// The caller-supplied fields of an employee, used for create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Unique employee code.
    pub code: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Unique contact email.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional job title.
    #[serde(default)]
    pub position: Option<String>,
    /// Optional hire date.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Optional department reference.
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    /// Monthly base salary.
    pub base_salary: Money,
    /// Employment status, `ACTIVE` when omitted.
    #[serde(default)]
    pub status: EmploymentStatus,
}
