//! Department model.

use serde::{Deserialize, Serialize};

use super::DepartmentId;
use crate::money::Money;

/// Represents a department.
///
/// Employee counts and salary totals are never stored here; they are
/// computed live by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier for the department.
    pub id: DepartmentId,
    /// Unique department code (e.g., "ENG").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-text manager name.
    #[serde(default)]
    pub manager_name: Option<String>,
    /// Monthly salary budget, if one has been set.
    #[serde(default)]
    pub budget: Option<Money>,
    /// False once the department has been soft-deleted.
    pub is_active: bool,
}

impl Department {
    /// Builds a stored department from its draft and the id the store assigned.
    pub fn from_new(id: DepartmentId, new: NewDepartment) -> Self {
        Department {
            id,
            code: new.code,
            name: new.name,
            manager_name: new.manager_name,
            budget: new.budget,
            is_active: new.is_active,
        }
    }
}

/// The caller-supplied fields of a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDepartment {
    /// Unique department code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-text manager name.
    #[serde(default)]
    pub manager_name: Option<String>,
    /// Optional budget.
    #[serde(default)]
    pub budget: Option<Money>,
    /// Whether the department is active; defaults to true.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
