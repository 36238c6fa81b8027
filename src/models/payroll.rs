//! Payroll record model and related types.
//!
//! A [`PayrollRecord`] pairs the inputs entered for one employee and pay
//! period with a cached [`SalaryBreakdown`]. The breakdown is always
//! recomputable from [`PayrollInput`]; the aggregation engine never trusts
//! the cached copy.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EmployeeId, PayPeriod, PayrollId, UserId};
use crate::money::Money;

/// Payment state of a payroll record.
///
/// `Paid` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Created and awaiting payment.
    #[default]
    Pending,
    /// Paid; carries a payment date.
    Paid,
    /// Withdrawn before payment.
    Cancelled,
}

impl PaymentStatus {
    /// Returns true for `Paid` and `Cancelled`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Cancelled => "CANCELLED",
        };
        f.write_str(label)
    }
}

/// The entered amounts a salary is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Monthly base salary, snapshotted at record creation.
    pub base_salary: Money,
    /// Overtime hours worked in the period.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Overtime multiplier applied to the hourly rate.
    pub overtime_rate: Decimal,
    /// One-off bonus.
    #[serde(default)]
    pub bonus: Money,
    /// Allowances paid in the period.
    #[serde(default)]
    pub allowances: Money,
    /// Tax withheld.
    #[serde(default)]
    pub tax_deduction: Money,
    /// Insurance withheld.
    #[serde(default)]
    pub insurance_deduction: Money,
    /// Any other deductions.
    #[serde(default)]
    pub other_deductions: Money,
}

/// The four derived amounts of a salary calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// `overtime_hours × (base_salary / 160) × overtime_rate`.
    pub overtime_pay: Money,
    /// Base plus overtime, bonus and allowances.
    pub gross_salary: Money,
    /// Sum of the three deductions.
    pub total_deductions: Money,
    /// Gross minus deductions; may be negative.
    pub net_salary: Money,
}

/// A stored payroll record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier assigned by the store.
    pub id: PayrollId,
    /// The employee being paid.
    pub employee_id: EmployeeId,
    /// The period covered.
    pub period: PayPeriod,
    /// Entered amounts.
    pub input: PayrollInput,
    /// Cached derived amounts.
    pub breakdown: SalaryBreakdown,
    /// Current payment status.
    pub payment_status: PaymentStatus,
    /// Set exactly when `payment_status` is `Paid`.
    pub payment_date: Option<NaiveDate>,
    /// The user who created the record.
    pub created_by: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Builds a stored record from its draft and the id the store assigned.
    pub fn from_new(id: PayrollId, new: NewPayrollRecord) -> Self {
        PayrollRecord {
            id,
            employee_id: new.employee_id,
            period: new.period,
            input: new.input,
            breakdown: new.breakdown,
            payment_status: new.payment_status,
            payment_date: new.payment_date,
            created_by: new.created_by,
            created_at: new.created_at,
        }
    }

    /// Returns true while the record can still be edited.
    pub fn is_editable(&self) -> bool {
        self.payment_status == PaymentStatus::Pending
    }
}

/// A payroll record that has not yet been assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayrollRecord {
    /// The employee being paid.
    pub employee_id: EmployeeId,
    /// The period covered.
    pub period: PayPeriod,
    /// Entered amounts.
    pub input: PayrollInput,
    /// Derived amounts computed from `input`.
    pub breakdown: SalaryBreakdown,
    /// Initial payment status.
    pub payment_status: PaymentStatus,
    /// Initial payment date.
    pub payment_date: Option<NaiveDate>,
    /// The user who created the record.
    pub created_by: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating or editing a payroll record.
///
/// Omitted amounts default to zero. An omitted base salary is filled from
/// the employee's current salary, and an omitted overtime rate from the
/// configured default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollDraft {
    /// The employee being paid.
    pub employee_id: EmployeeId,
    /// The period covered.
    pub period: PayPeriod,
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
}

impl PayrollDraft {
    /// Resolves the draft into concrete inputs.
    pub fn to_input(&self, current_base_salary: Money, default_overtime_rate: Decimal) -> PayrollInput {
        PayrollInput {
            base_salary: self.base_salary.unwrap_or(current_base_salary),
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
