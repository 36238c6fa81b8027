//! Salary calculation functionality.
//!
//! This module derives overtime pay, gross salary, total deductions and net
//! salary from the amounts entered on a payroll record.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollInput, SalaryBreakdown};
use crate::money::Money;

/// Standard monthly working hours used to turn a monthly salary into an hourly rate.
pub const STANDARD_MONTHLY_HOURS: Decimal = Decimal::from_parts(160, 0, 0, false, 0);

/// Computes the derived salary fields for a payroll input.
///
/// ```text
/// overtime_pay     = overtime_hours × (base_salary ÷ 160) × overtime_rate
/// gross_salary     = base_salary + overtime_pay + bonus + allowances
/// total_deductions = tax + insurance + other
/// net_salary       = gross_salary − total_deductions
/// ```
///
/// Every input must be non-negative. A negative net salary is returned as-is
/// when deductions exceed gross; it is not an error. The function holds no
/// state, so repeated calls on the same input give the same result.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] naming the first negative input, or
/// [`EngineError::InvalidOperation`] if an intermediate amount overflows.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_salary;
/// use payroll_engine::models::PayrollInput;
/// use payroll_engine::money::Money;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     base_salary: Money::new(320000, 2),
///     overtime_hours: Decimal::new(10, 0),
///     overtime_rate: Decimal::new(15, 1),
///     bonus: Money::ZERO,
///     allowances: Money::ZERO,
///     tax_deduction: Money::ZERO,
///     insurance_deduction: Money::ZERO,
///     other_deductions: Money::ZERO,
/// };
///
/// let breakdown = calculate_salary(&input).unwrap();
/// assert_eq!(breakdown.overtime_pay.to_string(), "300.00");
/// assert_eq!(breakdown.gross_salary.to_string(), "3500.00");
/// assert_eq!(breakdown.net_salary.to_string(), "3500.00");
/// ```
pub fn calculate_salary(input: &PayrollInput) -> EngineResult<SalaryBreakdown> {
    ensure_non_negative(input)?;

    let hourly_rate = input.base_salary.checked_div(STANDARD_MONTHLY_HOURS)?;
    let overtime_pay = hourly_rate
        .checked_mul(input.overtime_hours)?
        .checked_mul(input.overtime_rate)?;

    let gross_salary = input
        .base_salary
        .checked_add(overtime_pay)?
        .checked_add(input.bonus)?
        .checked_add(input.allowances)?;

    let total_deductions = input
        .tax_deduction
        .checked_add(input.insurance_deduction)?
        .checked_add(input.other_deductions)?;

    let net_salary = gross_salary.checked_sub(total_deductions)?;

    Ok(SalaryBreakdown {
        overtime_pay,
        gross_salary,
        total_deductions,
        net_salary,
    })
}

fn ensure_non_negative(input: &PayrollInput) -> EngineResult<()> {
    let amounts: [(&str, Money); 6] = [
        ("base_salary", input.base_salary),
        ("bonus", input.bonus),
        ("allowances", input.allowances),
        ("tax_deduction", input.tax_deduction),
        ("insurance_deduction", input.insurance_deduction),
        ("other_deductions", input.other_deductions),
    ];
    for (field, amount) in amounts {
        if amount.is_negative() {
            return Err(negative(field, amount.amount()));
        }
    }

    for (field, value) in [
        ("overtime_hours", input.overtime_hours),
        ("overtime_rate", input.overtime_rate),
    ] {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(negative(field, value));
        }
    }

    Ok(())
}

fn negative(field: &str, value: Decimal) -> EngineError {
    EngineError::validation(field, format!("must not be negative (got {})", value))
}
