//! Field-level validation rules.
//!
//! Each validator returns `Ok(())` or an [`EngineError::Validation`] naming
//! the offending field. Limits come from [`ValidationLimits`], whose
//! defaults need no configuration file.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::{LengthRange, ValidationLimits};
use crate::error::{EngineError, EngineResult};
use crate::models::{NewDepartment, NewEmployee, NewUser, PayPeriod, PayrollInput};
use crate::money::Money;

type Pattern = LazyLock<Result<Regex, regex::Error>>;

static EMAIL_PATTERN: Pattern =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@([A-Za-z0-9.-]+\.[A-Za-z]{2,})$"));
static PHONE_PATTERN: Pattern = LazyLock::new(|| Regex::new(r"^\+?[1-9]?[0-9]{7,15}$"));
static PHONE_SEPARATORS: Pattern = LazyLock::new(|| Regex::new(r"[\s\-()]"));
static NAME_PATTERN: Pattern = LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$"));
static CODE_PATTERN: Pattern = LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$"));
static USERNAME_PATTERN: Pattern = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.]+$"));

fn pattern(pattern: &'static Pattern) -> EngineResult<&'static Regex> {
    match LazyLock::force(pattern) {
        Ok(regex) => Ok(regex),
        Err(e) => Err(EngineError::InvalidOperation {
            message: format!("validation pattern failed to compile: {}", e),
        }),
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::validation(field, message)
}

/// Trims surrounding whitespace.
pub fn sanitize(input: &str) -> String {
    input.trim().to_string()
}

fn require<'a>(field: &str, value: &'a str) -> EngineResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, "is required"));
    }
    Ok(trimmed)
}

/// Validates an email address.
///
/// # Example
///
/// ```
/// use payroll_engine::config::ValidationLimits;
/// use payroll_engine::validation::validate_email;
///
/// let limits = ValidationLimits::default();
/// assert!(validate_email("jane.doe@example.com", &limits).is_ok());
/// assert!(validate_email("jane.doe@example", &limits).is_err());
/// ```
pub fn validate_email(email: &str, limits: &ValidationLimits) -> EngineResult<()> {
    let email = require("email", email)?;
    if email.chars().count() > limits.max_email_length {
        return Err(invalid(
            "email",
            format!("must be at most {} characters", limits.max_email_length),
        ));
    }
    if !pattern(&EMAIL_PATTERN)?.is_match(email) {
        return Err(invalid("email", "is not a valid email address"));
    }
    Ok(())
}

/// Validates an optional phone number.
///
/// Spaces, dashes and parentheses are ignored.
pub fn validate_phone(phone: Option<&str>) -> EngineResult<()> {
    let phone = match phone.map(str::trim) {
        None | Some("") => return Ok(()),
        Some(phone) => phone,
    };
    let digits = pattern(&PHONE_SEPARATORS)?.replace_all(phone, "");
    if !pattern(&PHONE_PATTERN)?.is_match(&digits) {
        return Err(invalid("phone", "is not a valid phone number"));
    }
    Ok(())
}

/// Validates a person's name: letters and spaces, at least 2 characters.
pub fn validate_name(field: &str, name: &str, limits: &ValidationLimits) -> EngineResult<()> {
    let name = require(field, name)?;
    let len = name.chars().count();
    if len < 2 || len > limits.max_name_length {
        return Err(invalid(
            field,
            format!("must be 2 to {} characters", limits.max_name_length),
        ));
    }
    if !pattern(&NAME_PATTERN)?.is_match(name) {
        return Err(invalid(field, "may contain only letters and spaces"));
    }
    Ok(())
}

/// Validates a salary: between zero and the configured maximum.
pub fn validate_salary(field: &str, salary: Money, limits: &ValidationLimits) -> EngineResult<()> {
    if salary.is_negative() {
        return Err(invalid(field, "must not be negative"));
    }
    if salary > limits.max_salary {
        return Err(invalid(
            field,
            format!("must not exceed {}", limits.max_salary),
        ));
    }
    Ok(())
}

fn validate_code(field: &str, code: &str, length: LengthRange) -> EngineResult<()> {
    let code = require(field, code)?;
    if !length.contains(code.chars().count()) {
        return Err(invalid(
            field,
            format!("must be {} to {} characters", length.min, length.max),
        ));
    }
    if !pattern(&CODE_PATTERN)?.is_match(code) {
        return Err(invalid(field, "may contain only uppercase letters and digits"));
    }
    Ok(())
}

/// Validates an employee code such as `EMP001`.
///
/// ```
/// use payroll_engine::config::ValidationLimits;
/// use payroll_engine::validation::validate_employee_code;
///
/// let limits = ValidationLimits::default();
/// assert!(validate_employee_code("EMP001", &limits).is_ok());
/// assert!(validate_employee_code("emp001", &limits).is_err());
/// assert!(validate_employee_code("E1", &limits).is_err());
/// ```
pub fn validate_employee_code(code: &str, limits: &ValidationLimits) -> EngineResult<()> {
    validate_code("code", code, limits.employee_code_length)
}

/// Validates a department code such as `HR`.
pub fn validate_department_code(code: &str, limits: &ValidationLimits) -> EngineResult<()> {
    validate_code("code", code, limits.department_code_length)
}

/// Validates a login name: letters, digits, `_` and `.`.
pub fn validate_username(username: &str, limits: &ValidationLimits) -> EngineResult<()> {
    let username = require("username", username)?;
    let length = limits.username_length;
    if !length.contains(username.chars().count()) {
        return Err(invalid(
            "username",
            format!("must be {} to {} characters", length.min, length.max),
        ));
    }
    if !pattern(&USERNAME_PATTERN)?.is_match(username) {
        return Err(invalid(
            "username",
            "may contain only letters, digits, '_' and '.'",
        ));
    }
    Ok(())
}

/// Validates a department budget: absent, or zero and above.
pub fn validate_budget(budget: Option<Money>) -> EngineResult<()> {
    match budget {
        Some(budget) if budget.is_negative() => Err(invalid("budget", "must not be negative")),
        _ => Ok(()),
    }
}

/// Validates a payroll input and its pay period.
///
/// All amounts and the overtime hours and rate must be zero or above, and
/// the period must not end before it starts.
pub fn validate_payroll_input(input: &PayrollInput, period: &PayPeriod) -> EngineResult<()> {
    period.validate()?;

    let amounts = [
        ("base_salary", input.base_salary),
        ("bonus", input.bonus),
        ("allowances", input.allowances),
        ("tax_deduction", input.tax_deduction),
        ("insurance_deduction", input.insurance_deduction),
        ("other_deductions", input.other_deductions),
    ];
    if let Some((field, _)) = amounts.iter().find(|(_, amount)| amount.is_negative()) {
        return Err(invalid(field, "must not be negative"));
    }
    if input.overtime_hours.is_sign_negative() && !input.overtime_hours.is_zero() {
        return Err(invalid("overtime_hours", "must not be negative"));
    }
    if input.overtime_rate.is_sign_negative() && !input.overtime_rate.is_zero() {
        return Err(invalid("overtime_rate", "must not be negative"));
    }
    Ok(())
}

/// Validates every field of an employee draft.
pub fn validate_new_employee(employee: &NewEmployee, limits: &ValidationLimits) -> EngineResult<()> {
    validate_employee_code(&employee.code, limits)?;
    validate_name("first_name", &employee.first_name, limits)?;
    validate_name("last_name", &employee.last_name, limits)?;
    validate_email(&employee.email, limits)?;
    validate_phone(employee.phone.as_deref())?;
    validate_salary("base_salary", employee.base_salary, limits)
}

/// Validates every field of a department draft.
pub fn validate_new_department(
    department: &NewDepartment,
    limits: &ValidationLimits,
) -> EngineResult<()> {
    validate_department_code(&department.code, limits)?;
    let name = require("name", &department.name)?;
    if name.chars().count() > limits.max_name_length {
        return Err(invalid(
            "name",
            format!("must be at most {} characters", limits.max_name_length),
        ));
    }
    validate_budget(department.budget)
}

/// Validates a user draft.
pub fn validate_new_user(user: &NewUser, limits: &ValidationLimits) -> EngineResult<()> {
    validate_username(&user.username, limits)?;
    validate_name("full_name", &user.full_name, limits)?;
    require("role", &user.role)?;
    Ok(())
}
