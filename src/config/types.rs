//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Metadata and network settings for the running service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// The human-readable service name.
    pub name: String,
    /// The configured version string.
    pub version: String,
    /// Address the HTTP server binds to (e.g., "127.0.0.1:3000").
    pub bind_address: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "Payroll Engine".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// An inclusive character-length range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    /// Minimum length, inclusive.
    pub min: usize,
    /// Maximum length, inclusive.
    pub max: usize,
}

impl LengthRange {
    /// Creates a range.
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Returns true if `len` lies within the range.
    pub fn contains(&self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }
}

/// Limits enforced by the validation rules.
///
/// The default values are the ones the engine ships with, so validation
/// works with no configuration on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Maximum length of a person's name.
    pub max_name_length: usize,
    /// Maximum length of an email address.
    pub max_email_length: usize,
    /// Largest base salary accepted.
    pub max_salary: Money,
    /// Allowed employee code length.
    pub employee_code_length: LengthRange,
    /// Allowed department code length.
    pub department_code_length: LengthRange,
    /// Allowed username length.
    pub username_length: LengthRange,
    /// Overtime multiplier used when a payroll draft does not give one.
    pub default_overtime_rate: Decimal,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_name_length: 50,
            max_email_length: 100,
            max_salary: Money::new(99999999, 2),
            employee_code_length: LengthRange::new(3, 20),
            department_code_length: LengthRange::new(2, 10),
            username_length: LengthRange::new(3, 50),
            default_overtime_rate: Decimal::new(15, 1),
        }
    }
}

/// The complete loaded configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Service settings.
    pub application: ApplicationConfig,
    /// Validation limits.
    pub validation: ValidationLimits,
}
