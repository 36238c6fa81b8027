//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report back to its caller. Nothing in
//! the engine raises dialogs or retries; callers decide how to render each
//! variant.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{EmployeeId, PaymentStatus, UniqueField};

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "email".to_string(),
///     message: "is not a valid email address".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid field 'email': is not a valid email address");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Input was malformed or out of range.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The candidate pay period overlaps an existing one for the same employee.
    #[error("Employee {employee_id} already has a payroll record overlapping {start} to {end}")]
    PeriodConflict {
        /// The employee the period belongs to.
        employee_id: EmployeeId,
        /// Start of the rejected period.
        start: NaiveDate,
        /// End of the rejected period.
        end: NaiveDate,
    },

    /// A unique value (code, email, username) is already taken.
    #[error("{field} '{value}' already exists")]
    DuplicateValue {
        /// The unique field that collided.
        field: UniqueField,
        /// The value that was already present.
        value: String,
    },

    /// The requested payment-status change is not permitted.
    #[error("Cannot change payment status from {current} to {requested}")]
    InvalidTransition {
        /// The record's current status.
        current: PaymentStatus,
        /// The status that was requested.
        requested: PaymentStatus,
    },

    /// An arithmetic operation could not be performed.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// A description of the failed operation.
        message: String,
    },

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record (e.g. "employee").
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// The record store could not be reached.
    #[error("Record store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true when the caller should re-submit with different values.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            EngineError::PeriodConflict { .. } | EngineError::DuplicateValue { .. }
        )
    }

    /// Returns true when the same request may succeed if retried later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::StoreUnavailable { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
