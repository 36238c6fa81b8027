//! Payment status transitions.
//!
//! ```text
//! PENDING ──mark_paid──► PAID       (payment date set)
//!    │
//!    └────cancel───────► CANCELLED  (payment date cleared)
//! ```
//!
//! `PAID` and `CANCELLED` are terminal. Nothing transitions back into
//! `PENDING`; a reopened payroll is a new record.

use chrono::{NaiveDate, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{PaymentStatus, PayrollRecord};

/// Checks whether `current` may move to `requested`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::check_transition;
/// use payroll_engine::models::PaymentStatus;
///
/// assert!(check_transition(PaymentStatus::Pending, PaymentStatus::Paid).is_ok());
/// assert!(check_transition(PaymentStatus::Paid, PaymentStatus::Paid).is_err());
/// ```
pub fn check_transition(current: PaymentStatus, requested: PaymentStatus) -> EngineResult<()> {
    if current.is_terminal() || !requested.is_terminal() {
        return Err(EngineError::InvalidTransition { current, requested });
    }
    Ok(())
}

/// Marks a pending record as paid on `payment_date`, or today when `None`.
///
/// On error the record is left untouched.
pub fn mark_paid(record: &mut PayrollRecord, payment_date: Option<NaiveDate>) -> EngineResult<()> {
    check_transition(record.payment_status, PaymentStatus::Paid)?;
    record.payment_status = PaymentStatus::Paid;
    record.payment_date = Some(payment_date.unwrap_or_else(|| Utc::now().date_naive()));
    Ok(())
}

/// Cancels a pending record and clears its payment date.
///
/// On error the record is left untouched.
pub fn cancel(record: &mut PayrollRecord) -> EngineResult<()> {
    check_transition(record.payment_status, PaymentStatus::Cancelled)?;
    record.payment_status = PaymentStatus::Cancelled;
    record.payment_date = None;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_salary;
    use crate::models::{EmployeeId, PayPeriod, PayrollId, PayrollInput};
    use crate::money::Money;
    use rust_decimal::Decimal;

    fn create_test_record(status: PaymentStatus) -> PayrollRecord {
        let input = PayrollInput {
            base_salary: Money::new(300000, 2),
            overtime_hours: Decimal::ZERO,
            overtime_rate: Decimal::new(15, 1),
            bonus: Money::ZERO,
            allowances: Money::ZERO,
            tax_deduction: Money::ZERO,
            insurance_deduction: Money::ZERO,
            other_deductions: Money::ZERO,
        };
        let payment_date = match status {
            PaymentStatus::Paid => NaiveDate::from_ymd_opt(2024, 2, 5),
            _ => None,
        };
        PayrollRecord {
            id: PayrollId(1),
            employee_id: EmployeeId(1),
            period: PayPeriod {
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            },
            input,
            breakdown: calculate_salary(&input).unwrap(),
            payment_status: status,
            payment_date,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_pending_to_paid_sets_payment_date() {
        let mut record = create_test_record(PaymentStatus::Pending);
        let paid_on = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        mark_paid(&mut record, Some(paid_on)).unwrap();
        assert_eq!(record.payment_status, PaymentStatus::Paid);
        assert_eq!(record.payment_date, Some(paid_on));
    }

    #[test]
    fn test_mark_paid_defaults_to_today() {
        let mut record = create_test_record(PaymentStatus::Pending);
        mark_paid(&mut record, None).unwrap();
        assert!(record.payment_date.is_some());
    }

    #[test]
    fn test_pending_to_cancelled_clears_payment_date() {
        let mut record = create_test_record(PaymentStatus::Pending);
        record.payment_date = NaiveDate::from_ymd_opt(2024, 2, 1);

        cancel(&mut record).unwrap();
        assert_eq!(record.payment_status, PaymentStatus::Cancelled);
        assert_eq!(record.payment_date, None);
    }

    #[test]
    fn test_paid_to_paid_is_rejected() {
        let mut record = create_test_record(PaymentStatus::Paid);
        let before = record.clone();

        let result = mark_paid(&mut record, None);
        assert_eq!(
            result,
            Err(EngineError::InvalidTransition {
                current: PaymentStatus::Paid,
                requested: PaymentStatus::Paid,
            })
        );
        assert_eq!(record, before);
    }

    #[test]
    fn test_paid_cannot_be_cancelled() {
        let mut record = create_test_record(PaymentStatus::Paid);
        assert!(matches!(
            cancel(&mut record),
            Err(EngineError::InvalidTransition {
                current: PaymentStatus::Paid,
                requested: PaymentStatus::Cancelled,
            })
        ));
        assert!(record.payment_date.is_some());
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let mut record = create_test_record(PaymentStatus::Cancelled);
        assert!(mark_paid(&mut record, None).is_err());
        assert!(cancel(&mut record).is_err());
        assert_eq!(record.payment_status, PaymentStatus::Cancelled);
    }

    #[test]
    fn test_nothing_transitions_into_pending() {
        for current in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Cancelled,
        ] {
            assert!(check_transition(current, PaymentStatus::Pending).is_err());
        }
    }
}
