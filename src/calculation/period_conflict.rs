//! Pay period conflict detection.
//!
//! An employee may not have two payroll records whose closed date ranges
//! intersect. The record being edited is excluded from its own check.

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, PayPeriod, PayrollId, PayrollRecord};
use crate::store::RecordStore;

/// Returns the first record whose period intersects `candidate`.
///
/// Records with id `exclude` are skipped. The caller passes records that
/// already belong to a single employee.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::find_conflict;
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let candidate = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
/// ).unwrap();
///
/// assert!(find_conflict(&[], &candidate, None).is_none());
/// ```
pub fn find_conflict<'a>(
    existing: &'a [PayrollRecord],
    candidate: &PayPeriod,
    exclude: Option<PayrollId>,
) -> Option<&'a PayrollRecord> {
    existing
        .iter()
        .filter(|record| Some(record.id) != exclude)
        .find(|record| record.period.overlaps(candidate))
}

/// Reports whether `employee_id` already has a record overlapping `candidate`.
///
/// Reads the employee's records from the store and does not mutate anything.
pub fn has_period_conflict(
    store: &dyn RecordStore,
    employee_id: EmployeeId,
    candidate: &PayPeriod,
    exclude: Option<PayrollId>,
) -> EngineResult<bool> {
    let records = store.find_payroll_records(employee_id)?;
    Ok(find_conflict(&records, candidate, exclude).is_some())
}

/// Like [`has_period_conflict`], but turns a conflict into
/// [`EngineError::PeriodConflict`].
pub fn ensure_no_period_conflict(
    store: &dyn RecordStore,
    employee_id: EmployeeId,
    candidate: &PayPeriod,
    exclude: Option<PayrollId>,
) -> EngineResult<()> {
    if has_period_conflict(store, employee_id, candidate, exclude)? {
        return Err(EngineError::PeriodConflict {
            employee_id,
            start: candidate.start_date,
            end: candidate.end_date,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_salary;
    use crate::models::{NewPayrollRecord, PaymentStatus, PayrollInput};
    use crate::money::Money;
    use crate::store::InMemoryStore;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(start: NaiveDate, end: NaiveDate) -> PayPeriod {
        PayPeriod::new(start, end).unwrap()
    }

    fn create_test_record(employee_id: EmployeeId, period: PayPeriod) -> NewPayrollRecord {
        let input = PayrollInput {
            base_salary: Money::new(320000, 2),
            overtime_hours: Decimal::ZERO,
            overtime_rate: Decimal::new(15, 1),
            bonus: Money::ZERO,
            allowances: Money::ZERO,
            tax_deduction: Money::ZERO,
            insurance_deduction: Money::ZERO,
            other_deductions: Money::ZERO,
        };
        NewPayrollRecord {
            employee_id,
            period,
            input,
            breakdown: calculate_salary(&input).unwrap(),
            payment_status: PaymentStatus::Pending,
            payment_date: None,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    fn store_with_january(employee_id: EmployeeId) -> (InMemoryStore, PayrollId) {
        let store = InMemoryStore::new();
        let record = store
            .insert_payroll(create_test_record(
                employee_id,
                period(date(2024, 1, 1), date(2024, 1, 31)),
            ))
            .unwrap();
        (store, record.id)
    }

    #[test]
    fn test_shared_boundary_day_conflicts() {
        let employee = EmployeeId(1);
        let (store, _) = store_with_january(employee);

        let candidate = period(date(2024, 1, 31), date(2024, 2, 15));
        assert!(has_period_conflict(&store, employee, &candidate, None).unwrap());
    }

    #[test]
    fn test_following_month_does_not_conflict() {
        let employee = EmployeeId(1);
        let (store, _) = store_with_january(employee);

        let candidate = period(date(2024, 2, 1), date(2024, 2, 28));
        assert!(!has_period_conflict(&store, employee, &candidate, None).unwrap());
    }

    #[test]
    fn test_edited_record_is_excluded_from_its_own_check() {
        let employee = EmployeeId(1);
        let (store, id) = store_with_january(employee);

        let same = period(date(2024, 1, 1), date(2024, 1, 31));
        assert!(has_period_conflict(&store, employee, &same, None).unwrap());
        assert!(!has_period_conflict(&store, employee, &same, Some(id)).unwrap());
    }

    #[test]
    fn test_containment_in_either_direction_conflicts() {
        let employee = EmployeeId(1);
        let (store, _) = store_with_january(employee);

        let inside = period(date(2024, 1, 10), date(2024, 1, 12));
        let around = period(date(2023, 12, 1), date(2024, 3, 1));
        assert!(has_period_conflict(&store, employee, &inside, None).unwrap());
        assert!(has_period_conflict(&store, employee, &around, None).unwrap());
    }

    #[test]
    fn test_other_employees_do_not_conflict() {
        let (store, _) = store_with_january(EmployeeId(1));

        let same = period(date(2024, 1, 1), date(2024, 1, 31));
        assert!(!has_period_conflict(&store, EmployeeId(2), &same, None).unwrap());
    }

    #[test]
    fn test_ensure_reports_period_conflict_error() {
        let employee = EmployeeId(3);
        let (store, _) = store_with_january(employee);

        let candidate = period(date(2024, 1, 15), date(2024, 2, 14));
        match ensure_no_period_conflict(&store, employee, &candidate, None) {
            Err(EngineError::PeriodConflict {
                employee_id,
                start,
                end,
            }) => {
                assert_eq!(employee_id, employee);
                assert_eq!(start, date(2024, 1, 15));
                assert_eq!(end, date(2024, 2, 14));
            }
            other => panic!("Expected period conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_find_conflict_returns_the_overlapping_record() {
        let employee = EmployeeId(1);
        let (store, id) = store_with_january(employee);
        let records = store.find_payroll_records(employee).unwrap();

        let candidate = period(date(2024, 1, 20), date(2024, 1, 25));
        let found = find_conflict(&records, &candidate, None).unwrap();
        assert_eq!(found.id, id);
    }
}
