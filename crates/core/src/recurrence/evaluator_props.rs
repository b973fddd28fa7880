//! Property-based tests for the recurrence month predicates.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use kassa_shared::types::{CategoryId, MonthRef, RecurringId};

use super::evaluator::{is_active_in_month, is_visible_in_month};
use crate::ledger::types::{RecurrenceKind, RecurringDefinition, TransactionKind};

fn make_definition(
    recurrence: RecurrenceKind,
    recurrence_month: Option<u32>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> RecurringDefinition {
    RecurringDefinition {
        id: RecurringId::new(1),
        kind: TransactionKind::Income,
        amount: Decimal::ONE_HUNDRED,
        description: "prop".to_string(),
        category_id: CategoryId::new(1),
        recurrence,
        recurrence_month,
        start_date,
        end_date,
        system_generated: false,
    }
}

/// Strategy for a month within a sane calendar range.
fn month_strategy() -> impl Strategy<Value = MonthRef> {
    (1990i32..2100, 1u32..=12).prop_map(|(y, m)| MonthRef::new(y, m).unwrap())
}

/// Strategy for a day-of-month valid in every month.
fn day_strategy() -> impl Strategy<Value = u32> {
    1u32..=28
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A monthly definition with no end date is active in every month from
    /// its start month forward.
    #[test]
    fn prop_open_ended_monthly_active_from_start(
        start_month in month_strategy(),
        start_day in day_strategy(),
        months_after in 0u32..240,
    ) {
        let start = NaiveDate::from_ymd_opt(
            start_month.year(),
            start_month.month(),
            start_day,
        ).unwrap();
        let def = make_definition(RecurrenceKind::Monthly, None, start, None);

        let queried = MonthRef::from_date(
            start_month.first_day() + chrono::Months::new(months_after),
        );

        prop_assert!(
            is_active_in_month(&def, queried),
            "monthly open-ended definition starting {start} should be active in {queried}"
        );
    }

    /// A monthly definition is never active before its start month.
    #[test]
    fn prop_monthly_inactive_before_start(
        start_month in month_strategy(),
        start_day in day_strategy(),
        months_before in 1u32..240,
    ) {
        let start = NaiveDate::from_ymd_opt(
            start_month.year(),
            start_month.month(),
            start_day,
        ).unwrap();
        let def = make_definition(RecurrenceKind::Monthly, None, start, None);

        let queried = MonthRef::from_date(
            start_month.first_day() - chrono::Months::new(months_before),
        );

        prop_assert!(!is_active_in_month(&def, queried));
    }

    /// A yearly definition is active iff the queried month-of-year matches
    /// its recurrence month (within temporal bounds).
    #[test]
    fn prop_yearly_active_only_in_recurrence_month(
        recurrence_month in 1u32..=12,
        queried in month_strategy(),
    ) {
        // Started far in the past, open-ended: temporal bounds always hold.
        let start = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
        let def = make_definition(
            RecurrenceKind::Yearly,
            Some(recurrence_month),
            start,
            None,
        );

        prop_assert_eq!(
            is_active_in_month(&def, queried),
            queried.month() == recurrence_month
        );
    }

    /// Visibility never looks at start/end bounds: for a monthly
    /// definition it is always true, whatever the dates.
    #[test]
    fn prop_monthly_visibility_ignores_bounds(
        start_month in month_strategy(),
        end_month in month_strategy(),
        queried in month_strategy(),
    ) {
        let def = make_definition(
            RecurrenceKind::Monthly,
            None,
            start_month.first_day(),
            Some(end_month.first_day()),
        );

        prop_assert!(is_visible_in_month(&def, queried));
    }

    /// Every active definition in a month is either monthly or matches the
    /// queried month-of-year; activity implies visibility.
    #[test]
    fn prop_active_implies_visible(
        recurrence_month in 1u32..=12,
        queried in month_strategy(),
        yearly in any::<bool>(),
    ) {
        let start = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
        let def = if yearly {
            make_definition(RecurrenceKind::Yearly, Some(recurrence_month), start, None)
        } else {
            make_definition(RecurrenceKind::Monthly, None, start, None)
        };

        if is_active_in_month(&def, queried) {
            prop_assert!(is_visible_in_month(&def, queried));
        }
    }
}
