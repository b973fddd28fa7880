//! Month predicates for recurring definitions.

use kassa_shared::types::MonthRef;

use crate::ledger::types::{RecurrenceKind, RecurringDefinition};

/// Returns true if the definition is active in the given month.
///
/// A definition is temporally active iff it started before the first day
/// of the *next* month (so a definition starting mid-month still counts
/// for that month) and, when it has an end date, that end date is on or
/// after the first day of the month (still running during some part of
/// the month). A yearly definition additionally requires its recurrence
/// month to match.
///
/// This is the predicate used for financial aggregation and for the
/// store's month-filtered definition query.
#[must_use]
pub fn is_active_in_month(definition: &RecurringDefinition, month: MonthRef) -> bool {
    let first_of_month = month.first_day();
    let first_of_next_month = month.first_of_next_month();

    let temporally_active = definition.start_date < first_of_next_month
        && definition.end_date.is_none_or(|end| end >= first_of_month);

    if !temporally_active {
        return false;
    }

    match definition.recurrence {
        RecurrenceKind::Monthly => true,
        RecurrenceKind::Yearly => definition.recurrence_month == Some(month.month()),
    }
}

/// Returns true if a mirror for the definition should be shown in the
/// given month.
///
/// Looser than [`is_active_in_month`]: start/end bounds are ignored and
/// only the month-of-year match gates yearly definitions.
#[must_use]
pub fn is_visible_in_month(definition: &RecurringDefinition, month: MonthRef) -> bool {
    match definition.recurrence {
        RecurrenceKind::Monthly => true,
        RecurrenceKind::Yearly => definition.recurrence_month == Some(month.month()),
    }
}
