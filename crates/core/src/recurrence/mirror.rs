//! Mirror materialization.
//!
//! A mirror is a transient, non-persisted occurrence synthesized from a
//! recurring definition so the definition has a concrete row in the month
//! view. Mirrors are regenerated, never patched: any edit to the source
//! definition removes and re-materializes them.

use kassa_shared::types::{MonthRef, TransactionId};

use crate::ledger::types::{Category, RecurringDefinition, TransactionOccurrence};

/// Projects a recurring definition into a mirror occurrence for a month.
///
/// The mirror is dated on the first day of the month, carries the
/// definition's amount/kind/description, keeps its id `UNSET`, and points
/// back at the definition through `source_recurring_id`. The category is
/// resolved against the given snapshot; a dangling reference yields the
/// empty placeholder category rather than an error.
///
/// Pure construction: inserting the mirror into the month view is the
/// caller's responsibility.
#[must_use]
pub fn materialize(
    definition: &RecurringDefinition,
    month: MonthRef,
    categories: &[Category],
) -> TransactionOccurrence {
    let category = categories
        .iter()
        .find(|c| c.id == definition.category_id)
        .cloned()
        .unwrap_or_else(Category::placeholder);

    TransactionOccurrence {
        id: TransactionId::UNSET,
        kind: definition.kind,
        amount: definition.amount,
        description: definition.description.clone(),
        occurred_on: month.first_day(),
        category,
        source_recurring_id: Some(definition.id),
    }
}
