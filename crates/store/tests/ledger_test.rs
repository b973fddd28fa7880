//! Integration tests for the month ledger over the in-memory backend.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use kassa_core::ledger::{
    Category, MonthLedger, OccurrenceKey, RecurrenceKind, RecurringDefinition, RecurringSpec,
    Selection, TransactionKind, TransactionOccurrence,
};
use kassa_core::store::{RecurringStore, TransactionStore};
use kassa_shared::types::{CategoryId, MonthRef, RecurringId, TransactionId};
use kassa_store::MemoryStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn month() -> MonthRef {
    MonthRef::new(2026, 3).unwrap()
}

fn occurrence(
    kind: TransactionKind,
    amount: Decimal,
    occurred_on: NaiveDate,
    category: Category,
) -> TransactionOccurrence {
    TransactionOccurrence {
        id: TransactionId::UNSET,
        kind,
        amount,
        description: "test occurrence".to_string(),
        occurred_on,
        category,
        source_recurring_id: None,
    }
}

fn definition(
    kind: TransactionKind,
    amount: Decimal,
    category_id: CategoryId,
) -> RecurringDefinition {
    RecurringDefinition {
        id: RecurringId::UNSET,
        kind,
        amount,
        description: "test definition".to_string(),
        category_id,
        recurrence: RecurrenceKind::Monthly,
        recurrence_month: None,
        start_date: date(2025, 6, 1),
        end_date: None,
        system_generated: false,
    }
}

struct Fixture {
    store: Arc<MemoryStore>,
    ledger: MonthLedger,
    income_category: Category,
    expense_category: Category,
}

async fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let income_category = store.add_category("Lön", TransactionKind::Income);
    let expense_category = store.add_category("Boende", TransactionKind::Expense);

    let mut ledger = MonthLedger::new(store.clone(), store.clone(), store.clone(), month());
    ledger.load_month(month()).await.unwrap();

    Fixture {
        store,
        ledger,
        income_category,
        expense_category,
    }
}

#[tokio::test]
async fn test_load_month_partitions_by_kind_and_materializes_mirrors() {
    let fx = fixture().await;
    let transactions: Arc<dyn TransactionStore> = fx.store.clone();
    let recurring: Arc<dyn RecurringStore> = fx.store.clone();

    transactions
        .add(occurrence(
            TransactionKind::Income,
            dec!(1000),
            date(2026, 3, 5),
            fx.income_category.clone(),
        ))
        .await
        .unwrap();
    transactions
        .add(occurrence(
            TransactionKind::Expense,
            dec!(400),
            date(2026, 3, 9),
            fx.expense_category.clone(),
        ))
        .await
        .unwrap();
    recurring
        .add(definition(
            TransactionKind::Income,
            dec!(500),
            fx.income_category.id,
        ))
        .await
        .unwrap();
    recurring
        .add(definition(
            TransactionKind::Expense,
            dec!(99),
            fx.expense_category.id,
        ))
        .await
        .unwrap();

    let mut ledger = fx.ledger;
    ledger.load_month(month()).await.unwrap();

    assert_eq!(ledger.incomes().len(), 2);
    assert_eq!(ledger.expenses().len(), 2);
    assert_eq!(ledger.definitions().len(), 2);

    // The income mirror sits in the income collection, the expense mirror
    // in the expense collection.
    let income_mirror = ledger.incomes().iter().find(|o| o.is_mirror()).unwrap();
    assert_eq!(income_mirror.amount, dec!(500));
    assert_eq!(income_mirror.occurred_on, date(2026, 3, 1));
    let expense_mirror = ledger.expenses().iter().find(|o| o.is_mirror()).unwrap();
    assert_eq!(expense_mirror.amount, dec!(99));
}

#[tokio::test]
async fn test_load_month_twice_is_idempotent() {
    let fx = fixture().await;
    let transactions: Arc<dyn TransactionStore> = fx.store.clone();
    let recurring: Arc<dyn RecurringStore> = fx.store.clone();

    transactions
        .add(occurrence(
            TransactionKind::Income,
            dec!(1000),
            date(2026, 3, 5),
            fx.income_category.clone(),
        ))
        .await
        .unwrap();
    recurring
        .add(definition(
            TransactionKind::Income,
            dec!(500),
            fx.income_category.id,
        ))
        .await
        .unwrap();

    let mut ledger = fx.ledger;
    ledger.load_month(month()).await.unwrap();
    let incomes_first: Vec<_> = ledger.incomes().to_vec();
    let expenses_first: Vec<_> = ledger.expenses().to_vec();

    ledger.load_month(month()).await.unwrap();

    assert_eq!(ledger.incomes(), incomes_first.as_slice());
    assert_eq!(ledger.expenses(), expenses_first.as_slice());
}

#[tokio::test]
async fn test_add_recurring_materializes_mirror_without_reload() {
    let mut fx = fixture().await;

    let persisted = fx
        .ledger
        .add_recurring(definition(
            TransactionKind::Income,
            dec!(500),
            fx.income_category.id,
        ))
        .await
        .unwrap();

    assert!(!persisted.id.is_unset());
    assert_eq!(fx.ledger.incomes().len(), 1);
    assert_eq!(
        fx.ledger.incomes()[0].source_recurring_id,
        Some(persisted.id)
    );
}

#[tokio::test]
async fn test_add_yearly_recurring_for_other_month_has_no_mirror() {
    let mut fx = fixture().await;

    let mut yearly = definition(TransactionKind::Expense, dec!(2400), fx.expense_category.id);
    yearly.recurrence = RecurrenceKind::Yearly;
    yearly.recurrence_month = Some(12);

    fx.ledger.add_recurring(yearly).await.unwrap();

    assert!(fx.ledger.expenses().is_empty());
    assert_eq!(fx.ledger.definitions().len(), 1);
}

#[tokio::test]
async fn test_update_recurring_kind_flip_relocates_single_mirror() {
    let mut fx = fixture().await;

    let persisted = fx
        .ledger
        .add_recurring(definition(
            TransactionKind::Expense,
            dec!(150),
            fx.expense_category.id,
        ))
        .await
        .unwrap();
    assert_eq!(fx.ledger.expenses().len(), 1);

    let mut updated = persisted.clone();
    updated.kind = TransactionKind::Income;
    fx.ledger.update_recurring(updated).await.unwrap();

    // Exactly one mirror, now in the income collection.
    assert_eq!(fx.ledger.incomes().len(), 1);
    assert!(fx.ledger.expenses().is_empty());
    assert_eq!(
        fx.ledger.incomes()[0].source_recurring_id,
        Some(persisted.id)
    );
    assert_eq!(fx.ledger.incomes()[0].kind, TransactionKind::Income);
}

#[tokio::test]
async fn test_update_recurring_regenerates_mirror_amount() {
    let mut fx = fixture().await;

    let persisted = fx
        .ledger
        .add_recurring(definition(
            TransactionKind::Income,
            dec!(500),
            fx.income_category.id,
        ))
        .await
        .unwrap();

    let mut updated = persisted;
    updated.amount = dec!(750);
    fx.ledger.update_recurring(updated).await.unwrap();

    assert_eq!(fx.ledger.incomes().len(), 1);
    assert_eq!(fx.ledger.incomes()[0].amount, dec!(750));
}

#[tokio::test]
async fn test_delete_mirror_cascades_to_source_definition() {
    let mut fx = fixture().await;
    let recurring: Arc<dyn RecurringStore> = fx.store.clone();

    let persisted = fx
        .ledger
        .add_recurring(definition(
            TransactionKind::Income,
            dec!(500),
            fx.income_category.id,
        ))
        .await
        .unwrap();
    let mirror = fx.ledger.incomes()[0].clone();

    fx.ledger.delete_regular(&mirror).await.unwrap();

    // No occurrence with that source remains in the month view.
    assert!(
        fx.ledger
            .incomes()
            .iter()
            .chain(fx.ledger.expenses().iter())
            .all(|o| o.source_recurring_id != Some(persisted.id))
    );
    // The definition itself is gone from storage.
    assert!(recurring.get_by_id(persisted.id).await.unwrap().is_none());
    assert!(fx.ledger.definitions().is_empty());
}

#[tokio::test]
async fn test_delete_plain_regular_removes_row_only() {
    let mut fx = fixture().await;
    let transactions: Arc<dyn TransactionStore> = fx.store.clone();

    let persisted = fx
        .ledger
        .add_regular(occurrence(
            TransactionKind::Expense,
            dec!(400),
            date(2026, 3, 9),
            fx.expense_category.clone(),
        ))
        .await
        .unwrap();

    fx.ledger.delete_regular(&persisted).await.unwrap();

    assert!(fx.ledger.expenses().is_empty());
    assert!(transactions.get_by_id(persisted.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_regular_kind_change_moves_collections() {
    let mut fx = fixture().await;

    let persisted = fx
        .ledger
        .add_regular(occurrence(
            TransactionKind::Expense,
            dec!(200),
            date(2026, 3, 9),
            fx.expense_category.clone(),
        ))
        .await
        .unwrap();

    let mut updated = persisted;
    updated.kind = TransactionKind::Income;
    fx.ledger.update_regular(updated).await.unwrap();

    assert!(fx.ledger.expenses().is_empty());
    assert_eq!(fx.ledger.incomes().len(), 1);
    assert_eq!(fx.ledger.incomes()[0].kind, TransactionKind::Income);
}

#[tokio::test]
async fn test_convert_to_recurring_replaces_row_with_mirror() {
    let mut fx = fixture().await;
    let transactions: Arc<dyn TransactionStore> = fx.store.clone();
    let recurring: Arc<dyn RecurringStore> = fx.store.clone();

    let original = fx
        .ledger
        .add_regular(occurrence(
            TransactionKind::Expense,
            dec!(99),
            date(2026, 3, 12),
            fx.expense_category.clone(),
        ))
        .await
        .unwrap();

    let converted = fx
        .ledger
        .convert_to_recurring(
            &original,
            RecurringSpec {
                recurrence: RecurrenceKind::Monthly,
                recurrence_month: None,
                end_date: None,
            },
        )
        .await
        .unwrap();

    // The original row is gone from storage and from the view; one mirror
    // stands in for the new definition.
    assert!(transactions.get_by_id(original.id).await.unwrap().is_none());
    assert_eq!(fx.ledger.expenses().len(), 1);
    assert!(fx.ledger.expenses()[0].is_mirror());
    assert_eq!(converted.start_date, date(2026, 3, 12));
    assert_eq!(
        recurring.get_by_id(converted.id).await.unwrap().unwrap().amount,
        dec!(99)
    );
    assert_eq!(fx.ledger.selection(), Selection::Recurring(converted.id));
}

#[tokio::test]
async fn test_convert_to_regular_produces_plain_occurrence() {
    let mut fx = fixture().await;
    let transactions: Arc<dyn TransactionStore> = fx.store.clone();
    let recurring: Arc<dyn RecurringStore> = fx.store.clone();

    let persisted = fx
        .ledger
        .add_recurring(definition(
            TransactionKind::Income,
            dec!(500),
            fx.income_category.id,
        ))
        .await
        .unwrap();

    let converted = fx.ledger.convert_to_regular(&persisted).await.unwrap();

    assert!(recurring.get_by_id(persisted.id).await.unwrap().is_none());
    assert!(fx.ledger.definitions().is_empty());
    // The new row is a plain persisted occurrence dated on the
    // definition's start date, not a mirror.
    assert_eq!(converted.occurred_on, persisted.start_date);
    assert_eq!(converted.source_recurring_id, None);
    assert!(!converted.id.is_unset());
    assert!(
        transactions
            .get_by_id(converted.id)
            .await
            .unwrap()
            .is_some()
    );
    assert_eq!(
        fx.ledger.selection(),
        Selection::Regular(OccurrenceKey::Persisted(converted.id))
    );
}

#[tokio::test]
async fn test_mirror_with_dangling_category_gets_placeholder() {
    let mut fx = fixture().await;

    let persisted = fx
        .ledger
        .add_recurring(definition(
            TransactionKind::Income,
            dec!(500),
            CategoryId::new(999),
        ))
        .await
        .unwrap();

    assert_eq!(fx.ledger.incomes().len(), 1);
    let mirror = &fx.ledger.incomes()[0];
    assert_eq!(mirror.source_recurring_id, Some(persisted.id));
    assert!(mirror.category.id.is_unset());
    assert!(mirror.category.name.is_empty());
}

#[tokio::test]
async fn test_delete_selected_mirror_cascades() {
    let mut fx = fixture().await;
    let recurring: Arc<dyn RecurringStore> = fx.store.clone();

    let persisted = fx
        .ledger
        .add_recurring(definition(
            TransactionKind::Income,
            dec!(500),
            fx.income_category.id,
        ))
        .await
        .unwrap();
    let mirror = fx.ledger.incomes()[0].clone();
    fx.ledger.select_occurrence(&mirror);

    fx.ledger.delete_selected().await.unwrap();

    assert!(fx.ledger.incomes().is_empty());
    assert!(recurring.get_by_id(persisted.id).await.unwrap().is_none());
    assert_eq!(fx.ledger.selection(), Selection::None);
}

#[tokio::test]
async fn test_selection_is_mutually_exclusive() {
    let mut fx = fixture().await;

    let row = fx
        .ledger
        .add_regular(occurrence(
            TransactionKind::Income,
            dec!(10),
            date(2026, 3, 2),
            fx.income_category.clone(),
        ))
        .await
        .unwrap();
    let def = fx
        .ledger
        .add_recurring(definition(
            TransactionKind::Expense,
            dec!(20),
            fx.expense_category.id,
        ))
        .await
        .unwrap();

    fx.ledger.select_occurrence(&row);
    assert_eq!(
        fx.ledger.selection(),
        Selection::Regular(OccurrenceKey::Persisted(row.id))
    );

    fx.ledger.select_definition(def.id);
    assert_eq!(fx.ledger.selection(), Selection::Recurring(def.id));

    fx.ledger.clear_selection();
    assert_eq!(fx.ledger.selection(), Selection::None);
}
