//! In-memory reference backend.
//!
//! A single mutex-guarded state implements every store trait. Contract
//! notes mirrored from `kassa-core::store`:
//!
//! - `add` always assigns a fresh id (incoming ids are ignored).
//! - `update`/`delete` against a missing id are no-ops.
//! - Month filters use the half-open `[first, first_of_next_month)` range.
//! - `RecurringStore::get_by_month` applies the *active* predicate.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use kassa_core::income::{AbsenceRecord, UserSettings};
use kassa_core::ledger::types::{
    Category, RecurringDefinition, TransactionKind, TransactionOccurrence,
};
use kassa_core::recurrence::is_active_in_month;
use kassa_core::store::{
    AbsenceStore, CategoryStore, RecurringStore, SettingsStore, TransactionStore,
};
use kassa_shared::types::{AbsenceId, CategoryId, MonthRef, RecurringId, SettingsId, TransactionId};
use kassa_shared::StoreResult;

#[derive(Default)]
struct State {
    transactions: Vec<TransactionOccurrence>,
    recurring: Vec<RecurringDefinition>,
    categories: Vec<Category>,
    absences: Vec<AbsenceRecord>,
    settings: Option<UserSettings>,
    next_transaction_id: i64,
    next_recurring_id: i64,
    next_category_id: i64,
    next_absence_id: i64,
}

impl State {
    fn next_transaction_id(&mut self) -> TransactionId {
        self.next_transaction_id += 1;
        TransactionId::new(self.next_transaction_id)
    }

    fn next_recurring_id(&mut self) -> RecurringId {
        self.next_recurring_id += 1;
        RecurringId::new(self.next_recurring_id)
    }

    fn next_category_id(&mut self) -> CategoryId {
        self.next_category_id += 1;
        CategoryId::new(self.next_category_id)
    }

    fn next_absence_id(&mut self) -> AbsenceId {
        self.next_absence_id += 1;
        AbsenceId::new(self.next_absence_id)
    }
}

/// In-memory store implementing all five store traits.
///
/// Wrap it in an `Arc` and hand clones of that `Arc` to each consumer;
/// they all share the same state.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut guard = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }

    /// Seeds a category, returning it with its assigned id.
    ///
    /// The trait surface only exposes reads for categories; seeding is a
    /// backend concern.
    pub fn add_category(&self, name: &str, applies_to: TransactionKind) -> Category {
        self.with_state(|state| {
            let category = Category {
                id: state.next_category_id(),
                name: name.to_string(),
                applies_to,
            };
            state.categories.push(category.clone());
            category
        })
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn add(
        &self,
        mut occurrence: TransactionOccurrence,
    ) -> StoreResult<TransactionOccurrence> {
        Ok(self.with_state(|state| {
            occurrence.id = state.next_transaction_id();
            state.transactions.push(occurrence.clone());
            debug!(id = %occurrence.id, "added transaction");
            occurrence
        }))
    }

    async fn update(
        &self,
        occurrence: TransactionOccurrence,
    ) -> StoreResult<Option<TransactionOccurrence>> {
        Ok(self.with_state(|state| {
            let slot = state
                .transactions
                .iter_mut()
                .find(|t| t.id == occurrence.id)?;
            *slot = occurrence.clone();
            Some(occurrence)
        }))
    }

    async fn delete(&self, id: TransactionId) -> StoreResult<()> {
        self.with_state(|state| state.transactions.retain(|t| t.id != id));
        Ok(())
    }

    async fn get_by_id(&self, id: TransactionId) -> StoreResult<Option<TransactionOccurrence>> {
        Ok(self.with_state(|state| state.transactions.iter().find(|t| t.id == id).cloned()))
    }

    async fn get_all(&self) -> StoreResult<Vec<TransactionOccurrence>> {
        Ok(self.with_state(|state| {
            let mut all = state.transactions.clone();
            all.sort_by(|a, b| {
                a.category
                    .name
                    .cmp(&b.category.name)
                    .then(a.occurred_on.cmp(&b.occurred_on))
            });
            all
        }))
    }

    async fn get_by_month(&self, month: MonthRef) -> StoreResult<Vec<TransactionOccurrence>> {
        Ok(self.with_state(|state| {
            state
                .transactions
                .iter()
                .filter(|t| month.contains(t.occurred_on))
                .cloned()
                .collect()
        }))
    }

    async fn get_all_incomes(&self) -> StoreResult<Vec<TransactionOccurrence>> {
        Ok(self.with_state(|state| {
            state
                .transactions
                .iter()
                .filter(|t| t.kind == TransactionKind::Income)
                .cloned()
                .collect()
        }))
    }

    async fn get_all_expenses(&self) -> StoreResult<Vec<TransactionOccurrence>> {
        Ok(self.with_state(|state| {
            state
                .transactions
                .iter()
                .filter(|t| t.kind == TransactionKind::Expense)
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl RecurringStore for MemoryStore {
    async fn add(&self, mut definition: RecurringDefinition) -> StoreResult<RecurringDefinition> {
        Ok(self.with_state(|state| {
            definition.id = state.next_recurring_id();
            state.recurring.push(definition.clone());
            debug!(id = %definition.id, "added recurring definition");
            definition
        }))
    }

    async fn update(
        &self,
        definition: RecurringDefinition,
    ) -> StoreResult<Option<RecurringDefinition>> {
        Ok(self.with_state(|state| {
            let slot = state.recurring.iter_mut().find(|d| d.id == definition.id)?;
            *slot = definition.clone();
            Some(definition)
        }))
    }

    async fn delete(&self, id: RecurringId) -> StoreResult<()> {
        self.with_state(|state| state.recurring.retain(|d| d.id != id));
        Ok(())
    }

    async fn get_by_id(&self, id: RecurringId) -> StoreResult<Option<RecurringDefinition>> {
        Ok(self.with_state(|state| state.recurring.iter().find(|d| d.id == id).cloned()))
    }

    async fn get_all(&self) -> StoreResult<Vec<RecurringDefinition>> {
        Ok(self.with_state(|state| {
            let mut all = state.recurring.clone();
            all.sort_by_key(|d| d.start_date);
            all
        }))
    }

    async fn get_by_month(&self, month: MonthRef) -> StoreResult<Vec<RecurringDefinition>> {
        Ok(self.with_state(|state| {
            state
                .recurring
                .iter()
                .filter(|d| is_active_in_month(d, month))
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn get_all(&self) -> StoreResult<Vec<Category>> {
        Ok(self.with_state(|state| {
            let mut all = state.categories.clone();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            all
        }))
    }
}

#[async_trait]
impl AbsenceStore for MemoryStore {
    async fn add(&self, mut record: AbsenceRecord) -> StoreResult<AbsenceRecord> {
        Ok(self.with_state(|state| {
            record.id = state.next_absence_id();
            state.absences.push(record.clone());
            record
        }))
    }

    async fn update(&self, record: AbsenceRecord) -> StoreResult<Option<AbsenceRecord>> {
        Ok(self.with_state(|state| {
            let slot = state.absences.iter_mut().find(|a| a.id == record.id)?;
            *slot = record.clone();
            Some(record)
        }))
    }

    async fn delete(&self, id: AbsenceId) -> StoreResult<()> {
        self.with_state(|state| state.absences.retain(|a| a.id != id));
        Ok(())
    }

    async fn get_by_id(&self, id: AbsenceId) -> StoreResult<Option<AbsenceRecord>> {
        Ok(self.with_state(|state| state.absences.iter().find(|a| a.id == id).cloned()))
    }

    async fn get_all(&self) -> StoreResult<Vec<AbsenceRecord>> {
        Ok(self.with_state(|state| state.absences.clone()))
    }

    async fn get_by_month(&self, month: MonthRef) -> StoreResult<Vec<AbsenceRecord>> {
        Ok(self.with_state(|state| {
            let mut records: Vec<AbsenceRecord> = state
                .absences
                .iter()
                .filter(|a| month.contains(a.date))
                .cloned()
                .collect();
            records.sort_by_key(|a| a.date);
            records
        }))
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self) -> StoreResult<Option<UserSettings>> {
        Ok(self.with_state(|state| state.settings.clone()))
    }

    async fn save(&self, mut settings: UserSettings) -> StoreResult<UserSettings> {
        Ok(self.with_state(|state| {
            match &state.settings {
                Some(existing) => settings.id = existing.id,
                None => settings.id = SettingsId::new(1),
            }
            state.settings = Some(settings.clone());
            settings
        }))
    }
}
