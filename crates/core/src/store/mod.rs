//! Repository-shaped traits the core consumes.
//!
//! Persistence is an external collaborator: the core only ever talks to
//! these traits. `kassa-store` ships the in-memory reference backend; any
//! other backend must honor the same contracts:
//!
//! - `add` assigns an id and returns the persisted row.
//! - `update` against a missing id is a no-op returning `Ok(None)`.
//! - `delete` against a missing id is a no-op returning `Ok(())`.
//! - Month filters use the half-open `[first, first_of_next_month)` range.

use async_trait::async_trait;

use kassa_shared::types::{AbsenceId, MonthRef, RecurringId, TransactionId};
use kassa_shared::StoreResult;

use crate::income::{AbsenceRecord, UserSettings};
use crate::ledger::types::{Category, RecurringDefinition, TransactionOccurrence};

#[cfg(test)]
use mockall::automock;

/// Store of persisted transaction occurrences.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persists a new occurrence, returning it with its assigned id.
    async fn add(&self, occurrence: TransactionOccurrence)
    -> StoreResult<TransactionOccurrence>;

    /// Updates a persisted occurrence. Returns `Ok(None)` if the id is no
    /// longer present (treated as a no-op by callers).
    async fn update(
        &self,
        occurrence: TransactionOccurrence,
    ) -> StoreResult<Option<TransactionOccurrence>>;

    /// Deletes an occurrence; missing ids are a no-op.
    async fn delete(&self, id: TransactionId) -> StoreResult<()>;

    /// Fetches one occurrence by id.
    async fn get_by_id(&self, id: TransactionId) -> StoreResult<Option<TransactionOccurrence>>;

    /// Fetches all occurrences.
    async fn get_all(&self) -> StoreResult<Vec<TransactionOccurrence>>;

    /// Fetches the occurrences dated within the given month.
    async fn get_by_month(&self, month: MonthRef) -> StoreResult<Vec<TransactionOccurrence>>;

    /// Fetches all income occurrences.
    async fn get_all_incomes(&self) -> StoreResult<Vec<TransactionOccurrence>>;

    /// Fetches all expense occurrences.
    async fn get_all_expenses(&self) -> StoreResult<Vec<TransactionOccurrence>>;
}

/// Store of recurring transaction definitions.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecurringStore: Send + Sync {
    /// Persists a new definition, returning it with its assigned id.
    async fn add(&self, definition: RecurringDefinition) -> StoreResult<RecurringDefinition>;

    /// Updates a persisted definition. Returns `Ok(None)` if the id is no
    /// longer present (treated as a no-op by callers).
    async fn update(
        &self,
        definition: RecurringDefinition,
    ) -> StoreResult<Option<RecurringDefinition>>;

    /// Deletes a definition; missing ids are a no-op.
    async fn delete(&self, id: RecurringId) -> StoreResult<()>;

    /// Fetches one definition by id.
    async fn get_by_id(&self, id: RecurringId) -> StoreResult<Option<RecurringDefinition>>;

    /// Fetches all definitions, ordered by start date.
    async fn get_all(&self) -> StoreResult<Vec<RecurringDefinition>>;

    /// Fetches the definitions active in the given month, i.e. those
    /// passing [`crate::recurrence::is_active_in_month`].
    async fn get_by_month(&self, month: MonthRef) -> StoreResult<Vec<RecurringDefinition>>;
}

/// Store of transaction categories.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Fetches all categories, ordered by name.
    async fn get_all(&self) -> StoreResult<Vec<Category>>;
}

/// Store of absence records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AbsenceStore: Send + Sync {
    /// Persists a new absence record, returning it with its assigned id.
    async fn add(&self, record: AbsenceRecord) -> StoreResult<AbsenceRecord>;

    /// Updates a persisted record. Returns `Ok(None)` if the id is no
    /// longer present (treated as a no-op by callers).
    async fn update(&self, record: AbsenceRecord) -> StoreResult<Option<AbsenceRecord>>;

    /// Deletes a record; missing ids are a no-op.
    async fn delete(&self, id: AbsenceId) -> StoreResult<()>;

    /// Fetches one record by id.
    async fn get_by_id(&self, id: AbsenceId) -> StoreResult<Option<AbsenceRecord>>;

    /// Fetches all records.
    async fn get_all(&self) -> StoreResult<Vec<AbsenceRecord>>;

    /// Fetches the records dated within the given month, ordered by date.
    async fn get_by_month(&self, month: MonthRef) -> StoreResult<Vec<AbsenceRecord>>;
}

/// Store of the singleton user settings row.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetches the settings row, if one has been saved.
    async fn get(&self) -> StoreResult<Option<UserSettings>>;

    /// Upserts the singleton settings row and returns the persisted value.
    async fn save(&self, settings: UserSettings) -> StoreResult<UserSettings>;
}
