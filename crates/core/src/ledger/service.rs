//! Month ledger service.
//!
//! `MonthLedger` owns the in-memory collections for the currently loaded
//! month and keeps mirror occurrences consistent across every mutation.
//! Persistence calls always run before any in-memory change, so a failed
//! store call leaves the month view untouched and the command can be
//! retried.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use kassa_shared::types::{MonthRef, RecurringId, TransactionId};

use super::error::LedgerError;
use super::types::{
    Category, OccurrenceKey, RecurrenceKind, RecurringDefinition, RecurringSpec, Selection,
    TransactionKind, TransactionOccurrence,
};
use crate::recurrence::{is_visible_in_month, materialize};
use crate::store::{CategoryStore, RecurringStore, TransactionStore};

/// The month-scoped transaction ledger.
///
/// Owns insertion-ordered income and expense collections (regular rows
/// plus mirrors), the recurring definitions active in the loaded month, a
/// snapshot of the categories used for mirror resolution, and the single
/// selection slot. All mutations are invoked sequentially; callers must
/// not overlap operations against the same month.
pub struct MonthLedger {
    transactions: Arc<dyn TransactionStore>,
    recurring: Arc<dyn RecurringStore>,
    category_store: Arc<dyn CategoryStore>,

    month: MonthRef,
    incomes: Vec<TransactionOccurrence>,
    expenses: Vec<TransactionOccurrence>,
    definitions: Vec<RecurringDefinition>,
    categories: Vec<Category>,
    selection: Selection,
}

impl MonthLedger {
    /// Creates an empty ledger positioned at the given month. Call
    /// [`Self::load_month`] to populate it.
    #[must_use]
    pub fn new(
        transactions: Arc<dyn TransactionStore>,
        recurring: Arc<dyn RecurringStore>,
        category_store: Arc<dyn CategoryStore>,
        month: MonthRef,
    ) -> Self {
        Self {
            transactions,
            recurring,
            category_store,
            month,
            incomes: Vec::new(),
            expenses: Vec::new(),
            definitions: Vec::new(),
            categories: Vec::new(),
            selection: Selection::None,
        }
    }

    /// The currently loaded month.
    #[must_use]
    pub fn month(&self) -> MonthRef {
        self.month
    }

    /// The month's income occurrences (regular rows plus mirrors).
    #[must_use]
    pub fn incomes(&self) -> &[TransactionOccurrence] {
        &self.incomes
    }

    /// The month's expense occurrences (regular rows plus mirrors).
    #[must_use]
    pub fn expenses(&self) -> &[TransactionOccurrence] {
        &self.expenses
    }

    /// The recurring definitions active in the loaded month.
    #[must_use]
    pub fn definitions(&self) -> &[RecurringDefinition] {
        &self.definitions
    }

    /// The category snapshot loaded with the month.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Selects an occurrence row, clearing any other selection.
    pub fn select_occurrence(&mut self, occurrence: &TransactionOccurrence) {
        self.selection = Selection::Regular(occurrence.key());
    }

    /// Selects a recurring definition, clearing any other selection.
    pub fn select_definition(&mut self, id: RecurringId) {
        self.selection = Selection::Recurring(id);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    /// Replaces the whole month view with fresh store data.
    ///
    /// Regular occurrences are fetched month-filtered and partitioned by
    /// kind; the active recurring definitions are fetched and every
    /// definition visible in the month gets exactly one mirror appended to
    /// the collection matching its kind. Loading twice in a row yields
    /// identical collections: state is replaced, never appended to.
    pub async fn load_month(&mut self, month: MonthRef) -> Result<(), LedgerError> {
        let regulars = self.transactions.get_by_month(month).await?;
        let definitions = self.recurring.get_by_month(month).await?;
        let categories = self.category_store.get_all().await?;

        self.month = month;
        self.categories = categories;
        self.incomes.clear();
        self.expenses.clear();
        self.selection = Selection::None;

        for occurrence in regulars {
            self.push_occurrence(occurrence);
        }

        for definition in &definitions {
            if is_visible_in_month(definition, month) {
                let mirror = materialize(definition, month, &self.categories);
                match mirror.kind {
                    TransactionKind::Income => self.incomes.push(mirror),
                    TransactionKind::Expense => self.expenses.push(mirror),
                }
            }
        }
        self.definitions = definitions;

        debug!(
            %month,
            incomes = self.incomes.len(),
            expenses = self.expenses.len(),
            definitions = self.definitions.len(),
            "loaded month view"
        );
        Ok(())
    }

    /// Persists a new regular occurrence and appends it to the collection
    /// matching its kind.
    pub async fn add_regular(
        &mut self,
        occurrence: TransactionOccurrence,
    ) -> Result<TransactionOccurrence, LedgerError> {
        validate_amount(occurrence.amount)?;

        let persisted = self.transactions.add(occurrence).await?;
        self.push_occurrence(persisted.clone());
        Ok(persisted)
    }

    /// Persists a new recurring definition; if it is visible in the loaded
    /// month a mirror is materialized immediately, so the definition shows
    /// up without a reload.
    pub async fn add_recurring(
        &mut self,
        definition: RecurringDefinition,
    ) -> Result<RecurringDefinition, LedgerError> {
        validate_definition(&definition)?;

        let persisted = self.recurring.add(definition).await?;
        self.definitions.push(persisted.clone());
        self.materialize_if_visible(&persisted);
        Ok(persisted)
    }

    /// Updates a persisted regular occurrence.
    ///
    /// The row is removed from both collections and re-appended to the one
    /// matching its (possibly changed) kind, so a collection never holds
    /// an occurrence whose kind disagrees with it. A missing id is a
    /// no-op.
    pub async fn update_regular(
        &mut self,
        occurrence: TransactionOccurrence,
    ) -> Result<(), LedgerError> {
        validate_amount(occurrence.amount)?;

        let Some(updated) = self.transactions.update(occurrence).await? else {
            return Ok(());
        };

        self.remove_occurrence(OccurrenceKey::Persisted(updated.id));
        self.push_occurrence(updated);
        Ok(())
    }

    /// Updates a persisted recurring definition.
    ///
    /// All existing mirrors for the definition are removed from both
    /// collections and, if the definition is still visible this month,
    /// exactly one fresh mirror is materialized. Mirrors are never patched
    /// in place: any field may have changed. A missing id is a no-op.
    pub async fn update_recurring(
        &mut self,
        definition: RecurringDefinition,
    ) -> Result<(), LedgerError> {
        validate_definition(&definition)?;

        let Some(updated) = self.recurring.update(definition).await? else {
            return Ok(());
        };

        if let Some(slot) = self.definitions.iter_mut().find(|d| d.id == updated.id) {
            *slot = updated.clone();
        }
        self.remove_mirrors(updated.id);
        self.materialize_if_visible(&updated);
        Ok(())
    }

    /// Deletes an occurrence row.
    ///
    /// Deleting a derived row (a mirror selected by the user) deletes the
    /// *source definition* and cascade-removes all of its mirrors: a
    /// single month's instance of a recurring item cannot be deleted
    /// without deleting the recurrence itself. A plain occurrence is
    /// deleted from storage and its collection only.
    pub async fn delete_regular(
        &mut self,
        occurrence: &TransactionOccurrence,
    ) -> Result<(), LedgerError> {
        if let Some(source_id) = occurrence.source_recurring_id {
            self.recurring.delete(source_id).await?;
            self.remove_definition(source_id);
        } else {
            if !occurrence.id.is_unset() {
                self.transactions.delete(occurrence.id).await?;
            }
            self.remove_occurrence(occurrence.key());
        }

        if self.selection == Selection::Regular(occurrence.key()) {
            self.selection = Selection::None;
        }
        Ok(())
    }

    /// Deletes a recurring definition and removes all of its mirrors from
    /// both collections.
    pub async fn delete_recurring(
        &mut self,
        definition: &RecurringDefinition,
    ) -> Result<(), LedgerError> {
        self.recurring.delete(definition.id).await?;
        self.remove_definition(definition.id);

        if self.selection == Selection::Recurring(definition.id) {
            self.selection = Selection::None;
        }
        Ok(())
    }

    /// Deletes whatever the selection points at; an empty selection is a
    /// no-op.
    pub async fn delete_selected(&mut self) -> Result<(), LedgerError> {
        match self.selection {
            Selection::None => Ok(()),
            Selection::Regular(key) => {
                let Some(occurrence) = self.find_occurrence(key).cloned() else {
                    self.selection = Selection::None;
                    return Ok(());
                };
                self.delete_regular(&occurrence).await
            }
            Selection::Recurring(id) => {
                let Some(definition) =
                    self.definitions.iter().find(|d| d.id == id).cloned()
                else {
                    self.selection = Selection::None;
                    return Ok(());
                };
                self.delete_recurring(&definition).await
            }
        }
    }

    /// Converts a regular occurrence into a recurring definition.
    ///
    /// The definition inherits the occurrence's fields and starts on its
    /// date; the original occurrence is deleted. If the new definition is
    /// visible this month a mirror replaces the original row and the
    /// definition becomes the selection.
    pub async fn convert_to_recurring(
        &mut self,
        occurrence: &TransactionOccurrence,
        spec: RecurringSpec,
    ) -> Result<RecurringDefinition, LedgerError> {
        let definition = RecurringDefinition {
            id: RecurringId::UNSET,
            kind: occurrence.kind,
            amount: occurrence.amount,
            description: occurrence.description.clone(),
            category_id: occurrence.category.id,
            recurrence: spec.recurrence,
            recurrence_month: spec.recurrence_month,
            start_date: occurrence.occurred_on,
            end_date: spec.end_date,
            system_generated: false,
        };
        validate_definition(&definition)?;

        let persisted = self.recurring.add(definition).await?;

        if let Err(err) = self.transactions.delete(occurrence.id).await {
            // The definition is already persisted; there is no rollback.
            warn!(
                definition_id = %persisted.id,
                occurrence_id = %occurrence.id,
                "conversion left both the definition and the original occurrence persisted"
            );
            return Err(err.into());
        }

        self.remove_occurrence(occurrence.key());
        self.definitions.push(persisted.clone());
        if self.materialize_if_visible(&persisted) {
            self.selection = Selection::Recurring(persisted.id);
        } else {
            self.selection = Selection::None;
        }
        Ok(persisted)
    }

    /// Converts a recurring definition back into a plain occurrence dated
    /// on the definition's start date. The definition and its mirrors
    /// disappear; the new occurrence becomes the selection.
    pub async fn convert_to_regular(
        &mut self,
        definition: &RecurringDefinition,
    ) -> Result<TransactionOccurrence, LedgerError> {
        self.recurring.delete(definition.id).await?;

        let category = self
            .categories
            .iter()
            .find(|c| c.id == definition.category_id)
            .cloned()
            .unwrap_or_else(Category::placeholder);
        let occurrence = TransactionOccurrence {
            id: TransactionId::UNSET,
            kind: definition.kind,
            amount: definition.amount,
            description: definition.description.clone(),
            occurred_on: definition.start_date,
            category,
            source_recurring_id: None,
        };

        let persisted = match self.transactions.add(occurrence).await {
            Ok(persisted) => persisted,
            Err(err) => {
                // The definition is already gone; there is no rollback.
                warn!(
                    definition_id = %definition.id,
                    "conversion deleted the definition but could not persist the occurrence"
                );
                return Err(err.into());
            }
        };

        self.remove_definition(definition.id);
        self.push_occurrence(persisted.clone());
        self.selection = Selection::Regular(persisted.key());
        Ok(persisted)
    }

    /// Appends an occurrence to the collection matching its kind.
    fn push_occurrence(&mut self, occurrence: TransactionOccurrence) {
        match occurrence.kind {
            TransactionKind::Income => self.incomes.push(occurrence),
            TransactionKind::Expense => self.expenses.push(occurrence),
        }
    }

    /// Removes an occurrence row from both collections by its view key.
    fn remove_occurrence(&mut self, key: OccurrenceKey) {
        self.incomes.retain(|o| o.key() != key);
        self.expenses.retain(|o| o.key() != key);
    }

    /// Removes all mirrors referencing the given definition from both
    /// collections.
    fn remove_mirrors(&mut self, source_id: RecurringId) {
        self.incomes
            .retain(|o| o.source_recurring_id != Some(source_id));
        self.expenses
            .retain(|o| o.source_recurring_id != Some(source_id));
    }

    /// Removes a definition and all of its mirrors from the month view.
    fn remove_definition(&mut self, id: RecurringId) {
        self.definitions.retain(|d| d.id != id);
        self.remove_mirrors(id);
    }

    /// Materializes a mirror for the definition if it is visible in the
    /// loaded month. Returns whether a mirror was appended.
    fn materialize_if_visible(&mut self, definition: &RecurringDefinition) -> bool {
        if !is_visible_in_month(definition, self.month) {
            return false;
        }
        let mirror = materialize(definition, self.month, &self.categories);
        self.push_occurrence(mirror);
        true
    }

    fn find_occurrence(&self, key: OccurrenceKey) -> Option<&TransactionOccurrence> {
        self.incomes
            .iter()
            .chain(self.expenses.iter())
            .find(|o| o.key() == key)
    }
}

fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::Validation(
            "amount must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_definition(definition: &RecurringDefinition) -> Result<(), LedgerError> {
    validate_amount(definition.amount)?;

    if definition.recurrence == RecurrenceKind::Yearly {
        match definition.recurrence_month {
            Some(1..=12) => {}
            _ => {
                return Err(LedgerError::Validation(
                    "yearly definitions need a recurrence month between 1 and 12".to_string(),
                ));
            }
        }
    }
    Ok(())
}
