//! Absence record service.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use kassa_shared::types::{AbsenceId, MonthRef};

use super::error::AbsenceError;
use crate::income::AbsenceRecord;
use crate::store::AbsenceStore;

/// Absence workflow service.
pub struct AbsenceService {
    absences: Arc<dyn AbsenceStore>,
}

impl AbsenceService {
    /// Creates a new absence service over the given store.
    #[must_use]
    pub fn new(absences: Arc<dyn AbsenceStore>) -> Self {
        Self { absences }
    }

    /// Validates an absence record before a save.
    ///
    /// Hours must lie in `(0, 24]` and the date must not be in the future
    /// relative to `today`.
    pub fn validate(record: &AbsenceRecord, today: NaiveDate) -> Result<(), AbsenceError> {
        if record.hours <= Decimal::ZERO || record.hours > Decimal::from(24_u32) {
            return Err(AbsenceError::Validation(
                "hours must be between 0 and 24".to_string(),
            ));
        }
        if record.date > today {
            return Err(AbsenceError::Validation(
                "absence date must not be in the future".to_string(),
            ));
        }
        Ok(())
    }

    /// Fetches the absences within the given month.
    pub async fn list_for_month(&self, month: MonthRef) -> Result<Vec<AbsenceRecord>, AbsenceError> {
        Ok(self.absences.get_by_month(month).await?)
    }

    /// Validates and persists a new absence record.
    pub async fn add(
        &self,
        record: AbsenceRecord,
        today: NaiveDate,
    ) -> Result<AbsenceRecord, AbsenceError> {
        Self::validate(&record, today)?;

        let persisted = self.absences.add(record).await?;
        debug!(id = %persisted.id, date = %persisted.date, "added absence record");
        Ok(persisted)
    }

    /// Validates and updates a persisted absence record. A missing id is a
    /// no-op.
    pub async fn update(
        &self,
        record: AbsenceRecord,
        today: NaiveDate,
    ) -> Result<(), AbsenceError> {
        Self::validate(&record, today)?;

        self.absences.update(record).await?;
        Ok(())
    }

    /// Deletes an absence record; missing ids are a no-op.
    pub async fn delete(&self, id: AbsenceId) -> Result<(), AbsenceError> {
        self.absences.delete(id).await?;
        Ok(())
    }
}
