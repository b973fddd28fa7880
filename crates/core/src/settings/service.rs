//! Settings service with system salary regeneration.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use kassa_shared::config::SalaryConfig;
use kassa_shared::types::RecurringId;

use super::error::SettingsError;
use crate::income::{IncomeCalculator, UserSettings};
use crate::ledger::types::{RecurrenceKind, RecurringDefinition, TransactionKind};
use crate::store::{CategoryStore, RecurringStore, SettingsStore};

/// Maximum configurable yearly work hours (24 * 365).
const MAX_YEARLY_WORK_HOURS: u32 = 8760;

/// User settings workflow service.
pub struct SettingsService {
    settings: Arc<dyn SettingsStore>,
    recurring: Arc<dyn RecurringStore>,
    categories: Arc<dyn CategoryStore>,
    salary: SalaryConfig,
}

impl SettingsService {
    /// Creates a new settings service over the given stores.
    #[must_use]
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        recurring: Arc<dyn RecurringStore>,
        categories: Arc<dyn CategoryStore>,
        salary: SalaryConfig,
    ) -> Self {
        Self {
            settings,
            recurring,
            categories,
            salary,
        }
    }

    /// Fetches the settings row, if one has been saved.
    pub async fn load(&self) -> Result<Option<UserSettings>, SettingsError> {
        Ok(self.settings.get().await?)
    }

    /// Validates settings before a save.
    pub fn validate(settings: &UserSettings) -> Result<(), SettingsError> {
        if settings.yearly_income <= Decimal::ZERO {
            return Err(SettingsError::Validation(
                "yearly income must be greater than 0".to_string(),
            ));
        }
        if settings.yearly_work_hours == 0 || settings.yearly_work_hours > MAX_YEARLY_WORK_HOURS {
            return Err(SettingsError::Validation(format!(
                "yearly work hours must be between 1 and {MAX_YEARLY_WORK_HOURS}"
            )));
        }
        if settings.tax_rate < Decimal::ZERO || settings.tax_rate >= Decimal::ONE {
            return Err(SettingsError::Validation(
                "tax rate must be a fraction between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates and upserts the settings row, then regenerates the system
    /// salary definition.
    ///
    /// The salary definition is never patched: the existing system
    /// definition is deleted and a fresh one inserted with amount equal to
    /// the new monthly income after tax, starting today and open-ended.
    /// When no category matches the configured salary category name the
    /// regeneration is skipped; the settings save still succeeds.
    pub async fn save(
        &self,
        settings: UserSettings,
        today: NaiveDate,
    ) -> Result<UserSettings, SettingsError> {
        Self::validate(&settings)?;

        let persisted = self.settings.save(settings).await?;
        self.regenerate_salary_definition(&persisted, today).await?;
        Ok(persisted)
    }

    /// Deletes the current system salary definition and inserts a fresh
    /// one derived from the given settings.
    async fn regenerate_salary_definition(
        &self,
        settings: &UserSettings,
        today: NaiveDate,
    ) -> Result<(), SettingsError> {
        let definitions = self.recurring.get_all().await?;
        for existing in definitions.iter().filter(|d| d.system_generated) {
            self.recurring.delete(existing.id).await?;
            debug!(id = %existing.id, "removed previous system salary definition");
        }

        let categories = self.categories.get_all().await?;
        let Some(salary_category) = categories
            .iter()
            .find(|c| c.name == self.salary.category_name)
        else {
            info!(
                category = %self.salary.category_name,
                "no salary category found, skipping salary definition"
            );
            return Ok(());
        };

        let definition = RecurringDefinition {
            id: RecurringId::UNSET,
            kind: TransactionKind::Income,
            amount: IncomeCalculator::monthly_income_after_tax(settings),
            description: self.salary.description.clone(),
            category_id: salary_category.id,
            recurrence: RecurrenceKind::Monthly,
            recurrence_month: None,
            start_date: today,
            end_date: None,
            system_generated: true,
        };

        let persisted = self.recurring.add(definition).await?;
        info!(id = %persisted.id, amount = %persisted.amount, "regenerated system salary definition");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kassa_shared::types::SettingsId;
    use rust_decimal_macros::dec;

    fn settings(yearly_income: Decimal, hours: u32, tax_rate: Decimal) -> UserSettings {
        UserSettings {
            id: SettingsId::UNSET,
            yearly_income,
            yearly_work_hours: hours,
            tax_rate,
        }
    }

    #[test]
    fn test_validate_accepts_sane_settings() {
        assert!(SettingsService::validate(&settings(dec!(480000), 1920, dec!(0.30))).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_income() {
        assert!(matches!(
            SettingsService::validate(&settings(dec!(0), 1920, dec!(0.30))),
            Err(SettingsError::Validation(_))
        ));
        assert!(matches!(
            SettingsService::validate(&settings(dec!(-1), 1920, dec!(0.30))),
            Err(SettingsError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_hours() {
        assert!(matches!(
            SettingsService::validate(&settings(dec!(480000), 0, dec!(0.30))),
            Err(SettingsError::Validation(_))
        ));
        assert!(matches!(
            SettingsService::validate(&settings(dec!(480000), 8761, dec!(0.30))),
            Err(SettingsError::Validation(_))
        ));
        assert!(SettingsService::validate(&settings(dec!(480000), 8760, dec!(0.30))).is_ok());
    }

    #[test]
    fn test_validate_rejects_tax_rate_outside_unit_interval() {
        assert!(matches!(
            SettingsService::validate(&settings(dec!(480000), 1920, dec!(1))),
            Err(SettingsError::Validation(_))
        ));
        assert!(matches!(
            SettingsService::validate(&settings(dec!(480000), 1920, dec!(-0.1))),
            Err(SettingsError::Validation(_))
        ));
        assert!(SettingsService::validate(&settings(dec!(480000), 1920, Decimal::ZERO)).is_ok());
    }
}
