//! Income data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kassa_shared::types::{AbsenceId, SettingsId};

/// The singleton user settings record.
///
/// Exactly zero or one instance exists; saving always upserts the single
/// row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings row ID; `UNSET` until persisted.
    pub id: SettingsId,
    /// Gross yearly income.
    pub yearly_income: Decimal,
    /// Contracted work hours per year.
    pub yearly_work_hours: u32,
    /// Tax rate as a fraction in `[0, 1)`.
    pub tax_rate: Decimal,
}

impl UserSettings {
    /// The tax rate applied when the user has not configured one.
    #[must_use]
    pub fn default_tax_rate() -> Decimal {
        Decimal::new(32, 2)
    }
}

/// Kind of day-bounded absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceType {
    /// Sick leave, deducted at the full hourly wage.
    Sick,
    /// Child-care leave ("VAB"), deducted at a capped hourly wage.
    ChildCare,
}

/// A day-bounded absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    /// Record ID; `UNSET` until persisted.
    pub id: AbsenceId,
    /// The day of the absence.
    pub date: NaiveDate,
    /// Sick or child-care leave.
    pub absence_type: AbsenceType,
    /// Hours absent; `0 < hours <= 24`.
    pub hours: Decimal,
}

/// Aggregated income effect of a set of absence records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AbsenceEffect {
    /// Total wage deducted for absent hours.
    pub total_deduction: Decimal,
    /// Total compensation paid back for those hours.
    pub total_compensation: Decimal,
}

impl AbsenceEffect {
    /// Net income effect: compensation minus deduction.
    #[must_use]
    pub fn net_effect(&self) -> Decimal {
        self.total_compensation - self.total_deduction
    }
}
