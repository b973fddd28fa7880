//! Summary data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kassa_shared::types::MonthRef;

/// Aggregated financial totals for one calendar month. Derived, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The summarized month.
    pub month: MonthRef,
    /// Regular plus active recurring income.
    pub total_income: Decimal,
    /// Regular plus active recurring expenses.
    pub total_expenses: Decimal,
    /// Total wage deducted for the month's absences.
    pub absence_deduction: Decimal,
    /// Total compensation paid back for those absences.
    pub absence_compensation: Decimal,
    /// Settings-derived gross monthly income; zero when no settings exist.
    pub calculated_monthly_income: Decimal,
    /// Applicable tax rate; zero when no settings exist.
    pub tax_rate: Decimal,
}

impl MonthlySummary {
    /// Income minus expenses.
    #[must_use]
    pub fn net_result(&self) -> Decimal {
        self.total_income - self.total_expenses
    }

    /// Net result adjusted for absences: deduction subtracted,
    /// compensation added back.
    #[must_use]
    pub fn net_result_with_absence(&self) -> Decimal {
        self.net_result() - self.absence_deduction + self.absence_compensation
    }
}
