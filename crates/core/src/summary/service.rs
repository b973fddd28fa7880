//! Monthly summary aggregation service.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use kassa_shared::types::MonthRef;

use super::error::SummaryError;
use super::types::MonthlySummary;
use crate::income::IncomeCalculator;
use crate::ledger::types::TransactionKind;
use crate::store::{AbsenceStore, RecurringStore, SettingsStore, TransactionStore};

/// Computes the monthly financial summary.
///
/// Aggregation uses the *active* recurrence predicate (the store's
/// month-filtered definition query), not the looser visibility predicate
/// the month view uses for mirror display.
pub struct SummaryService {
    transactions: Arc<dyn TransactionStore>,
    recurring: Arc<dyn RecurringStore>,
    settings: Arc<dyn SettingsStore>,
    absences: Arc<dyn AbsenceStore>,
}

impl SummaryService {
    /// Creates a new summary service over the given stores.
    #[must_use]
    pub fn new(
        transactions: Arc<dyn TransactionStore>,
        recurring: Arc<dyn RecurringStore>,
        settings: Arc<dyn SettingsStore>,
        absences: Arc<dyn AbsenceStore>,
    ) -> Self {
        Self {
            transactions,
            recurring,
            settings,
            absences,
        }
    }

    /// Computes the summary for one month.
    ///
    /// Income and expense totals sum the month's regular occurrences and
    /// its active recurring definitions, in exact decimal arithmetic.
    /// Absent settings zero out the calculated income, tax rate, and
    /// absence effects; the transaction totals are still reported.
    pub async fn compute(&self, month: MonthRef) -> Result<MonthlySummary, SummaryError> {
        let regulars = self.transactions.get_by_month(month).await?;
        let definitions = self.recurring.get_by_month(month).await?;

        let sum_regular = |kind: TransactionKind| -> Decimal {
            regulars
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.amount)
                .sum()
        };
        let sum_recurring = |kind: TransactionKind| -> Decimal {
            definitions
                .iter()
                .filter(|d| d.kind == kind)
                .map(|d| d.amount)
                .sum()
        };

        let total_income =
            sum_regular(TransactionKind::Income) + sum_recurring(TransactionKind::Income);
        let total_expenses =
            sum_regular(TransactionKind::Expense) + sum_recurring(TransactionKind::Expense);

        let mut summary = MonthlySummary {
            month,
            total_income,
            total_expenses,
            absence_deduction: Decimal::ZERO,
            absence_compensation: Decimal::ZERO,
            calculated_monthly_income: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
        };

        if let Some(settings) = self.settings.get().await? {
            summary.calculated_monthly_income = IncomeCalculator::monthly_income(&settings);
            summary.tax_rate = settings.tax_rate;

            let absences = self.absences.get_by_month(month).await?;
            let effect = IncomeCalculator::absence_effect(&settings, &absences);
            summary.absence_deduction = effect.total_deduction;
            summary.absence_compensation = effect.total_compensation;
        }

        debug!(
            %month,
            total_income = %summary.total_income,
            total_expenses = %summary.total_expenses,
            "computed monthly summary"
        );
        Ok(summary)
    }
}
