//! Kassa demo binary.
//!
//! Seeds the in-memory backend with sample data, drives a full month
//! through the ledger, and logs the resulting monthly summary.
//!
//! Usage: cargo run --bin kassa-demo

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kassa_core::absence::AbsenceService;
use kassa_core::income::{AbsenceRecord, AbsenceType, UserSettings};
use kassa_core::ledger::{MonthLedger, TransactionKind, TransactionOccurrence};
use kassa_core::settings::SettingsService;
use kassa_core::summary::SummaryService;
use kassa_shared::types::{AbsenceId, MonthRef, SettingsId, TransactionId};
use kassa_shared::AppConfig;
use kassa_store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kassa=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    let store = Arc::new(MemoryStore::new());
    let today = Utc::now().date_naive();
    let month = MonthRef::from_date(today);

    // Seed categories; the salary category name comes from configuration.
    let salary_category = store.add_category(&config.salary.category_name, TransactionKind::Income);
    let food = store.add_category("Mat", TransactionKind::Expense);
    let housing = store.add_category("Boende", TransactionKind::Expense);
    info!(salary_category = %salary_category.name, "seeded categories");

    // Saving settings regenerates the system salary definition.
    let settings_service = SettingsService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        config.salary.clone(),
    );
    settings_service
        .save(
            UserSettings {
                id: SettingsId::UNSET,
                yearly_income: Decimal::from(480_000_u32),
                yearly_work_hours: 1920,
                tax_rate: UserSettings::default_tax_rate(),
            },
            today,
        )
        .await?;

    // A sick day this month.
    let absence_service = AbsenceService::new(store.clone());
    absence_service
        .add(
            AbsenceRecord {
                id: AbsenceId::UNSET,
                date: month.first_day(),
                absence_type: AbsenceType::Sick,
                hours: Decimal::from(8_u32),
            },
            today,
        )
        .await?;

    // Load the month and add some regular movements through the ledger.
    let mut ledger = MonthLedger::new(store.clone(), store.clone(), store.clone(), month);
    ledger.load_month(month).await?;

    ledger
        .add_regular(TransactionOccurrence {
            id: TransactionId::UNSET,
            kind: TransactionKind::Expense,
            amount: Decimal::from(1250_u32),
            description: "Veckohandling".to_string(),
            occurred_on: today,
            category: food,
            source_recurring_id: None,
        })
        .await?;
    ledger
        .add_regular(TransactionOccurrence {
            id: TransactionId::UNSET,
            kind: TransactionKind::Expense,
            amount: Decimal::from(9800_u32),
            description: "Hyra".to_string(),
            occurred_on: today,
            category: housing,
            source_recurring_id: None,
        })
        .await?;

    info!(
        %month,
        incomes = ledger.incomes().len(),
        expenses = ledger.expenses().len(),
        definitions = ledger.definitions().len(),
        "month view loaded"
    );
    for income in ledger.incomes() {
        info!(
            amount = %income.amount,
            mirror = income.is_mirror(),
            "income: {}",
            income.description
        );
    }
    for expense in ledger.expenses() {
        info!(
            amount = %expense.amount,
            mirror = expense.is_mirror(),
            "expense: {}",
            expense.description
        );
    }

    // Aggregate the month.
    let summary_service =
        SummaryService::new(store.clone(), store.clone(), store.clone(), store.clone());
    let summary = summary_service.compute(month).await?;

    info!(
        total_income = %summary.total_income,
        total_expenses = %summary.total_expenses,
        net = %summary.net_result(),
        net_with_absence = %summary.net_result_with_absence(),
        "monthly summary for {month}"
    );

    Ok(())
}
