//! Month-scoped transaction ledger.
//!
//! This module owns the authoritative month view:
//! - Kind-partitioned income/expense occurrence collections
//! - The recurring definitions active for the loaded month
//! - Mirror maintenance across every mutation
//! - The single selection slot
//! - Error types for ledger operations

pub mod error;
pub mod service;
pub mod types;

pub use error::LedgerError;
pub use service::MonthLedger;
pub use types::{
    Category, OccurrenceKey, RecurrenceKind, RecurringDefinition, RecurringSpec, Selection,
    TransactionKind, TransactionOccurrence,
};
