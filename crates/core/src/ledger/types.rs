//! Ledger domain types.
//!
//! This module defines the money-movement types shared across the core:
//! concrete transaction occurrences, recurring definitions, and the
//! selection state the ledger maintains for the UI adapter.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kassa_shared::types::{CategoryId, RecurringId, TransactionId};

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Which kind of transaction this category applies to.
    pub applies_to: TransactionKind,
}

impl Category {
    /// The empty placeholder substituted when a category reference no
    /// longer resolves. Materialization must never fail on a dangling
    /// reference.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: CategoryId::UNSET,
            name: String::new(),
            applies_to: TransactionKind::Expense,
        }
    }
}

/// One concrete money movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOccurrence {
    /// Occurrence ID; `UNSET` until persisted. Mirrors stay `UNSET`.
    pub id: TransactionId,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// The date the movement occurred (first of month for mirrors).
    pub occurred_on: NaiveDate,
    /// Category snapshot; its id is the category reference.
    pub category: Category,
    /// Present iff this occurrence derives from a recurring definition.
    pub source_recurring_id: Option<RecurringId>,
}

impl TransactionOccurrence {
    /// Returns true if this occurrence derives from a recurring definition.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        self.source_recurring_id.is_some()
    }

    /// Returns true if this occurrence is a non-persisted mirror row.
    #[must_use]
    pub const fn is_mirror(&self) -> bool {
        self.is_derived() && self.id.is_unset()
    }
}

/// How often a recurring definition repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    /// Repeats every month.
    Monthly,
    /// Repeats once a year, in `recurrence_month`.
    Yearly,
}

/// A template describing a repeating money movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringDefinition {
    /// Definition ID; `UNSET` until persisted.
    pub id: RecurringId,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Non-negative amount per occurrence.
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// Category reference.
    pub category_id: CategoryId,
    /// Monthly or yearly recurrence.
    pub recurrence: RecurrenceKind,
    /// Month of year (1-12); meaningful only for yearly definitions.
    pub recurrence_month: Option<u32>,
    /// First date the definition applies.
    pub start_date: NaiveDate,
    /// Last date the definition applies; open-ended if absent.
    pub end_date: Option<NaiveDate>,
    /// True only for the single auto-maintained salary definition.
    pub system_generated: bool,
}

/// Recurrence parameters supplied when converting a regular occurrence
/// into a recurring definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringSpec {
    /// Monthly or yearly recurrence.
    pub recurrence: RecurrenceKind,
    /// Month of year for yearly recurrence.
    pub recurrence_month: Option<u32>,
    /// Optional end date.
    pub end_date: Option<NaiveDate>,
}

/// Identity of an occurrence row within the month view.
///
/// Persisted occurrences are keyed by their storage id. Mirrors never get
/// one, but exactly one mirror per source definition exists in the view,
/// so the source id identifies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum OccurrenceKey {
    /// A persisted occurrence, keyed by its storage id.
    Persisted(TransactionId),
    /// A mirror, keyed by its source definition id.
    Mirror(RecurringId),
}

impl TransactionOccurrence {
    /// Returns the view-identity key for this occurrence.
    #[must_use]
    pub fn key(&self) -> OccurrenceKey {
        match self.source_recurring_id {
            Some(source) if self.id.is_unset() => OccurrenceKey::Mirror(source),
            _ => OccurrenceKey::Persisted(self.id),
        }
    }
}

/// The ledger's single selection slot.
///
/// Exactly one occurrence or definition may be selected at a time across
/// the whole month view; selecting in one sub-collection structurally
/// clears the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "key")]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// A regular occurrence (or mirror) is selected.
    Regular(OccurrenceKey),
    /// A recurring definition is selected.
    Recurring(RecurringId),
}
