//! Income and absence-effect calculations.
//!
//! Pure functions computing hourly wage, monthly income, and the income
//! effect of absence records from the user's settings. No dependencies on
//! storage or the ledger.

pub mod calculator;
pub mod types;

pub use calculator::IncomeCalculator;
pub use types::{AbsenceEffect, AbsenceRecord, AbsenceType, UserSettings};
