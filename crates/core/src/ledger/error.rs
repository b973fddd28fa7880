//! Ledger error types for validation and storage errors.

use kassa_shared::StoreError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// User input failed a domain constraint.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A persistence call failed; the in-memory month view is unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for reporting to the caller.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}
