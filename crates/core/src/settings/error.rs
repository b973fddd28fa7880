//! Settings error types.

use kassa_shared::StoreError;
use thiserror::Error;

/// Errors that can occur in the settings workflow.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// User input failed a domain constraint; nothing was saved.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A persistence call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
