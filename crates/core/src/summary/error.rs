//! Summary error types.

use kassa_shared::StoreError;
use thiserror::Error;

/// Errors that can occur while computing a monthly summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A persistence call failed; no summary was produced.
    #[error(transparent)]
    Store(#[from] StoreError),
}
