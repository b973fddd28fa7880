//! Storage-boundary error types.
//!
//! The store traits in `kassa-core` return these errors. A store failure
//! aborts the in-progress command; callers keep their in-memory state
//! unchanged and surface the failure so the operation can be retried.

use thiserror::Error;

/// Result type alias using `StoreError`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a storage backend.
///
/// A missing row is NOT an error: `update` and `delete` against an id that
/// no longer exists are no-ops by contract, so concurrent deletion elsewhere
/// never crashes a flow.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A stored row could not be decoded into its domain type.
    #[error("Corrupt stored data: {0}")]
    CorruptData(String),
}

impl StoreError {
    /// Returns the error code for reporting to the caller.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "STORE_BACKEND_ERROR",
            Self::CorruptData(_) => "STORE_CORRUPT_DATA",
        }
    }
}
