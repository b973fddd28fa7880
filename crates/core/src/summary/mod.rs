//! Monthly financial summary aggregation.
//!
//! Sums a month's regular and active recurring amounts and combines them
//! with absence-driven income adjustments into one summary.

pub mod error;
pub mod service;
pub mod types;

pub use error::SummaryError;
pub use service::SummaryService;
pub use types::MonthlySummary;
