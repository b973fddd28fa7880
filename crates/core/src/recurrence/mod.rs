//! Recurrence expansion logic.
//!
//! This module decides which recurring definitions apply to a calendar
//! month and projects them into concrete mirror occurrences:
//! - Active/visible month predicates
//! - Mirror materialization
//!
//! The two predicates are deliberately distinct: `is_active_in_month`
//! (temporal bounds + yearly month match) governs financial aggregation,
//! while `is_visible_in_month` (month-of-year match only) governs mirror
//! display. Do not unify them without product sign-off; flows depend on
//! each separately.

pub mod evaluator;
pub mod mirror;

#[cfg(test)]
mod evaluator_props;

pub use evaluator::{is_active_in_month, is_visible_in_month};
pub use mirror::materialize;
