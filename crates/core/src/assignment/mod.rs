//! Ordered payment-source assignment per batch.
//!
//! Each batch offers an ordered list of payment sources. Reconfiguring a
//! batch replaces the whole list; the i-th source gets priority `i`.

pub mod error;
pub mod policy;

#[cfg(test)]
mod policy_props;

pub use error::AssignmentError;
pub use policy::{AssignmentPlan, AssignmentPolicy, OrderedListPolicy, PlannedAssignment};
