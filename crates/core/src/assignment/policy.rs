//! Assignment policies.

use std::collections::HashSet;

use feedesk_shared::types::{BatchId, PaymentSourceId};

use super::error::AssignmentError;

/// One planned `batch_payment_sources` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedAssignment {
    /// Source offered.
    pub source_id: PaymentSourceId,
    /// 0-based position in the batch's list.
    pub priority: i32,
}

/// Full replacement mapping for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentPlan {
    /// Batch being configured.
    pub batch_id: BatchId,
    /// Rows in priority order.
    pub rows: Vec<PlannedAssignment>,
}

/// Decides which sources a batch offers and in what order.
pub trait AssignmentPolicy: Send + Sync {
    /// Builds the replacement mapping for a batch.
    ///
    /// `batch_id` is `None` when the requested batch does not exist.
    /// `known_sources` holds every existing payment source id.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentError` if the request cannot be planned.
    fn plan(
        &self,
        batch_id: Option<BatchId>,
        ordered_source_ids: &[PaymentSourceId],
        known_sources: &HashSet<PaymentSourceId>,
    ) -> Result<AssignmentPlan, AssignmentError>;
}

/// Uses the caller's list as-is: input order becomes priority order.
///
/// Duplicate ids are kept. No source is added implicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedListPolicy;

impl AssignmentPolicy for OrderedListPolicy {
    fn plan(
        &self,
        batch_id: Option<BatchId>,
        ordered_source_ids: &[PaymentSourceId],
        known_sources: &HashSet<PaymentSourceId>,
    ) -> Result<AssignmentPlan, AssignmentError> {
        let batch_id = batch_id.ok_or(AssignmentError::BatchRequired)?;
        if ordered_source_ids.is_empty() {
            return Err(AssignmentError::NoSources);
        }
        if let Some(unknown) = ordered_source_ids
            .iter()
            .find(|id| !known_sources.contains(*id))
        {
            return Err(AssignmentError::UnknownSource(unknown.into_inner()));
        }

        let rows = (0i32..)
            .zip(ordered_source_ids)
            .map(|(priority, source_id)| PlannedAssignment {
                source_id: *source_id,
                priority,
            })
            .collect();

        Ok(AssignmentPlan { batch_id, rows })
    }
}
