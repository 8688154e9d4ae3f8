//! Ledger domain types for admissions and fee payments.

use chrono::NaiveDate;
use feedesk_shared::types::{AdmissionId, BatchId, PaymentSourceId, StudentId};
use serde::{Deserialize, Serialize};

/// Admission status, derived from the pending amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionStatus {
    /// Fee still outstanding.
    Active,
    /// Fee fully paid.
    Completed,
}

impl AdmissionStatus {
    /// Returns `Completed` exactly when nothing is pending.
    ///
    /// A negative pending amount (overpaid at opening) stays `Active`.
    #[must_use]
    pub const fn for_pending(pending_amount: i64) -> Self {
        if pending_amount == 0 {
            Self::Completed
        } else {
            Self::Active
        }
    }

    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Completed" => Ok(Self::Completed),
            _ => Err(format!("Invalid admission status: {s}")),
        }
    }
}

/// The fee figures of one admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Batch fee captured when the admission was opened.
    pub total_fee: i64,
    /// Sum of all fee payments.
    pub paid_amount: i64,
    /// `total_fee - paid_amount`.
    pub pending_amount: i64,
    /// Derived from `pending_amount`.
    pub status: AdmissionStatus,
}

impl LedgerState {
    /// Builds a state from a fee and the amount paid so far.
    #[must_use]
    pub const fn from_paid(total_fee: i64, paid_amount: i64) -> Self {
        let pending_amount = total_fee - paid_amount;
        Self {
            total_fee,
            paid_amount,
            pending_amount,
            status: AdmissionStatus::for_pending(pending_amount),
        }
    }

    /// Returns true if the fee is fully paid.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, AdmissionStatus::Completed)
    }
}

/// Input for opening an admission.
#[derive(Debug, Clone)]
pub struct OpenAdmissionInput {
    /// Student being admitted.
    pub student_id: StudentId,
    /// Target batch.
    pub batch_id: BatchId,
    /// Amount paid at the counter; zero is allowed.
    pub paid_amount: i64,
    /// Channel for the opening payment.
    pub source_id: Option<PaymentSourceId>,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// Admission date, also used as the opening payment date.
    pub admission_date: NaiveDate,
}

/// Input for recording a follow-up payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentInput {
    /// Admission being paid against.
    pub admission_id: AdmissionId,
    /// Amount received.
    pub paid_amount: i64,
    /// Channel used.
    pub source_id: Option<PaymentSourceId>,
    /// Payment date.
    pub payment_date: NaiveDate,
}

/// Result of opening a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningLedger {
    /// Initial ledger figures.
    pub state: LedgerState,
    /// Amount paid beyond the fee, if any.
    pub overpaid_by: Option<i64>,
}
