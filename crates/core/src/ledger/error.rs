//! Ledger error types for validation and state errors.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// No payment source was chosen.
    #[error("Payment method is required.")]
    MissingPaymentSource,

    /// Opening payment below zero.
    #[error("Paid amount cannot be negative")]
    NegativeAmount,

    /// Follow-up payment of zero or less.
    #[error("Payment amount must be positive")]
    NonPositiveAmount,

    /// Payment source id does not exist.
    #[error("Unknown payment source: {0}")]
    UnknownPaymentSource(Uuid),

    /// Payment source exists but has been deactivated.
    #[error("Payment source {0} is inactive")]
    PaymentSourceInactive(Uuid),

    /// Payment source is not assigned to the admission's batch.
    #[error("Payment source {0} is not enabled for this batch")]
    SourceNotOfferedForBatch(Uuid),

    /// Batch no longer accepts admissions.
    #[error("Batch {0} is not open for admissions")]
    BatchNotActive(Uuid),

    // ========== Ledger Rule Errors ==========
    /// An admission already exists for this student and batch.
    #[error("Student is already admitted to this batch.")]
    DuplicateAdmission,

    /// Payment larger than the pending amount.
    #[error("Amount exceeds pending fee (₹{pending})")]
    Overpayment {
        /// Pending amount at the time of the attempt.
        pending: i64,
    },

    /// Stored ledger does not satisfy its invariants.
    #[error("Ledger invariant violated: {0}")]
    InvariantViolation(String),

    // ========== Lookup Errors ==========
    /// Student not found.
    #[error("Student not found: {0}")]
    StudentNotFound(Uuid),

    /// Batch not found.
    #[error("Batch not found: {0}")]
    BatchNotFound(Uuid),

    /// Admission not found.
    #[error("Admission not found: {0}")]
    AdmissionNotFound(Uuid),

    // ========== Concurrency Errors ==========
    /// The admission changed between read and update.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPaymentSource => "PAYMENT_SOURCE_REQUIRED",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::UnknownPaymentSource(_) => "UNKNOWN_PAYMENT_SOURCE",
            Self::PaymentSourceInactive(_) => "PAYMENT_SOURCE_INACTIVE",
            Self::SourceNotOfferedForBatch(_) => "PAYMENT_SOURCE_NOT_OFFERED",
            Self::BatchNotActive(_) => "BATCH_NOT_ACTIVE",
            Self::DuplicateAdmission => "DUPLICATE_ADMISSION",
            Self::Overpayment { .. } => "OVERPAYMENT",
            Self::InvariantViolation(_) => "LEDGER_INVARIANT_VIOLATION",
            Self::StudentNotFound(_) => "STUDENT_NOT_FOUND",
            Self::BatchNotFound(_) => "BATCH_NOT_FOUND",
            Self::AdmissionNotFound(_) => "ADMISSION_NOT_FOUND",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - form input errors
            Self::MissingPaymentSource
            | Self::NegativeAmount
            | Self::NonPositiveAmount
            | Self::UnknownPaymentSource(_)
            | Self::PaymentSourceInactive(_)
            | Self::SourceNotOfferedForBatch(_)
            | Self::BatchNotActive(_) => 400,

            // 404 Not Found
            Self::StudentNotFound(_) | Self::BatchNotFound(_) | Self::AdmissionNotFound(_) => 404,

            // 409 Conflict
            Self::DuplicateAdmission | Self::ConcurrentModification => 409,

            // 422 Unprocessable - ledger rule
            Self::Overpayment { .. } => 422,

            // 500 Internal Server Error
            Self::InvariantViolation(_) => 500,
        }
    }

    /// Returns true if the caller may simply resubmit.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overpayment_message_includes_pending() {
        let err = LedgerError::Overpayment { pending: 6000 };
        assert_eq!(err.to_string(), "Amount exceeds pending fee (₹6000)");
        assert_eq!(err.error_code(), "OVERPAYMENT");
        assert_eq!(err.http_status_code(), 422);
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::MissingPaymentSource.http_status_code(), 400);
        assert_eq!(LedgerError::DuplicateAdmission.http_status_code(), 409);
        assert_eq!(
            LedgerError::AdmissionNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::InvariantViolation("x".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            LedgerError::MissingPaymentSource.to_string(),
            "Payment method is required."
        );
        assert_eq!(
            LedgerError::DuplicateAdmission.to_string(),
            "Student is already admitted to this batch."
        );
    }

    #[test]
    fn test_retryable_errors() {
        assert!(LedgerError::ConcurrentModification.is_retryable());
        assert!(!LedgerError::Overpayment { pending: 1 }.is_retryable());
        assert!(!LedgerError::DuplicateAdmission.is_retryable());
    }
}
