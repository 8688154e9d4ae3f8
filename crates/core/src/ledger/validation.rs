//! Field validation run before any ledger write.

use feedesk_shared::types::PaymentSourceId;

use super::error::LedgerError;
use super::types::{OpenAdmissionInput, RecordPaymentInput};

/// Validates an opening payment and returns the chosen source.
///
/// # Errors
///
/// Returns `NegativeAmount` or `MissingPaymentSource`.
pub fn validate_open_admission(input: &OpenAdmissionInput) -> Result<PaymentSourceId, LedgerError> {
    if input.paid_amount < 0 {
        return Err(LedgerError::NegativeAmount);
    }
    input.source_id.ok_or(LedgerError::MissingPaymentSource)
}

/// Validates a follow-up payment and returns the chosen source.
///
/// # Errors
///
/// Returns `NonPositiveAmount` or `MissingPaymentSource`.
pub fn validate_record_payment(input: &RecordPaymentInput) -> Result<PaymentSourceId, LedgerError> {
    if input.paid_amount <= 0 {
        return Err(LedgerError::NonPositiveAmount);
    }
    input.source_id.ok_or(LedgerError::MissingPaymentSource)
}
