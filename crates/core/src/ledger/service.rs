//! Ledger service for admission fee state transitions.
//!
//! Pure functions over [`LedgerState`]; persistence applies the returned
//! state together with the appended fee payment in one transaction.

use super::error::LedgerError;
use super::types::{AdmissionStatus, LedgerState, OpeningLedger};

/// Ledger service for admission fee bookkeeping.
pub struct LedgerService;

impl LedgerService {
    /// Opens a ledger for a new admission.
    ///
    /// `pending = total_fee - paid_amount`. Paying more than the fee at
    /// opening is accepted; the excess is reported in `overpaid_by` and the
    /// admission stays `Active` with a negative pending amount.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `paid_amount < 0`.
    pub fn open(total_fee: i64, paid_amount: i64) -> Result<OpeningLedger, LedgerError> {
        if paid_amount < 0 {
            return Err(LedgerError::NegativeAmount);
        }
        let pending_amount = total_fee
            .checked_sub(paid_amount)
            .ok_or_else(|| LedgerError::InvariantViolation("fee arithmetic overflow".into()))?;

        let overpaid_by = (pending_amount < 0).then(|| -pending_amount);

        Ok(OpeningLedger {
            state: LedgerState {
                total_fee,
                paid_amount,
                pending_amount,
                status: AdmissionStatus::for_pending(pending_amount),
            },
            overpaid_by,
        })
    }

    /// Applies a follow-up payment to an existing ledger.
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` if `amount <= 0`
    /// - `Overpayment` if `amount` exceeds the pending amount
    pub fn apply_payment(state: &LedgerState, amount: i64) -> Result<LedgerState, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        if amount > state.pending_amount {
            return Err(LedgerError::Overpayment {
                pending: state.pending_amount,
            });
        }

        let paid_amount = state
            .paid_amount
            .checked_add(amount)
            .ok_or_else(|| LedgerError::InvariantViolation("fee arithmetic overflow".into()))?;
        let pending_amount = state.pending_amount - amount;

        Ok(LedgerState {
            total_fee: state.total_fee,
            paid_amount,
            pending_amount,
            status: AdmissionStatus::for_pending(pending_amount),
        })
    }

    /// Checks a stored ledger against its payments.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` describing the first broken rule.
    pub fn verify(state: &LedgerState, payment_amounts: &[i64]) -> Result<(), LedgerError> {
        if state.paid_amount + state.pending_amount != state.total_fee {
            return Err(LedgerError::InvariantViolation(format!(
                "paid {} + pending {} != total fee {}",
                state.paid_amount, state.pending_amount, state.total_fee
            )));
        }

        if state.status != AdmissionStatus::for_pending(state.pending_amount) {
            return Err(LedgerError::InvariantViolation(format!(
                "status {} does not match pending {}",
                state.status, state.pending_amount
            )));
        }

        if payment_amounts.iter().any(|amount| *amount < 0) {
            return Err(LedgerError::InvariantViolation(
                "negative fee payment".into(),
            ));
        }

        let paid_total: i64 = payment_amounts.iter().sum();
        if paid_total != state.paid_amount {
            return Err(LedgerError::InvariantViolation(format!(
                "payments sum {paid_total} != paid {}",
                state.paid_amount
            )));
        }

        Ok(())
    }
}
