//! Property-based tests for LedgerService.
//!
//! - paid + pending == total fee after every operation
//! - sum of payments == paid amount
//! - Completed iff pending == 0
//! - rejected payments leave the ledger unchanged

use proptest::prelude::*;

use super::error::LedgerError;
use super::service::LedgerService;
use super::types::AdmissionStatus;

/// Strategy for batch fees (1 to 1,000,000 minor units).
fn fee_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000i64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Opening any non-negative amount keeps the ledger balanced.
    #[test]
    fn prop_open_is_balanced(fee in fee_strategy(), paid in 0i64..2_000_000i64) {
        let opened = LedgerService::open(fee, paid).unwrap();
        prop_assert_eq!(opened.state.paid_amount + opened.state.pending_amount, fee);
        prop_assert_eq!(
            opened.state.status == AdmissionStatus::Completed,
            opened.state.pending_amount == 0
        );
        prop_assert_eq!(opened.overpaid_by.is_some(), paid > fee);
        prop_assert!(LedgerService::verify(&opened.state, &[paid]).is_ok());
    }

    /// A sequence of payments, each capped at pending, keeps every invariant.
    #[test]
    fn prop_payment_sequence_preserves_invariants(
        fee in fee_strategy(),
        opening_pct in 0i64..=100i64,
        steps in prop::collection::vec(1i64..=100i64, 0..20),
    ) {
        let opening = fee * opening_pct / 100;
        let mut state = LedgerService::open(fee, opening).unwrap().state;
        let mut payments = vec![opening];

        for pct in steps {
            if state.pending_amount == 0 {
                break;
            }
            let amount = (state.pending_amount * pct / 100).max(1);
            state = LedgerService::apply_payment(&state, amount).unwrap();
            payments.push(amount);

            prop_assert_eq!(state.paid_amount + state.pending_amount, fee);
            prop_assert!(state.pending_amount >= 0);
        }

        prop_assert!(LedgerService::verify(&state, &payments).is_ok());
        prop_assert_eq!(state.is_completed(), state.pending_amount == 0);
    }

    /// Paying more than pending is rejected with the pending amount.
    #[test]
    fn prop_overpayment_rejected(
        fee in fee_strategy(),
        paid in 0i64..1_000_000i64,
        excess in 1i64..10_000i64,
    ) {
        prop_assume!(paid <= fee);
        let state = LedgerService::open(fee, paid).unwrap().state;
        let pending = state.pending_amount;

        let result = LedgerService::apply_payment(&state, pending + excess);
        prop_assert_eq!(result, Err(LedgerError::Overpayment { pending }));
    }

    /// Paying exactly the pending amount completes the admission.
    #[test]
    fn prop_paying_pending_completes(fee in fee_strategy(), paid in 0i64..1_000_000i64) {
        prop_assume!(paid < fee);
        let state = LedgerService::open(fee, paid).unwrap().state;
        let settled = LedgerService::apply_payment(&state, state.pending_amount).unwrap();
        prop_assert_eq!(settled.status, AdmissionStatus::Completed);
        prop_assert_eq!(settled.paid_amount, fee);
    }
}
