//! Admission fee ledger.
//!
//! An admission carries `total_fee`, `paid_amount` and `pending_amount`, and
//! owns an append-only list of fee payments. This module holds the pure rules:
//! - Domain types for opening an admission and recording a payment
//! - Field validation performed before any write
//! - State transitions that keep `paid + pending == total_fee`
//! - Error types for ledger operations

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{
    AdmissionStatus, LedgerState, OpenAdmissionInput, OpeningLedger, RecordPaymentInput,
};
pub use validation::{validate_open_admission, validate_record_payment};
