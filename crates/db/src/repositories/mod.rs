//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod admission;
pub mod batch;
pub mod payment_source;
pub mod report;
pub mod student;
pub mod user;

pub use admission::{
    AdmissionDetail, AdmissionError, AdmissionRepository, LedgerWrite, Receipt, ledger_state,
    write_ledger_state,
};
pub use batch::{BatchRepoError, BatchRepository, DeletedBatch};
pub use payment_source::{AssignmentRow, BatchSource, PaymentSourceError, PaymentSourceRepository};
pub use report::ReportRepository;
pub use student::{RegisteredStudent, StudentError, StudentRepository};
pub use user::UserRepository;
