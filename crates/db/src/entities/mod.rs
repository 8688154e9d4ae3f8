//! `SeaORM` entity definitions.

pub mod prelude;

pub mod admissions;
pub mod batch_payment_sources;
pub mod batches;
pub mod fee_payments;
pub mod payment_sources;
pub mod sea_orm_active_enums;
pub mod students;
pub mod users;
