//! Entity prelude.

pub use super::admissions::Entity as Admissions;
pub use super::batch_payment_sources::Entity as BatchPaymentSources;
pub use super::batches::Entity as Batches;
pub use super::fee_payments::Entity as FeePayments;
pub use super::payment_sources::Entity as PaymentSources;
pub use super::students::Entity as Students;
pub use super::users::Entity as Users;
