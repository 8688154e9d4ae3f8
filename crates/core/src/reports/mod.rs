//! Collection and outstanding-fee reports.
//!
//! Pure aggregation over rows loaded by the repository layer:
//! - Dashboard totals (collected, outstanding)
//! - Per-batch summaries, including batches without admissions
//! - Per-batch payment-method breakdown
//! - Daily admissions and payments report

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
