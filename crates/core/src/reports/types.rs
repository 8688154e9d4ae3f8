//! Report data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::channel::SourceRef;

/// Batch row used as the outer side of the per-batch summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRow {
    /// Batch ID.
    pub batch_id: Uuid,
    /// Batch code.
    pub code: String,
    /// Course name.
    pub course_name: String,
}

/// Admission figures needed for aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionRow {
    /// Admission ID.
    pub admission_id: Uuid,
    /// Owning batch.
    pub batch_id: Uuid,
    /// Paid so far.
    pub paid_amount: i64,
    /// Still pending.
    pub pending_amount: i64,
}

/// Fee payment figures needed for aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRow {
    /// Payment ID.
    pub payment_id: Uuid,
    /// Batch of the paid admission.
    pub batch_id: Uuid,
    /// Amount received.
    pub amount: i64,
    /// Channel reference, if recorded.
    pub source: Option<SourceRef>,
}

/// Headline totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    /// Sum of every fee payment.
    pub total_collected: i64,
    /// Sum of every admission's pending amount.
    pub total_pending: i64,
}

/// Per-batch admission statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Batch ID.
    pub batch_id: Uuid,
    /// Batch code.
    pub code: String,
    /// Course name.
    pub course_name: String,
    /// Number of admissions.
    pub student_count: u64,
    /// Sum of paid amounts.
    pub paid_total: i64,
    /// Sum of pending amounts.
    pub pending_total: i64,
}

/// Amount collected through one channel for one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBreakdown {
    /// Batch ID.
    pub batch_id: Uuid,
    /// Batch code, or the raw id when the batch is gone.
    pub batch_code: String,
    /// Channel the row groups by; `None` for payments without one.
    pub source: Option<SourceRef>,
    /// Resolved channel label. Distinct sources may share a label.
    pub method: String,
    /// Sum of amounts.
    pub amount: i64,
}

/// Admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Headline totals.
    pub totals: DashboardTotals,
    /// One entry per batch, newest batch first as loaded.
    pub batches: Vec<BatchSummary>,
    /// Collection per batch and channel.
    pub methods: Vec<MethodBreakdown>,
}

/// Admission line in the daily report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAdmission {
    /// Admission ID.
    pub admission_id: Uuid,
    /// Student code.
    pub student_code: String,
    /// Student name.
    pub student_name: String,
    /// Batch code.
    pub batch_code: String,
    /// Fee snapshot.
    pub total_fee: i64,
    /// Paid so far.
    pub paid_amount: i64,
    /// Still pending.
    pub pending_amount: i64,
    /// Admission date.
    pub admission_date: NaiveDate,
}

/// Payment line in the daily report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPayment {
    /// Payment ID.
    pub payment_id: Uuid,
    /// Paid admission.
    pub admission_id: Uuid,
    /// Student name.
    pub student_name: String,
    /// Batch code.
    pub batch_code: String,
    /// Amount received.
    pub amount: i64,
    /// Resolved channel label.
    pub method: String,
    /// Payment date.
    pub payment_date: NaiveDate,
}

/// Admissions and payments of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Report date.
    pub date: NaiveDate,
    /// Admissions opened that day.
    pub admissions: Vec<DailyAdmission>,
    /// Payments received that day.
    pub payments: Vec<DailyPayment>,
    /// Sum of `payments`.
    pub total_collected: i64,
}
