//! Response bodies shared by several route modules.

use chrono::{DateTime, FixedOffset, NaiveDate};
use feedesk_db::entities::{admissions, batches, fee_payments, payment_sources, students};
use feedesk_db::repositories::{AdmissionDetail, AssignmentRow, BatchSource, LedgerWrite, Receipt};
use sea_orm::ActiveEnum;
use serde::Serialize;
use uuid::Uuid;

/// Batch.
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    /// Batch ID.
    pub id: Uuid,
    /// Unique code.
    pub code: String,
    /// Course name.
    pub course_name: String,
    /// Fee in minor units.
    pub total_fee: i64,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: Option<NaiveDate>,
    /// `Active` or `Closed`.
    pub status: String,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
}

impl From<batches::Model> for BatchResponse {
    fn from(b: batches::Model) -> Self {
        Self {
            id: b.id,
            code: b.code,
            course_name: b.course_name,
            total_fee: b.total_fee,
            start_date: b.start_date,
            end_date: b.end_date,
            status: b.status.to_value(),
            created_at: b.created_at,
        }
    }
}

/// Payment source.
#[derive(Debug, Serialize)]
pub struct PaymentSourceResponse {
    /// Source ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// `CASH` or `QR`.
    pub mode: String,
    /// QR image reference.
    pub qr_image: Option<String>,
    /// Accepts new payments.
    pub is_active: bool,
}

impl From<payment_sources::Model> for PaymentSourceResponse {
    fn from(s: payment_sources::Model) -> Self {
        Self {
            id: s.id,
            name: s.name,
            mode: s.mode.to_value(),
            qr_image: s.qr_image,
            is_active: s.is_active,
        }
    }
}

/// Source offered by a batch.
#[derive(Debug, Serialize)]
pub struct BatchSourceResponse {
    /// 0-based position.
    pub priority: i32,
    /// The source.
    #[serde(flatten)]
    pub source: PaymentSourceResponse,
}

impl From<BatchSource> for BatchSourceResponse {
    fn from(s: BatchSource) -> Self {
        Self {
            priority: s.priority,
            source: s.source.into(),
        }
    }
}

/// One batch-to-source mapping.
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    /// Batch ID.
    pub batch_id: Uuid,
    /// Batch code.
    pub batch_code: String,
    /// Source ID.
    pub payment_source_id: Uuid,
    /// Source name.
    pub payment_source_name: String,
    /// Position.
    pub priority: i32,
}

impl From<AssignmentRow> for AssignmentResponse {
    fn from(r: AssignmentRow) -> Self {
        Self {
            batch_id: r.batch_id,
            batch_code: r.batch_code,
            payment_source_id: r.source_id,
            payment_source_name: r.source_name,
            priority: r.priority,
        }
    }
}

/// Student.
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    /// Student ID.
    pub id: Uuid,
    /// Public code, `STD...`.
    pub student_code: String,
    /// Full name.
    pub name: String,
    /// Mobile number.
    pub mobile: String,
    /// Email.
    pub email: String,
    /// Registration time.
    pub created_at: DateTime<FixedOffset>,
}

impl From<students::Model> for StudentResponse {
    fn from(s: students::Model) -> Self {
        Self {
            id: s.id,
            student_code: s.student_code,
            name: s.name,
            mobile: s.mobile,
            email: s.email,
            created_at: s.created_at,
        }
    }
}

/// Admission ledger.
#[derive(Debug, Serialize)]
pub struct AdmissionResponse {
    /// Admission ID.
    pub id: Uuid,
    /// Student.
    pub student_id: Uuid,
    /// Batch.
    pub batch_id: Uuid,
    /// Fee snapshot.
    pub total_fee: i64,
    /// Paid so far.
    pub paid_amount: i64,
    /// Still pending.
    pub pending_amount: i64,
    /// Remarks.
    pub remarks: Option<String>,
    /// Admission date.
    pub admission_date: NaiveDate,
    /// `Active` or `Completed`.
    pub status: String,
}

impl From<admissions::Model> for AdmissionResponse {
    fn from(a: admissions::Model) -> Self {
        Self {
            id: a.id,
            student_id: a.student_id,
            batch_id: a.batch_id,
            total_fee: a.total_fee,
            paid_amount: a.paid_amount,
            pending_amount: a.pending_amount,
            remarks: a.remarks,
            admission_date: a.admission_date,
            status: a.status.to_value(),
        }
    }
}

/// Fee payment.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Payment ID.
    pub id: Uuid,
    /// Paid admission.
    pub admission_id: Uuid,
    /// Amount.
    pub amount: i64,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Source used.
    pub payment_source_id: Option<Uuid>,
    /// Free-text channel for legacy rows.
    pub payment_label: Option<String>,
}

impl From<fee_payments::Model> for PaymentResponse {
    fn from(p: fee_payments::Model) -> Self {
        Self {
            id: p.id,
            admission_id: p.admission_id,
            amount: p.amount,
            payment_date: p.payment_date,
            payment_source_id: p.source_id,
            payment_label: p.source_label,
        }
    }
}

/// Result of opening an admission or recording a payment.
#[derive(Debug, Serialize)]
pub struct LedgerWriteResponse {
    /// Admission after the write.
    pub admission: AdmissionResponse,
    /// Payment written, if any.
    pub payment: Option<PaymentResponse>,
}

impl From<LedgerWrite> for LedgerWriteResponse {
    fn from(w: LedgerWrite) -> Self {
        Self {
            admission: w.admission.into(),
            payment: w.payment.map(Into::into),
        }
    }
}

/// Admission with its batch, offered sources and payments.
#[derive(Debug, Serialize)]
pub struct AdmissionDetailResponse {
    /// Admission.
    pub admission: AdmissionResponse,
    /// Batch.
    pub batch: Option<BatchResponse>,
    /// Sources offered by the batch, in priority order.
    pub payment_sources: Vec<BatchSourceResponse>,
    /// Payments, oldest first.
    pub payments: Vec<PaymentResponse>,
}

impl From<AdmissionDetail> for AdmissionDetailResponse {
    fn from(d: AdmissionDetail) -> Self {
        Self {
            admission: d.admission.into(),
            batch: d.batch.map(Into::into),
            payment_sources: d.sources.into_iter().map(Into::into).collect(),
            payments: d.payments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Fee receipt.
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    /// Payment.
    pub payment: PaymentResponse,
    /// Admission after all payments so far.
    pub admission: AdmissionResponse,
    /// Student.
    pub student: StudentResponse,
    /// Batch.
    pub batch: Option<BatchResponse>,
    /// Resolved channel label.
    pub method: String,
}

impl From<Receipt> for ReceiptResponse {
    fn from(r: Receipt) -> Self {
        Self {
            payment: r.payment.into(),
            admission: r.admission.into(),
            student: r.student.into(),
            batch: r.batch.map(Into::into),
            method: r.method,
        }
    }
}
