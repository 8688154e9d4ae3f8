//! Admission repository: the persistent side of the fee ledger.
//!
//! Every ledger mutation runs in one database transaction. Payments lock the
//! admission row (`FOR UPDATE` on `PostgreSQL`) and bump its `version` with a
//! compare-and-set, so a concurrent writer surfaces as
//! `ConcurrentModification` instead of a lost update.

use std::collections::HashMap;

use chrono::Utc;
use feedesk_core::channel::{SourceRef, UNKNOWN_CHANNEL};
use feedesk_core::ledger::{
    LedgerError, LedgerService, LedgerState, OpenAdmissionInput, RecordPaymentInput,
    validate_open_admission, validate_record_payment,
};
use feedesk_shared::types::PaymentSourceId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::Expr,
};
use uuid::Uuid;

use super::payment_source::{BatchSource, sources_for_batch};
use crate::entities::{
    admissions, batch_payment_sources, batches, fee_payments, payment_sources,
    sea_orm_active_enums::{AdmissionStatus, BatchStatus},
    students,
};

/// Error types for admission operations.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    /// Ledger rule violated.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// An admission and the payment written with it.
#[derive(Debug, Clone)]
pub struct LedgerWrite {
    /// Admission after the write.
    pub admission: admissions::Model,
    /// Payment appended by the write. `None` for an opening with nothing paid.
    pub payment: Option<fee_payments::Model>,
}

/// Admission with its batch, offered sources and payments.
#[derive(Debug, Clone)]
pub struct AdmissionDetail {
    /// The admission.
    pub admission: admissions::Model,
    /// Its batch.
    pub batch: Option<batches::Model>,
    /// Sources the batch offers, in priority order.
    pub sources: Vec<BatchSource>,
    /// Payments, oldest first.
    pub payments: Vec<fee_payments::Model>,
}

/// Everything printed on a receipt.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// The payment.
    pub payment: fee_payments::Model,
    /// Paid admission.
    pub admission: admissions::Model,
    /// Paying student.
    pub student: students::Model,
    /// Admission batch.
    pub batch: Option<batches::Model>,
    /// Resolved channel label.
    pub method: String,
}

/// Admission repository.
#[derive(Debug, Clone)]
pub struct AdmissionRepository {
    db: DatabaseConnection,
}

impl AdmissionRepository {
    /// Creates a new admission repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens an admission and records the opening payment.
    ///
    /// Overpaying at opening is accepted and logged.
    ///
    /// An opening normally appends exactly one payment for `paid_amount`. A
    /// zero opening amount is the exception: it appends none, so every stored
    /// payment stays positive and the admission starts with an empty history.
    ///
    /// # Errors
    ///
    /// - `StudentNotFound` / `BatchNotFound` for unknown references
    /// - `BatchNotActive` if the batch is closed
    /// - `DuplicateAdmission` if the student is already in the batch
    /// - source errors if the channel is unknown, inactive or not offered
    pub async fn open_admission(
        &self,
        input: &OpenAdmissionInput,
    ) -> Result<LedgerWrite, AdmissionError> {
        let source_id = validate_open_admission(input)?;
        let student_id = input.student_id.into_inner();
        let batch_id = input.batch_id.into_inner();

        let txn = self.db.begin().await?;

        students::Entity::find_by_id(student_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::StudentNotFound(student_id))?;
        let batch = batches::Entity::find_by_id(batch_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::BatchNotFound(batch_id))?;
        if batch.status != BatchStatus::Active {
            return Err(LedgerError::BatchNotActive(batch_id).into());
        }

        let existing = admissions::Entity::find()
            .filter(admissions::Column::StudentId.eq(student_id))
            .filter(admissions::Column::BatchId.eq(batch_id))
            .count(&txn)
            .await?;
        if existing > 0 {
            tracing::warn!(student_id = %student_id, batch_id = %batch_id, "Duplicate admission rejected");
            return Err(LedgerError::DuplicateAdmission.into());
        }

        ensure_source_usable(&txn, source_id, batch_id).await?;

        let opened = LedgerService::open(batch.total_fee, input.paid_amount)?;
        if let Some(excess) = opened.overpaid_by {
            tracing::warn!(
                student_id = %student_id,
                batch_id = %batch_id,
                excess,
                "Admission opened with overpayment"
            );
        }

        let now = Utc::now();
        let admission = admissions::ActiveModel {
            id: Set(Uuid::now_v7()),
            student_id: Set(student_id),
            batch_id: Set(batch_id),
            total_fee: Set(opened.state.total_fee),
            paid_amount: Set(opened.state.paid_amount),
            pending_amount: Set(opened.state.pending_amount),
            remarks: Set(input
                .remarks
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(ToString::to_string)),
            admission_date: Set(input.admission_date),
            status: Set(opened.state.status.into()),
            version: Set(1),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        let payment = if input.paid_amount > 0 {
            Some(
                insert_payment(
                    &txn,
                    admission.id,
                    input.paid_amount,
                    source_id,
                    input.admission_date,
                )
                .await?,
            )
        } else {
            None
        };

        txn.commit().await?;

        tracing::info!(
            admission_id = %admission.id,
            student_id = %student_id,
            batch_id = %batch_id,
            amount = input.paid_amount,
            pending = admission.pending_amount,
            "Admission opened"
        );

        Ok(LedgerWrite { admission, payment })
    }

    /// Records a follow-up payment against an admission.
    ///
    /// Not idempotent: submitting the same payment twice records it twice.
    ///
    /// # Errors
    ///
    /// - `AdmissionNotFound` for an unknown admission
    /// - `Overpayment` if the amount exceeds the pending fee
    /// - `ConcurrentModification` if the admission changed mid-update
    /// - source errors if the channel is unknown, inactive or not offered
    pub async fn record_payment(
        &self,
        input: &RecordPaymentInput,
    ) -> Result<LedgerWrite, AdmissionError> {
        let source_id = validate_record_payment(input)?;
        let admission_id = input.admission_id.into_inner();

        let txn = self.db.begin().await?;

        let mut query = admissions::Entity::find_by_id(admission_id);
        if txn.get_database_backend() == DbBackend::Postgres {
            query = query.lock_exclusive();
        }
        let admission = query
            .one(&txn)
            .await?
            .ok_or(LedgerError::AdmissionNotFound(admission_id))?;

        ensure_source_usable(&txn, source_id, admission.batch_id).await?;

        let current = ledger_state(&admission);
        let next = LedgerService::apply_payment(&current, input.paid_amount).inspect_err(|e| {
            tracing::warn!(admission_id = %admission_id, amount = input.paid_amount, error = %e, "Payment rejected");
        })?;

        let admission = write_ledger_state(&txn, &admission, &next).await?;

        let payment = insert_payment(
            &txn,
            admission_id,
            input.paid_amount,
            source_id,
            input.payment_date,
        )
        .await?;

        txn.commit().await?;

        tracing::info!(
            admission_id = %admission_id,
            payment_id = %payment.id,
            amount = input.paid_amount,
            pending = next.pending_amount,
            "Fee payment recorded"
        );

        Ok(LedgerWrite {
            admission,
            payment: Some(payment),
        })
    }

    /// Finds an admission by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<admissions::Model>, DbErr> {
        admissions::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists an admission's payments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn payments(&self, admission_id: Uuid) -> Result<Vec<fee_payments::Model>, DbErr> {
        fee_payments::Entity::find()
            .filter(fee_payments::Column::AdmissionId.eq(admission_id))
            .order_by_asc(fee_payments::Column::CreatedAt)
            .order_by_asc(fee_payments::Column::Id)
            .all(&self.db)
            .await
    }

    /// Lists a student's admissions with batch, offered sources and payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<AdmissionDetail>, DbErr> {
        let rows = admissions::Entity::find()
            .filter(admissions::Column::StudentId.eq(student_id))
            .order_by_desc(admissions::Column::AdmissionDate)
            .order_by_desc(admissions::Column::CreatedAt)
            .find_also_related(batches::Entity)
            .all(&self.db)
            .await?;

        let mut details = Vec::with_capacity(rows.len());
        for (admission, batch) in rows {
            let sources = sources_for_batch(&self.db, admission.batch_id).await?;
            let payments = self.payments(admission.id).await?;
            details.push(AdmissionDetail {
                admission,
                batch,
                sources,
                payments,
            });
        }
        Ok(details)
    }

    /// Loads a receipt for one payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails. Returns `Ok(None)` if
    /// the payment, its admission or its student is missing.
    pub async fn find_receipt(&self, payment_id: Uuid) -> Result<Option<Receipt>, DbErr> {
        let Some((payment, Some(admission))) = fee_payments::Entity::find_by_id(payment_id)
            .find_also_related(admissions::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let Some(student) = students::Entity::find_by_id(admission.student_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let batch = batches::Entity::find_by_id(admission.batch_id)
            .one(&self.db)
            .await?;

        let names: HashMap<Uuid, String> = match payment.source_id {
            Some(id) => payment_sources::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|s| (s.id, s.name))
                .into_iter()
                .collect(),
            None => HashMap::new(),
        };
        let method = SourceRef::from_columns(payment.source_id, payment.source_label.as_deref())
            .map_or_else(|| UNKNOWN_CHANNEL.to_string(), |r| r.label(&names));

        Ok(Some(Receipt {
            payment,
            admission,
            student,
            batch,
            method,
        }))
    }

    /// Checks a stored admission against its payments.
    ///
    /// # Errors
    ///
    /// Returns `AdmissionNotFound` or `InvariantViolation`.
    pub async fn verify_ledger(&self, admission_id: Uuid) -> Result<LedgerState, AdmissionError> {
        let admission = self
            .find_by_id(admission_id)
            .await?
            .ok_or(LedgerError::AdmissionNotFound(admission_id))?;
        let amounts: Vec<i64> = self
            .payments(admission_id)
            .await?
            .iter()
            .map(|p| p.amount)
            .collect();

        let state = ledger_state(&admission);
        LedgerService::verify(&state, &amounts)?;
        Ok(state)
    }
}

/// Stores `next` on the admission if its version is still the one read.
///
/// Returns the admission as written, with the version bumped.
///
/// # Errors
///
/// Returns `ConcurrentModification` if another writer changed the row since
/// `admission` was loaded; nothing is written in that case.
pub async fn write_ledger_state<C: ConnectionTrait>(
    conn: &C,
    admission: &admissions::Model,
    next: &LedgerState,
) -> Result<admissions::Model, AdmissionError> {
    let status: AdmissionStatus = next.status.into();
    let updated = admissions::Entity::update_many()
        .col_expr(admissions::Column::PaidAmount, Expr::value(next.paid_amount))
        .col_expr(
            admissions::Column::PendingAmount,
            Expr::value(next.pending_amount),
        )
        .col_expr(admissions::Column::Status, Expr::value(status))
        .col_expr(
            admissions::Column::Version,
            Expr::value(admission.version + 1),
        )
        .filter(admissions::Column::Id.eq(admission.id))
        .filter(admissions::Column::Version.eq(admission.version))
        .exec(conn)
        .await?;
    if updated.rows_affected == 0 {
        tracing::warn!(admission_id = %admission.id, version = admission.version, "Stale admission version");
        return Err(LedgerError::ConcurrentModification.into());
    }

    Ok(admissions::Model {
        paid_amount: next.paid_amount,
        pending_amount: next.pending_amount,
        status,
        version: admission.version + 1,
        ..admission.clone()
    })
}

/// Ledger figures of a stored admission.
#[must_use]
pub fn ledger_state(admission: &admissions::Model) -> LedgerState {
    LedgerState {
        total_fee: admission.total_fee,
        paid_amount: admission.paid_amount,
        pending_amount: admission.pending_amount,
        status: admission.status.into(),
    }
}

/// Rejects unknown, inactive, or not-offered sources.
async fn ensure_source_usable<C: ConnectionTrait>(
    conn: &C,
    source_id: PaymentSourceId,
    batch_id: Uuid,
) -> Result<(), AdmissionError> {
    let id = source_id.into_inner();
    let source = payment_sources::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(LedgerError::UnknownPaymentSource(id))?;
    if !source.is_active {
        return Err(LedgerError::PaymentSourceInactive(id).into());
    }

    let offered = batch_payment_sources::Entity::find()
        .filter(batch_payment_sources::Column::BatchId.eq(batch_id))
        .filter(batch_payment_sources::Column::PaymentSourceId.eq(id))
        .count(conn)
        .await?;
    if offered == 0 {
        return Err(LedgerError::SourceNotOfferedForBatch(id).into());
    }
    Ok(())
}

async fn insert_payment<C: ConnectionTrait>(
    conn: &C,
    admission_id: Uuid,
    amount: i64,
    source_id: PaymentSourceId,
    payment_date: chrono::NaiveDate,
) -> Result<fee_payments::Model, DbErr> {
    let (source_id, source_label) = SourceRef::SourceId(source_id.into_inner()).into_columns();
    fee_payments::ActiveModel {
        id: Set(Uuid::now_v7()),
        admission_id: Set(admission_id),
        amount: Set(amount),
        payment_date: Set(payment_date),
        source_id: Set(source_id),
        source_label: Set(source_label),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await
}
