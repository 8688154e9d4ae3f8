//! Batch repository: creation, listing and cascading deletion.

use chrono::Utc;
use feedesk_core::batch::{BatchStatus as CoreBatchStatus, NewBatch};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    admissions, batch_payment_sources, batches, fee_payments, sea_orm_active_enums::BatchStatus,
};

/// Error types for batch operations.
#[derive(Debug, thiserror::Error)]
pub enum BatchRepoError {
    /// Batch not found.
    #[error("Batch not found: {0}")]
    NotFound(Uuid),

    /// Another batch already uses this code.
    #[error("Batch code already exists: {0}")]
    DuplicateCode(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Row counts removed by [`BatchRepository::delete`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletedBatch {
    /// `batch_payment_sources` rows.
    pub mappings: u64,
    /// `fee_payments` rows.
    pub payments: u64,
    /// `admissions` rows.
    pub admissions: u64,
}

/// Batch repository.
#[derive(Debug, Clone)]
pub struct BatchRepository {
    db: DatabaseConnection,
}

impl BatchRepository {
    /// Creates a new batch repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active batch.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` if the code is taken.
    pub async fn create(&self, input: &NewBatch) -> Result<batches::Model, BatchRepoError> {
        let batch = batches::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set(input.code.clone()),
            course_name: Set(input.course_name.clone()),
            total_fee: Set(input.total_fee),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            status: Set(BatchStatus::Active),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                BatchRepoError::DuplicateCode(input.code.clone())
            }
            _ => BatchRepoError::Database(e),
        })?;

        tracing::info!(batch_id = %batch.id, code = %batch.code, fee = batch.total_fee, "Batch created");
        Ok(batch)
    }

    /// Lists every batch, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<batches::Model>, DbErr> {
        batches::Entity::find()
            .order_by_desc(batches::Column::CreatedAt)
            .order_by_desc(batches::Column::Id)
            .all(&self.db)
            .await
    }

    /// Lists batches open for admissions, by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<batches::Model>, DbErr> {
        batches::Entity::find()
            .filter(batches::Column::Status.eq(BatchStatus::Active))
            .order_by_asc(batches::Column::Code)
            .all(&self.db)
            .await
    }

    /// Finds a batch by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<batches::Model>, DbErr> {
        batches::Entity::find_by_id(id).one(&self.db).await
    }

    /// Opens or closes a batch for new admissions.
    ///
    /// Existing admissions keep taking payments either way.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the batch does not exist.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: CoreBatchStatus,
    ) -> Result<batches::Model, BatchRepoError> {
        let batch = batches::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BatchRepoError::NotFound(id))?;

        let mut active: batches::ActiveModel = batch.into();
        active.status = Set(status.into());
        let batch = active.update(&self.db).await?;

        tracing::info!(batch_id = %id, status = %status, "Batch status updated");
        Ok(batch)
    }

    /// Deletes a batch and everything hanging off it in one transaction.
    ///
    /// Order: source mappings, fee payments of its admissions, admissions,
    /// the batch itself.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the batch does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<DeletedBatch, BatchRepoError> {
        let txn = self.db.begin().await?;

        batches::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(BatchRepoError::NotFound(id))?;

        let mappings = batch_payment_sources::Entity::delete_many()
            .filter(batch_payment_sources::Column::BatchId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let admission_ids: Vec<Uuid> = admissions::Entity::find()
            .select_only()
            .column(admissions::Column::Id)
            .filter(admissions::Column::BatchId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        let payments = if admission_ids.is_empty() {
            0
        } else {
            fee_payments::Entity::delete_many()
                .filter(fee_payments::Column::AdmissionId.is_in(admission_ids))
                .exec(&txn)
                .await?
                .rows_affected
        };

        let admissions = admissions::Entity::delete_many()
            .filter(admissions::Column::BatchId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        batches::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            batch_id = %id,
            mappings,
            payments,
            admissions,
            "Batch deleted"
        );

        Ok(DeletedBatch {
            mappings,
            payments,
            admissions,
        })
    }
}
