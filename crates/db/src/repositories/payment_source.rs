//! Payment source repository: sources and their per-batch ordering.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use feedesk_core::assignment::{AssignmentError, AssignmentPolicy, OrderedListPolicy};
use feedesk_core::channel::NewPaymentSource;
use feedesk_shared::types::{BatchId, PaymentSourceId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{batch_payment_sources, batches, payment_sources};

/// Error types for payment source operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentSourceError {
    /// Assignment request rejected.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    /// Payment source not found.
    #[error("Payment source not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A source offered by a batch, with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSource {
    /// 0-based position.
    pub priority: i32,
    /// The source.
    pub source: payment_sources::Model,
}

/// One row of the admin assignment listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRow {
    /// Batch ID.
    pub batch_id: Uuid,
    /// Batch code.
    pub batch_code: String,
    /// Source ID.
    pub source_id: Uuid,
    /// Source name.
    pub source_name: String,
    /// Position within the batch.
    pub priority: i32,
}

/// Payment source repository.
#[derive(Clone)]
pub struct PaymentSourceRepository {
    db: DatabaseConnection,
    policy: Arc<dyn AssignmentPolicy>,
}

impl std::fmt::Debug for PaymentSourceRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentSourceRepository").finish_non_exhaustive()
    }
}

impl PaymentSourceRepository {
    /// Creates a repository using the ordered-list policy.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_policy(db, Arc::new(OrderedListPolicy))
    }

    /// Creates a repository with a specific assignment policy.
    #[must_use]
    pub fn with_policy(db: DatabaseConnection, policy: Arc<dyn AssignmentPolicy>) -> Self {
        Self { db, policy }
    }

    /// Creates an active payment source.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: &NewPaymentSource) -> Result<payment_sources::Model, DbErr> {
        let source = payment_sources::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name.clone()),
            mode: Set(input.mode.into()),
            qr_image: Set(input.qr_image.clone()),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(source_id = %source.id, name = %source.name, mode = %input.mode, "Payment source created");
        Ok(source)
    }

    /// Lists every source, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<payment_sources::Model>, DbErr> {
        payment_sources::Entity::find()
            .order_by_asc(payment_sources::Column::CreatedAt)
            .order_by_asc(payment_sources::Column::Id)
            .all(&self.db)
            .await
    }

    /// Finds a source by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<payment_sources::Model>, DbErr> {
        payment_sources::Entity::find_by_id(id).one(&self.db).await
    }

    /// Activates or deactivates a source. Sources are never deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the source does not exist.
    pub async fn set_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<payment_sources::Model, PaymentSourceError> {
        let source = payment_sources::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PaymentSourceError::NotFound(id))?;

        let mut active: payment_sources::ActiveModel = source.into();
        active.is_active = Set(is_active);
        let source = active.update(&self.db).await?;

        tracing::info!(source_id = %id, is_active, "Payment source updated");
        Ok(source)
    }

    /// Replaces a batch's source list. The i-th id gets priority `i`.
    ///
    /// # Errors
    ///
    /// Returns `Assignment` errors for an unknown batch, an empty list, or an
    /// unknown source id; nothing is written in those cases.
    pub async fn assign_sources(
        &self,
        batch_id: Uuid,
        ordered_source_ids: &[Uuid],
    ) -> Result<Vec<BatchSource>, PaymentSourceError> {
        let txn = self.db.begin().await?;

        let batch = batches::Entity::find_by_id(batch_id).one(&txn).await?;

        let requested: Vec<PaymentSourceId> = ordered_source_ids
            .iter()
            .copied()
            .map(PaymentSourceId::from_uuid)
            .collect();
        let known: HashSet<PaymentSourceId> = if ordered_source_ids.is_empty() {
            HashSet::new()
        } else {
            payment_sources::Entity::find()
                .select_only()
                .column(payment_sources::Column::Id)
                .filter(payment_sources::Column::Id.is_in(ordered_source_ids.to_vec()))
                .into_tuple::<Uuid>()
                .all(&txn)
                .await?
                .into_iter()
                .map(PaymentSourceId::from_uuid)
                .collect()
        };

        let plan = self.policy.plan(
            batch.map(|b| BatchId::from_uuid(b.id)),
            &requested,
            &known,
        )?;

        batch_payment_sources::Entity::delete_many()
            .filter(batch_payment_sources::Column::BatchId.eq(batch_id))
            .exec(&txn)
            .await?;

        let rows: Vec<batch_payment_sources::ActiveModel> = plan
            .rows
            .iter()
            .map(|row| batch_payment_sources::ActiveModel {
                id: Set(Uuid::now_v7()),
                batch_id: Set(plan.batch_id.into_inner()),
                payment_source_id: Set(row.source_id.into_inner()),
                priority: Set(row.priority),
            })
            .collect();
        batch_payment_sources::Entity::insert_many(rows)
            .exec(&txn)
            .await?;

        let sources = sources_for_batch(&txn, batch_id).await?;
        txn.commit().await?;

        tracing::info!(batch_id = %batch_id, count = plan.rows.len(), "Payment sources assigned");
        Ok(sources)
    }

    /// Lists a batch's sources in priority order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_batch(&self, batch_id: Uuid) -> Result<Vec<BatchSource>, DbErr> {
        sources_for_batch(&self.db, batch_id).await
    }

    /// Lists every mapping ordered by batch code, then priority.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_assignments(&self) -> Result<Vec<AssignmentRow>, DbErr> {
        let mappings = batch_payment_sources::Entity::find()
            .find_also_related(batches::Entity)
            .all(&self.db)
            .await?;
        let sources = payment_sources::Entity::find().all(&self.db).await?;

        let mut rows: Vec<AssignmentRow> = mappings
            .into_iter()
            .filter_map(|(mapping, batch)| {
                let batch = batch?;
                let source = sources.iter().find(|s| s.id == mapping.payment_source_id)?;
                Some(AssignmentRow {
                    batch_id: batch.id,
                    batch_code: batch.code,
                    source_id: source.id,
                    source_name: source.name.clone(),
                    priority: mapping.priority,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            a.batch_code
                .cmp(&b.batch_code)
                .then(a.priority.cmp(&b.priority))
        });
        Ok(rows)
    }
}

/// Loads a batch's sources in priority order on any connection.
pub(crate) async fn sources_for_batch<C: ConnectionTrait>(
    conn: &C,
    batch_id: Uuid,
) -> Result<Vec<BatchSource>, DbErr> {
    let mappings = batch_payment_sources::Entity::find()
        .filter(batch_payment_sources::Column::BatchId.eq(batch_id))
        .order_by_asc(batch_payment_sources::Column::Priority)
        .find_also_related(payment_sources::Entity)
        .all(conn)
        .await?;

    Ok(mappings
        .into_iter()
        .filter_map(|(mapping, source)| {
            source.map(|source| BatchSource {
                priority: mapping.priority,
                source,
            })
        })
        .collect())
}
