//! `SeaORM` Entity for batch_payment_sources table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "batch_payment_sources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub batch_id: Uuid,
    pub payment_source_id: Uuid,
    pub priority: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::batches::Entity",
        from = "Column::BatchId",
        to = "super::batches::Column::Id"
    )]
    Batches,
    #[sea_orm(
        belongs_to = "super::payment_sources::Entity",
        from = "Column::PaymentSourceId",
        to = "super::payment_sources::Column::Id"
    )]
    PaymentSources,
}

impl Related<super::batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batches.def()
    }
}

impl Related<super::payment_sources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentSources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
