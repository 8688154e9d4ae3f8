//! `SeaORM` Entity for batches table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::BatchStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub course_name: String,
    pub total_fee: i64,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub status: BatchStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::admissions::Entity")]
    Admissions,
    #[sea_orm(has_many = "super::batch_payment_sources::Entity")]
    BatchPaymentSources,
}

impl Related<super::admissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admissions.def()
    }
}

impl Related<super::batch_payment_sources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchPaymentSources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
