//! `SeaORM` Entity for payment_sources table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PaymentMode;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_sources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub mode: PaymentMode,
    pub qr_image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::batch_payment_sources::Entity")]
    BatchPaymentSources,
}

impl Related<super::batch_payment_sources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchPaymentSources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
