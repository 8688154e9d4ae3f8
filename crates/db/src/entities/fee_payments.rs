//! `SeaORM` Entity for fee_payments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fee_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub admission_id: Uuid,
    pub amount: i64,
    pub payment_date: Date,
    /// Set for payments recorded through a payment source.
    pub source_id: Option<Uuid>,
    /// Free-text channel for rows without a source id.
    pub source_label: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::admissions::Entity",
        from = "Column::AdmissionId",
        to = "super::admissions::Column::Id"
    )]
    Admissions,
}

impl Related<super::admissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
