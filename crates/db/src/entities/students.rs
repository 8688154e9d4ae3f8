//! `SeaORM` Entity for students table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub student_code: String,
    pub name: String,
    #[sea_orm(unique)]
    pub mobile: String,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::admissions::Entity")]
    Admissions,
}

impl Related<super::admissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
