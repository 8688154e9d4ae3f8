//! String-backed enums shared by several entities.
//!
//! Stored as short strings so the schema stays portable across backends.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use feedesk_core::auth::UserRole as CoreUserRole;
use feedesk_core::batch::BatchStatus as CoreBatchStatus;
use feedesk_core::channel::PaymentMode as CorePaymentMode;
use feedesk_core::ledger::AdmissionStatus as CoreAdmissionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "reception")]
    Reception,
    #[sea_orm(string_value = "student")]
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BatchStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Closed")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PaymentMode {
    #[sea_orm(string_value = "CASH")]
    Cash,
    #[sea_orm(string_value = "QR")]
    Qr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AdmissionStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Completed")]
    Completed,
}

impl From<CoreUserRole> for UserRole {
    fn from(role: CoreUserRole) -> Self {
        match role {
            CoreUserRole::Admin => Self::Admin,
            CoreUserRole::Reception => Self::Reception,
            CoreUserRole::Student => Self::Student,
        }
    }
}

impl From<UserRole> for CoreUserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Reception => Self::Reception,
            UserRole::Student => Self::Student,
        }
    }
}

impl From<CoreBatchStatus> for BatchStatus {
    fn from(status: CoreBatchStatus) -> Self {
        match status {
            CoreBatchStatus::Active => Self::Active,
            CoreBatchStatus::Closed => Self::Closed,
        }
    }
}

impl From<CorePaymentMode> for PaymentMode {
    fn from(mode: CorePaymentMode) -> Self {
        match mode {
            CorePaymentMode::Cash => Self::Cash,
            CorePaymentMode::Qr => Self::Qr,
        }
    }
}

impl From<CoreAdmissionStatus> for AdmissionStatus {
    fn from(status: CoreAdmissionStatus) -> Self {
        match status {
            CoreAdmissionStatus::Active => Self::Active,
            CoreAdmissionStatus::Completed => Self::Completed,
        }
    }
}

impl From<AdmissionStatus> for CoreAdmissionStatus {
    fn from(status: AdmissionStatus) -> Self {
        match status {
            AdmissionStatus::Active => Self::Active,
            AdmissionStatus::Completed => Self::Completed,
        }
    }
}
