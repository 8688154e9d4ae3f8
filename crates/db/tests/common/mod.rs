//! Shared setup for repository integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use feedesk_core::batch::NewBatch;
use feedesk_core::channel::NewPaymentSource;
use feedesk_core::registration::NewStudent;
use feedesk_db::entities::{batches, payment_sources, students};
use feedesk_db::migration::{Migrator, MigratorTrait};
use feedesk_db::{BatchRepository, PaymentSourceRepository, StudentRepository};
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with the real schema.
///
/// A single pooled connection keeps the in-memory database alive for the
/// whole test.
pub async fn setup_db() -> DatabaseConnection {
    let db = feedesk_db::connect_with_pool("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to connect to sqlite");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).expect("valid date")
}

pub async fn create_student(db: &DatabaseConnection, name: &str, mobile: &str) -> students::Model {
    let input = NewStudent::parse(name, mobile, &format!("{mobile}@example.com"))
        .expect("valid student");
    StudentRepository::new(db.clone())
        .register(&input, "$argon2id$test_hash")
        .await
        .expect("Failed to register student")
        .student
}

pub async fn create_batch(db: &DatabaseConnection, code: &str, fee: i64) -> batches::Model {
    let input = NewBatch::parse(code, "Full Stack", fee, date(1, 1), None).expect("valid batch");
    BatchRepository::new(db.clone())
        .create(&input)
        .await
        .expect("Failed to create batch")
}

pub async fn create_cash(db: &DatabaseConnection, name: &str) -> payment_sources::Model {
    let input = NewPaymentSource::parse(name, "CASH", None).expect("valid source");
    PaymentSourceRepository::new(db.clone())
        .create(&input)
        .await
        .expect("Failed to create source")
}

pub async fn create_qr(db: &DatabaseConnection, name: &str) -> payment_sources::Model {
    let input = NewPaymentSource::parse(name, "QR", Some("qr/code.png")).expect("valid source");
    PaymentSourceRepository::new(db.clone())
        .create(&input)
        .await
        .expect("Failed to create source")
}

/// Batch with a single CASH source assigned.
pub async fn batch_with_cash(
    db: &DatabaseConnection,
    code: &str,
    fee: i64,
) -> (batches::Model, payment_sources::Model) {
    let batch = create_batch(db, code, fee).await;
    let cash = create_cash(db, &format!("{code} cash")).await;
    PaymentSourceRepository::new(db.clone())
        .assign_sources(batch.id, &[cash.id])
        .await
        .expect("Failed to assign");
    (batch, cash)
}
