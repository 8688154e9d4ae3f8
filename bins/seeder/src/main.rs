//! Database seeder for Feedesk development and testing.
//!
//! Seeds an admin and a reception login, a cash counter, and one sample
//! batch that offers it. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use feedesk_core::auth::{UserRole, hash_password};
use feedesk_core::batch::NewBatch;
use feedesk_core::channel::{NewPaymentSource, PaymentMode};
use feedesk_db::entities::sea_orm_active_enums::PaymentMode as DbPaymentMode;
use feedesk_db::{BatchRepository, PaymentSourceRepository, UserRepository};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

const ADMIN_EMAIL: &str = "admin@feedesk.local";
const RECEPTION_EMAIL: &str = "reception@feedesk.local";
const CASH_SOURCE_NAME: &str = "Front Desk Cash";
const SAMPLE_BATCH_CODE: &str = "FSD-2026-01";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let default_password =
        std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "feedesk123".to_string());

    println!("Connecting to database...");
    let db = feedesk_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding staff users...");
    seed_user(&db, ADMIN_EMAIL, &default_password, UserRole::Admin).await?;
    seed_user(&db, RECEPTION_EMAIL, &default_password, UserRole::Reception).await?;

    println!("Seeding payment sources...");
    let cash_id = seed_cash_source(&db).await?;

    println!("Seeding sample batch...");
    seed_sample_batch(&db, cash_id).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Creates a staff login unless the email is taken.
async fn seed_user(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    role: UserRole,
) -> anyhow::Result<()> {
    let users = UserRepository::new(db.clone());
    if users.email_exists(email).await? {
        println!("  {email} already exists, skipping...");
        return Ok(());
    }

    let hash = hash_password(password).context("Failed to hash seed password")?;
    users.create(email, &hash, role.into()).await?;
    println!("  Created {role} user: {email}");
    Ok(())
}

/// Returns the id of the seeded cash source, creating it if needed.
async fn seed_cash_source(db: &DatabaseConnection) -> anyhow::Result<Uuid> {
    let sources = PaymentSourceRepository::new(db.clone());
    if let Some(existing) = sources
        .list()
        .await?
        .into_iter()
        .find(|s| s.name == CASH_SOURCE_NAME && s.mode == DbPaymentMode::Cash)
    {
        println!("  {CASH_SOURCE_NAME} already exists, skipping...");
        return Ok(existing.id);
    }

    let input = NewPaymentSource::parse(CASH_SOURCE_NAME, PaymentMode::Cash.as_str(), None)?;
    let source = sources.create(&input).await?;
    println!("  Created payment source: {CASH_SOURCE_NAME}");
    Ok(source.id)
}

/// Creates the sample batch and offers the cash source on it.
async fn seed_sample_batch(db: &DatabaseConnection, cash_id: Uuid) -> anyhow::Result<()> {
    let batches = BatchRepository::new(db.clone());
    if batches
        .list()
        .await?
        .iter()
        .any(|b| b.code == SAMPLE_BATCH_CODE)
    {
        println!("  {SAMPLE_BATCH_CODE} already exists, skipping...");
        return Ok(());
    }

    let start = NaiveDate::from_ymd_opt(2026, 1, 5).context("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2026, 6, 30).context("invalid end date")?;
    let input = NewBatch::parse(
        SAMPLE_BATCH_CODE,
        "Full Stack Development",
        45_000,
        start,
        Some(end),
    )?;
    let batch = batches.create(&input).await?;

    PaymentSourceRepository::new(db.clone())
        .assign_sources(batch.id, &[cash_id])
        .await?;
    println!("  Created batch {SAMPLE_BATCH_CODE} with {CASH_SOURCE_NAME}");
    Ok(())
}
