//! Initial database migration.
//!
//! Creates the seven fee-desk tables and their indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // PART 1: PEOPLE
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Students::StudentCode)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(
                        ColumnDef::new(Students::Mobile)
                            .string_len(15)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Email).string().not_null())
                    .col(
                        ColumnDef::new(Students::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 2: BATCHES & PAYMENT SOURCES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Batches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Batches::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Batches::Code)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Batches::CourseName).string().not_null())
                    .col(ColumnDef::new(Batches::TotalFee).big_integer().not_null())
                    .col(ColumnDef::new(Batches::StartDate).date().not_null())
                    .col(ColumnDef::new(Batches::EndDate).date())
                    .col(
                        ColumnDef::new(Batches::Status)
                            .string_len(16)
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Batches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentSources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentSources::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentSources::Name).string().not_null())
                    .col(ColumnDef::new(PaymentSources::Mode).string_len(16).not_null())
                    .col(ColumnDef::new(PaymentSources::QrImage).string())
                    .col(
                        ColumnDef::new(PaymentSources::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PaymentSources::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BatchPaymentSources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BatchPaymentSources::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BatchPaymentSources::BatchId).uuid().not_null())
                    .col(
                        ColumnDef::new(BatchPaymentSources::PaymentSourceId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BatchPaymentSources::Priority)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-batch_payment_sources-batch_id")
                            .from(BatchPaymentSources::Table, BatchPaymentSources::BatchId)
                            .to(Batches::Table, Batches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-batch_payment_sources-payment_source_id")
                            .from(
                                BatchPaymentSources::Table,
                                BatchPaymentSources::PaymentSourceId,
                            )
                            .to(PaymentSources::Table, PaymentSources::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 3: LEDGER
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Admissions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Admissions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Admissions::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Admissions::BatchId).uuid().not_null())
                    .col(ColumnDef::new(Admissions::TotalFee).big_integer().not_null())
                    .col(ColumnDef::new(Admissions::PaidAmount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Admissions::PendingAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Admissions::Remarks).text())
                    .col(ColumnDef::new(Admissions::AdmissionDate).date().not_null())
                    .col(ColumnDef::new(Admissions::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Admissions::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Admissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-admissions-student_id")
                            .from(Admissions::Table, Admissions::StudentId)
                            .to(Students::Table, Students::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-admissions-batch_id")
                            .from(Admissions::Table, Admissions::BatchId)
                            .to(Batches::Table, Batches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeePayments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FeePayments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(FeePayments::AdmissionId).uuid().not_null())
                    .col(ColumnDef::new(FeePayments::Amount).big_integer().not_null())
                    .col(ColumnDef::new(FeePayments::PaymentDate).date().not_null())
                    .col(ColumnDef::new(FeePayments::SourceId).uuid())
                    .col(ColumnDef::new(FeePayments::SourceLabel).string())
                    .col(
                        ColumnDef::new(FeePayments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-fee_payments-admission_id")
                            .from(FeePayments::Table, FeePayments::AdmissionId)
                            .to(Admissions::Table, Admissions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 4: INDEXES
        // ============================================================
        manager
            .create_index(
                Index::create()
                    .name("idx-batch_payment_sources-batch_priority")
                    .table(BatchPaymentSources::Table)
                    .col(BatchPaymentSources::BatchId)
                    .col(BatchPaymentSources::Priority)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-admissions-student_batch")
                    .table(Admissions::Table)
                    .col(Admissions::StudentId)
                    .col(Admissions::BatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-admissions-admission_date")
                    .table(Admissions::Table)
                    .col(Admissions::AdmissionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-fee_payments-admission_id")
                    .table(FeePayments::Table)
                    .col(FeePayments::AdmissionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-fee_payments-payment_date")
                    .table(FeePayments::Table)
                    .col(FeePayments::PaymentDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BatchPaymentSources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentSources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Batches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    StudentCode,
    Name,
    Mobile,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Batches {
    Table,
    Id,
    Code,
    CourseName,
    TotalFee,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PaymentSources {
    Table,
    Id,
    Name,
    Mode,
    QrImage,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BatchPaymentSources {
    Table,
    Id,
    BatchId,
    PaymentSourceId,
    Priority,
}

#[derive(DeriveIden)]
enum Admissions {
    Table,
    Id,
    StudentId,
    BatchId,
    TotalFee,
    PaidAmount,
    PendingAmount,
    Remarks,
    AdmissionDate,
    Status,
    Version,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FeePayments {
    Table,
    Id,
    AdmissionId,
    Amount,
    PaymentDate,
    SourceId,
    SourceLabel,
    CreatedAt,
}
