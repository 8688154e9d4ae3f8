//! Integration tests for batch creation, closing and cascading deletion.

mod common;

use common::{batch_with_cash, create_batch, create_student, date, setup_db};
use feedesk_core::batch::BatchStatus;
use feedesk_core::ledger::{LedgerError, OpenAdmissionInput, RecordPaymentInput};
use feedesk_db::entities::sea_orm_active_enums::BatchStatus as StoredBatchStatus;
use feedesk_db::entities::{admissions, batch_payment_sources, fee_payments};
use feedesk_db::repositories::{AdmissionError, BatchRepoError};
use feedesk_db::{AdmissionRepository, BatchRepository};
use feedesk_shared::types::{AdmissionId, BatchId, PaymentSourceId, StudentId};
use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

#[tokio::test]
async fn test_delete_batch_cascades() {
    let db = setup_db().await;
    let (batch, cash) = batch_with_cash(&db, "B-DEL", 8000).await;
    let admissions_repo = AdmissionRepository::new(db.clone());

    for (name, mobile) in [("Asha", "9100000001"), ("Ravi", "9100000002")] {
        let student = create_student(&db, name, mobile).await;
        admissions_repo
            .open_admission(&OpenAdmissionInput {
                student_id: StudentId::from_uuid(student.id),
                batch_id: BatchId::from_uuid(batch.id),
                paid_amount: 2000,
                source_id: Some(PaymentSourceId::from_uuid(cash.id)),
                remarks: None,
                admission_date: date(3, 1),
            })
            .await
            .unwrap();
    }

    let repo = BatchRepository::new(db.clone());
    let deleted = repo.delete(batch.id).await.unwrap();

    assert_eq!(deleted.mappings, 1);
    assert_eq!(deleted.payments, 2);
    assert_eq!(deleted.admissions, 2);
    assert!(repo.find_by_id(batch.id).await.unwrap().is_none());
    assert_eq!(admissions::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(fee_payments::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(batch_payment_sources::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_missing_batch() {
    let db = setup_db().await;
    let ghost = Uuid::new_v4();
    let result = BatchRepository::new(db).delete(ghost).await;
    assert!(matches!(result, Err(BatchRepoError::NotFound(id)) if id == ghost));
}

#[tokio::test]
async fn test_duplicate_code_rejected() {
    let db = setup_db().await;
    create_batch(&db, "B-DUP", 1000).await;

    let input = feedesk_core::batch::NewBatch::parse("B-DUP", "Other", 2000, date(1, 1), None).unwrap();
    let result = BatchRepository::new(db).create(&input).await;
    assert!(matches!(result, Err(BatchRepoError::DuplicateCode(code)) if code == "B-DUP"));
}

#[tokio::test]
async fn test_list_and_list_active() {
    let db = setup_db().await;
    create_batch(&db, "B-A", 1000).await;
    create_batch(&db, "B-B", 1000).await;
    let repo = BatchRepository::new(db);

    assert_eq!(repo.list().await.unwrap().len(), 2);
    let codes: Vec<String> = repo
        .list_active()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.code)
        .collect();
    assert_eq!(codes, vec!["B-A", "B-B"]);
}

#[tokio::test]
async fn test_closed_batch_refuses_admissions_but_takes_payments() {
    let db = setup_db().await;
    let (batch, cash) = batch_with_cash(&db, "B-CLOSE", 6000).await;
    let early = create_student(&db, "Devi", "9100000011").await;
    let late = create_student(&db, "Farid", "9100000012").await;
    let admissions_repo = AdmissionRepository::new(db.clone());
    let repo = BatchRepository::new(db.clone());

    let open = |student: Uuid| OpenAdmissionInput {
        student_id: StudentId::from_uuid(student),
        batch_id: BatchId::from_uuid(batch.id),
        paid_amount: 1000,
        source_id: Some(PaymentSourceId::from_uuid(cash.id)),
        remarks: None,
        admission_date: date(3, 1),
    };
    let existing = admissions_repo.open_admission(&open(early.id)).await.unwrap();

    let closed = repo.set_status(batch.id, BatchStatus::Closed).await.unwrap();
    assert_eq!(closed.status, StoredBatchStatus::Closed);
    assert!(repo.list_active().await.unwrap().is_empty());

    let err = admissions_repo.open_admission(&open(late.id)).await.unwrap_err();
    assert!(matches!(
        err,
        AdmissionError::Ledger(LedgerError::BatchNotActive(id)) if id == batch.id
    ));

    let paid = admissions_repo
        .record_payment(&RecordPaymentInput {
            admission_id: AdmissionId::from_uuid(existing.admission.id),
            paid_amount: 500,
            source_id: Some(PaymentSourceId::from_uuid(cash.id)),
            payment_date: date(3, 2),
        })
        .await
        .unwrap();
    assert_eq!(paid.admission.paid_amount, 1500);

    repo.set_status(batch.id, BatchStatus::Active).await.unwrap();
    admissions_repo.open_admission(&open(late.id)).await.unwrap();
}

#[tokio::test]
async fn test_set_status_of_missing_batch() {
    let db = setup_db().await;
    let ghost = Uuid::new_v4();
    let result = BatchRepository::new(db)
        .set_status(ghost, BatchStatus::Closed)
        .await;
    assert!(matches!(result, Err(BatchRepoError::NotFound(id)) if id == ghost));
}
