//! Concurrency and atomicity tests for ledger writes.

mod common;

use std::sync::Arc;

use common::{batch_with_cash, create_qr, create_student, date, setup_db};
use feedesk_core::ledger::{LedgerError, LedgerService, OpenAdmissionInput, RecordPaymentInput};
use feedesk_db::{AdmissionRepository, PaymentSourceRepository};
use feedesk_db::repositories::{AdmissionError, ledger_state, write_ledger_state};
use feedesk_shared::types::{AdmissionId, BatchId, PaymentSourceId, StudentId};
use tokio::task::JoinSet;
use uuid::Uuid;

fn open_input(student: Uuid, batch: Uuid, paid: i64, source: Uuid) -> OpenAdmissionInput {
    OpenAdmissionInput {
        student_id: StudentId::from_uuid(student),
        batch_id: BatchId::from_uuid(batch),
        paid_amount: paid,
        source_id: Some(PaymentSourceId::from_uuid(source)),
        remarks: None,
        admission_date: date(3, 1),
    }
}

fn payment_input(admission: Uuid, paid: i64, source: Uuid) -> RecordPaymentInput {
    RecordPaymentInput {
        admission_id: AdmissionId::from_uuid(admission),
        paid_amount: paid,
        source_id: Some(PaymentSourceId::from_uuid(source)),
        payment_date: date(3, 5),
    }
}

#[tokio::test]
async fn test_stale_version_is_rejected_and_ledger_unchanged() {
    let db = setup_db().await;
    let student = create_student(&db, "Kiran", "9100000001").await;
    let (batch, cash) = batch_with_cash(&db, "B-CAS", 10_000).await;
    let repo = AdmissionRepository::new(db.clone());

    let opened = repo
        .open_admission(&open_input(student.id, batch.id, 4000, cash.id))
        .await
        .unwrap();
    let stale = repo.find_by_id(opened.admission.id).await.unwrap().unwrap();
    assert_eq!(stale.version, 1);

    // Another writer gets in first.
    repo.record_payment(&payment_input(stale.id, 1000, cash.id))
        .await
        .unwrap();

    let next = LedgerService::apply_payment(&ledger_state(&stale), 2000).unwrap();
    let err = write_ledger_state(&db, &stale, &next).await.unwrap_err();
    assert!(matches!(
        err,
        AdmissionError::Ledger(LedgerError::ConcurrentModification)
    ));

    let stored = repo.find_by_id(stale.id).await.unwrap().unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.paid_amount, 5000);
    assert_eq!(stored.pending_amount, 5000);
    assert_eq!(repo.payments(stored.id).await.unwrap().len(), 2);
    repo.verify_ledger(stored.id).await.expect("ledger consistent");
}

#[tokio::test]
async fn test_current_version_is_written() {
    let db = setup_db().await;
    let student = create_student(&db, "Leela", "9100000002").await;
    let (batch, cash) = batch_with_cash(&db, "B-CUR", 3000).await;
    let repo = AdmissionRepository::new(db.clone());

    let opened = repo
        .open_admission(&open_input(student.id, batch.id, 1000, cash.id))
        .await
        .unwrap();
    let next = LedgerService::apply_payment(&ledger_state(&opened.admission), 500).unwrap();
    let written = write_ledger_state(&db, &opened.admission, &next)
        .await
        .unwrap();

    let stored = repo.find_by_id(written.id).await.unwrap().unwrap();
    assert_eq!(stored, written);
    assert_eq!(stored.version, 2);
    assert_eq!(stored.paid_amount, 1500);
}

#[tokio::test]
async fn test_rejected_payments_write_no_rows() {
    let db = setup_db().await;
    let student = create_student(&db, "Manoj", "9100000003").await;
    let (batch, cash) = batch_with_cash(&db, "B-ATOM", 5000).await;
    let unoffered = create_qr(&db, "QR-elsewhere").await;
    let repo = AdmissionRepository::new(db.clone());

    let opened = repo
        .open_admission(&open_input(student.id, batch.id, 2000, cash.id))
        .await
        .unwrap();
    let id = opened.admission.id;

    let err = repo
        .record_payment(&payment_input(id, 3001, cash.id))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdmissionError::Ledger(LedgerError::Overpayment { pending: 3000 })
    ));

    let err = repo
        .record_payment(&payment_input(id, 100, unoffered.id))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdmissionError::Ledger(LedgerError::SourceNotOfferedForBatch(_))
    ));

    PaymentSourceRepository::new(db.clone())
        .set_active(cash.id, false)
        .await
        .unwrap();
    let err = repo
        .record_payment(&payment_input(id, 100, cash.id))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdmissionError::Ledger(LedgerError::PaymentSourceInactive(_))
    ));

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored, opened.admission);
    assert_eq!(repo.payments(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_payments_all_land() {
    let db = setup_db().await;
    let student = create_student(&db, "Nila", "9100000004").await;
    let (batch, cash) = batch_with_cash(&db, "B-RUSH", 10_000).await;
    let repo = Arc::new(AdmissionRepository::new(db.clone()));

    let opened = repo
        .open_admission(&open_input(student.id, batch.id, 0, cash.id))
        .await
        .unwrap();
    let id = opened.admission.id;

    let mut tasks = JoinSet::new();
    for _ in 0..20 {
        let repo = Arc::clone(&repo);
        tasks.spawn(async move {
            repo.record_payment(&payment_input(id, 500, cash.id)).await
        });
    }

    let mut succeeded = 0;
    while let Some(result) = tasks.join_next().await {
        match result.expect("task panicked") {
            Ok(_) => succeeded += 1,
            Err(AdmissionError::Ledger(LedgerError::ConcurrentModification)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    let payments = repo.payments(id).await.unwrap();
    assert_eq!(payments.len(), succeeded);
    assert_eq!(stored.paid_amount, 500 * i64::try_from(succeeded).unwrap());
    assert_eq!(stored.paid_amount + stored.pending_amount, stored.total_fee);
    repo.verify_ledger(id).await.expect("ledger consistent");
}
