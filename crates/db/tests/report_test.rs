//! Integration tests for dashboard and daily reports.

mod common;

use common::{batch_with_cash, create_batch, create_student, date, setup_db};
use feedesk_core::ledger::{OpenAdmissionInput, RecordPaymentInput};
use feedesk_db::{AdmissionRepository, ReportRepository};
use feedesk_shared::types::{AdmissionId, BatchId, PaymentSourceId, StudentId};

#[tokio::test]
async fn test_daily_report_returns_that_days_activity() {
    let db = setup_db().await;
    let (batch, cash) = batch_with_cash(&db, "B-D", 10_000).await;
    let repo = AdmissionRepository::new(db.clone());
    let source = Some(PaymentSourceId::from_uuid(cash.id));

    let asha = create_student(&db, "Asha", "9200000001").await;
    let ravi = create_student(&db, "Ravi", "9200000002").await;

    let first = repo
        .open_admission(&OpenAdmissionInput {
            student_id: StudentId::from_uuid(asha.id),
            batch_id: BatchId::from_uuid(batch.id),
            paid_amount: 4000,
            source_id: source,
            remarks: None,
            admission_date: date(4, 1),
        })
        .await
        .unwrap();
    repo.open_admission(&OpenAdmissionInput {
        student_id: StudentId::from_uuid(ravi.id),
        batch_id: BatchId::from_uuid(batch.id),
        paid_amount: 3000,
        source_id: source,
        remarks: None,
        admission_date: date(4, 2),
    })
    .await
    .unwrap();
    repo.record_payment(&RecordPaymentInput {
        admission_id: AdmissionId::from_uuid(first.admission.id),
        paid_amount: 1500,
        source_id: source,
        payment_date: date(4, 2),
    })
    .await
    .unwrap();

    let reports = ReportRepository::new(db.clone());

    let day_one = reports.daily(date(4, 1)).await.unwrap();
    assert_eq!(day_one.admissions.len(), 1);
    assert_eq!(day_one.admissions[0].student_name, "Asha");
    assert_eq!(day_one.payments.len(), 1);
    assert_eq!(day_one.total_collected, 4000);

    let day_two = reports.daily(date(4, 2)).await.unwrap();
    assert_eq!(day_two.admissions.len(), 1);
    assert_eq!(day_two.payments.len(), 2);
    assert_eq!(day_two.total_collected, 4500);
    assert!(day_two.payments.iter().all(|p| p.method == "B-D cash"));

    let empty = reports.daily(date(4, 3)).await.unwrap();
    assert_eq!(empty.total_collected, 0);
    assert!(empty.admissions.is_empty());
}

#[tokio::test]
async fn test_dashboard_includes_empty_batches() {
    let db = setup_db().await;
    let (busy, cash) = batch_with_cash(&db, "B-BUSY", 10_000).await;
    let idle = create_batch(&db, "B-IDLE", 5000).await;
    let student = create_student(&db, "Asha", "9300000001").await;

    AdmissionRepository::new(db.clone())
        .open_admission(&OpenAdmissionInput {
            student_id: StudentId::from_uuid(student.id),
            batch_id: BatchId::from_uuid(busy.id),
            paid_amount: 4000,
            source_id: Some(PaymentSourceId::from_uuid(cash.id)),
            remarks: None,
            admission_date: date(5, 1),
        })
        .await
        .unwrap();

    let report = ReportRepository::new(db.clone()).dashboard().await.unwrap();

    assert_eq!(report.totals.total_collected, 4000);
    assert_eq!(report.totals.total_pending, 6000);
    assert_eq!(report.batches.len(), 2);

    let idle_row = report.batches.iter().find(|b| b.batch_id == idle.id).unwrap();
    assert_eq!(idle_row.student_count, 0);
    assert_eq!(idle_row.paid_total, 0);

    let busy_row = report.batches.iter().find(|b| b.batch_id == busy.id).unwrap();
    assert_eq!(busy_row.student_count, 1);
    assert_eq!(busy_row.pending_total, 6000);

    assert_eq!(report.methods.len(), 1);
    assert_eq!(report.methods[0].method, "B-BUSY cash");
    assert_eq!(report.methods[0].amount, 4000);
}
