//! Tests for report aggregation.

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use uuid::Uuid;

use super::service::ReportService;
use super::types::{AdmissionRow, BatchRow, DailyAdmission, DailyPayment, PaymentRow};
use crate::channel::SourceRef;

fn batch(code: &str) -> BatchRow {
    BatchRow {
        batch_id: Uuid::new_v4(),
        code: code.to_string(),
        course_name: format!("{code} course"),
    }
}

fn admission(batch_id: Uuid, paid: i64, pending: i64) -> AdmissionRow {
    AdmissionRow {
        admission_id: Uuid::new_v4(),
        batch_id,
        paid_amount: paid,
        pending_amount: pending,
    }
}

fn payment(batch_id: Uuid, amount: i64, source: Option<SourceRef>) -> PaymentRow {
    PaymentRow {
        payment_id: Uuid::new_v4(),
        batch_id,
        amount,
        source,
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
}

fn daily_payment(amount: i64, date: NaiveDate) -> DailyPayment {
    DailyPayment {
        payment_id: Uuid::new_v4(),
        admission_id: Uuid::new_v4(),
        student_name: "Asha".into(),
        batch_code: "B1".into(),
        amount,
        method: "CASH".into(),
        payment_date: date,
    }
}

fn daily_admission(date: NaiveDate) -> DailyAdmission {
    DailyAdmission {
        admission_id: Uuid::new_v4(),
        student_code: "STD1".into(),
        student_name: "Asha".into(),
        batch_code: "B1".into(),
        total_fee: 10_000,
        paid_amount: 4000,
        pending_amount: 6000,
        admission_date: date,
    }
}

#[test]
fn test_totals() {
    let b = batch("B1");
    let admissions = vec![admission(b.batch_id, 4000, 6000), admission(b.batch_id, 10_000, 0)];
    let payments = vec![
        payment(b.batch_id, 4000, None),
        payment(b.batch_id, 7000, None),
        payment(b.batch_id, 3000, None),
    ];

    let totals = ReportService::totals(&admissions, &payments);
    assert_eq!(totals.total_collected, 14_000);
    assert_eq!(totals.total_pending, 6000);
}

#[test]
fn test_batch_without_admissions_reports_zeros() {
    let busy = batch("B1");
    let empty = batch("B2");
    let admissions = vec![admission(busy.batch_id, 4000, 6000)];

    let summaries = ReportService::batch_summaries(&[busy.clone(), empty.clone()], &admissions);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].student_count, 1);
    assert_eq!(summaries[0].paid_total, 4000);
    assert_eq!(summaries[1].batch_id, empty.batch_id);
    assert_eq!(
        (summaries[1].student_count, summaries[1].paid_total, summaries[1].pending_total),
        (0, 0, 0)
    );
}

#[test]
fn test_method_breakdown_groups_and_resolves() {
    let b = batch("B1");
    let cash = Uuid::new_v4();
    let dangling = Uuid::new_v4();
    let names = HashMap::from([(cash, "CASH".to_string())]);
    let payments = vec![
        payment(b.batch_id, 1000, Some(SourceRef::SourceId(cash))),
        payment(b.batch_id, 500, Some(SourceRef::SourceId(cash))),
        payment(b.batch_id, 200, Some(SourceRef::SourceId(dangling))),
        payment(b.batch_id, 300, Some(SourceRef::RawLabel("Cheque".into()))),
        payment(b.batch_id, 50, None),
    ];

    let rows = ReportService::method_breakdown(&[b], &payments, &names);
    let by_method: HashMap<&str, i64> = rows.iter().map(|r| (r.method.as_str(), r.amount)).collect();

    assert_eq!(rows.len(), 4);
    assert_eq!(by_method["CASH"], 1500);
    assert_eq!(by_method[dangling.to_string().as_str()], 200);
    assert_eq!(by_method["Cheque"], 300);
    assert_eq!(by_method["Unknown"], 50);
}

#[test]
fn test_method_breakdown_keeps_same_named_sources_apart() {
    let b = batch("B1");
    let gpay_front = Uuid::new_v4();
    let gpay_back = Uuid::new_v4();
    let names = HashMap::from([
        (gpay_front, "GPay".to_string()),
        (gpay_back, "GPay".to_string()),
    ]);
    let payments = vec![
        payment(b.batch_id, 100, Some(SourceRef::SourceId(gpay_front))),
        payment(b.batch_id, 200, Some(SourceRef::SourceId(gpay_back))),
        payment(b.batch_id, 40, Some(SourceRef::RawLabel("GPay".into()))),
    ];

    let rows = ReportService::method_breakdown(&[b], &payments, &names);

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.method == "GPay"));
    let by_source: HashMap<Option<SourceRef>, i64> =
        rows.iter().map(|r| (r.source.clone(), r.amount)).collect();
    assert_eq!(by_source[&Some(SourceRef::SourceId(gpay_front))], 100);
    assert_eq!(by_source[&Some(SourceRef::SourceId(gpay_back))], 200);
    assert_eq!(by_source[&Some(SourceRef::RawLabel("GPay".into()))], 40);
}

#[test]
fn test_dashboard_combines_sections() {
    let b = batch("B1");
    let report = ReportService::dashboard(
        &[b.clone()],
        &[admission(b.batch_id, 4000, 6000)],
        &[payment(b.batch_id, 4000, Some(SourceRef::RawLabel("CASH".into())))],
        &HashMap::new(),
    );
    assert_eq!(report.totals.total_collected, 4000);
    assert_eq!(report.batches.len(), 1);
    assert_eq!(report.methods.len(), 1);
}

#[test]
fn test_daily_report_keeps_only_that_day() {
    let report = ReportService::daily(
        day(10),
        vec![daily_admission(day(10)), daily_admission(day(11))],
        vec![
            daily_payment(4000, day(10)),
            daily_payment(2500, day(10)),
            daily_payment(999, day(9)),
        ],
    );

    assert_eq!(report.admissions.len(), 1);
    assert_eq!(report.payments.len(), 2);
    assert_eq!(report.total_collected, 6500);
}

#[test]
fn test_daily_report_empty_day() {
    let report = ReportService::daily(day(1), vec![], vec![]);
    assert_eq!(report.total_collected, 0);
    assert!(report.admissions.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Method breakdown redistributes, never changes, the collected total.
    #[test]
    fn prop_breakdown_sums_to_collected(amounts in prop::collection::vec((1i64..100_000, 0usize..3), 0..30)) {
        let batches = [batch("B1"), batch("B2"), batch("B3")];
        let payments: Vec<PaymentRow> = amounts
            .iter()
            .map(|(amount, b)| payment(batches[*b].batch_id, *amount, None))
            .collect();

        let totals = ReportService::totals(&[], &payments);
        let rows = ReportService::method_breakdown(&batches, &payments, &HashMap::new());
        prop_assert_eq!(rows.iter().map(|r| r.amount).sum::<i64>(), totals.total_collected);
    }

    /// Daily total equals the sum of that day's payments.
    #[test]
    fn prop_daily_total(lines in prop::collection::vec((1i64..50_000, 1u32..5), 0..30)) {
        let payments: Vec<DailyPayment> = lines.iter().map(|(a, d)| daily_payment(*a, day(*d))).collect();
        let expected: i64 = lines.iter().filter(|(_, d)| *d == 2).map(|(a, _)| a).sum();

        let report = ReportService::daily(day(2), vec![], payments);
        prop_assert_eq!(report.total_collected, expected);
        prop_assert!(report.payments.iter().all(|p| p.payment_date == day(2)));
    }
}
