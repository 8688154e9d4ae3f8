//! Report generation service.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use super::types::{
    AdmissionRow, BatchRow, BatchSummary, DailyAdmission, DailyPayment, DailyReport,
    DashboardReport, DashboardTotals, MethodBreakdown, PaymentRow,
};
use crate::channel::{SourceRef, UNKNOWN_CHANNEL};

/// Service for aggregating collection reports.
pub struct ReportService;

impl ReportService {
    /// Computes collected and outstanding totals.
    ///
    /// Collected is the sum of payments, not of paid amounts, so it matches
    /// the money actually received.
    #[must_use]
    pub fn totals(admissions: &[AdmissionRow], payments: &[PaymentRow]) -> DashboardTotals {
        DashboardTotals {
            total_collected: payments.iter().map(|p| p.amount).sum(),
            total_pending: admissions.iter().map(|a| a.pending_amount).sum(),
        }
    }

    /// Summarizes admissions per batch.
    ///
    /// Every batch appears, in input order; batches without admissions
    /// report zeros. Admissions of unknown batches are ignored.
    #[must_use]
    pub fn batch_summaries(batches: &[BatchRow], admissions: &[AdmissionRow]) -> Vec<BatchSummary> {
        let mut per_batch: HashMap<Uuid, (u64, i64, i64)> = HashMap::new();
        for admission in admissions {
            let entry = per_batch.entry(admission.batch_id).or_default();
            entry.0 += 1;
            entry.1 += admission.paid_amount;
            entry.2 += admission.pending_amount;
        }

        batches
            .iter()
            .map(|batch| {
                let (student_count, paid_total, pending_total) =
                    per_batch.get(&batch.batch_id).copied().unwrap_or_default();
                BatchSummary {
                    batch_id: batch.batch_id,
                    code: batch.code.clone(),
                    course_name: batch.course_name.clone(),
                    student_count,
                    paid_total,
                    pending_total,
                }
            })
            .collect()
    }

    /// Sums payments per batch and channel.
    ///
    /// Rows are keyed by the channel reference itself, so two sources with
    /// the same name, or a raw label equal to a source name, stay separate.
    /// Results are ordered by batch code, then channel label.
    #[must_use]
    pub fn method_breakdown(
        batches: &[BatchRow],
        payments: &[PaymentRow],
        source_names: &HashMap<Uuid, String>,
    ) -> Vec<MethodBreakdown> {
        let codes: HashMap<Uuid, &str> = batches
            .iter()
            .map(|b| (b.batch_id, b.code.as_str()))
            .collect();

        let mut grouped: HashMap<(Uuid, Option<SourceRef>), MethodBreakdown> = HashMap::new();
        for payment in payments {
            grouped
                .entry((payment.batch_id, payment.source.clone()))
                .or_insert_with(|| MethodBreakdown {
                    batch_id: payment.batch_id,
                    batch_code: codes
                        .get(&payment.batch_id)
                        .map_or_else(|| payment.batch_id.to_string(), |code| (*code).to_string()),
                    source: payment.source.clone(),
                    method: payment
                        .source
                        .as_ref()
                        .map_or_else(|| UNKNOWN_CHANNEL.to_string(), |s| s.label(source_names)),
                    amount: 0,
                })
                .amount += payment.amount;
        }

        let mut rows: Vec<MethodBreakdown> = grouped.into_values().collect();
        rows.sort_by(|a, b| {
            (&a.batch_code, &a.method, a.batch_id, &a.source)
                .cmp(&(&b.batch_code, &b.method, b.batch_id, &b.source))
        });
        rows
    }

    /// Builds the admin dashboard.
    #[must_use]
    pub fn dashboard(
        batches: &[BatchRow],
        admissions: &[AdmissionRow],
        payments: &[PaymentRow],
        source_names: &HashMap<Uuid, String>,
    ) -> DashboardReport {
        DashboardReport {
            totals: Self::totals(admissions, payments),
            batches: Self::batch_summaries(batches, admissions),
            methods: Self::method_breakdown(batches, payments, source_names),
        }
    }

    /// Builds the daily report for `date`.
    ///
    /// Lines dated on other days are dropped; the total covers the kept
    /// payments only.
    #[must_use]
    pub fn daily(
        date: NaiveDate,
        admissions: Vec<DailyAdmission>,
        payments: Vec<DailyPayment>,
    ) -> DailyReport {
        let admissions: Vec<DailyAdmission> = admissions
            .into_iter()
            .filter(|a| a.admission_date == date)
            .collect();
        let payments: Vec<DailyPayment> = payments
            .into_iter()
            .filter(|p| p.payment_date == date)
            .collect();
        let total_collected = payments.iter().map(|p| p.amount).sum();

        DailyReport {
            date,
            admissions,
            payments,
            total_collected,
        }
    }
}
