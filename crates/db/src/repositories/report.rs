//! Report repository: loads rows and hands them to `ReportService`.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use feedesk_core::channel::{SourceRef, UNKNOWN_CHANNEL};
use feedesk_core::reports::{
    AdmissionRow, BatchRow, DailyAdmission, DailyPayment, DailyReport, DashboardReport,
    PaymentRow, ReportService,
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::{admissions, batches, fee_payments, payment_sources, students};

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the admin dashboard: totals, per-batch stats and method
    /// breakdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn dashboard(&self) -> Result<DashboardReport, DbErr> {
        let batches: Vec<BatchRow> = batches::Entity::find()
            .order_by_desc(batches::Column::CreatedAt)
            .order_by_desc(batches::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|b| BatchRow {
                batch_id: b.id,
                code: b.code,
                course_name: b.course_name,
            })
            .collect();

        let admissions = admissions::Entity::find().all(&self.db).await?;
        let batch_of: HashMap<Uuid, Uuid> = admissions.iter().map(|a| (a.id, a.batch_id)).collect();
        let admission_rows: Vec<AdmissionRow> = admissions
            .into_iter()
            .map(|a| AdmissionRow {
                admission_id: a.id,
                batch_id: a.batch_id,
                paid_amount: a.paid_amount,
                pending_amount: a.pending_amount,
            })
            .collect();

        let payments: Vec<PaymentRow> = fee_payments::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(|p| {
                let batch_id = *batch_of.get(&p.admission_id)?;
                Some(PaymentRow {
                    payment_id: p.id,
                    batch_id,
                    amount: p.amount,
                    source: SourceRef::from_columns(p.source_id, p.source_label.as_deref()),
                })
            })
            .collect();

        let names = self.source_names().await?;
        Ok(ReportService::dashboard(
            &batches,
            &admission_rows,
            &payments,
            &names,
        ))
    }

    /// Builds the report of admissions and payments dated `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn daily(&self, date: NaiveDate) -> Result<DailyReport, DbErr> {
        let day_admissions = admissions::Entity::find()
            .filter(admissions::Column::AdmissionDate.eq(date))
            .order_by_asc(admissions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let day_payments = fee_payments::Entity::find()
            .filter(fee_payments::Column::PaymentDate.eq(date))
            .order_by_asc(fee_payments::Column::CreatedAt)
            .find_also_related(admissions::Entity)
            .all(&self.db)
            .await?;

        let mut student_ids: HashSet<Uuid> = day_admissions.iter().map(|a| a.student_id).collect();
        let mut batch_ids: HashSet<Uuid> = day_admissions.iter().map(|a| a.batch_id).collect();
        for admission in day_payments.iter().filter_map(|(_, a)| a.as_ref()) {
            student_ids.insert(admission.student_id);
            batch_ids.insert(admission.batch_id);
        }

        let students: HashMap<Uuid, students::Model> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            students::Entity::find()
                .filter(students::Column::Id.is_in(student_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|s| (s.id, s))
                .collect()
        };
        let batch_codes: HashMap<Uuid, String> = if batch_ids.is_empty() {
            HashMap::new()
        } else {
            batches::Entity::find()
                .filter(batches::Column::Id.is_in(batch_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|b| (b.id, b.code))
                .collect()
        };
        let names = self.source_names().await?;

        let code_for = |batch_id: &Uuid| {
            batch_codes
                .get(batch_id)
                .cloned()
                .unwrap_or_else(|| batch_id.to_string())
        };

        let admissions: Vec<DailyAdmission> = day_admissions
            .into_iter()
            .map(|a| {
                let student = students.get(&a.student_id);
                DailyAdmission {
                    admission_id: a.id,
                    student_code: student.map(|s| s.student_code.clone()).unwrap_or_default(),
                    student_name: student.map(|s| s.name.clone()).unwrap_or_default(),
                    batch_code: code_for(&a.batch_id),
                    total_fee: a.total_fee,
                    paid_amount: a.paid_amount,
                    pending_amount: a.pending_amount,
                    admission_date: a.admission_date,
                }
            })
            .collect();

        let payments: Vec<DailyPayment> = day_payments
            .into_iter()
            .map(|(p, admission)| {
                let student_name = admission
                    .as_ref()
                    .and_then(|a| students.get(&a.student_id))
                    .map(|s| s.name.clone())
                    .unwrap_or_default();
                let batch_code = admission
                    .as_ref()
                    .map(|a| code_for(&a.batch_id))
                    .unwrap_or_default();
                let method = SourceRef::from_columns(p.source_id, p.source_label.as_deref())
                    .map_or_else(|| UNKNOWN_CHANNEL.to_string(), |r| r.label(&names));
                DailyPayment {
                    payment_id: p.id,
                    admission_id: p.admission_id,
                    student_name,
                    batch_code,
                    amount: p.amount,
                    method,
                    payment_date: p.payment_date,
                }
            })
            .collect();

        Ok(ReportService::daily(date, admissions, payments))
    }

    async fn source_names(&self) -> Result<HashMap<Uuid, String>, DbErr> {
        Ok(payment_sources::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect())
    }
}
