//! Reception desk: student lookup, admissions and fee collection.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use feedesk_core::auth::UserRole;
use feedesk_core::ledger::{OpenAdmissionInput, RecordPaymentInput};
use feedesk_core::registration::normalize_mobile;
use feedesk_db::{
    AdmissionRepository, BatchRepository, PaymentSourceRepository, StudentRepository,
};
use feedesk_shared::types::{AdmissionId, BatchId, PaymentSourceId, StudentId};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::dto::{
    AdmissionDetailResponse, BatchResponse, BatchSourceResponse, LedgerWriteResponse,
    StudentResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::middleware::{AuthUser, require_role};

/// Creates reception routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/batches/{id}/payment-sources", get(list_sources_for_batch))
        .route("/reception/batches", get(list_active_batches))
        .route("/reception/students", get(search_student))
        .route("/reception/admissions", post(open_admission))
        .route("/reception/admissions/{id}/payments", post(record_payment))
}

/// Query for the student search.
#[derive(Debug, Deserialize)]
pub struct StudentSearchQuery {
    /// Mobile number as typed at the desk.
    pub mobile: String,
}

/// Request body for opening an admission.
#[derive(Debug, Deserialize)]
pub struct OpenAdmissionRequest {
    /// Student being admitted.
    pub student_id: Uuid,
    /// Target batch.
    pub batch_id: Uuid,
    /// Amount paid now; zero is allowed.
    #[serde(default)]
    pub paid_amount: i64,
    /// Channel for the opening payment.
    pub payment_source_id: Option<Uuid>,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// Defaults to today (UTC).
    pub admission_date: Option<NaiveDate>,
}

/// Request body for a follow-up payment.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    /// Amount received.
    pub paid_amount: i64,
    /// Channel used.
    pub payment_source_id: Option<Uuid>,
    /// Defaults to today (UTC).
    pub payment_date: Option<NaiveDate>,
}

/// GET /batches/{id}/payment-sources - Sources offered by a batch, in
/// priority order.
async fn list_sources_for_batch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<BatchSourceResponse>>> {
    require_role(&auth, &[UserRole::Reception, UserRole::Admin])?;
    if BatchRepository::new((*state.db).clone())
        .find_by_id(id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("batch_not_found", format!("Batch not found: {id}")));
    }
    let sources = PaymentSourceRepository::new((*state.db).clone())
        .list_for_batch(id)
        .await?;
    Ok(Json(sources.into_iter().map(Into::into).collect()))
}

/// GET /reception/batches - Batches open for admission.
async fn list_active_batches(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<BatchResponse>>> {
    require_role(&auth, &[UserRole::Reception])?;
    let batches = BatchRepository::new((*state.db).clone()).list_active().await?;
    Ok(Json(batches.into_iter().map(Into::into).collect()))
}

/// GET /reception/students?mobile= - Finds a student and their admissions.
///
/// A miss is not an error: the desk shows an inline message.
async fn search_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<StudentSearchQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    require_role(&auth, &[UserRole::Reception])?;
    let mobile = normalize_mobile(&query.mobile)?;

    let Some(student) = StudentRepository::new((*state.db).clone())
        .find_by_mobile(&mobile)
        .await?
    else {
        return Ok(Json(json!({
            "found": false,
            "message": "No student registered with this mobile number"
        })));
    };

    let admissions: Vec<AdmissionDetailResponse> = AdmissionRepository::new((*state.db).clone())
        .list_for_student(student.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(json!({
        "found": true,
        "student": StudentResponse::from(student),
        "admissions": admissions,
    })))
}

/// POST /reception/admissions
async fn open_admission(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<OpenAdmissionRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&auth, &[UserRole::Reception])?;
    let input = OpenAdmissionInput {
        student_id: StudentId::from_uuid(payload.student_id),
        batch_id: BatchId::from_uuid(payload.batch_id),
        paid_amount: payload.paid_amount,
        source_id: payload.payment_source_id.map(PaymentSourceId::from_uuid),
        remarks: payload.remarks,
        admission_date: payload
            .admission_date
            .unwrap_or_else(|| Utc::now().date_naive()),
    };
    let written = AdmissionRepository::new((*state.db).clone())
        .open_admission(&input)
        .await?;
    Ok((StatusCode::CREATED, Json(LedgerWriteResponse::from(written))))
}

/// POST /reception/admissions/{id}/payments
async fn record_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordPaymentRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&auth, &[UserRole::Reception])?;
    let input = RecordPaymentInput {
        admission_id: AdmissionId::from_uuid(id),
        paid_amount: payload.paid_amount,
        source_id: payload.payment_source_id.map(PaymentSourceId::from_uuid),
        payment_date: payload
            .payment_date
            .unwrap_or_else(|| Utc::now().date_naive()),
    };
    let written = AdmissionRepository::new((*state.db).clone())
        .record_payment(&input)
        .await?;
    Ok((StatusCode::CREATED, Json(LedgerWriteResponse::from(written))))
}
