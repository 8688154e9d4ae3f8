//! Admin desk: batches, payment sources, assignments and reports.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, put},
};
use chrono::{NaiveDate, Utc};
use feedesk_core::auth::UserRole;
use feedesk_core::batch::{BatchStatus, NewBatch};
use feedesk_core::channel::NewPaymentSource;
use feedesk_core::reports::{DailyReport, DashboardReport};
use feedesk_db::{BatchRepository, PaymentSourceRepository, ReportRepository};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::dto::{AssignmentResponse, BatchResponse, BatchSourceResponse, PaymentSourceResponse};
use crate::error::ApiResult;
use crate::middleware::{AuthUser, require_role};

/// Creates admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/batches", get(list_batches).post(create_batch))
        .route(
            "/admin/batches/{id}",
            patch(update_batch_status).delete(delete_batch),
        )
        .route("/admin/batches/{id}/payment-sources", put(assign_sources))
        .route(
            "/admin/payment-sources",
            get(list_payment_sources).post(create_payment_source),
        )
        .route("/admin/payment-sources/{id}", patch(update_payment_source))
        .route("/admin/batch-payment-sources", get(list_assignments))
        .route("/admin/daily-report", get(daily_report))
}

/// Request body for creating a batch.
#[derive(Debug, Deserialize)]
pub struct CreateBatchRequest {
    /// Unique code.
    pub code: String,
    /// Course name.
    pub course_name: String,
    /// Fee in minor units.
    pub total_fee: i64,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: Option<NaiveDate>,
}

/// Request body for opening or closing a batch.
#[derive(Debug, Deserialize)]
pub struct UpdateBatchStatusRequest {
    /// `Active` or `Closed`.
    pub status: String,
}

/// Request body for creating a payment source.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentSourceRequest {
    /// Display name.
    pub name: String,
    /// `CASH` or `QR`, case-insensitive.
    pub mode: String,
    /// Required for QR sources.
    pub qr_image: Option<String>,
}

/// Request body for activating or deactivating a source.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentSourceRequest {
    /// New active flag.
    pub is_active: bool,
}

/// Request body for replacing a batch's source list.
#[derive(Debug, Deserialize)]
pub struct AssignSourcesRequest {
    /// Source ids in priority order.
    pub payment_source_ids: Vec<Uuid>,
}

/// Query for the daily report.
#[derive(Debug, Deserialize)]
pub struct DailyReportQuery {
    /// Day to report on, today (UTC) when absent.
    pub date: Option<NaiveDate>,
}

/// GET /admin/dashboard
async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardReport>> {
    require_role(&auth, &[UserRole::Admin])?;
    let report = ReportRepository::new((*state.db).clone()).dashboard().await?;
    Ok(Json(report))
}

/// GET /admin/batches - All batches, newest first.
async fn list_batches(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<BatchResponse>>> {
    require_role(&auth, &[UserRole::Admin])?;
    let batches = BatchRepository::new((*state.db).clone()).list().await?;
    Ok(Json(batches.into_iter().map(Into::into).collect()))
}

/// POST /admin/batches
async fn create_batch(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBatchRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&auth, &[UserRole::Admin])?;
    let input = NewBatch::parse(
        &payload.code,
        &payload.course_name,
        payload.total_fee,
        payload.start_date,
        payload.end_date,
    )?;
    let batch = BatchRepository::new((*state.db).clone()).create(&input).await?;
    Ok((StatusCode::CREATED, Json(BatchResponse::from(batch))))
}

/// PATCH /admin/batches/{id} - Opens or closes a batch for admissions.
async fn update_batch_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBatchStatusRequest>,
) -> ApiResult<Json<BatchResponse>> {
    require_role(&auth, &[UserRole::Admin])?;
    let status: BatchStatus = payload.status.parse()?;
    let batch = BatchRepository::new((*state.db).clone())
        .set_status(id, status)
        .await?;
    Ok(Json(batch.into()))
}

/// DELETE /admin/batches/{id} - Removes the batch with its admissions,
/// payments and source mappings.
async fn delete_batch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    require_role(&auth, &[UserRole::Admin])?;
    let deleted = BatchRepository::new((*state.db).clone()).delete(id).await?;
    Ok(Json(json!({
        "message": "Batch deleted",
        "deleted": {
            "admissions": deleted.admissions,
            "payments": deleted.payments,
            "payment_source_mappings": deleted.mappings,
        }
    })))
}

/// GET /admin/payment-sources
async fn list_payment_sources(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PaymentSourceResponse>>> {
    require_role(&auth, &[UserRole::Admin])?;
    let sources = PaymentSourceRepository::new((*state.db).clone()).list().await?;
    Ok(Json(sources.into_iter().map(Into::into).collect()))
}

/// POST /admin/payment-sources
async fn create_payment_source(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePaymentSourceRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&auth, &[UserRole::Admin])?;
    let input = NewPaymentSource::parse(&payload.name, &payload.mode, payload.qr_image.as_deref())?;
    let source = PaymentSourceRepository::new((*state.db).clone())
        .create(&input)
        .await?;
    Ok((StatusCode::CREATED, Json(PaymentSourceResponse::from(source))))
}

/// PATCH /admin/payment-sources/{id}
async fn update_payment_source(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentSourceRequest>,
) -> ApiResult<Json<PaymentSourceResponse>> {
    require_role(&auth, &[UserRole::Admin])?;
    let source = PaymentSourceRepository::new((*state.db).clone())
        .set_active(id, payload.is_active)
        .await?;
    Ok(Json(source.into()))
}

/// GET /admin/batch-payment-sources - Every mapping, by batch then priority.
async fn list_assignments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AssignmentResponse>>> {
    require_role(&auth, &[UserRole::Admin])?;
    let rows = PaymentSourceRepository::new((*state.db).clone())
        .list_assignments()
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// PUT /admin/batches/{id}/payment-sources - Replaces the batch's sources.
async fn assign_sources(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignSourcesRequest>,
) -> ApiResult<Json<Vec<BatchSourceResponse>>> {
    require_role(&auth, &[UserRole::Admin])?;
    let sources = PaymentSourceRepository::new((*state.db).clone())
        .assign_sources(id, &payload.payment_source_ids)
        .await?;
    Ok(Json(sources.into_iter().map(Into::into).collect()))
}

/// GET /admin/daily-report?date=YYYY-MM-DD
async fn daily_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DailyReportQuery>,
) -> ApiResult<Json<DailyReport>> {
    require_role(&auth, &[UserRole::Admin])?;
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let report = ReportRepository::new((*state.db).clone()).daily(date).await?;
    Ok(Json(report))
}
