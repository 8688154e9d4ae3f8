//! Fee receipts.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use feedesk_core::auth::UserRole;
use feedesk_db::AdmissionRepository;
use uuid::Uuid;

use crate::AppState;
use crate::dto::ReceiptResponse;
use crate::error::{ApiError, ApiResult};
use crate::middleware::{AuthUser, require_role};

/// Creates receipt routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/receipts/{payment_id}", get(view_receipt))
}

/// GET /receipts/{payment_id}
///
/// Students may only open receipts for their own admissions.
async fn view_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
) -> ApiResult<Json<ReceiptResponse>> {
    let role = require_role(
        &auth,
        &[UserRole::Reception, UserRole::Admin, UserRole::Student],
    )?;

    let receipt = AdmissionRepository::new((*state.db).clone())
        .find_receipt(payment_id)
        .await?
        .ok_or_else(|| ApiError::not_found("receipt_not_found", "Receipt not found"))?;

    if !role.can_view_any_receipt() && !receipt.student.email.eq_ignore_ascii_case(auth.email()) {
        tracing::info!(
            user_id = %auth.user_id(),
            payment_id = %payment_id,
            "Receipt access denied"
        );
        return Err(ApiError::forbidden("You can only view your own receipts"));
    }

    Ok(Json(receipt.into()))
}
