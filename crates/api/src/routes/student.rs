//! Student self-service.

use axum::{Json, Router, extract::State, routing::get};
use feedesk_core::auth::UserRole;
use feedesk_db::{AdmissionRepository, StudentRepository};
use serde::Serialize;

use crate::AppState;
use crate::dto::{AdmissionDetailResponse, StudentResponse};
use crate::error::{ApiError, ApiResult};
use crate::middleware::{AuthUser, require_role};

/// Creates student routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/student/dashboard", get(dashboard))
}

/// The logged-in student's own ledger.
#[derive(Debug, Serialize)]
pub struct StudentDashboardResponse {
    /// Student record.
    pub student: StudentResponse,
    /// Admissions, newest first.
    pub admissions: Vec<AdmissionDetailResponse>,
}

/// GET /student/dashboard
async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<StudentDashboardResponse>> {
    require_role(&auth, &[UserRole::Student])?;

    let student = StudentRepository::new((*state.db).clone())
        .find_by_email(auth.email())
        .await?
        .ok_or_else(|| ApiError::not_found("student_not_found", "Student profile not found"))?;

    let admissions = AdmissionRepository::new((*state.db).clone())
        .list_for_student(student.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(StudentDashboardResponse {
        student: student.into(),
        admissions,
    }))
}
