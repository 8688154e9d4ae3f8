//! Authentication routes for registration, login and password changes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use feedesk_core::auth::{UserRole, hash_password, validate_new_password, verify_password};
use feedesk_core::registration::NewStudent;
use feedesk_db::{StudentRepository, UserRepository};
use feedesk_shared::auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterStudentRequest, UserInfo,
};
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::dto::StudentResponse;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

/// Auth routes that need a bearer token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/change-password", post(change_password))
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("invalid_credentials", "Invalid email or password")
}

/// POST /auth/login - Authenticate a user and return an access token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = payload.email.trim().to_lowercase();
    let user_repo = UserRepository::new((*state.db).clone());

    let Some(user) = user_repo.find_by_email(&email).await? else {
        info!(email = %email, "Login attempt for non-existent user");
        return Err(invalid_credentials());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials());
    }

    let role: UserRole = user.role.into();
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.email, role.as_str())
        .map_err(|e| ApiError::internal(e.to_string()))?;

    info!(user_id = %user.id, role = %role, "User logged in");

    Ok(Json(LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            role: role.as_str().to_string(),
        },
        access_token,
        expires_in: state.jwt_service.access_token_expires_in(),
        home: role.home_path().to_string(),
    }))
}

/// POST /auth/register - Self-register a student.
///
/// The mobile number becomes the initial password.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterStudentRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = NewStudent::parse(&payload.name, &payload.mobile, &payload.email)?;
    let password_hash = hash_password(input.initial_password())?;

    let registered = StudentRepository::new((*state.db).clone())
        .register(&input, &password_hash)
        .await?;

    let role: UserRole = registered.user.role.into();
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "student": StudentResponse::from(registered.student),
            "user": UserInfo {
                id: registered.user.id,
                email: registered.user.email,
                role: role.as_str().to_string(),
            },
            "message": "Registration successful. Your initial password is your mobile number."
        })),
    ))
}

/// POST /auth/change-password - Replace the caller's password.
async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let user_repo = UserRepository::new((*state.db).clone());
    let user = user_repo
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| ApiError::unauthorized("unauthorized", "Account no longer exists"))?;

    if !verify_password(&payload.old_password, &user.password_hash)? {
        info!(user_id = %user.id, "Password change rejected - wrong current password");
        return Err(ApiError::unauthorized(
            "invalid_credentials",
            "Current password is incorrect",
        ));
    }

    validate_new_password(&payload.new_password)?;
    let password_hash = hash_password(&payload.new_password)?;
    user_repo.update_password(user.id, &password_hash).await?;

    info!(user_id = %user.id, "Password changed");
    Ok(Json(json!({ "message": "Password updated successfully" })))
}
