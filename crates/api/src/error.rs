//! Conversion of domain errors into JSON error responses.
//!
//! Every failure renders as `{ "error": <code>, "message": <text> }` with the
//! status of the underlying [`AppError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use feedesk_core::assignment::AssignmentError;
use feedesk_core::auth::PasswordError;
use feedesk_core::batch::BatchError;
use feedesk_core::channel::ChannelError;
use feedesk_core::ledger::LedgerError;
use feedesk_core::registration::RegistrationError;
use feedesk_db::repositories::{AdmissionError, BatchRepoError, PaymentSourceError, StudentError};
use feedesk_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An [`AppError`] paired with the machine-readable code sent to clients.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    code: &'static str,
}

impl ApiError {
    /// Wraps an application error with a specific code.
    #[must_use]
    pub const fn new(error: AppError, code: &'static str) -> Self {
        Self { error, code }
    }

    /// 400 with a custom code.
    #[must_use]
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AppError::Validation(message.into()), code)
    }

    /// 404 with a custom code.
    #[must_use]
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AppError::NotFound(message.into()), code)
    }

    /// 401 with a custom code.
    #[must_use]
    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AppError::Unauthorized(message.into()), code)
    }

    /// 403.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(AppError::Forbidden(message.into()), "forbidden")
    }

    /// 500 with the detail logged but not returned.
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(AppError::Internal(detail.into()), "internal_error")
    }

    /// The wrapped application error.
    #[must_use]
    pub const fn app_error(&self) -> &AppError {
        &self.error
    }

    /// Builds an error from a domain error's status, code and message.
    fn from_domain(status: u16, code: &'static str, message: String) -> Self {
        let error = match status {
            400 => AppError::Validation(message),
            401 => AppError::Unauthorized(message),
            403 => AppError::Forbidden(message),
            404 => AppError::NotFound(message),
            409 => AppError::Conflict(message),
            422 => AppError::BusinessRule(message),
            _ => AppError::Internal(message),
        };
        Self { error, code }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.error.is_server_error() {
            error!(error = %self.error, code = self.code, "Request failed");
        }
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(json!({
                "error": self.code.to_ascii_lowercase(),
                "message": self.error.public_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        let code = error.error_code();
        Self { error, code }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::new(AppError::Database(err.to_string()), "database_error")
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self::from_domain(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<AssignmentError> for ApiError {
    fn from(err: AssignmentError) -> Self {
        Self::from_domain(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        Self::from_domain(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<BatchError> for ApiError {
    fn from(err: BatchError) -> Self {
        Self::from_domain(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<ChannelError> for ApiError {
    fn from(err: ChannelError) -> Self {
        Self::from_domain(err.http_status_code(), err.error_code(), err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort => Self::validation("weak_password", err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<AdmissionError> for ApiError {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::Ledger(e) => e.into(),
            AdmissionError::Database(e) => e.into(),
        }
    }
}

impl From<StudentError> for ApiError {
    fn from(err: StudentError) -> Self {
        match err {
            StudentError::Registration(e) => e.into(),
            StudentError::Database(e) => e.into(),
        }
    }
}

impl From<PaymentSourceError> for ApiError {
    fn from(err: PaymentSourceError) -> Self {
        match err {
            PaymentSourceError::Assignment(e) => e.into(),
            PaymentSourceError::NotFound(id) => {
                Self::not_found("payment_source_not_found", format!("Payment source not found: {id}"))
            }
            PaymentSourceError::Database(e) => e.into(),
        }
    }
}

impl From<BatchRepoError> for ApiError {
    fn from(err: BatchRepoError) -> Self {
        match err {
            BatchRepoError::NotFound(id) => {
                Self::not_found("batch_not_found", format!("Batch not found: {id}"))
            }
            BatchRepoError::DuplicateCode(code) => Self::new(
                AppError::Conflict(format!("Batch code already exists: {code}")),
                "duplicate_batch_code",
            ),
            BatchRepoError::Database(e) => e.into(),
        }
    }
}
