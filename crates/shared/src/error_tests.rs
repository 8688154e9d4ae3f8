use rstest::rstest;

use crate::error::AppError;

#[rstest]
#[case(AppError::Unauthorized("x".into()), 401, "UNAUTHORIZED")]
#[case(AppError::Forbidden("x".into()), 403, "FORBIDDEN")]
#[case(AppError::NotFound("x".into()), 404, "NOT_FOUND")]
#[case(AppError::Validation("x".into()), 400, "VALIDATION_ERROR")]
#[case(AppError::BusinessRule("x".into()), 422, "BUSINESS_RULE_VIOLATION")]
#[case(AppError::Conflict("x".into()), 409, "CONFLICT")]
#[case(AppError::Database("x".into()), 500, "DATABASE_ERROR")]
#[case(AppError::Internal("x".into()), 500, "INTERNAL_ERROR")]
fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(err.status_code(), status);
    assert_eq!(err.error_code(), code);
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        AppError::BusinessRule("Amount exceeds pending fee (₹600)".into()).to_string(),
        "Business rule violation: Amount exceeds pending fee (₹600)"
    );
    assert_eq!(
        AppError::Conflict("msg".into()).to_string(),
        "Conflict: msg"
    );
}

#[test]
fn test_public_message_passes_through_client_errors() {
    let err = AppError::Validation("Payment method is required.".into());
    assert_eq!(err.public_message(), "Payment method is required.");
    assert!(!err.is_server_error());
}

#[test]
fn test_public_message_masks_server_errors() {
    let err = AppError::Database("relation \"admissions\" does not exist".into());
    assert_eq!(err.public_message(), "An internal error occurred");
    assert!(err.is_server_error());
}
