//! Registration error types.

use thiserror::Error;

/// Errors raised while registering a student.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// Blank name.
    #[error("Name is required")]
    NameRequired,

    /// Mobile number is not 10-15 digits.
    #[error("Mobile number must be 10 to 15 digits")]
    InvalidMobile,

    /// Malformed email.
    #[error("A valid email is required")]
    InvalidEmail,

    /// Mobile or email already in use.
    #[error("Student already registered")]
    AlreadyRegistered,
}

impl RegistrationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NameRequired => "NAME_REQUIRED",
            Self::InvalidMobile => "INVALID_MOBILE",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::AlreadyRegistered => 409,
            _ => 400,
        }
    }
}
