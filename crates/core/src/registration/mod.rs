//! Student self-registration rules.
//!
//! Registration creates a Student and a `student` User sharing the same
//! email. The user's initial password is the mobile number.

mod error;

pub use error::RegistrationError;

use chrono::{DateTime, Utc};

/// Shortest accepted mobile number.
pub const MIN_MOBILE_DIGITS: usize = 10;
/// Longest accepted mobile number.
pub const MAX_MOBILE_DIGITS: usize = 15;

/// A validated registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// Full name.
    pub name: String,
    /// Digits only.
    pub mobile: String,
    /// Lowercased email.
    pub email: String,
}

impl NewStudent {
    /// Validates raw registration input.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError` for a blank name, a malformed mobile
    /// number, or a malformed email.
    pub fn parse(name: &str, mobile: &str, email: &str) -> Result<Self, RegistrationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistrationError::NameRequired);
        }

        Ok(Self {
            name: name.to_string(),
            mobile: normalize_mobile(mobile)?,
            email: normalize_email(email)?,
        })
    }

    /// Password assigned to the new student user.
    #[must_use]
    pub fn initial_password(&self) -> &str {
        &self.mobile
    }
}

/// Validates a mobile number for registration or search.
///
/// # Errors
///
/// Returns `InvalidMobile` unless the trimmed input is 10 to 15 ASCII digits.
pub fn normalize_mobile(mobile: &str) -> Result<String, RegistrationError> {
    let mobile = mobile.trim();
    let valid_len = (MIN_MOBILE_DIGITS..=MAX_MOBILE_DIGITS).contains(&mobile.len());
    if !valid_len || !mobile.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RegistrationError::InvalidMobile);
    }
    Ok(mobile.to_string())
}

/// Trims and lowercases an email.
///
/// # Errors
///
/// Returns `InvalidEmail` unless there is text on both sides of a single `@`.
pub fn normalize_email(email: &str) -> Result<String, RegistrationError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(RegistrationError::InvalidEmail),
    }
}

/// Generates the public student code: `STD` plus the UTC timestamp to the
/// millisecond.
///
/// `earlier_in_same_ms` counts codes already issued with the same timestamp;
/// any after the first get a `-N` suffix so codes stay unique.
#[must_use]
pub fn generate_student_code(now: DateTime<Utc>, earlier_in_same_ms: u64) -> String {
    let base = student_code_prefix(now);
    if earlier_in_same_ms == 0 {
        base
    } else {
        format!("{base}-{earlier_in_same_ms}")
    }
}

/// The timestamp part shared by every code issued in the same millisecond.
#[must_use]
pub fn student_code_prefix(now: DateTime<Utc>) -> String {
    format!("STD{}", now.format("%Y%m%d%H%M%S%3f"))
}
