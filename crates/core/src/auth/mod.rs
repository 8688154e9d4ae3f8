//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification and the change-password rule
//! - User role definitions and role gates

mod password;

pub use password::{
    MIN_PASSWORD_LEN, PasswordError, hash_password, validate_new_password, verify_password,
};

use serde::{Deserialize, Serialize};

/// Roles a login identity can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Configures batches and payment sources, reads reports.
    Admin,
    /// Front desk: admissions and fee collection.
    Reception,
    /// Self-registered student, sees only their own ledger.
    Student,
}

impl UserRole {
    /// Returns the role name as stored and as carried in tokens.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Reception => "reception",
            Self::Student => "student",
        }
    }

    /// Landing page for the role after login.
    #[must_use]
    pub const fn home_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Reception => "/reception/dashboard",
            Self::Student => "/student/dashboard",
        }
    }

    /// Returns true if this role may view any fee receipt, not only its own.
    #[must_use]
    pub const fn can_view_any_receipt(&self) -> bool {
        matches!(self, Self::Admin | Self::Reception)
    }

    /// Returns true if this role may collect fees.
    #[must_use]
    pub const fn can_collect_fees(&self) -> bool {
        matches!(self, Self::Reception)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "reception" => Ok(Self::Reception),
            "student" => Ok(Self::Student),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}
