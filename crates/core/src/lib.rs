//! Core business logic for Feedesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Roles and password hashing
//! - `ledger` - Admission fee ledger: opening, payments, invariants
//! - `assignment` - Ordered payment-source assignment per batch
//! - `channel` - Payment channels and the stored channel reference
//! - `batch` - Course batch rules
//! - `registration` - Student self-registration rules
//! - `reports` - Collection and outstanding-fee aggregation

pub mod assignment;
pub mod auth;
pub mod batch;
pub mod channel;
pub mod ledger;
pub mod registration;
pub mod reports;
