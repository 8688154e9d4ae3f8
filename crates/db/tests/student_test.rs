//! Integration tests for student registration and user logins.

mod common;

use std::collections::HashSet;

use common::setup_db;
use feedesk_core::registration::{NewStudent, RegistrationError};
use feedesk_db::entities::sea_orm_active_enums::UserRole;
use feedesk_db::repositories::StudentError;
use feedesk_db::{StudentRepository, UserRepository};

#[tokio::test]
async fn test_register_creates_student_and_user() {
    let db = setup_db().await;
    let input = NewStudent::parse("Asha", "9876543210", "Asha@Example.com").unwrap();

    let registered = StudentRepository::new(db.clone())
        .register(&input, "$argon2id$test_hash")
        .await
        .expect("Failed to register");

    assert!(registered.student.student_code.starts_with("STD"));
    assert_eq!(registered.student.email, "asha@example.com");
    assert_eq!(registered.user.email, "asha@example.com");
    assert_eq!(registered.user.role, UserRole::Student);

    let found = StudentRepository::new(db.clone())
        .find_by_mobile("9876543210")
        .await
        .unwrap()
        .expect("Student should exist");
    assert_eq!(found.id, registered.student.id);
}

#[tokio::test]
async fn test_back_to_back_registrations_get_distinct_codes() {
    let db = setup_db().await;
    let repo = StudentRepository::new(db.clone());

    let mut codes = HashSet::new();
    for i in 0..40 {
        let mobile = format!("98000000{i:02}");
        let input = NewStudent::parse("Walk-in", &mobile, &format!("walkin{i}@example.com"))
            .unwrap();
        let registered = repo
            .register(&input, "hash")
            .await
            .unwrap_or_else(|e| panic!("student {mobile} rejected: {e}"));
        codes.insert(registered.student.student_code);
    }

    assert_eq!(codes.len(), 40);
}

#[tokio::test]
async fn test_register_rejects_duplicate_mobile_or_email() {
    let db = setup_db().await;
    let repo = StudentRepository::new(db.clone());
    repo.register(
        &NewStudent::parse("Asha", "9876543210", "asha@example.com").unwrap(),
        "hash",
    )
    .await
    .unwrap();

    for (mobile, email) in [
        ("9876543210", "other@example.com"),
        ("9999999999", "asha@example.com"),
    ] {
        let err = repo
            .register(&NewStudent::parse("Dup", mobile, email).unwrap(), "hash")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StudentError::Registration(RegistrationError::AlreadyRegistered)
        ));
    }
}

#[tokio::test]
async fn test_register_rejects_staff_email() {
    let db = setup_db().await;
    UserRepository::new(db.clone())
        .create("desk@example.com", "hash", UserRole::Reception)
        .await
        .unwrap();

    let err = StudentRepository::new(db)
        .register(
            &NewStudent::parse("Desk", "9876500000", "desk@example.com").unwrap(),
            "hash",
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Student already registered");
}

#[tokio::test]
async fn test_update_password() {
    let db = setup_db().await;
    let users = UserRepository::new(db);
    let user = users
        .create("admin@example.com", "old-hash", UserRole::Admin)
        .await
        .unwrap();

    users.update_password(user.id, "new-hash").await.unwrap();

    let found = users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(found.password_hash, "new-hash");
    assert!(users.email_exists("admin@example.com").await.unwrap());
    assert!(!users.email_exists("nobody@example.com").await.unwrap());
}
