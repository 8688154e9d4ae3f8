//! Student repository: self-registration and lookups.

use chrono::Utc;
use feedesk_core::registration::{
    NewStudent, RegistrationError, generate_student_code, student_code_prefix,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use super::user::insert_user;
use crate::entities::{sea_orm_active_enums::UserRole, students, users};

/// Error types for student operations.
#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    /// Registration rule violated.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A registered student together with their login.
#[derive(Debug, Clone)]
pub struct RegisteredStudent {
    /// Student record.
    pub student: students::Model,
    /// Login with role `student`.
    pub user: users::Model,
}

/// Registration attempts before a student code conflict is reported.
pub const CODE_ATTEMPTS: u32 = 3;

/// Student repository.
#[derive(Debug, Clone)]
pub struct StudentRepository {
    db: DatabaseConnection,
}

impl StudentRepository {
    /// Creates a new student repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a student and their `student` user in one transaction.
    ///
    /// `password_hash` must be the hash of [`NewStudent::initial_password`].
    /// A student code taken by a concurrent registration is regenerated, up
    /// to [`CODE_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if the mobile or email belongs to an
    /// existing student, or the email to an existing user.
    pub async fn register(
        &self,
        input: &NewStudent,
        password_hash: &str,
    ) -> Result<RegisteredStudent, StudentError> {
        let mut attempt = 1;
        loop {
            match self.try_register(input, password_hash).await {
                Err(StudentError::Database(err))
                    if is_student_code_conflict(&err) && attempt < CODE_ATTEMPTS =>
                {
                    tracing::warn!(attempt, "Student code taken, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn try_register(
        &self,
        input: &NewStudent,
        password_hash: &str,
    ) -> Result<RegisteredStudent, StudentError> {
        let txn = self.db.begin().await?;

        let taken = students::Entity::find()
            .filter(
                Condition::any()
                    .add(students::Column::Mobile.eq(input.mobile.as_str()))
                    .add(students::Column::Email.eq(input.email.as_str())),
            )
            .count(&txn)
            .await?
            + users::Entity::find()
                .filter(users::Column::Email.eq(input.email.as_str()))
                .count(&txn)
                .await?;
        if taken > 0 {
            return Err(RegistrationError::AlreadyRegistered.into());
        }

        let now = Utc::now();
        let same_ms = students::Entity::find()
            .filter(students::Column::StudentCode.starts_with(student_code_prefix(now)))
            .count(&txn)
            .await?;

        let student = students::ActiveModel {
            id: Set(Uuid::now_v7()),
            student_code: Set(generate_student_code(now, same_ms)),
            name: Set(input.name.clone()),
            mobile: Set(input.mobile.clone()),
            email: Set(input.email.clone()),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(map_unique_violation)?;

        let user = insert_user(&txn, &input.email, password_hash, UserRole::Student)
            .await
            .map_err(map_unique_violation)?;

        txn.commit().await?;

        tracing::info!(
            student_id = %student.id,
            student_code = %student.student_code,
            "Student registered"
        );

        Ok(RegisteredStudent { student, user })
    }

    /// Finds a student by mobile number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_mobile(&self, mobile: &str) -> Result<Option<students::Model>, DbErr> {
        students::Entity::find()
            .filter(students::Column::Mobile.eq(mobile))
            .one(&self.db)
            .await
    }

    /// Finds a student by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<students::Model>, DbErr> {
        students::Entity::find()
            .filter(students::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a student by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<students::Model>, DbErr> {
        students::Entity::find_by_id(id).one(&self.db).await
    }
}

/// Mobile or email conflicts mean the student exists; a student code
/// conflict stays a database error so `register` can retry it.
fn map_unique_violation(err: DbErr) -> StudentError {
    if is_student_code_conflict(&err) {
        return StudentError::Database(err);
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RegistrationError::AlreadyRegistered.into(),
        _ => StudentError::Database(err),
    }
}

fn is_student_code_conflict(err: &DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("student_code")
    )
}
