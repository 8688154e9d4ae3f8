//! Course batch rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a batch accepts new admissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    /// Open for admissions.
    Active,
    /// No new admissions.
    Closed,
}

impl BatchStatus {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BatchStatus {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Closed" => Ok(Self::Closed),
            _ => Err(BatchError::InvalidStatus(s.to_string())),
        }
    }
}

/// Batch validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// Blank batch code.
    #[error("Batch code is required")]
    CodeRequired,

    /// Blank course name.
    #[error("Course name is required")]
    CourseRequired,

    /// Fee of zero or less.
    #[error("Total fee must be positive")]
    NonPositiveFee,

    /// End date before start date.
    #[error("End date cannot be before start date")]
    EndBeforeStart,

    /// Unknown status string.
    #[error("Invalid batch status: {0}")]
    InvalidStatus(String),
}

impl BatchError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CodeRequired => "BATCH_CODE_REQUIRED",
            Self::CourseRequired => "COURSE_REQUIRED",
            Self::NonPositiveFee => "NON_POSITIVE_FEE",
            Self::EndBeforeStart => "INVALID_DATE_RANGE",
            Self::InvalidStatus(_) => "INVALID_BATCH_STATUS",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

/// A validated batch ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBatch {
    /// Unique batch code.
    pub code: String,
    /// Course name.
    pub course_name: String,
    /// Fee in minor units.
    pub total_fee: i64,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day, if known.
    pub end_date: Option<NaiveDate>,
}

impl NewBatch {
    /// Validates raw form input.
    ///
    /// # Errors
    ///
    /// Returns `BatchError` for blank fields, a non-positive fee, or an end
    /// date before the start date.
    pub fn parse(
        code: &str,
        course_name: &str,
        total_fee: i64,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, BatchError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(BatchError::CodeRequired);
        }
        let course_name = course_name.trim();
        if course_name.is_empty() {
            return Err(BatchError::CourseRequired);
        }
        if total_fee <= 0 {
            return Err(BatchError::NonPositiveFee);
        }
        if end_date.is_some_and(|end| end < start_date) {
            return Err(BatchError::EndBeforeStart);
        }

        Ok(Self {
            code: code.to_string(),
            course_name: course_name.to_string(),
            total_fee,
            start_date,
            end_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn test_parse_trims_fields() {
        let batch = NewBatch::parse(" B-101 ", " Python ", 10_000, date(1), Some(date(30))).unwrap();
        assert_eq!(batch.code, "B-101");
        assert_eq!(batch.course_name, "Python");
    }

    #[test]
    fn test_same_day_batch_is_valid() {
        assert!(NewBatch::parse("B1", "Rust", 1, date(5), Some(date(5))).is_ok());
    }

    #[rstest]
    #[case("", "Python", 100, None, BatchError::CodeRequired)]
    #[case("B1", "  ", 100, None, BatchError::CourseRequired)]
    #[case("B1", "Python", 0, None, BatchError::NonPositiveFee)]
    #[case("B1", "Python", 100, Some(2), BatchError::EndBeforeStart)]
    fn test_invalid_batches(
        #[case] code: &str,
        #[case] course: &str,
        #[case] fee: i64,
        #[case] end_day: Option<u32>,
        #[case] expected: BatchError,
    ) {
        let result = NewBatch::parse(code, course, fee, date(10), end_day.map(date));
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!("Closed".parse::<BatchStatus>().unwrap(), BatchStatus::Closed);
        assert_eq!(BatchStatus::Active.to_string(), "Active");
        assert!("Open".parse::<BatchStatus>().is_err());
    }
}
