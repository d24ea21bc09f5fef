//! Attendance records and performance reviews.

pub mod handlers;
pub mod store;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::validation::{one_of, optional, required};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
}

impl AttendanceStatus {
    const CHOICES: [(&'static str, AttendanceStatus); 4] = [
        ("present", AttendanceStatus::Present),
        ("absent", AttendanceStatus::Absent),
        ("late", AttendanceStatus::Late),
        ("half_day", AttendanceStatus::HalfDay),
    ];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        one_of("status", value, &Self::CHOICES)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::HalfDay => "half_day",
        }
    }
}

/// `part` of `total` as a percentage rounded to one decimal.
pub fn percentage(part: i64, total: i64) -> Option<f64> {
    if total <= 0 {
        return None;
    }
    Some((part as f64 * 1000.0 / total as f64).round() / 10.0)
}

#[derive(Debug, Deserialize)]
pub struct RecordAttendanceRequest {
    pub employee_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendance {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

impl RecordAttendanceRequest {
    pub fn validate(self) -> Result<NewAttendance, AppError> {
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out < check_in {
                return Err(AppError::Validation(
                    "check_out must not be before check_in".to_string(),
                ));
            }
        }
        Ok(NewAttendance {
            employee_id: self
                .employee_id
                .ok_or_else(|| AppError::Validation("employee_id is required".to_string()))?,
            date: self
                .date
                .ok_or_else(|| AppError::Validation("date is required".to_string()))?,
            check_in: self.check_in,
            check_out: self.check_out,
            status: match self.status.as_deref() {
                Some(s) => AttendanceStatus::parse(s.trim())?,
                None => AttendanceStatus::Present,
            },
            notes: optional(self.notes),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct WriteReviewRequest {
    pub employee_id: Option<Uuid>,
    #[serde(default)]
    pub review_period: String,
    pub rating: Option<i32>,
    pub strengths: Option<String>,
    pub areas_for_improvement: Option<String>,
    pub goals: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub employee_id: Uuid,
    pub review_period: String,
    pub rating: i32,
    pub strengths: Option<String>,
    pub areas_for_improvement: Option<String>,
    pub goals: Option<String>,
    pub comments: Option<String>,
}

impl WriteReviewRequest {
    pub fn validate(self) -> Result<NewReview, AppError> {
        let rating = self
            .rating
            .ok_or_else(|| AppError::Validation("rating is required".to_string()))?;
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::Validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        Ok(NewReview {
            employee_id: self
                .employee_id
                .ok_or_else(|| AppError::Validation("employee_id is required".to_string()))?,
            review_period: required("review_period", &self.review_period)?,
            rating,
            strengths: optional(self.strengths),
            areas_for_improvement: optional(self.areas_for_improvement),
            goals: optional(self.goals),
            comments: optional(self.comments),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: Option<i32>) -> WriteReviewRequest {
        WriteReviewRequest {
            employee_id: Some(Uuid::new_v4()),
            review_period: "2024-H1".to_string(),
            rating,
            strengths: Some("Ownership".to_string()),
            areas_for_improvement: None,
            goals: Some(" ".to_string()),
            comments: None,
        }
    }

    #[test]
    fn test_rating_must_be_one_to_five() {
        assert!(review(Some(0)).validate().is_err());
        assert!(review(Some(6)).validate().is_err());
        assert!(review(None).validate().is_err());
        let ok = review(Some(5)).validate().unwrap();
        assert_eq!(ok.rating, 5);
        assert_eq!(ok.goals, None);
    }

    #[test]
    fn test_review_period_is_required() {
        let mut req = review(Some(3));
        req.review_period = String::new();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_attendance_defaults_to_present() {
        let req: RecordAttendanceRequest = serde_json::from_str(&format!(
            r#"{{"employee_id": "{}", "date": "2024-04-02"}}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert_eq!(req.validate().unwrap().status, AttendanceStatus::Present);
    }

    #[test]
    fn test_attendance_rejects_inverted_times() {
        let req: RecordAttendanceRequest = serde_json::from_str(&format!(
            r#"{{"employee_id": "{}", "date": "2024-04-02",
                "check_in": "2024-04-02T17:00:00Z", "check_out": "2024-04-02T09:00:00Z",
                "status": "late"}}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), None);
        assert_eq!(percentage(2, 3), Some(66.7));
        assert_eq!(percentage(5, 5), Some(100.0));
    }

    #[test]
    fn test_attendance_status_values() {
        assert_eq!(
            AttendanceStatus::parse("half_day").unwrap(),
            AttendanceStatus::HalfDay
        );
        assert!(AttendanceStatus::parse("remote").is_err());
    }
}
