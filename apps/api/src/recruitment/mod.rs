//! Job postings, interview scheduling and the recruitment record lists.

pub mod handlers;
pub mod store;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::validation::{one_of, optional, required};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    const CHOICES: [(&'static str, JobType); 4] = [
        ("full-time", JobType::FullTime),
        ("part-time", JobType::PartTime),
        ("contract", JobType::Contract),
        ("internship", JobType::Internship),
    ];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        one_of("job_type", value, &Self::CHOICES)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingStatus {
    Open,
    Closed,
}

impl PostingStatus {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        one_of(
            "status",
            value,
            &[("open", PostingStatus::Open), ("closed", PostingStatus::Closed)],
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PostingStatus::Open => "open",
            PostingStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewType {
    Phone,
    Video,
    InPerson,
}

impl InterviewType {
    const CHOICES: [(&'static str, InterviewType); 3] = [
        ("phone", InterviewType::Phone),
        ("video", InterviewType::Video),
        ("in-person", InterviewType::InPerson),
    ];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        one_of("interview_type", value, &Self::CHOICES)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InterviewType::Phone => "phone",
            InterviewType::Video => "video",
            InterviewType::InPerson => "in-person",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    const CHOICES: [(&'static str, InterviewStatus); 3] = [
        ("scheduled", InterviewStatus::Scheduled),
        ("completed", InterviewStatus::Completed),
        ("cancelled", InterviewStatus::Cancelled),
    ];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        one_of("status", value, &Self::CHOICES)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateJobPostingRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub description: String,
    pub requirements: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: String,
    pub salary_range: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewJobPosting {
    pub title: String,
    pub department: String,
    pub description: String,
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub job_type: JobType,
    pub salary_range: Option<String>,
}

impl CreateJobPostingRequest {
    pub fn validate(self) -> Result<NewJobPosting, AppError> {
        Ok(NewJobPosting {
            title: required("title", &self.title)?,
            department: required("department", &self.department)?,
            description: required("description", &self.description)?,
            requirements: optional(self.requirements),
            location: optional(self.location),
            job_type: JobType::parse(self.job_type.trim())?,
            salary_range: optional(self.salary_range),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub candidate_email: String,
    pub job_posting_id: Option<Uuid>,
    pub interview_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interview_type: String,
    pub interviewer_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInterview {
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_posting_id: Option<Uuid>,
    pub interview_date: DateTime<Utc>,
    pub interview_type: InterviewType,
    pub interviewer_id: Option<Uuid>,
    pub notes: Option<String>,
}

impl CreateInterviewRequest {
    pub fn validate(self) -> Result<NewInterview, AppError> {
        Ok(NewInterview {
            candidate_name: required("candidate_name", &self.candidate_name)?,
            candidate_email: required("candidate_email", &self.candidate_email)?,
            job_posting_id: self.job_posting_id,
            interview_date: self
                .interview_date
                .ok_or_else(|| AppError::Validation("interview_date is required".to_string()))?,
            interview_type: InterviewType::parse(self.interview_type.trim())?,
            interviewer_id: self.interviewer_id,
            notes: optional(self.notes),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_posting_requires_core_fields() {
        let req: CreateJobPostingRequest = serde_json::from_str(
            r#"{"title": "Backend Engineer", "department": "Engineering",
                "description": "Build services", "job_type": "full-time",
                "location": ""}"#,
        )
        .unwrap();
        let posting = req.validate().unwrap();
        assert_eq!(posting.job_type, JobType::FullTime);
        assert_eq!(posting.location, None);

        let req: CreateJobPostingRequest = serde_json::from_str(
            r#"{"title": "Backend Engineer", "department": "Engineering",
                "description": "", "job_type": "full-time"}"#,
        )
        .unwrap();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_job_type_uses_hyphenated_values() {
        assert_eq!(JobType::parse("part-time").unwrap(), JobType::PartTime);
        assert!(JobType::parse("part_time").is_err());
    }

    #[test]
    fn test_interview_requires_date_and_known_type() {
        let req: CreateInterviewRequest = serde_json::from_str(
            r#"{"candidate_name": "Grace", "candidate_email": "grace@example.com",
                "interview_date": "2024-05-02T14:00:00Z", "interview_type": "in-person"}"#,
        )
        .unwrap();
        let interview = req.validate().unwrap();
        assert_eq!(interview.interview_type, InterviewType::InPerson);
        assert_eq!(interview.job_posting_id, None);

        let req: CreateInterviewRequest = serde_json::from_str(
            r#"{"candidate_name": "Grace", "candidate_email": "grace@example.com",
                "interview_type": "video"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_status_values() {
        assert_eq!(PostingStatus::parse("closed").unwrap(), PostingStatus::Closed);
        assert!(PostingStatus::parse("draft").is_err());
        assert_eq!(
            InterviewStatus::parse("cancelled").unwrap(),
            InterviewStatus::Cancelled
        );
        assert!(InterviewStatus::parse("no-show").is_err());
    }
}
