use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub description: String,
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub job_type: String,
    pub salary_range: Option<String>,
    pub status: String,
    pub posted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_posting_id: Option<Uuid>,
    pub interview_date: DateTime<Utc>,
    pub interview_type: String,
    pub interviewer_id: Option<Uuid>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeScreeningRow {
    pub id: Uuid,
    pub candidate_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position_applied: String,
    pub resume_url: String,
    pub ai_score: Option<i32>,
    pub ai_analysis: Option<String>,
    pub status: String,
    pub screened_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateResumeRow {
    pub id: Uuid,
    pub candidate_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position_applied: String,
    pub resume_url: String,
    pub resume_text: Option<String>,
    pub ai_overall_score: Option<i32>,
    pub ai_cultural_fit_score: Option<i32>,
    pub ai_summary: Option<String>,
    pub ai_skill_match: Option<Value>,
    pub ai_strengths: Option<Vec<String>>,
    pub ai_weaknesses: Option<Vec<String>>,
    pub ai_red_flags: Option<Vec<String>>,
    pub status: String,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
