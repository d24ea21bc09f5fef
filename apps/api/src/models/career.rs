use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeResumeRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub resume_url: String,
    pub resume_text: Option<String>,
    pub ai_skill_gaps: Vec<String>,
    pub ai_career_path: Value,
    pub ai_learning_roadmap: Value,
    pub ai_promotion_probability: i32,
    pub ai_attrition_risk: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LearningRecommendationRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub skill: String,
    pub course_name: String,
    pub platform: String,
    pub priority: String,
    pub ai_reasoning: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An internal job recommendation joined with the posting it points at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InternalJobMatch {
    pub id: Uuid,
    pub job_posting_id: Uuid,
    pub ai_match_score: Option<i32>,
    pub ai_reasoning: Option<String>,
    pub title: String,
    pub department: String,
    pub location: Option<String>,
    pub job_type: String,
    pub created_at: DateTime<Utc>,
}
