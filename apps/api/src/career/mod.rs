//! Employee career profiles: resume analyses, learning paths and internal job matches.

pub mod handlers;
pub mod store;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::career::{EmployeeResumeRow, InternalJobMatch, LearningRecommendationRow};
use crate::models::recruitment::JobPostingRow;

/// Platform recorded for roadmap items, which name no provider.
pub const DEFAULT_PLATFORM: &str = "Online";
/// Course recorded when a roadmap item lists no resources.
pub const UNNAMED_COURSE: &str = "TBD";
pub const ROADMAP_REASONING: &str = "Recommended to close skill gap";

/// One validated career analysis, ready to store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCareerProfile {
    pub employee_id: Uuid,
    pub resume_url: String,
    pub resume_text: String,
    pub skill_gaps: Vec<String>,
    pub career_path: Value,
    pub learning_roadmap: Value,
    pub promotion_probability: i32,
    pub attrition_risk: String,
    pub recommendations: Vec<NewLearningRecommendation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLearningRecommendation {
    pub skill: String,
    pub course_name: String,
    pub priority: String,
}

#[derive(Debug, Serialize)]
pub struct CareerOverview {
    pub latest_analysis: Option<EmployeeResumeRow>,
    pub learning_recommendations: Vec<LearningRecommendationRow>,
}

#[derive(Debug, Serialize)]
pub struct InternalJobsOverview {
    pub recommendations: Vec<InternalJobMatch>,
    pub open_positions: Vec<JobPostingRow>,
}
