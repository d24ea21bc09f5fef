use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::extract::UploadForm;
use super::prompts::{CANDIDATE_PERSONA, CANDIDATE_PROMPT_TEMPLATE};
use super::schema::CandidateReply;
use crate::errors::AppError;
use crate::llm_client::{complete_json, prompts::json_system, ChatModel};
use crate::models::recruitment::CandidateResumeRow;

/// The text fields sent alongside an uploaded candidate resume.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSubmission {
    pub candidate_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
}

impl CandidateSubmission {
    pub fn from_form(form: &UploadForm) -> Result<Self, AppError> {
        Ok(Self {
            candidate_name: form.require_text("candidate_name")?,
            email: form.require_text("email")?,
            phone: form.text("phone"),
            position: form.require_text("position")?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub candidate: CandidateResumeRow,
    pub analysis: CandidateReply,
}

pub async fn analyze(
    model: &dyn ChatModel,
    position: &str,
    resume_text: &str,
) -> Result<CandidateReply, AppError> {
    let system = json_system(&CANDIDATE_PERSONA.replace("{position}", position));
    let prompt = CANDIDATE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);

    let reply: CandidateReply = complete_json(model, &system, &prompt).await?;
    reply.validate()?;
    Ok(reply)
}

pub async fn record(
    pool: &PgPool,
    submission: &CandidateSubmission,
    resume_url: &str,
    resume_text: &str,
    reply: &CandidateReply,
    uploaded_by: Uuid,
) -> Result<CandidateResumeRow, AppError> {
    let scores = reply.validate()?;
    let skill_match = (!reply.skill_match.is_null()).then(|| reply.skill_match.clone());

    let row = sqlx::query_as::<_, CandidateResumeRow>(
        r#"
        INSERT INTO candidate_resumes
            (candidate_name, email, phone, position_applied, resume_url, resume_text,
             ai_overall_score, ai_cultural_fit_score, ai_summary, ai_skill_match,
             ai_strengths, ai_weaknesses, ai_red_flags, uploaded_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(&submission.candidate_name)
    .bind(&submission.email)
    .bind(&submission.phone)
    .bind(&submission.position)
    .bind(resume_url)
    .bind(resume_text)
    .bind(scores.overall)
    .bind(scores.cultural_fit)
    .bind(&reply.summary)
    .bind(skill_match)
    .bind(&reply.strengths)
    .bind(&reply.weaknesses)
    .bind(&reply.red_flags)
    .bind(uploaded_by)
    .fetch_one(pool)
    .await?;

    info!(
        "Candidate {} ({}) analyzed with overall score {}",
        row.candidate_name, row.position_applied, scores.overall
    );
    Ok(row)
}
