use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::prompts::{SCREENING_PERSONA, SCREENING_PROMPT_TEMPLATE};
use super::schema::ScreeningReply;
use crate::errors::AppError;
use crate::llm_client::{complete_json, prompts::json_system, ChatModel};
use crate::models::recruitment::ResumeScreeningRow;
use crate::validation::{optional, required};

/// Stored as the resume location of text-only screenings.
pub const TEXT_RESUME_URL: &str = "text-based";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub candidate_email: String,
    pub candidate_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Screening {
    pub resume_text: String,
    pub position: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_phone: Option<String>,
}

impl ScreeningRequest {
    pub fn validate(self) -> Result<Screening, AppError> {
        Ok(Screening {
            resume_text: required("resumeText", &self.resume_text)?,
            position: required("position", &self.position)?,
            candidate_name: required("candidateName", &self.candidate_name)?,
            candidate_email: required("candidateEmail", &self.candidate_email)?,
            candidate_phone: optional(self.candidate_phone),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub screening: ResumeScreeningRow,
    pub analysis: ScreeningReply,
}

/// Asks the model for a screening and returns it with its validated score.
pub async fn analyze(
    model: &dyn ChatModel,
    screening: &Screening,
) -> Result<(ScreeningReply, i32), AppError> {
    let system = json_system(&SCREENING_PERSONA.replace("{position}", &screening.position));
    let prompt = SCREENING_PROMPT_TEMPLATE.replace("{resume_text}", &screening.resume_text);

    let reply: ScreeningReply = complete_json(model, &system, &prompt).await?;
    let score = reply.validate()?;
    Ok((reply, score))
}

pub async fn record(
    pool: &PgPool,
    screening: &Screening,
    reply: &ScreeningReply,
    score: i32,
    screened_by: Uuid,
) -> Result<ResumeScreeningRow, AppError> {
    let analysis = serde_json::to_string(reply).map_err(anyhow::Error::from)?;

    let row = sqlx::query_as::<_, ResumeScreeningRow>(
        r#"
        INSERT INTO resume_screenings
            (candidate_name, email, phone, position_applied, resume_url,
             ai_score, ai_analysis, status, screened_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8)
        RETURNING *
        "#,
    )
    .bind(&screening.candidate_name)
    .bind(&screening.candidate_email)
    .bind(&screening.candidate_phone)
    .bind(&screening.position)
    .bind(TEXT_RESUME_URL)
    .bind(score)
    .bind(analysis)
    .bind(screened_by)
    .fetch_one(pool)
    .await?;

    info!(
        "Screened {} for {} (score {score})",
        row.candidate_name, row.position_applied
    );
    Ok(row)
}
