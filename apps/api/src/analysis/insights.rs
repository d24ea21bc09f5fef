use serde::Serialize;
use serde_json::json;

use super::prompts::{INSIGHTS_PERSONA, INSIGHTS_PROMPT_TEMPLATE};
use super::schema::InsightsReply;
use crate::errors::AppError;
use crate::llm_client::{complete_json, prompts::json_system, ChatModel};
use crate::models::recruitment::CandidateResumeRow;

/// Candidates summarized per request.
pub const INSIGHT_WINDOW: i64 = 50;
/// Of those, how many go into the prompt in detail.
pub const PROMPT_SAMPLE: usize = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    #[serde(flatten)]
    pub analysis: InsightsReply,
    pub candidates_analyzed: usize,
    /// Mean overall score of the scored candidates, if any were scored.
    pub average_score: Option<f64>,
}

pub fn average_score(candidates: &[CandidateResumeRow]) -> Option<f64> {
    let scores: Vec<i32> = candidates.iter().filter_map(|c| c.ai_overall_score).collect();
    if scores.is_empty() {
        return None;
    }
    let total: i64 = scores.iter().map(|s| i64::from(*s)).sum();
    Some(total as f64 / scores.len() as f64)
}

fn recent_json(candidates: &[CandidateResumeRow]) -> String {
    let recent: Vec<_> = candidates
        .iter()
        .take(PROMPT_SAMPLE)
        .map(|c| {
            json!({
                "position": c.position_applied,
                "score": c.ai_overall_score,
                "culturalFit": c.ai_cultural_fit_score,
                "status": c.status,
                "submitted": c.created_at.date_naive().to_string(),
            })
        })
        .collect();
    serde_json::Value::Array(recent).to_string()
}

/// `candidates` newest first.
pub async fn analyze(
    model: &dyn ChatModel,
    candidates: &[CandidateResumeRow],
) -> Result<InsightsResponse, AppError> {
    let system = json_system(INSIGHTS_PERSONA);
    let prompt = INSIGHTS_PROMPT_TEMPLATE
        .replace("{count}", &candidates.len().to_string())
        .replace("{recent_json}", &recent_json(candidates));

    let analysis: InsightsReply = complete_json(model, &system, &prompt).await?;
    analysis.validate()?;

    Ok(InsightsResponse {
        analysis,
        candidates_analyzed: candidates.len(),
        average_score: average_score(candidates),
    })
}
