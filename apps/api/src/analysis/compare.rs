use std::collections::HashSet;

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::prompts::{COMPARE_PERSONA, COMPARE_PROMPT_TEMPLATE};
use super::schema::ComparisonReply;
use crate::errors::AppError;
use crate::llm_client::{complete_json, prompts::json_system, ChatModel};
use crate::models::recruitment::CandidateResumeRow;
use crate::validation::required;

pub const MIN_CANDIDATES: usize = 2;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[serde(default)]
    pub candidate_ids: Vec<Uuid>,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub candidate_ids: Vec<Uuid>,
    pub position: String,
}

impl CompareRequest {
    pub fn validate(self) -> Result<Comparison, AppError> {
        let position = required("position", &self.position)?;

        let mut seen = HashSet::new();
        let candidate_ids: Vec<Uuid> = self
            .candidate_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();
        if candidate_ids.len() < MIN_CANDIDATES {
            return Err(AppError::Validation(format!(
                "candidateIds must name at least {MIN_CANDIDATES} different candidates"
            )));
        }

        Ok(Comparison {
            candidate_ids,
            position,
        })
    }
}

/// Puts loaded candidates in request order; every requested id must exist.
pub fn in_request_order(
    ids: &[Uuid],
    mut rows: Vec<CandidateResumeRow>,
) -> Result<Vec<CandidateResumeRow>, AppError> {
    let mut ordered = Vec::with_capacity(ids.len());
    for id in ids {
        let pos = rows
            .iter()
            .position(|r| r.id == *id)
            .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
        ordered.push(rows.swap_remove(pos));
    }
    Ok(ordered)
}

fn candidates_json(candidates: &[CandidateResumeRow]) -> String {
    let summaries: Vec<_> = candidates
        .iter()
        .map(|c| {
            json!({
                "name": c.candidate_name,
                "score": c.ai_overall_score,
                "culturalFit": c.ai_cultural_fit_score,
                "summary": c.ai_summary,
                "strengths": c.ai_strengths,
                "weaknesses": c.ai_weaknesses,
            })
        })
        .collect();
    serde_json::Value::Array(summaries).to_string()
}

pub async fn analyze(
    model: &dyn ChatModel,
    position: &str,
    candidates: &[CandidateResumeRow],
) -> Result<ComparisonReply, AppError> {
    let system = json_system(COMPARE_PERSONA);
    let prompt = COMPARE_PROMPT_TEMPLATE
        .replace("{count}", &candidates.len().to_string())
        .replace("{position}", position)
        .replace("{candidates_json}", &candidates_json(candidates));

    let reply: ComparisonReply = complete_json(model, &system, &prompt).await?;
    reply.validate(candidates.len())?;
    Ok(reply)
}
