//! Shapes the model must reply with, and the range checks applied before
//! anything is stored. A reply that deserializes but fails a check is as
//! unusable as one that does not parse.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

const SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;
const QUALITY_RANGE: std::ops::RangeInclusive<f64> = 0.0..=5.0;
const LEVELS: [&str; 3] = ["low", "medium", "high"];

fn malformed(reason: impl Into<String>) -> AppError {
    AppError::AiMalformedReply(reason.into())
}

/// Any number in 0-100 is accepted; the stored score is rounded.
fn check_score(field: &str, value: f64) -> Result<i32, AppError> {
    if SCORE_RANGE.contains(&value) {
        Ok(value.round() as i32)
    } else {
        Err(malformed(format!("{field} {value} is outside 0-100")))
    }
}

fn check_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(malformed(format!("{field} is empty")));
    }
    Ok(())
}

fn check_level(field: &str, value: &str) -> Result<(), AppError> {
    if LEVELS.contains(&value) {
        Ok(())
    } else {
        Err(malformed(format!("{field} '{value}' is not low, medium or high")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReply {
    pub score: f64,
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    pub recommendation: String,
}

impl ScreeningReply {
    /// Returns the score as stored.
    pub fn validate(&self) -> Result<i32, AppError> {
        check_text("summary", &self.summary)?;
        check_score("score", self.score)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReply {
    pub overall_score: f64,
    pub cultural_fit_score: f64,
    pub summary: String,
    #[serde(default)]
    pub skill_match: Value,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
}

/// Candidate scores as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateScores {
    pub overall: i32,
    pub cultural_fit: i32,
}

impl CandidateReply {
    pub fn validate(&self) -> Result<CandidateScores, AppError> {
        let overall = check_score("overallScore", self.overall_score)?;
        let cultural_fit = check_score("culturalFitScore", self.cultural_fit_score)?;
        check_text("summary", &self.summary)?;
        if !(self.skill_match.is_object() || self.skill_match.is_null()) {
            return Err(malformed("skillMatch is not an object"));
        }
        Ok(CandidateScores {
            overall,
            cultural_fit,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerPath {
    pub current: String,
    #[serde(default)]
    pub next: Vec<String>,
    #[serde(default)]
    pub timeline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub skill: String,
    #[serde(default)]
    pub resources: Vec<String>,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerReply {
    #[serde(default)]
    pub skill_gaps: Vec<String>,
    pub career_path: CareerPath,
    #[serde(default)]
    pub learning_roadmap: Vec<RoadmapItem>,
    pub promotion_probability: f64,
    pub attrition_risk: String,
}

impl CareerReply {
    /// Returns the promotion probability as stored.
    pub fn validate(&self) -> Result<i32, AppError> {
        let promotion_probability =
            check_score("promotionProbability", self.promotion_probability)?;
        check_level("attritionRisk", &self.attrition_risk)?;
        check_text("careerPath.current", &self.career_path.current)?;
        for item in &self.learning_roadmap {
            check_text("learningRoadmap.skill", &item.skill)?;
            check_level("learningRoadmap.priority", &item.priority)?;
        }
        Ok(promotion_probability)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub name: String,
    pub rank: i64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPick {
    pub name: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReply {
    pub ranking: Vec<RankedCandidate>,
    pub top_pick: TopPick,
    pub summary: String,
}

impl ComparisonReply {
    /// Every one of `candidates` ranked exactly once, 1 through `candidates`.
    pub fn validate(&self, candidates: usize) -> Result<(), AppError> {
        if self.ranking.len() != candidates {
            return Err(malformed(format!(
                "ranking lists {} candidates, expected {candidates}",
                self.ranking.len()
            )));
        }
        let mut ranks: Vec<i64> = self.ranking.iter().map(|r| r.rank).collect();
        ranks.sort_unstable();
        let expected: Vec<i64> = (1..=candidates as i64).collect();
        if ranks != expected {
            return Err(malformed(format!(
                "ranks {ranks:?} are not 1 to {candidates} each used once"
            )));
        }
        check_text("topPick.name", &self.top_pick.name)?;
        check_text("summary", &self.summary)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReply {
    pub predicted_time_to_hire: f64,
    pub candidate_quality_avg: f64,
    pub insights: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl InsightsReply {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.predicted_time_to_hire.is_finite() || self.predicted_time_to_hire < 0.0 {
            return Err(malformed(format!(
                "predictedTimeToHire {} is negative",
                self.predicted_time_to_hire
            )));
        }
        if !QUALITY_RANGE.contains(&self.candidate_quality_avg) {
            return Err(malformed(format!(
                "candidateQualityAvg {} is outside 0-5",
                self.candidate_quality_avg
            )));
        }
        check_text("insights", &self.insights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_malformed<T: std::fmt::Debug>(result: Result<T, AppError>) -> bool {
        matches!(result, Err(AppError::AiMalformedReply(_)))
    }

    #[test]
    fn test_screening_score_bounds() {
        let mut reply: ScreeningReply = serde_json::from_str(
            r#"{"score": 100, "summary": "Strong", "strengths": [], "weaknesses": [],
                "recommendation": "interview"}"#,
        )
        .unwrap();
        assert_eq!(reply.validate().unwrap(), 100);
        reply.score = 100.4;
        assert!(is_malformed(reply.validate()));
        reply.score = 101.0;
        assert!(is_malformed(reply.validate()));
        reply.score = -1.0;
        assert!(is_malformed(reply.validate()));
    }

    #[test]
    fn test_screening_rejects_empty_summary() {
        let reply: ScreeningReply = serde_json::from_str(
            r#"{"score": 50, "summary": "  ", "recommendation": "hold"}"#,
        )
        .unwrap();
        assert!(is_malformed(reply.validate()));
    }

    #[test]
    fn test_fractional_score_is_rounded() {
        let reply: ScreeningReply = serde_json::from_str(
            r#"{"score": 72.5, "summary": "ok", "recommendation": "hold"}"#,
        )
        .unwrap();
        assert_eq!(reply.validate().unwrap(), 73);
    }

    #[test]
    fn test_non_finite_score_is_malformed() {
        assert!(is_malformed(check_score("score", f64::NAN)));
        assert!(is_malformed(check_score("score", f64::INFINITY)));
    }

    #[test]
    fn test_candidate_scores_are_rounded() {
        let reply: CandidateReply = serde_json::from_str(
            r#"{"overallScore": 81.6, "culturalFitScore": 70, "summary": "ok"}"#,
        )
        .unwrap();
        assert_eq!(
            reply.validate().unwrap(),
            CandidateScores {
                overall: 82,
                cultural_fit: 70
            }
        );
    }

    #[test]
    fn test_candidate_reply_checks_both_scores() {
        let reply: CandidateReply = serde_json::from_str(
            r#"{"overallScore": 80, "culturalFitScore": 140, "summary": "ok",
                "skillMatch": {"Rust": 90}}"#,
        )
        .unwrap();
        assert!(is_malformed(reply.validate()));
        assert!(reply.red_flags.is_empty());
    }

    #[test]
    fn test_career_reply_checks_levels() {
        let json = r#"{
            "skillGaps": ["Leadership"],
            "careerPath": {"current": "Engineer", "next": ["Senior Engineer"], "timeline": "1-2 years"},
            "learningRoadmap": [{"skill": "Leadership", "resources": ["Course"], "priority": "high"}],
            "promotionProbability": 75,
            "attritionRisk": "low"
        }"#;
        let reply: CareerReply = serde_json::from_str(json).unwrap();
        assert!(reply.validate().is_ok());

        let mut bad = reply.clone();
        bad.attrition_risk = "severe".to_string();
        assert!(is_malformed(bad.validate()));

        let mut bad = reply;
        bad.learning_roadmap[0].priority = "urgent".to_string();
        assert!(is_malformed(bad.validate()));
    }

    #[test]
    fn test_comparison_ranks_must_be_a_permutation() {
        let reply = |ranks: &[i64]| ComparisonReply {
            ranking: ranks
                .iter()
                .map(|r| RankedCandidate {
                    name: format!("Candidate {r}"),
                    rank: *r,
                    reasoning: "because".to_string(),
                })
                .collect(),
            top_pick: TopPick {
                name: "Candidate 1".to_string(),
                reasoning: "best".to_string(),
            },
            summary: "close call".to_string(),
        };
        assert!(reply(&[2, 1, 3]).validate(3).is_ok());
        assert!(is_malformed(reply(&[1, 1, 2]).validate(3)));
        assert!(is_malformed(reply(&[1, 2, 4]).validate(3)));
        assert!(is_malformed(reply(&[1, 2]).validate(3)));
    }

    #[test]
    fn test_insights_quality_scale() {
        let mut reply = InsightsReply {
            predicted_time_to_hire: 14.0,
            candidate_quality_avg: 3.8,
            insights: "Pipeline is healthy".to_string(),
            recommendations: vec![],
        };
        assert!(reply.validate().is_ok());
        reply.candidate_quality_avg = 7.5;
        assert!(is_malformed(reply.validate()));
        reply.candidate_quality_avg = 3.0;
        reply.predicted_time_to_hire = -2.0;
        assert!(is_malformed(reply.validate()));
    }
}
