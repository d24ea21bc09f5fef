use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use super::prompts::{CAREER_PERSONA, CAREER_PROMPT_TEMPLATE};
use super::schema::CareerReply;
use crate::career::{NewCareerProfile, NewLearningRecommendation, UNNAMED_COURSE};
use crate::errors::AppError;
use crate::llm_client::{complete_json, prompts::json_system, ChatModel};
use crate::models::career::EmployeeResumeRow;
use crate::models::people::PerformanceReviewRow;

/// Reviews passed to the model as performance history.
pub const PERFORMANCE_HISTORY: i64 = 5;

#[derive(Debug, Serialize)]
pub struct CareerResponse {
    pub profile: EmployeeResumeRow,
    pub analysis: CareerReply,
}

fn performance_json(reviews: &[PerformanceReviewRow]) -> String {
    let history: Vec<_> = reviews
        .iter()
        .map(|r| {
            json!({
                "period": r.review_period,
                "rating": r.rating,
                "strengths": r.strengths,
                "areasForImprovement": r.areas_for_improvement,
                "goals": r.goals,
            })
        })
        .collect();
    serde_json::Value::Array(history).to_string()
}

pub async fn analyze(
    model: &dyn ChatModel,
    position: &str,
    resume_text: &str,
    reviews: &[PerformanceReviewRow],
) -> Result<CareerReply, AppError> {
    let system = json_system(CAREER_PERSONA);
    let prompt = CAREER_PROMPT_TEMPLATE
        .replace("{position}", position)
        .replace("{performance_json}", &performance_json(reviews))
        .replace("{resume_text}", resume_text);

    let reply: CareerReply = complete_json(model, &system, &prompt).await?;
    reply.validate()?;
    Ok(reply)
}

/// The rows a validated analysis turns into: the profile plus one learning
/// recommendation per roadmap item.
pub fn profile_from_reply(
    reply: &CareerReply,
    employee_id: Uuid,
    resume_url: String,
    resume_text: String,
) -> Result<NewCareerProfile, AppError> {
    let promotion_probability = reply.validate()?;
    let career_path = serde_json::to_value(&reply.career_path).map_err(anyhow::Error::from)?;
    let learning_roadmap =
        serde_json::to_value(&reply.learning_roadmap).map_err(anyhow::Error::from)?;

    let recommendations = reply
        .learning_roadmap
        .iter()
        .map(|item| NewLearningRecommendation {
            skill: item.skill.clone(),
            course_name: item
                .resources
                .first()
                .filter(|r| !r.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| UNNAMED_COURSE.to_string()),
            priority: item.priority.clone(),
        })
        .collect();

    Ok(NewCareerProfile {
        employee_id,
        resume_url,
        resume_text,
        skill_gaps: reply.skill_gaps.clone(),
        career_path,
        learning_roadmap,
        promotion_probability,
        attrition_risk: reply.attrition_risk.clone(),
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::llm_client::testing::CannedModel;

    const REPLY: &str = r#"{
        "skillGaps": ["Leadership", "System design"],
        "careerPath": {"current": "Engineer", "next": ["Senior Engineer"], "timeline": "1-2 years"},
        "learningRoadmap": [
            {"skill": "Leadership", "resources": ["Leading Teams 101", "Mentoring"], "priority": "high"},
            {"skill": "System design", "resources": [], "priority": "medium"}
        ],
        "promotionProbability": 64,
        "attritionRisk": "medium"
    }"#;

    fn review(rating: i32) -> PerformanceReviewRow {
        PerformanceReviewRow {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            reviewer_id: None,
            review_period: "2024-H1".to_string(),
            rating,
            strengths: Some("Delivery".to_string()),
            areas_for_improvement: None,
            goals: Some("Lead a project".to_string()),
            comments: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_prompt_carries_position_resume_and_reviews() {
        let model = CannedModel::replying(REPLY);
        analyze(&model, "Engineer", "Built billing pipelines", &[review(4)])
            .await
            .unwrap();

        let seen = model.seen.lock().unwrap();
        let prompt = &seen[0][1].content;
        assert!(prompt.contains("Current Position: Engineer"));
        assert!(prompt.contains("Built billing pipelines"));
        assert!(prompt.contains("\"rating\":4"));
        assert!(prompt.contains("2024-H1"));
    }

    #[tokio::test]
    async fn test_unknown_attrition_level_is_malformed() {
        let model = CannedModel::replying(&REPLY.replace("\"medium\"\n", "\"extreme\"\n"));
        assert!(matches!(
            analyze(&model, "Engineer", "cv", &[]).await,
            Err(AppError::AiMalformedReply(_))
        ));
    }

    #[tokio::test]
    async fn test_gateway_failure_is_upstream() {
        let model = CannedModel::failing(429);
        assert!(matches!(
            analyze(&model, "Engineer", "cv", &[]).await,
            Err(AppError::AiUpstream(_))
        ));
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_profile_has_one_recommendation_per_roadmap_item() {
        let reply: CareerReply = serde_json::from_str(REPLY).unwrap();
        let employee = Uuid::new_v4();
        let profile = profile_from_reply(
            &reply,
            employee,
            "https://files/cv.pdf".to_string(),
            "cv".to_string(),
        )
        .unwrap();

        assert_eq!(profile.employee_id, employee);
        assert_eq!(profile.promotion_probability, 64);
        assert_eq!(profile.career_path["next"][0], "Senior Engineer");
        assert_eq!(profile.recommendations.len(), 2);
        assert_eq!(profile.recommendations[0].course_name, "Leading Teams 101");
        assert_eq!(profile.recommendations[1].course_name, UNNAMED_COURSE);
        assert_eq!(profile.recommendations[1].priority, "medium");
    }

    #[test]
    fn test_fractional_promotion_probability_is_rounded() {
        let fractional = REPLY.replace("\"promotionProbability\": 64", "\"promotionProbability\": 63.7");
        let reply: CareerReply = serde_json::from_str(&fractional).unwrap();
        let profile =
            profile_from_reply(&reply, Uuid::new_v4(), "u".to_string(), "cv".to_string()).unwrap();
        assert_eq!(profile.promotion_probability, 64);
    }

    #[test]
    fn test_empty_history_is_an_empty_array() {
        assert_eq!(performance_json(&[]), "[]");
    }
}
