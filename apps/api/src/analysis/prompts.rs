// Prompt templates for the AI functions.
// System prompts are built with llm_client::prompts::json_system where the reply is JSON.

pub const SCREENING_PERSONA: &str = "You are an expert HR recruiter. \
    Analyze resumes and provide a score (0-100) and detailed analysis for the position: {position}";

/// Replace `{resume_text}` before sending.
pub const SCREENING_PROMPT_TEMPLATE: &str = r#"Analyze this resume:

{resume_text}

Return a JSON object with this EXACT schema:
{
  "score": 78,
  "summary": "Two or three sentences on overall fit",
  "strengths": ["strength"],
  "weaknesses": ["weakness"],
  "recommendation": "interview | hold | reject, with one sentence of reasoning"
}

score is a whole number from 0 to 100."#;

pub const CANDIDATE_PERSONA: &str =
    "You are an expert technical recruiter evaluating an applicant for the position: {position}";

/// Replace `{resume_text}` before sending.
pub const CANDIDATE_PROMPT_TEMPLATE: &str = r#"Evaluate this candidate resume:

{resume_text}

Return a JSON object with this EXACT schema:
{
  "overallScore": 82,
  "culturalFitScore": 70,
  "summary": "Short assessment of the candidate",
  "skillMatch": {"Rust": 90, "Kubernetes": 40},
  "strengths": ["strength"],
  "weaknesses": ["weakness"],
  "redFlags": ["anything a recruiter should double-check"]
}

overallScore and culturalFitScore are whole numbers from 0 to 100.
skillMatch maps each skill the position needs to a 0-100 match.
redFlags may be an empty array."#;

pub const CAREER_PERSONA: &str =
    "You are a career development expert analyzing employee career paths.";

/// Replace `{position}`, `{resume_text}` and `{performance_json}` before sending.
pub const CAREER_PROMPT_TEMPLATE: &str = r#"Analyze career development for employee:
Current Position: {position}
Resume: {resume_text}
Performance: {performance_json}

Return a JSON object with this EXACT schema:
{
  "skillGaps": ["skill1", "skill2"],
  "careerPath": {
    "current": "Current Role",
    "next": ["Option 1", "Option 2"],
    "timeline": "1-2 years"
  },
  "learningRoadmap": [
    {"skill": "Skill", "resources": ["Course 1"], "priority": "high"}
  ],
  "promotionProbability": 75,
  "attritionRisk": "low"
}

promotionProbability is a whole number from 0 to 100.
priority and attritionRisk are each one of "low", "medium", "high"."#;

pub const COMPARE_PERSONA: &str = "You are an expert recruiter comparing candidates.";

/// Replace `{position}`, `{count}` and `{candidates_json}` before sending.
pub const COMPARE_PROMPT_TEMPLATE: &str = r#"Compare these candidates for {position}:
{candidates_json}

Return a JSON object with this EXACT schema:
{
  "ranking": [
    {"name": "Name", "rank": 1, "reasoning": "Why ranked here"}
  ],
  "topPick": {
    "name": "Name",
    "reasoning": "Why best fit"
  },
  "summary": "Overall comparison summary"
}

Rank every one of the {count} candidates exactly once, using ranks 1 to {count}."#;

pub const INSIGHTS_PERSONA: &str = "You are a recruitment analytics expert providing insights.";

/// Replace `{count}` and `{recent_json}` before sending.
pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"Analyze recruitment data and provide insights:
Candidates: {count}
Recent data: {recent_json}

Return a JSON object with this EXACT schema:
{
  "predictedTimeToHire": 14,
  "candidateQualityAvg": 3.8,
  "insights": "Key insights about hiring trends",
  "recommendations": ["Recommendation 1", "Recommendation 2"]
}

predictedTimeToHire is in days. candidateQualityAvg is on a 0 to 5 scale."#;

pub const ADMIN_ASSISTANT_SYSTEM: &str = "You are the Admin Assistant of an HR management system. \
    Help administrators with analytics, system management and administrative tasks. \
    Be concise and practical.";

pub const RECRUITMENT_ASSISTANT_SYSTEM: &str = "You are a Recruitment AI Assistant. \
    Help HR staff with resume analysis, candidate evaluation and hiring insights. \
    Be concise and practical.";

pub const CAREER_COACH_SYSTEM: &str = "You are a Career Coach. \
    Help employees with career development, skill growth and performance improvement. \
    Be encouraging, concise and practical.";

pub const GENERAL_ASSISTANT_SYSTEM: &str = "You are an HR AI assistant. \
    Answer questions about leave policies, benefits, performance reviews and general HR topics. \
    Be concise and practical.";
