use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{NewCareerProfile, DEFAULT_PLATFORM, ROADMAP_REASONING};
use crate::errors::AppError;
use crate::models::career::{EmployeeResumeRow, InternalJobMatch, LearningRecommendationRow};

pub async fn latest_analysis(
    pool: &PgPool,
    employee_id: Uuid,
) -> Result<Option<EmployeeResumeRow>, AppError> {
    let row = sqlx::query_as::<_, EmployeeResumeRow>(
        r#"
        SELECT * FROM employee_resumes
        WHERE employee_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Highest priority first, then newest.
pub async fn learning_recommendations(
    pool: &PgPool,
    employee_id: Uuid,
) -> Result<Vec<LearningRecommendationRow>, AppError> {
    let rows = sqlx::query_as::<_, LearningRecommendationRow>(
        r#"
        SELECT * FROM learning_recommendations
        WHERE employee_id = $1
        ORDER BY CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END,
                 created_at DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Best match first; only postings still open.
pub async fn internal_job_matches(
    pool: &PgPool,
    employee_id: Uuid,
) -> Result<Vec<InternalJobMatch>, AppError> {
    let rows = sqlx::query_as::<_, InternalJobMatch>(
        r#"
        SELECT r.id, r.job_posting_id, r.ai_match_score, r.ai_reasoning,
               j.title, j.department, j.location, j.job_type, r.created_at
        FROM internal_job_recommendations r
        JOIN job_postings j ON j.id = r.job_posting_id
        WHERE r.employee_id = $1 AND j.status = 'open'
        ORDER BY r.ai_match_score DESC NULLS LAST, r.created_at DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Stores the analysis and its learning recommendations together, or neither.
pub async fn insert_profile(
    pool: &PgPool,
    profile: &NewCareerProfile,
) -> Result<EmployeeResumeRow, AppError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, EmployeeResumeRow>(
        r#"
        INSERT INTO employee_resumes
            (employee_id, resume_url, resume_text, ai_skill_gaps, ai_career_path,
             ai_learning_roadmap, ai_promotion_probability, ai_attrition_risk)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(profile.employee_id)
    .bind(&profile.resume_url)
    .bind(&profile.resume_text)
    .bind(&profile.skill_gaps)
    .bind(&profile.career_path)
    .bind(&profile.learning_roadmap)
    .bind(profile.promotion_probability)
    .bind(&profile.attrition_risk)
    .fetch_one(&mut *tx)
    .await?;

    for rec in &profile.recommendations {
        sqlx::query(
            r#"
            INSERT INTO learning_recommendations
                (employee_id, skill, course_name, platform, priority, ai_reasoning)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(profile.employee_id)
        .bind(&rec.skill)
        .bind(&rec.course_name)
        .bind(DEFAULT_PLATFORM)
        .bind(&rec.priority)
        .bind(ROADMAP_REASONING)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        "Career analysis {} stored for employee {} with {} learning recommendations",
        row.id,
        profile.employee_id,
        profile.recommendations.len()
    );
    Ok(row)
}
