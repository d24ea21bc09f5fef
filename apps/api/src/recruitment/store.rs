use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{InterviewStatus, NewInterview, NewJobPosting, PostingStatus};
use crate::errors::AppError;
use crate::models::recruitment::{
    CandidateResumeRow, InterviewRow, JobPostingRow, ResumeScreeningRow,
};

/// Newest first.
pub async fn list_job_postings(
    pool: &PgPool,
    status: Option<PostingStatus>,
) -> Result<Vec<JobPostingRow>, AppError> {
    let rows = sqlx::query_as::<_, JobPostingRow>(
        r#"
        SELECT * FROM job_postings
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(status.map(PostingStatus::as_str))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn insert_job_posting(
    pool: &PgPool,
    posting: &NewJobPosting,
    posted_by: Uuid,
) -> Result<JobPostingRow, AppError> {
    let row = sqlx::query_as::<_, JobPostingRow>(
        r#"
        INSERT INTO job_postings
            (title, department, description, requirements, location,
             job_type, salary_range, posted_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(&posting.title)
    .bind(&posting.department)
    .bind(&posting.description)
    .bind(&posting.requirements)
    .bind(&posting.location)
    .bind(posting.job_type.as_str())
    .bind(&posting.salary_range)
    .bind(posted_by)
    .fetch_one(pool)
    .await?;

    info!("Job posting {} '{}' opened", row.id, row.title);
    Ok(row)
}

pub async fn set_job_posting_status(
    pool: &PgPool,
    id: Uuid,
    status: PostingStatus,
) -> Result<JobPostingRow, AppError> {
    sqlx::query_as::<_, JobPostingRow>(
        "UPDATE job_postings SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Job posting {id} not found")))
}

/// Soonest first.
pub async fn list_interviews(pool: &PgPool) -> Result<Vec<InterviewRow>, AppError> {
    let rows = sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews ORDER BY interview_date ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn insert_interview(
    pool: &PgPool,
    interview: &NewInterview,
) -> Result<InterviewRow, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>(
        r#"
        INSERT INTO interviews
            (candidate_name, candidate_email, job_posting_id, interview_date,
             interview_type, interviewer_id, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&interview.candidate_name)
    .bind(&interview.candidate_email)
    .bind(interview.job_posting_id)
    .bind(interview.interview_date)
    .bind(interview.interview_type.as_str())
    .bind(interview.interviewer_id)
    .bind(&interview.notes)
    .fetch_one(pool)
    .await?;

    info!("Interview {} scheduled for {}", row.id, row.interview_date);
    Ok(row)
}

pub async fn set_interview_status(
    pool: &PgPool,
    id: Uuid,
    status: InterviewStatus,
) -> Result<InterviewRow, AppError> {
    sqlx::query_as::<_, InterviewRow>(
        "UPDATE interviews SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
}

/// Newest first, optionally capped.
pub async fn list_candidate_resumes(
    pool: &PgPool,
    limit: Option<i64>,
) -> Result<Vec<CandidateResumeRow>, AppError> {
    let rows = sqlx::query_as::<_, CandidateResumeRow>(
        "SELECT * FROM candidate_resumes ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Candidate resumes by id, in no particular order. Unknown ids are skipped.
pub async fn candidate_resumes_by_id(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<CandidateResumeRow>, AppError> {
    let rows = sqlx::query_as::<_, CandidateResumeRow>(
        "SELECT * FROM candidate_resumes WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Newest first.
pub async fn list_resume_screenings(pool: &PgPool) -> Result<Vec<ResumeScreeningRow>, AppError> {
    let rows = sqlx::query_as::<_, ResumeScreeningRow>(
        "SELECT * FROM resume_screenings ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
