use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::store;
use super::{
    CreateInterviewRequest, CreateJobPostingRequest, InterviewStatus, PostingStatus, StatusChange,
};
use crate::access::{Action, RouteName};
use crate::auth::Session;
use crate::cache::Collection;
use crate::errors::AppError;
use crate::models::recruitment::{
    CandidateResumeRow, InterviewRow, JobPostingRow, ResumeScreeningRow,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobPostingQuery {
    pub status: Option<String>,
}

/// GET /api/v1/job-postings
pub async fn handle_list_job_postings(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<JobPostingQuery>,
) -> Result<Json<Vec<JobPostingRow>>, AppError> {
    session.require(Action::View(RouteName::JobPostings))?;
    let status = query.status.as_deref().map(PostingStatus::parse).transpose()?;
    let scope = format!("status={}", status.map_or("", PostingStatus::as_str));
    let rows = state
        .cache
        .get_or_load(Collection::JobPostings, &scope, || {
            store::list_job_postings(&state.db, status)
        })
        .await?;
    Ok(Json(rows))
}

/// POST /api/v1/job-postings
pub async fn handle_create_job_posting(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CreateJobPostingRequest>,
) -> Result<(StatusCode, Json<JobPostingRow>), AppError> {
    session.require(Action::ManageJobPostings)?;
    let posting = req.validate()?;
    let row = store::insert_job_posting(&state.db, &posting, session.principal.id).await?;
    state.cache.invalidate(Collection::JobPostings).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/job-postings/:id/status
pub async fn handle_set_job_posting_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusChange>,
) -> Result<Json<JobPostingRow>, AppError> {
    session.require(Action::ManageJobPostings)?;
    let status = PostingStatus::parse(req.status.trim())?;
    let row = store::set_job_posting_status(&state.db, id, status).await?;
    state.cache.invalidate(Collection::JobPostings).await;
    Ok(Json(row))
}

/// GET /api/v1/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    session.require(Action::View(RouteName::Interviews))?;
    let rows = state
        .cache
        .get_or_load(Collection::Interviews, "all", || {
            store::list_interviews(&state.db)
        })
        .await?;
    Ok(Json(rows))
}

/// POST /api/v1/interviews
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<InterviewRow>), AppError> {
    session.require(Action::ManageInterviews)?;
    let interview = req.validate()?;
    let row = store::insert_interview(&state.db, &interview).await?;
    state.cache.invalidate(Collection::Interviews).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/interviews/:id/status
pub async fn handle_set_interview_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusChange>,
) -> Result<Json<InterviewRow>, AppError> {
    session.require(Action::ManageInterviews)?;
    let status = InterviewStatus::parse(req.status.trim())?;
    let row = store::set_interview_status(&state.db, id, status).await?;
    state.cache.invalidate(Collection::Interviews).await;
    Ok(Json(row))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<CandidateResumeRow>>, AppError> {
    session.require(Action::View(RouteName::CandidateResumeUpload))?;
    let rows = state
        .cache
        .get_or_load(Collection::CandidateResumes, "all", || {
            store::list_candidate_resumes(&state.db, None)
        })
        .await?;
    Ok(Json(rows))
}

/// GET /api/v1/resume-screenings
pub async fn handle_list_resume_screenings(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<ResumeScreeningRow>>, AppError> {
    session.require(Action::View(RouteName::ResumeScreening))?;
    let rows = state
        .cache
        .get_or_load(Collection::ResumeScreenings, "all", || {
            store::list_resume_screenings(&state.db)
        })
        .await?;
    Ok(Json(rows))
}
