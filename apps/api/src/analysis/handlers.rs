use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

use super::assistant::{self, ChatRequest, ChatResponse, Persona};
use super::candidate::{self, CandidateResponse, CandidateSubmission};
use super::career::{self, CareerResponse, PERFORMANCE_HISTORY};
use super::compare::{self, CompareRequest};
use super::extract::{resume_text_off_thread, UploadForm, UploadedFile};
use super::insights::{self, InsightsResponse, INSIGHT_WINDOW};
use super::schema::ComparisonReply;
use super::screening::{self, ScreeningRequest, ScreeningResponse};
use crate::access::Action;
use crate::auth::Session;
use crate::cache::Collection;
use crate::career::store as career_store;
use crate::employees::store as employees;
use crate::errors::AppError;
use crate::recruitment::store as recruitment;
use crate::state::AppState;
use crate::storage::object_path;
use crate::workforce::store as workforce;

async fn upload_resume(
    state: &AppState,
    session: &Session,
    file: &UploadedFile,
) -> Result<String, AppError> {
    let path = object_path(
        session.principal.id,
        Utc::now().timestamp_millis(),
        &file.filename,
    );
    state
        .storage
        .upload(&path, file.bytes.clone(), &file.content_type)
        .await
}

/// POST /api/v1/analysis/resume-screening
pub async fn handle_screen_resume(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<ScreeningRequest>,
) -> Result<(StatusCode, Json<ScreeningResponse>), AppError> {
    session.require(Action::ScreenResume)?;
    let screening = req.validate()?;

    let (analysis, score) = screening::analyze(state.llm.as_ref(), &screening).await?;
    let row = screening::record(&state.db, &screening, &analysis, score, session.principal.id)
        .await?;
    state.cache.invalidate(Collection::ResumeScreenings).await;

    Ok((
        StatusCode::CREATED,
        Json(ScreeningResponse {
            screening: row,
            analysis,
        }),
    ))
}

/// POST /api/v1/analysis/candidate-resume (multipart)
pub async fn handle_analyze_candidate(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CandidateResponse>), AppError> {
    session.require(Action::UploadCandidateResume)?;
    let mut form = UploadForm::read(multipart).await?;
    let submission = CandidateSubmission::from_form(&form)?;
    let file = form.take_file()?;
    let resume_text = resume_text_off_thread(&file).await?;

    let resume_url = upload_resume(&state, &session, &file).await?;
    let analysis =
        candidate::analyze(state.llm.as_ref(), &submission.position, &resume_text).await?;
    let row = candidate::record(
        &state.db,
        &submission,
        &resume_url,
        &resume_text,
        &analysis,
        session.principal.id,
    )
    .await?;
    state.cache.invalidate(Collection::CandidateResumes).await;

    Ok((
        StatusCode::CREATED,
        Json(CandidateResponse {
            candidate: row,
            analysis,
        }),
    ))
}

/// POST /api/v1/analysis/career (multipart)
pub async fn handle_analyze_career(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CareerResponse>), AppError> {
    session.require(Action::AnalyzeCareer)?;
    let employee = employees::require_for_principal(&state.db, session.principal.id).await?;

    let mut form = UploadForm::read(multipart).await?;
    let file = form.take_file()?;
    let resume_text = resume_text_off_thread(&file).await?;
    let reviews =
        workforce::list_reviews(&state.db, Some(employee.id), Some(PERFORMANCE_HISTORY)).await?;

    let resume_url = upload_resume(&state, &session, &file).await?;
    let analysis =
        career::analyze(state.llm.as_ref(), &employee.position, &resume_text, &reviews).await?;
    let new_profile = career::profile_from_reply(&analysis, employee.id, resume_url, resume_text)?;
    let profile = career_store::insert_profile(&state.db, &new_profile).await?;
    state.cache.invalidate(Collection::CareerProfiles).await;

    Ok((StatusCode::CREATED, Json(CareerResponse { profile, analysis })))
}

/// POST /api/v1/analysis/compare-candidates
pub async fn handle_compare_candidates(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CompareRequest>,
) -> Result<Json<ComparisonReply>, AppError> {
    session.require(Action::CompareCandidates)?;
    let comparison = req.validate()?;

    let rows = recruitment::candidate_resumes_by_id(&state.db, &comparison.candidate_ids).await?;
    let candidates = compare::in_request_order(&comparison.candidate_ids, rows)?;

    let reply = compare::analyze(state.llm.as_ref(), &comparison.position, &candidates).await?;
    info!(
        "Compared {} candidates for {}; top pick {}",
        candidates.len(),
        comparison.position,
        reply.top_pick.name
    );
    Ok(Json(reply))
}

/// GET /api/v1/analysis/recruitment-insights
pub async fn handle_recruitment_insights(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<InsightsResponse>, AppError> {
    session.require(Action::ViewRecruitmentInsights)?;
    let candidates = recruitment::list_candidate_resumes(&state.db, Some(INSIGHT_WINDOW)).await?;
    let response = insights::analyze(state.llm.as_ref(), &candidates).await?;
    Ok(Json(response))
}

/// GET /api/v1/assistant
pub async fn handle_assistant_persona(session: Session) -> Result<Json<Persona>, AppError> {
    session.require(Action::ChatWithAssistant)?;
    Ok(Json(assistant::persona(session.role)))
}

/// POST /api/v1/assistant/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    session.require(Action::ChatWithAssistant)?;
    let conversation = req.validate()?;
    let response = assistant::reply(state.llm.as_ref(), session.role, conversation).await?;
    Ok(Json(response))
}
