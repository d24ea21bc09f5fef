use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::{store, RecordAttendanceRequest, WriteReviewRequest};
use crate::access::{Action, Role};
use crate::auth::Session;
use crate::cache::Collection;
use crate::employees::store as employees;
use crate::errors::AppError;
use crate::models::people::{AttendanceRow, PerformanceReviewRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub since: Option<NaiveDate>,
}

/// GET /api/v1/attendance
pub async fn handle_list_attendance(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<Vec<AttendanceRow>>, AppError> {
    session.require(Action::ViewAttendance)?;
    let scope = format!(
        "since={}",
        query.since.map(|d| d.to_string()).unwrap_or_default()
    );
    let rows = state
        .cache
        .get_or_load(Collection::Attendance, &scope, || {
            store::list_attendance(&state.db, query.since)
        })
        .await?;
    Ok(Json(rows))
}

/// POST /api/v1/attendance
pub async fn handle_record_attendance(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<RecordAttendanceRequest>,
) -> Result<(StatusCode, Json<AttendanceRow>), AppError> {
    session.require(Action::RecordAttendance)?;
    let record = req.validate()?;
    let row = store::insert_attendance(&state.db, &record).await?;
    state.cache.invalidate(Collection::Attendance).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/performance-reviews
///
/// Employees see their own reviews; every other role sees all of them.
pub async fn handle_list_reviews(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<PerformanceReviewRow>>, AppError> {
    session.require(Action::ViewPerformanceReviews)?;

    let employee = if session.role == Some(Role::Employee) {
        match employees::find_for_principal(&state.db, session.principal.id).await? {
            Some(employee) => Some(employee.id),
            None => return Ok(Json(Vec::new())),
        }
    } else {
        None
    };

    let scope = employee.map_or_else(|| "all".to_string(), |id| format!("employee={id}"));
    let rows = state
        .cache
        .get_or_load(Collection::PerformanceReviews, &scope, || {
            store::list_reviews(&state.db, employee, None)
        })
        .await?;
    Ok(Json(rows))
}

/// POST /api/v1/performance-reviews
pub async fn handle_write_review(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<WriteReviewRequest>,
) -> Result<(StatusCode, Json<PerformanceReviewRow>), AppError> {
    session.require(Action::WritePerformanceReview)?;
    let review = req.validate()?;
    let row = store::insert_review(&state.db, &review, session.principal.id).await?;
    state.cache.invalidate(Collection::PerformanceReviews).await;
    Ok((StatusCode::CREATED, Json(row)))
}
