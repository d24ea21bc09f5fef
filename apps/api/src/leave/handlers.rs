use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::store::{self, LeaveScope};
use super::{CreateLeaveRequest, Decision, DecisionRequest, LeaveStatus};
use crate::access::{Action, Role, RouteName};
use crate::auth::Session;
use crate::cache::Collection;
use crate::employees::store as employees;
use crate::errors::AppError;
use crate::models::leave::{LeaveRequestListing, LeaveRequestRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaveQuery {
    pub status: Option<String>,
}

/// GET /api/v1/leave-requests
///
/// Employees see their own requests; every other role sees all of them.
pub async fn handle_list_leave_requests(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LeaveQuery>,
) -> Result<Json<Vec<LeaveRequestListing>>, AppError> {
    session.require(Action::View(RouteName::LeaveManagement))?;
    let status = query.status.as_deref().map(LeaveStatus::parse).transpose()?;

    let scope = if session.role == Some(Role::Employee) {
        match employees::find_for_principal(&state.db, session.principal.id).await? {
            Some(employee) => LeaveScope::Employee(employee.id),
            None => return Ok(Json(Vec::new())),
        }
    } else {
        LeaveScope::All
    };

    let rows = state
        .cache
        .get_or_load(Collection::LeaveRequests, &scope.cache_scope(status), || {
            store::list(&state.db, scope, status, None)
        })
        .await?;
    Ok(Json(rows))
}

/// POST /api/v1/leave-requests
pub async fn handle_submit_leave_request(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CreateLeaveRequest>,
) -> Result<(StatusCode, Json<LeaveRequestRow>), AppError> {
    session.require(Action::SubmitLeave)?;
    let request = req.validate()?;
    let employee = employees::require_for_principal(&state.db, session.principal.id).await?;
    let row = store::insert(&state.db, employee.id, &request).await?;
    state.cache.invalidate(Collection::LeaveRequests).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// POST /api/v1/leave-requests/:id/decision
pub async fn handle_decide_leave_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<LeaveRequestRow>, AppError> {
    session.require(Action::DecideLeave)?;
    let decision = Decision::parse(req.status.trim())?;
    let row = store::decide(&state.db, id, decision, session.principal.id).await?;
    state.cache.invalidate(Collection::LeaveRequests).await;
    Ok(Json(row))
}
