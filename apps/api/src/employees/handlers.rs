use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::store::{self, EmployeeFilter};
use super::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::access::{Action, RouteName};
use crate::auth::Session;
use crate::cache::Collection;
use crate::errors::AppError;
use crate::models::people::EmployeeRow;
use crate::state::AppState;

/// Lists that show employee fields. Leave listings join name and department.
const EMPLOYEE_FIELDS_SHOWN_IN: [Collection; 2] = [Collection::Employees, Collection::LeaveRequests];

/// GET /api/v1/employees
pub async fn handle_list_employees(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<EmployeeFilter>,
) -> Result<Json<Vec<EmployeeRow>>, AppError> {
    session.require(Action::View(RouteName::Employees))?;
    let rows = state
        .cache
        .get_or_load(Collection::Employees, &filter.scope(), || {
            store::list(&state.db, &filter)
        })
        .await?;
    Ok(Json(rows))
}

/// GET /api/v1/employees/:id
pub async fn handle_get_employee(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeRow>, AppError> {
    session.require(Action::View(RouteName::Employees))?;
    Ok(Json(store::get(&state.db, id).await?))
}

/// GET /api/v1/employees/me
pub async fn handle_get_own_record(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<EmployeeRow>, AppError> {
    let row = store::require_for_principal(&state.db, session.principal.id).await?;
    Ok(Json(row))
}

/// POST /api/v1/employees
pub async fn handle_create_employee(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeRow>), AppError> {
    session.require(Action::CreateEmployee)?;
    let employee = req.validate()?;
    let row = store::insert(&state.db, &employee).await?;
    state.cache.invalidate(Collection::Employees).await;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/employees/:id
pub async fn handle_update_employee(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeRow>, AppError> {
    session.require(Action::UpdateEmployee)?;
    let changes = req.validate()?;
    let row = store::update(&state.db, id, &changes).await?;
    for collection in EMPLOYEE_FIELDS_SHOWN_IN {
        state.cache.invalidate(collection).await;
    }
    Ok(Json(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_update_invalidates_leave_listings() {
        assert!(EMPLOYEE_FIELDS_SHOWN_IN.contains(&Collection::Employees));
        assert!(EMPLOYEE_FIELDS_SHOWN_IN.contains(&Collection::LeaveRequests));
    }
}
