use axum::{extract::State, Json};

use super::{
    compose_admin, compose_employee, compose_hr, compose_manager, compose_unassigned, queries,
    DashboardView,
};
use crate::access::{Action, Role, RouteName};
use crate::auth::Session;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<DashboardView>, AppError> {
    session.require(Action::View(RouteName::Dashboard))?;

    let view = match session.role {
        Some(Role::Admin) => {
            session.require(Action::ViewPayroll)?;
            compose_admin(queries::load_admin(&state.db).await?)
        }
        Some(Role::Hr) => compose_hr(queries::load_hr(&state.db).await?),
        Some(Role::Manager) => compose_manager(queries::load_manager(&state.db).await?),
        Some(Role::Employee) => {
            compose_employee(queries::load_employee(&state.db, session.principal.id).await?)
        }
        None => compose_unassigned(),
    };
    Ok(Json(view))
}
