use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::access::{guard, navigation, GuardDecision, NavItem, Role, RouteName, Viewer};
use crate::auth::{Principal, Session};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    pub principal: Principal,
    pub role: Option<Role>,
}

#[derive(Serialize)]
pub struct RouteAccessResponse {
    pub route: RouteName,
    pub decision: GuardDecision,
    pub redirect: Option<&'static str>,
}

/// GET /api/v1/session
pub async fn handle_get_session(session: Session) -> Json<SessionResponse> {
    Json(SessionResponse {
        principal: session.principal,
        role: session.role,
    })
}

/// POST /api/v1/session/sign-out
pub async fn handle_sign_out(
    State(state): State<AppState>,
    session: Session,
) -> Result<StatusCode, AppError> {
    state
        .revocations
        .revoke(&session.revocation_key, session.expires_at)
        .await?;
    info!("principal {} signed out", session.principal.id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/navigation
pub async fn handle_navigation(session: Session) -> Json<Vec<NavItem>> {
    Json(navigation(session.role))
}

/// GET /api/v1/routes/:route/access
pub async fn handle_route_access(
    session: Option<Session>,
    Path(route): Path<String>,
) -> Result<Json<RouteAccessResponse>, AppError> {
    let route: RouteName = route.parse().map_err(AppError::NotFound)?;
    let viewer = session.as_ref().map_or(Viewer::Anonymous, Session::viewer);
    Ok(Json(route_access(route, viewer)))
}

fn route_access(route: RouteName, viewer: Viewer) -> RouteAccessResponse {
    let decision = guard(route, viewer);
    RouteAccessResponse {
        route,
        decision,
        redirect: decision.redirect_target(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::session;

    #[test]
    fn test_route_access_reports_redirect() {
        let access = route_access(RouteName::Announcements, Viewer::Anonymous);
        assert_eq!(access.decision, GuardDecision::RedirectToSignIn);
        assert_eq!(access.redirect, Some("/auth"));

        let employee = session(Some(Role::Employee));
        let access = route_access(RouteName::RecruitmentAnalytics, employee.viewer());
        assert_eq!(access.decision, GuardDecision::NotAuthorized);
        assert_eq!(access.redirect, Some("/not-authorized"));

        let access = route_access(RouteName::LearningPath, employee.viewer());
        assert_eq!(access.decision, GuardDecision::Render);
        assert_eq!(access.redirect, None);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let result = handle_route_access(None, Path("payroll-export".to_string())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
