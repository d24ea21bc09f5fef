use axum::{extract::State, http::StatusCode, Json};

use super::{store, AnnouncementView, CreateAnnouncementRequest};
use crate::access::{Action, Role, RouteName};
use crate::auth::Session;
use crate::cache::Collection;
use crate::errors::AppError;
use crate::state::AppState;

/// Admins read every announcement; other roles only those aimed at them.
pub fn audience_for(role: Option<Role>) -> Option<Role> {
    role.filter(|r| *r != Role::Admin)
}

/// GET /api/v1/announcements
pub async fn handle_list_announcements(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<AnnouncementView>>, AppError> {
    session.require(Action::View(RouteName::Announcements))?;
    let audience = audience_for(session.role);
    let scope = format!("audience={}", audience.map_or("all", Role::as_str));
    let rows = state
        .cache
        .get_or_load(Collection::Announcements, &scope, || {
            store::list(&state.db, audience, None)
        })
        .await?;
    Ok(Json(rows.into_iter().map(AnnouncementView::from).collect()))
}

/// POST /api/v1/announcements
pub async fn handle_post_announcement(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<AnnouncementView>), AppError> {
    session.require(Action::PostAnnouncement)?;
    let announcement = req.validate()?;
    let row = store::insert(&state.db, &announcement, session.principal.id).await?;
    state.cache.invalidate(Collection::Announcements).await;
    Ok((StatusCode::CREATED, Json(AnnouncementView::from(row))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_reads_unfiltered() {
        assert_eq!(audience_for(Some(Role::Admin)), None);
        assert_eq!(audience_for(Some(Role::Hr)), Some(Role::Hr));
        assert_eq!(audience_for(Some(Role::Employee)), Some(Role::Employee));
    }
}
