use axum::{extract::State, Json};

use super::{store, CareerOverview, InternalJobsOverview};
use crate::access::{Action, RouteName};
use crate::auth::Session;
use crate::cache::Collection;
use crate::employees::store as employees;
use crate::errors::AppError;
use crate::recruitment::{store as recruitment, PostingStatus};
use crate::state::AppState;

/// GET /api/v1/career
pub async fn handle_career_overview(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CareerOverview>, AppError> {
    session.require(Action::View(RouteName::EmployeeCareerDevelopment))?;
    let employee = employees::require_for_principal(&state.db, session.principal.id).await?;

    let scope = format!("employee={}", employee.id);
    let (latest_analysis, learning_recommendations) = tokio::try_join!(
        store::latest_analysis(&state.db, employee.id),
        state
            .cache
            .get_or_load(Collection::CareerProfiles, &scope, || {
                store::learning_recommendations(&state.db, employee.id)
            }),
    )?;

    Ok(Json(CareerOverview {
        latest_analysis,
        learning_recommendations,
    }))
}

/// GET /api/v1/internal-jobs
pub async fn handle_internal_jobs(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<InternalJobsOverview>, AppError> {
    session.require(Action::View(RouteName::InternalJobs))?;
    let employee = employees::require_for_principal(&state.db, session.principal.id).await?;

    let open = Some(PostingStatus::Open);
    let (recommendations, open_positions) = tokio::try_join!(
        store::internal_job_matches(&state.db, employee.id),
        state
            .cache
            .get_or_load(Collection::JobPostings, "status=open", || {
                recruitment::list_job_postings(&state.db, open)
            }),
    )?;

    Ok(Json(InternalJobsOverview {
        recommendations,
        open_positions,
    }))
}
