pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::analysis::{extract::MAX_UPLOAD_BYTES, handlers as analysis};
use crate::announcements::handlers as announcements;
use crate::auth::handlers as auth;
use crate::career::handlers as career;
use crate::dashboard::handlers as dashboard;
use crate::employees::handlers as employees;
use crate::leave::handlers as leave;
use crate::recruitment::handlers as recruitment;
use crate::state::AppState;
use crate::workforce::handlers as workforce;

/// Room for the text fields sent next to an uploaded file.
const FORM_FIELDS_ALLOWANCE: usize = 64 * 1024;

fn upload_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_UPLOAD_BYTES + FORM_FIELDS_ALLOWANCE)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session and route guard
        .route("/api/v1/session", get(auth::handle_get_session))
        .route("/api/v1/session/sign-out", post(auth::handle_sign_out))
        .route("/api/v1/navigation", get(auth::handle_navigation))
        .route(
            "/api/v1/routes/:route/access",
            get(auth::handle_route_access),
        )
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        // People
        .route(
            "/api/v1/employees",
            get(employees::handle_list_employees).post(employees::handle_create_employee),
        )
        .route("/api/v1/employees/me", get(employees::handle_get_own_record))
        .route(
            "/api/v1/employees/:id",
            get(employees::handle_get_employee).patch(employees::handle_update_employee),
        )
        .route(
            "/api/v1/leave-requests",
            get(leave::handle_list_leave_requests).post(leave::handle_submit_leave_request),
        )
        .route(
            "/api/v1/leave-requests/:id/decision",
            post(leave::handle_decide_leave_request),
        )
        .route(
            "/api/v1/attendance",
            get(workforce::handle_list_attendance).post(workforce::handle_record_attendance),
        )
        .route(
            "/api/v1/performance-reviews",
            get(workforce::handle_list_reviews).post(workforce::handle_write_review),
        )
        .route(
            "/api/v1/announcements",
            get(announcements::handle_list_announcements)
                .post(announcements::handle_post_announcement),
        )
        // Recruitment
        .route(
            "/api/v1/job-postings",
            get(recruitment::handle_list_job_postings).post(recruitment::handle_create_job_posting),
        )
        .route(
            "/api/v1/job-postings/:id/status",
            patch(recruitment::handle_set_job_posting_status),
        )
        .route(
            "/api/v1/interviews",
            get(recruitment::handle_list_interviews).post(recruitment::handle_schedule_interview),
        )
        .route(
            "/api/v1/interviews/:id/status",
            patch(recruitment::handle_set_interview_status),
        )
        .route("/api/v1/candidates", get(recruitment::handle_list_candidates))
        .route(
            "/api/v1/resume-screenings",
            get(recruitment::handle_list_resume_screenings),
        )
        // Career development
        .route("/api/v1/career", get(career::handle_career_overview))
        .route("/api/v1/internal-jobs", get(career::handle_internal_jobs))
        // AI functions
        .route(
            "/api/v1/analysis/resume-screening",
            post(analysis::handle_screen_resume),
        )
        .route(
            "/api/v1/analysis/candidate-resume",
            post(analysis::handle_analyze_candidate).layer(upload_limit()),
        )
        .route(
            "/api/v1/analysis/career",
            post(analysis::handle_analyze_career).layer(upload_limit()),
        )
        .route(
            "/api/v1/analysis/compare-candidates",
            post(analysis::handle_compare_candidates),
        )
        .route(
            "/api/v1/analysis/recruitment-insights",
            get(analysis::handle_recruitment_insights),
        )
        .route("/api/v1/assistant", get(analysis::handle_assistant_persona))
        .route("/api/v1/assistant/chat", post(analysis::handle_chat))
        .with_state(state)
}
