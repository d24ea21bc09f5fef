//! Named dashboard pages, the route guard and the navigation menu.

use std::str::FromStr;

use serde::Serialize;

use super::{Allowed, Role, NOT_AUTHORIZED_PATH, SIGN_IN_PATH};

const ADMIN_HR: &[Role] = &[Role::Admin, Role::Hr];
const ADMIN_HR_MANAGER: &[Role] = &[Role::Admin, Role::Hr, Role::Manager];
const EMPLOYEE: &[Role] = &[Role::Employee];

/// A page of the dashboard. Each page declares its own allowed roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteName {
    Dashboard,
    Employees,
    LeaveManagement,
    JobPostings,
    Interviews,
    ResumeScreening,
    Announcements,
    ChatAssistant,
    CandidateResumeUpload,
    EmployeeCareerDevelopment,
    InternalJobs,
    LearningPath,
    RecruitmentAnalytics,
}

impl RouteName {
    /// Menu order.
    pub const ALL: [RouteName; 13] = [
        RouteName::Dashboard,
        RouteName::Employees,
        RouteName::LeaveManagement,
        RouteName::JobPostings,
        RouteName::Interviews,
        RouteName::ResumeScreening,
        RouteName::CandidateResumeUpload,
        RouteName::RecruitmentAnalytics,
        RouteName::Announcements,
        RouteName::EmployeeCareerDevelopment,
        RouteName::InternalJobs,
        RouteName::LearningPath,
        RouteName::ChatAssistant,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            RouteName::Dashboard => "dashboard",
            RouteName::Employees => "employees",
            RouteName::LeaveManagement => "leave-management",
            RouteName::JobPostings => "job-postings",
            RouteName::Interviews => "interviews",
            RouteName::ResumeScreening => "resume-screening",
            RouteName::Announcements => "announcements",
            RouteName::ChatAssistant => "chat-assistant",
            RouteName::CandidateResumeUpload => "candidate-resume-upload",
            RouteName::EmployeeCareerDevelopment => "employee-career-development",
            RouteName::InternalJobs => "internal-jobs",
            RouteName::LearningPath => "learning-path",
            RouteName::RecruitmentAnalytics => "recruitment-analytics",
        }
    }

    pub fn path(self) -> String {
        match self {
            RouteName::Dashboard => "/".to_string(),
            other => format!("/{}", other.slug()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RouteName::Dashboard => "Dashboard",
            RouteName::Employees => "Employees",
            RouteName::LeaveManagement => "Leave Management",
            RouteName::JobPostings => "Job Postings",
            RouteName::Interviews => "Interviews",
            RouteName::ResumeScreening => "AI Resume Screening",
            RouteName::Announcements => "Announcements",
            RouteName::ChatAssistant => "AI Chat",
            RouteName::CandidateResumeUpload => "Upload Candidate Resume",
            RouteName::EmployeeCareerDevelopment => "Career Development",
            RouteName::InternalJobs => "Internal Jobs",
            RouteName::LearningPath => "Learning Path",
            RouteName::RecruitmentAnalytics => "Recruitment Analytics",
        }
    }

    pub(super) fn allowed(self) -> Allowed {
        match self {
            // The dashboard renders a neutral view for principals without a role.
            RouteName::Dashboard => Allowed::SignedIn,
            RouteName::Employees => Allowed::Only(ADMIN_HR_MANAGER),
            RouteName::Interviews
            | RouteName::ResumeScreening
            | RouteName::CandidateResumeUpload
            | RouteName::RecruitmentAnalytics => Allowed::Only(ADMIN_HR),
            RouteName::EmployeeCareerDevelopment
            | RouteName::InternalJobs
            | RouteName::LearningPath => Allowed::Only(EMPLOYEE),
            RouteName::LeaveManagement
            | RouteName::JobPostings
            | RouteName::Announcements
            | RouteName::ChatAssistant => Allowed::AnyRole,
        }
    }
}

impl FromStr for RouteName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteName::ALL
            .into_iter()
            .find(|r| r.slug() == s)
            .ok_or_else(|| format!("Unknown route '{s}'"))
    }
}

/// The party asking to see a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    SignedIn(Option<Role>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Render,
    RedirectToSignIn,
    NotAuthorized,
}

impl GuardDecision {
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            GuardDecision::Render => None,
            GuardDecision::RedirectToSignIn => Some(SIGN_IN_PATH),
            GuardDecision::NotAuthorized => Some(NOT_AUTHORIZED_PATH),
        }
    }
}

/// Decides whether `viewer` may see `route`.
pub fn guard(route: RouteName, viewer: Viewer) -> GuardDecision {
    match viewer {
        Viewer::Anonymous => GuardDecision::RedirectToSignIn,
        Viewer::SignedIn(role) if route.allowed().admits(role) => GuardDecision::Render,
        Viewer::SignedIn(_) => GuardDecision::NotAuthorized,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub route: RouteName,
    pub path: String,
    pub label: &'static str,
}

/// Menu entries for a role, in menu order.
pub fn navigation(role: Option<Role>) -> Vec<NavItem> {
    RouteName::ALL
        .into_iter()
        .filter(|route| guard(*route, Viewer::SignedIn(role)) == GuardDecision::Render)
        .map(|route| NavItem {
            route,
            path: route.path(),
            label: route.label(),
        })
        .collect()
}
