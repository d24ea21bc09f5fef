//! Role-based access control.
//!
//! Every role decision in the service goes through [`allowed`], a single
//! declarative table from [`Action`] to the set of roles that may perform it.
//! Handlers never compare role strings themselves.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod pages;

pub use pages::{guard, navigation, GuardDecision, NavItem, RouteName, Viewer};

pub const SIGN_IN_PATH: &str = "/auth";
pub const NOT_AUTHORIZED_PATH: &str = "/not-authorized";

/// The single role held by a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Hr, Role::Manager, Role::Employee];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    /// Parses a stored role value. Unknown values are not a role.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "hr" => Some(Role::Hr),
            "manager" => Some(Role::Manager),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a principal can ask the service to do that depends on role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View(RouteName),
    CreateEmployee,
    UpdateEmployee,
    SubmitLeave,
    DecideLeave,
    PostAnnouncement,
    ManageJobPostings,
    ManageInterviews,
    ViewAttendance,
    RecordAttendance,
    ViewPerformanceReviews,
    WritePerformanceReview,
    ViewPayroll,
    ScreenResume,
    UploadCandidateResume,
    AnalyzeCareer,
    CompareCandidates,
    ViewRecruitmentInsights,
    ChatWithAssistant,
}

/// Who may perform an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allowed {
    /// Any signed-in principal, including one whose role has not been assigned.
    SignedIn,
    /// Any of the four roles.
    AnyRole,
    Only(&'static [Role]),
}

impl Allowed {
    pub fn admits(self, role: Option<Role>) -> bool {
        match self {
            Allowed::SignedIn => true,
            Allowed::AnyRole => role.is_some(),
            Allowed::Only(roles) => role.is_some_and(|r| roles.contains(&r)),
        }
    }
}

const ADMIN: &[Role] = &[Role::Admin];
const ADMIN_HR: &[Role] = &[Role::Admin, Role::Hr];
const ADMIN_HR_MANAGER: &[Role] = &[Role::Admin, Role::Hr, Role::Manager];
const ADMIN_MANAGER: &[Role] = &[Role::Admin, Role::Manager];
const EMPLOYEE: &[Role] = &[Role::Employee];

/// The permission table.
pub fn allowed(action: Action) -> Allowed {
    match action {
        Action::View(route) => route.allowed(),
        Action::CreateEmployee | Action::UpdateEmployee => Allowed::Only(ADMIN_HR),
        Action::SubmitLeave => Allowed::Only(EMPLOYEE),
        Action::DecideLeave => Allowed::Only(ADMIN_MANAGER),
        Action::PostAnnouncement => Allowed::Only(ADMIN),
        Action::ManageJobPostings | Action::ManageInterviews => Allowed::Only(ADMIN_HR),
        Action::ViewAttendance | Action::RecordAttendance => Allowed::Only(ADMIN_HR),
        Action::ViewPerformanceReviews => Allowed::AnyRole,
        Action::WritePerformanceReview => Allowed::Only(ADMIN_HR_MANAGER),
        Action::ViewPayroll => Allowed::Only(ADMIN),
        Action::ScreenResume
        | Action::UploadCandidateResume
        | Action::CompareCandidates
        | Action::ViewRecruitmentInsights => Allowed::Only(ADMIN_HR),
        Action::AnalyzeCareer => Allowed::Only(EMPLOYEE),
        Action::ChatWithAssistant => Allowed::AnyRole,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{action:?} is not permitted for {}", .role.map(Role::as_str).unwrap_or("a principal without a role"))]
pub struct AccessDenied {
    pub action: Action,
    pub role: Option<Role>,
}

/// The one authorization function.
pub fn authorize(action: Action, role: Option<Role>) -> Result<(), AccessDenied> {
    if allowed(action).admits(role) {
        Ok(())
    } else {
        Err(AccessDenied { action, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles_admitted(action: Action) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|r| authorize(action, Some(*r)).is_ok())
            .collect()
    }

    #[test]
    fn test_role_parse_round_trips_known_values() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"hr\"");
        let parsed: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(parsed, Role::Manager);
    }

    #[test]
    fn test_payroll_is_admin_only() {
        assert_eq!(roles_admitted(Action::ViewPayroll), vec![Role::Admin]);
    }

    #[test]
    fn test_only_admin_posts_announcements() {
        assert_eq!(roles_admitted(Action::PostAnnouncement), vec![Role::Admin]);
    }

    #[test]
    fn test_leave_decisions_belong_to_managers_and_admins() {
        assert_eq!(
            roles_admitted(Action::DecideLeave),
            vec![Role::Admin, Role::Manager]
        );
        assert_eq!(roles_admitted(Action::SubmitLeave), vec![Role::Employee]);
    }

    #[test]
    fn test_recruitment_ai_is_admin_and_hr() {
        for action in [
            Action::ScreenResume,
            Action::UploadCandidateResume,
            Action::CompareCandidates,
            Action::ViewRecruitmentInsights,
        ] {
            assert_eq!(roles_admitted(action), vec![Role::Admin, Role::Hr]);
        }
        assert_eq!(roles_admitted(Action::AnalyzeCareer), vec![Role::Employee]);
    }

    #[test]
    fn test_missing_role_is_denied_role_gated_actions() {
        let denied = authorize(Action::ChatWithAssistant, None).unwrap_err();
        assert_eq!(denied.role, None);
        assert!(denied.to_string().contains("without a role"));
    }

    #[test]
    fn test_page_views_follow_page_allow_lists() {
        assert!(authorize(Action::View(RouteName::Dashboard), None).is_ok());
        assert!(authorize(Action::View(RouteName::Interviews), Some(Role::Hr)).is_ok());
        assert_eq!(
            authorize(Action::View(RouteName::Interviews), Some(Role::Employee)),
            Err(AccessDenied {
                action: Action::View(RouteName::Interviews),
                role: Some(Role::Employee),
            })
        );
    }

    #[test]
    fn test_allowed_variants() {
        assert!(Allowed::SignedIn.admits(None));
        assert!(!Allowed::AnyRole.admits(None));
        assert!(Allowed::AnyRole.admits(Some(Role::Employee)));
        assert!(!Allowed::Only(ADMIN).admits(Some(Role::Hr)));
        assert!(!Allowed::Only(ADMIN).admits(None));
    }
}
