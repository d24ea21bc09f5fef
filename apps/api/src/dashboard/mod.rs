//! Role-specific dashboard views.
//!
//! Loading and composing are split: `queries` gathers a role's snapshot with
//! its aggregates running concurrently, and the `compose_*` functions here
//! turn a snapshot into the view. Composition is pure so each role's view can
//! be checked without a database.

pub mod handlers;
pub mod queries;

use serde::Serialize;

use crate::access::{guard, GuardDecision, Role, RouteName, Viewer};
use crate::announcements::AnnouncementView;
use crate::models::announcement::AnnouncementRow;
use crate::models::leave::LeaveRequestListing;
use crate::models::people::PerformanceReviewRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardKind {
    Admin,
    Hr,
    Manager,
    Employee,
    Unassigned,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    Count(i64),
    /// `None` when there is nothing to aggregate yet.
    Decimal(Option<f64>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub key: &'static str,
    pub label: &'static str,
    pub value: Metric,
}

impl StatCard {
    fn new(key: &'static str, label: &'static str, value: Metric) -> Self {
        Self { key, label, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortcut {
    pub route: RouteName,
    pub path: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardLists {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leave_requests: Vec<LeaveRequestListing>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub announcements: Vec<AnnouncementView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_review: Option<PerformanceReviewRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub kind: DashboardKind,
    pub title: String,
    pub subtitle: String,
    pub cards: Vec<StatCard>,
    pub shortcuts: Vec<Shortcut>,
    pub lists: DashboardLists,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminSnapshot {
    pub employees: i64,
    pub job_postings: i64,
    pub interviews: i64,
    pub announcements: i64,
    pub pending_leaves: i64,
    pub screenings: i64,
    pub total_payroll: f64,
    pub attendance_rate: Option<f64>,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HrSnapshot {
    pub employees: i64,
    pub job_postings: i64,
    pub interviews: i64,
    pub pending_leaves: i64,
    pub screenings: i64,
}

#[derive(Debug, Clone)]
pub struct ManagerSnapshot {
    pub team_members: i64,
    pub pending_requests: Vec<LeaveRequestListing>,
    pub announcements: Vec<AnnouncementRow>,
}

#[derive(Debug, Clone)]
pub struct EmployeeSnapshot {
    pub full_name: Option<String>,
    pub leave_requests: Vec<LeaveRequestListing>,
    pub announcements: Vec<AnnouncementRow>,
    pub latest_review: Option<PerformanceReviewRow>,
}

/// Shortcut links, keeping only routes the role can actually open.
fn shortcuts(role: Role, routes: &[RouteName]) -> Vec<Shortcut> {
    routes
        .iter()
        .copied()
        .filter(|route| guard(*route, Viewer::SignedIn(Some(role))) == GuardDecision::Render)
        .map(|route| Shortcut {
            route,
            path: route.path(),
            label: route.label(),
        })
        .collect()
}

pub fn compose_admin(s: AdminSnapshot) -> DashboardView {
    DashboardView {
        kind: DashboardKind::Admin,
        title: "Admin Dashboard".to_string(),
        subtitle: "Complete system overview and management".to_string(),
        cards: vec![
            StatCard::new("total_employees", "Total Employees", Metric::Count(s.employees)),
            StatCard::new("job_postings", "Job Postings", Metric::Count(s.job_postings)),
            StatCard::new("interviews", "Interviews", Metric::Count(s.interviews)),
            StatCard::new("announcements", "Announcements", Metric::Count(s.announcements)),
            StatCard::new("pending_leaves", "Pending Leaves", Metric::Count(s.pending_leaves)),
            StatCard::new("resume_screenings", "Resume Screenings", Metric::Count(s.screenings)),
            StatCard::new("total_payroll", "Total Payroll", Metric::Decimal(Some(s.total_payroll))),
            StatCard::new(
                "attendance_rate",
                "Attendance Rate (30 days)",
                Metric::Decimal(s.attendance_rate),
            ),
            StatCard::new(
                "average_rating",
                "Avg Performance Rating",
                Metric::Decimal(s.average_rating.map(round_tenth)),
            ),
        ],
        shortcuts: shortcuts(
            Role::Admin,
            &[
                RouteName::Employees,
                RouteName::JobPostings,
                RouteName::Announcements,
                RouteName::LeaveManagement,
                RouteName::Interviews,
                RouteName::ResumeScreening,
            ],
        ),
        lists: DashboardLists::default(),
    }
}

pub fn compose_hr(s: HrSnapshot) -> DashboardView {
    DashboardView {
        kind: DashboardKind::Hr,
        title: "HR Dashboard".to_string(),
        subtitle: "Recruitment and people operations".to_string(),
        cards: vec![
            StatCard::new("total_employees", "Total Employees", Metric::Count(s.employees)),
            StatCard::new("job_postings", "Job Postings", Metric::Count(s.job_postings)),
            StatCard::new("interviews", "Interviews", Metric::Count(s.interviews)),
            StatCard::new("pending_leaves", "Pending Leaves", Metric::Count(s.pending_leaves)),
            StatCard::new("resume_screenings", "Resume Screenings", Metric::Count(s.screenings)),
        ],
        shortcuts: shortcuts(
            Role::Hr,
            &[
                RouteName::Employees,
                RouteName::JobPostings,
                RouteName::Interviews,
                RouteName::ResumeScreening,
                RouteName::CandidateResumeUpload,
                RouteName::RecruitmentAnalytics,
            ],
        ),
        lists: DashboardLists::default(),
    }
}

pub fn compose_manager(s: ManagerSnapshot) -> DashboardView {
    DashboardView {
        kind: DashboardKind::Manager,
        title: "Manager Dashboard".to_string(),
        subtitle: "Team management and leave approvals".to_string(),
        cards: vec![
            StatCard::new("team_members", "Team Members", Metric::Count(s.team_members)),
            StatCard::new(
                "pending_leaves",
                "Pending Leave Requests",
                Metric::Count(s.pending_requests.len() as i64),
            ),
        ],
        shortcuts: shortcuts(
            Role::Manager,
            &[RouteName::Employees, RouteName::LeaveManagement],
        ),
        lists: DashboardLists {
            leave_requests: s.pending_requests,
            announcements: s.announcements.into_iter().map(AnnouncementView::from).collect(),
            latest_review: None,
        },
    }
}

pub fn compose_employee(s: EmployeeSnapshot) -> DashboardView {
    let name = s.full_name.unwrap_or_else(|| "Employee".to_string());
    let performance = s
        .latest_review
        .as_ref()
        .map_or_else(|| "No reviews yet".to_string(), |r| format!("{}/5", r.rating));

    DashboardView {
        kind: DashboardKind::Employee,
        title: "My Dashboard".to_string(),
        subtitle: format!("Welcome back, {name}!"),
        cards: vec![
            StatCard::new(
                "my_leave_requests",
                "My Leave Requests",
                Metric::Count(s.leave_requests.len() as i64),
            ),
            StatCard::new(
                "announcements",
                "Announcements",
                Metric::Count(s.announcements.len() as i64),
            ),
            StatCard::new("performance", "Performance", Metric::Text(performance)),
        ],
        shortcuts: shortcuts(
            Role::Employee,
            &[RouteName::LeaveManagement, RouteName::ChatAssistant],
        ),
        lists: DashboardLists {
            leave_requests: s.leave_requests,
            announcements: s.announcements.into_iter().map(AnnouncementView::from).collect(),
            latest_review: s.latest_review,
        },
    }
}

/// Shown to a signed-in principal who has no role yet.
pub fn compose_unassigned() -> DashboardView {
    DashboardView {
        kind: DashboardKind::Unassigned,
        title: "Welcome!".to_string(),
        subtitle: "Please contact your administrator to assign you a role.".to_string(),
        cards: Vec::new(),
        shortcuts: Vec::new(),
        lists: DashboardLists::default(),
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn card<'a>(view: &'a DashboardView, key: &str) -> Option<&'a StatCard> {
        view.cards.iter().find(|c| c.key == key)
    }

    fn admin_snapshot() -> AdminSnapshot {
        AdminSnapshot {
            employees: 12,
            job_postings: 3,
            interviews: 4,
            announcements: 2,
            pending_leaves: 5,
            screenings: 7,
            total_payroll: 960_000.0,
            attendance_rate: Some(91.7),
            average_rating: Some(3.666),
        }
    }

    fn announcement(title: &str) -> AnnouncementRow {
        AnnouncementRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: "details".to_string(),
            priority: "normal".to_string(),
            target_roles: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_sees_payroll_and_rounded_rating() {
        let view = compose_admin(admin_snapshot());
        assert_eq!(view.kind, DashboardKind::Admin);
        assert_eq!(
            card(&view, "total_payroll").unwrap().value,
            Metric::Decimal(Some(960_000.0))
        );
        assert_eq!(
            card(&view, "average_rating").unwrap().value,
            Metric::Decimal(Some(3.7))
        );
        assert_eq!(card(&view, "pending_leaves").unwrap().value, Metric::Count(5));
    }

    #[test]
    fn test_payroll_never_leaves_admin_view() {
        let hr = compose_hr(HrSnapshot {
            employees: 12,
            job_postings: 3,
            interviews: 4,
            pending_leaves: 5,
            screenings: 7,
        });
        let manager = compose_manager(ManagerSnapshot {
            team_members: 12,
            pending_requests: Vec::new(),
            announcements: Vec::new(),
        });
        let employee = compose_employee(EmployeeSnapshot {
            full_name: None,
            leave_requests: Vec::new(),
            announcements: Vec::new(),
            latest_review: None,
        });
        for view in [hr, manager, employee, compose_unassigned()] {
            assert!(card(&view, "total_payroll").is_none());
        }
    }

    #[test]
    fn test_shortcuts_only_reach_permitted_routes() {
        let hr = compose_hr(HrSnapshot {
            employees: 0,
            job_postings: 0,
            interviews: 0,
            pending_leaves: 0,
            screenings: 0,
        });
        for shortcut in &hr.shortcuts {
            assert_eq!(
                guard(shortcut.route, Viewer::SignedIn(Some(Role::Hr))),
                GuardDecision::Render
            );
        }
        assert_eq!(hr.shortcuts.len(), 6);

        let employee = compose_employee(EmployeeSnapshot {
            full_name: Some("Ada".to_string()),
            leave_requests: Vec::new(),
            announcements: Vec::new(),
            latest_review: None,
        });
        let routes: Vec<RouteName> = employee.shortcuts.iter().map(|s| s.route).collect();
        assert_eq!(
            routes,
            vec![RouteName::LeaveManagement, RouteName::ChatAssistant]
        );
    }

    #[test]
    fn test_manager_counts_pending_list() {
        let view = compose_manager(ManagerSnapshot {
            team_members: 8,
            pending_requests: Vec::new(),
            announcements: vec![announcement("Offsite"), announcement("Holiday")],
        });
        assert_eq!(card(&view, "team_members").unwrap().value, Metric::Count(8));
        assert_eq!(card(&view, "pending_leaves").unwrap().value, Metric::Count(0));
        assert_eq!(view.lists.announcements.len(), 2);
        assert_eq!(view.lists.announcements[0].badge, "normal");
    }

    #[test]
    fn test_employee_greets_by_name() {
        let view = compose_employee(EmployeeSnapshot {
            full_name: Some("Ada Lovelace".to_string()),
            leave_requests: Vec::new(),
            announcements: vec![announcement("Welcome")],
            latest_review: None,
        });
        assert_eq!(view.subtitle, "Welcome back, Ada Lovelace!");
        assert_eq!(
            card(&view, "performance").unwrap().value,
            Metric::Text("No reviews yet".to_string())
        );
    }

    #[test]
    fn test_unassigned_view_is_neutral() {
        let view = compose_unassigned();
        assert_eq!(view.kind, DashboardKind::Unassigned);
        assert!(view.cards.is_empty());
        assert!(view.shortcuts.is_empty());
        assert!(view.subtitle.contains("administrator"));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "unassigned");
        assert!(json["lists"].get("announcements").is_none());
    }
}
