use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{AdminSnapshot, EmployeeSnapshot, HrSnapshot, ManagerSnapshot};
use crate::access::Role;
use crate::announcements::store as announcements;
use crate::employees::store as employees;
use crate::errors::AppError;
use crate::leave::store::{self as leave, LeaveScope};
use crate::leave::LeaveStatus;
use crate::workforce::store as workforce;

const RECENT_ITEMS: i64 = 5;
const ATTENDANCE_WINDOW_DAYS: i64 = 30;

/// Tables whose size a dashboard reports.
#[derive(Debug, Clone, Copy)]
enum Counted {
    Employees,
    JobPostings,
    Interviews,
    Announcements,
    ResumeScreenings,
}

impl Counted {
    fn sql(self) -> &'static str {
        match self {
            Counted::Employees => "SELECT COUNT(*) FROM employees",
            Counted::JobPostings => "SELECT COUNT(*) FROM job_postings",
            Counted::Interviews => "SELECT COUNT(*) FROM interviews",
            Counted::Announcements => "SELECT COUNT(*) FROM announcements",
            Counted::ResumeScreenings => "SELECT COUNT(*) FROM resume_screenings",
        }
    }
}

async fn count(pool: &PgPool, table: Counted) -> Result<i64, AppError> {
    let n: i64 = sqlx::query_scalar(table.sql()).fetch_one(pool).await?;
    Ok(n)
}

async fn total_payroll(pool: &PgPool) -> Result<f64, AppError> {
    let total: f64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(salary), 0)::float8 FROM employees")
            .fetch_one(pool)
            .await?;
    Ok(total)
}

pub async fn load_admin(pool: &PgPool) -> Result<AdminSnapshot, AppError> {
    let window_start = (Utc::now() - Duration::days(ATTENDANCE_WINDOW_DAYS)).date_naive();

    let (
        employees,
        job_postings,
        interviews,
        announcements,
        pending_leaves,
        screenings,
        total_payroll,
        attendance_rate,
        average_rating,
    ) = tokio::try_join!(
        count(pool, Counted::Employees),
        count(pool, Counted::JobPostings),
        count(pool, Counted::Interviews),
        count(pool, Counted::Announcements),
        leave::count_pending(pool),
        count(pool, Counted::ResumeScreenings),
        total_payroll(pool),
        workforce::present_rate_since(pool, window_start),
        workforce::average_rating(pool),
    )?;

    Ok(AdminSnapshot {
        employees,
        job_postings,
        interviews,
        announcements,
        pending_leaves,
        screenings,
        total_payroll,
        attendance_rate,
        average_rating,
    })
}

pub async fn load_hr(pool: &PgPool) -> Result<HrSnapshot, AppError> {
    let (employees, job_postings, interviews, pending_leaves, screenings) = tokio::try_join!(
        count(pool, Counted::Employees),
        count(pool, Counted::JobPostings),
        count(pool, Counted::Interviews),
        leave::count_pending(pool),
        count(pool, Counted::ResumeScreenings),
    )?;

    Ok(HrSnapshot {
        employees,
        job_postings,
        interviews,
        pending_leaves,
        screenings,
    })
}

pub async fn load_manager(pool: &PgPool) -> Result<ManagerSnapshot, AppError> {
    let (team_members, pending_requests, announcements) = tokio::try_join!(
        count(pool, Counted::Employees),
        leave::list(pool, LeaveScope::All, Some(LeaveStatus::Pending), None),
        announcements::list(pool, Some(Role::Manager), Some(RECENT_ITEMS)),
    )?;

    Ok(ManagerSnapshot {
        team_members,
        pending_requests,
        announcements,
    })
}

pub async fn load_employee(pool: &PgPool, principal: Uuid) -> Result<EmployeeSnapshot, AppError> {
    let employee = employees::find_for_principal(pool, principal).await?;

    let Some(employee) = employee else {
        // Not linked to an employee record yet: announcements only.
        let announcements =
            announcements::list(pool, Some(Role::Employee), Some(RECENT_ITEMS)).await?;
        return Ok(EmployeeSnapshot {
            full_name: None,
            leave_requests: Vec::new(),
            announcements,
            latest_review: None,
        });
    };

    let (leave_requests, announcements, mut reviews) = tokio::try_join!(
        leave::list(pool, LeaveScope::Employee(employee.id), None, Some(RECENT_ITEMS)),
        announcements::list(pool, Some(Role::Employee), Some(RECENT_ITEMS)),
        workforce::list_reviews(pool, Some(employee.id), Some(1)),
    )?;

    Ok(EmployeeSnapshot {
        full_name: Some(employee.full_name),
        leave_requests,
        announcements,
        latest_review: reviews.pop(),
    })
}
