use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{transition, Decision, LeaveStatus, NewLeaveRequest};
use crate::errors::AppError;
use crate::models::leave::{LeaveRequestListing, LeaveRequestRow};

/// Whose requests a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveScope {
    All,
    Employee(Uuid),
}

impl LeaveScope {
    pub fn cache_scope(self, status: Option<LeaveStatus>) -> String {
        let status = status.map_or("", LeaveStatus::as_str);
        match self {
            LeaveScope::All => format!("all:status={status}"),
            LeaveScope::Employee(id) => format!("employee={id}:status={status}"),
        }
    }
}

/// Newest first, optionally capped.
pub async fn list(
    pool: &PgPool,
    scope: LeaveScope,
    status: Option<LeaveStatus>,
    limit: Option<i64>,
) -> Result<Vec<LeaveRequestListing>, AppError> {
    let employee = match scope {
        LeaveScope::All => None,
        LeaveScope::Employee(id) => Some(id),
    };
    let rows = sqlx::query_as::<_, LeaveRequestListing>(
        r#"
        SELECT lr.id, lr.employee_id, lr.leave_type, lr.start_date, lr.end_date,
               lr.reason, lr.status, lr.approved_by, lr.created_at,
               e.full_name AS employee_name,
               e.employee_id AS employee_code,
               e.department AS employee_department
        FROM leave_requests lr
        JOIN employees e ON e.id = lr.employee_id
        WHERE ($1::uuid IS NULL OR lr.employee_id = $1)
          AND ($2::text IS NULL OR lr.status = $2)
        ORDER BY lr.created_at DESC
        LIMIT $3
        "#,
    )
    .bind(employee)
    .bind(status.map(LeaveStatus::as_str))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_pending(pool: &PgPool) -> Result<i64, AppError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM leave_requests WHERE status = 'pending'")
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn insert(
    pool: &PgPool,
    employee_id: Uuid,
    request: &NewLeaveRequest,
) -> Result<LeaveRequestRow, AppError> {
    let row = sqlx::query_as::<_, LeaveRequestRow>(
        r#"
        INSERT INTO leave_requests (employee_id, leave_type, start_date, end_date, reason)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(employee_id)
    .bind(request.leave_type.as_str())
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(&request.reason)
    .fetch_one(pool)
    .await?;

    info!("Employee {employee_id} submitted leave request {}", row.id);
    Ok(row)
}

/// Records a decision on a pending request. Only one decision can ever apply;
/// later attempts see the stored status and fail with a conflict.
pub async fn decide(
    pool: &PgPool,
    id: Uuid,
    decision: Decision,
    decided_by: Uuid,
) -> Result<LeaveRequestRow, AppError> {
    let decided = sqlx::query_as::<_, LeaveRequestRow>(
        r#"
        UPDATE leave_requests
        SET status = $2, approved_by = $3, updated_at = now()
        WHERE id = $1 AND status = 'pending'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(decision.resulting_status().as_str())
    .bind(decided_by)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = decided {
        info!("Leave request {id} {} by {decided_by}", row.status);
        return Ok(row);
    }

    let current: Option<String> =
        sqlx::query_scalar("SELECT status FROM leave_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    let current = current.ok_or_else(|| AppError::NotFound(format!("Leave request {id} not found")))?;

    // Not pending any more, so this always yields the conflict.
    transition(LeaveStatus::parse(&current)?, decision)?;
    Err(AppError::Conflict(format!(
        "Leave request {id} is no longer pending"
    )))
}
