use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{EmployeeChanges, NewEmployee};
use crate::errors::AppError;
use crate::models::people::EmployeeRow;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EmployeeFilter {
    pub department: Option<String>,
    pub status: Option<String>,
    /// Matches name, email or employee code.
    pub search: Option<String>,
}

impl EmployeeFilter {
    /// Cache scope naming this exact filter.
    pub fn scope(&self) -> String {
        format!(
            "department={}:status={}:search={}",
            self.department.as_deref().unwrap_or(""),
            self.status.as_deref().unwrap_or(""),
            self.search.as_deref().unwrap_or("").to_lowercase(),
        )
    }
}

/// Newest first.
pub async fn list(pool: &PgPool, filter: &EmployeeFilter) -> Result<Vec<EmployeeRow>, AppError> {
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"));

    let rows = sqlx::query_as::<_, EmployeeRow>(
        r#"
        SELECT * FROM employees
        WHERE ($1::text IS NULL OR department = $1)
          AND ($2::text IS NULL OR status = $2)
          AND ($3::text IS NULL
               OR full_name ILIKE $3 OR email ILIKE $3 OR employee_id ILIKE $3)
        ORDER BY created_at DESC
        "#,
    )
    .bind(filter.department.as_deref())
    .bind(filter.status.as_deref())
    .bind(search)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<EmployeeRow, AppError> {
    sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))
}

/// The employee record linked to a signed-in principal, if any.
pub async fn find_for_principal(
    pool: &PgPool,
    principal: Uuid,
) -> Result<Option<EmployeeRow>, AppError> {
    let row = sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE user_id = $1")
        .bind(principal)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Like [`find_for_principal`], for flows that cannot proceed without one.
pub async fn require_for_principal(pool: &PgPool, principal: Uuid) -> Result<EmployeeRow, AppError> {
    find_for_principal(pool, principal).await?.ok_or_else(|| {
        AppError::NotFound("No employee record is linked to your account".to_string())
    })
}

pub async fn insert(pool: &PgPool, employee: &NewEmployee) -> Result<EmployeeRow, AppError> {
    let row = sqlx::query_as::<_, EmployeeRow>(
        r#"
        INSERT INTO employees
            (user_id, employee_id, full_name, email, phone, department,
             position, salary, status, join_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(employee.user_id)
    .bind(&employee.employee_id)
    .bind(&employee.full_name)
    .bind(&employee.email)
    .bind(&employee.phone)
    .bind(&employee.department)
    .bind(&employee.position)
    .bind(employee.salary)
    .bind(employee.status.as_str())
    .bind(employee.join_date)
    .fetch_one(pool)
    .await?;

    info!("Created employee {} ({})", row.employee_id, row.id);
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    changes: &EmployeeChanges,
) -> Result<EmployeeRow, AppError> {
    sqlx::query_as::<_, EmployeeRow>(
        r#"
        UPDATE employees SET
            user_id    = COALESCE($2, user_id),
            full_name  = COALESCE($3, full_name),
            email      = COALESCE($4, email),
            phone      = COALESCE($5, phone),
            department = COALESCE($6, department),
            position   = COALESCE($7, position),
            salary     = COALESCE($8, salary),
            status     = COALESCE($9, status),
            join_date  = COALESCE($10, join_date),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(changes.user_id)
    .bind(&changes.full_name)
    .bind(&changes.email)
    .bind(&changes.phone)
    .bind(&changes.department)
    .bind(&changes.position)
    .bind(changes.salary)
    .bind(changes.status.map(|s| s.as_str()))
    .bind(changes.join_date)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_distinguishes_filters() {
        let all = EmployeeFilter::default();
        let engineering = EmployeeFilter {
            department: Some("Engineering".to_string()),
            ..Default::default()
        };
        assert_ne!(all.scope(), engineering.scope());
        assert_eq!(all.scope(), "department=:status=:search=");
    }

    #[test]
    fn test_scope_ignores_search_case() {
        let upper = EmployeeFilter {
            search: Some("ADA".to_string()),
            ..Default::default()
        };
        let lower = EmployeeFilter {
            search: Some("ada".to_string()),
            ..Default::default()
        };
        assert_eq!(upper.scope(), lower.scope());
    }
}
