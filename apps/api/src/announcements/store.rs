use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::NewAnnouncement;
use crate::access::Role;
use crate::errors::AppError;
use crate::models::announcement::AnnouncementRow;

/// Newest first. With `audience`, only announcements that role should read.
pub async fn list(
    pool: &PgPool,
    audience: Option<Role>,
    limit: Option<i64>,
) -> Result<Vec<AnnouncementRow>, AppError> {
    let rows = sqlx::query_as::<_, AnnouncementRow>(
        r#"
        SELECT * FROM announcements
        WHERE $1::text IS NULL
           OR target_roles IS NULL
           OR cardinality(target_roles) = 0
           OR $1 = ANY(target_roles)
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(audience.map(Role::as_str))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn insert(
    pool: &PgPool,
    announcement: &NewAnnouncement,
    created_by: Uuid,
) -> Result<AnnouncementRow, AppError> {
    let targets: Vec<&str> = announcement
        .target_roles
        .iter()
        .map(|r| r.as_str())
        .collect();

    let row = sqlx::query_as::<_, AnnouncementRow>(
        r#"
        INSERT INTO announcements (title, content, priority, target_roles, created_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&announcement.title)
    .bind(&announcement.content)
    .bind(announcement.priority.as_str())
    .bind(&targets)
    .bind(created_by)
    .fetch_one(pool)
    .await?;

    info!("Announcement {} posted by {created_by}", row.id);
    Ok(row)
}
