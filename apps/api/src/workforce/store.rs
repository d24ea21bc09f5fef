use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{NewAttendance, NewReview};
use crate::errors::AppError;
use crate::models::people::{AttendanceRow, PerformanceReviewRow};

/// Most recent day first.
pub async fn list_attendance(
    pool: &PgPool,
    since: Option<NaiveDate>,
) -> Result<Vec<AttendanceRow>, AppError> {
    let rows = sqlx::query_as::<_, AttendanceRow>(
        r#"
        SELECT * FROM attendance
        WHERE ($1::date IS NULL OR date >= $1)
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn insert_attendance(
    pool: &PgPool,
    record: &NewAttendance,
) -> Result<AttendanceRow, AppError> {
    let row = sqlx::query_as::<_, AttendanceRow>(
        r#"
        INSERT INTO attendance (employee_id, date, check_in, check_out, status, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(record.employee_id)
    .bind(record.date)
    .bind(record.check_in)
    .bind(record.check_out)
    .bind(record.status.as_str())
    .bind(&record.notes)
    .fetch_one(pool)
    .await?;

    info!("Attendance recorded for employee {} on {}", row.employee_id, row.date);
    Ok(row)
}

/// Share of attendance records since `since` marked present, as a percentage.
/// `None` when nothing was recorded.
pub async fn present_rate_since(pool: &PgPool, since: NaiveDate) -> Result<Option<f64>, AppError> {
    let (present, total): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FILTER (WHERE status = 'present'), COUNT(*)
        FROM attendance
        WHERE date >= $1
        "#,
    )
    .bind(since)
    .fetch_one(pool)
    .await?;
    Ok(super::percentage(present, total))
}

/// Newest first. With `employee`, only that employee's reviews.
pub async fn list_reviews(
    pool: &PgPool,
    employee: Option<Uuid>,
    limit: Option<i64>,
) -> Result<Vec<PerformanceReviewRow>, AppError> {
    let rows = sqlx::query_as::<_, PerformanceReviewRow>(
        r#"
        SELECT * FROM performance_reviews
        WHERE ($1::uuid IS NULL OR employee_id = $1)
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(employee)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn average_rating(pool: &PgPool) -> Result<Option<f64>, AppError> {
    let average: Option<f64> =
        sqlx::query_scalar("SELECT AVG(rating)::float8 FROM performance_reviews")
            .fetch_one(pool)
            .await?;
    Ok(average)
}

pub async fn insert_review(
    pool: &PgPool,
    review: &NewReview,
    reviewer: Uuid,
) -> Result<PerformanceReviewRow, AppError> {
    let row = sqlx::query_as::<_, PerformanceReviewRow>(
        r#"
        INSERT INTO performance_reviews
            (employee_id, reviewer_id, review_period, rating, strengths,
             areas_for_improvement, goals, comments)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(review.employee_id)
    .bind(reviewer)
    .bind(&review.review_period)
    .bind(review.rating)
    .bind(&review.strengths)
    .bind(&review.areas_for_improvement)
    .bind(&review.goals)
    .bind(&review.comments)
    .fetch_one(pool)
    .await?;

    info!(
        "Performance review {} written for employee {} by {reviewer}",
        row.id, row.employee_id
    );
    Ok(row)
}
