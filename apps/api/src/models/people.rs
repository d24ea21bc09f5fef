use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    /// The signed-in principal this record belongs to, once linked.
    pub user_id: Option<Uuid>,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub position: String,
    pub salary: Option<f64>,
    pub status: String,
    pub join_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PerformanceReviewRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub reviewer_id: Option<Uuid>,
    pub review_period: String,
    pub rating: i32,
    pub strengths: Option<String>,
    pub areas_for_improvement: Option<String>,
    pub goals: Option<String>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
