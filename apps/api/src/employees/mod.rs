//! Employee records.

pub mod handlers;
pub mod store;

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::validation::{one_of, optional, required};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    const CHOICES: [(&'static str, EmployeeStatus); 3] = [
        ("active", EmployeeStatus::Active),
        ("inactive", EmployeeStatus::Inactive),
        ("on_leave", EmployeeStatus::OnLeave),
    ];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        one_of("status", value, &Self::CHOICES)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::OnLeave => "on_leave",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    pub join_date: Option<NaiveDate>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub user_id: Option<Uuid>,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub position: String,
    pub salary: Option<f64>,
    pub status: EmployeeStatus,
    pub join_date: NaiveDate,
}

impl CreateEmployeeRequest {
    pub fn validate(self) -> Result<NewEmployee, AppError> {
        let email = required("email", &self.email)?;
        if !email.contains('@') {
            return Err(AppError::Validation(format!("'{email}' is not an email address")));
        }
        Ok(NewEmployee {
            user_id: self.user_id,
            employee_id: required("employee_id", &self.employee_id)?,
            full_name: required("full_name", &self.full_name)?,
            email,
            phone: optional(self.phone),
            department: required("department", &self.department)?,
            position: required("position", &self.position)?,
            salary: check_salary(self.salary)?,
            status: match self.status.as_deref() {
                Some(status) => EmployeeStatus::parse(status)?,
                None => EmployeeStatus::Active,
            },
            join_date: self
                .join_date
                .ok_or_else(|| AppError::Validation("join_date is required".to_string()))?,
        })
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub user_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub status: Option<String>,
    pub join_date: Option<NaiveDate>,
}

#[derive(Debug, Default, PartialEq)]
pub struct EmployeeChanges {
    pub user_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub status: Option<EmployeeStatus>,
    pub join_date: Option<NaiveDate>,
}

impl UpdateEmployeeRequest {
    pub fn validate(self) -> Result<EmployeeChanges, AppError> {
        let present = |field: &str, value: Option<String>| -> Result<Option<String>, AppError> {
            value.map(|v| required(field, &v)).transpose()
        };
        Ok(EmployeeChanges {
            user_id: self.user_id,
            full_name: present("full_name", self.full_name)?,
            email: present("email", self.email)?,
            phone: optional(self.phone),
            department: present("department", self.department)?,
            position: present("position", self.position)?,
            salary: check_salary(self.salary)?,
            status: self.status.as_deref().map(EmployeeStatus::parse).transpose()?,
            join_date: self.join_date,
        })
    }
}

fn check_salary(salary: Option<f64>) -> Result<Option<f64>, AppError> {
    match salary {
        Some(s) if !s.is_finite() || s < 0.0 => Err(AppError::Validation(
            "salary must be a non-negative amount".to_string(),
        )),
        other => Ok(other),
    }
}
