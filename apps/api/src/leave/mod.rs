//! Leave requests and their one-way approval workflow.
//!
//! A request is created `pending` and moves exactly once, to `approved` or
//! `rejected`, recording who decided. The store enforces the "exactly once"
//! part with a conditional update, so two concurrent deciders cannot both win.

pub mod handlers;
pub mod store;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::validation::{one_of, optional};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveType {
    Sick,
    Casual,
    Vacation,
    Personal,
}

impl LeaveType {
    const CHOICES: [(&'static str, LeaveType); 4] = [
        ("sick", LeaveType::Sick),
        ("casual", LeaveType::Casual),
        ("vacation", LeaveType::Vacation),
        ("personal", LeaveType::Personal),
    ];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        one_of("leave_type", value, &Self::CHOICES)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LeaveType::Sick => "sick",
            LeaveType::Casual => "casual",
            LeaveType::Vacation => "vacation",
            LeaveType::Personal => "personal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    const CHOICES: [(&'static str, LeaveStatus); 3] = [
        ("pending", LeaveStatus::Pending),
        ("approved", LeaveStatus::Approved),
        ("rejected", LeaveStatus::Rejected),
    ];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        one_of("status", value, &Self::CHOICES)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

/// The outcome a manager or admin records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        one_of(
            "status",
            value,
            &[("approved", Decision::Approve), ("rejected", Decision::Reject)],
        )
    }

    pub fn resulting_status(self) -> LeaveStatus {
        match self {
            Decision::Approve => LeaveStatus::Approved,
            Decision::Reject => LeaveStatus::Rejected,
        }
    }
}

/// Applies `decision` to a request currently in `current`.
pub fn transition(current: LeaveStatus, decision: Decision) -> Result<LeaveStatus, AppError> {
    match current {
        LeaveStatus::Pending => Ok(decision.resulting_status()),
        decided => Err(AppError::Conflict(format!(
            "Leave request has already been {}",
            decided.as_str()
        ))),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateLeaveRequest {
    #[serde(default)]
    pub leave_type: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLeaveRequest {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

impl CreateLeaveRequest {
    pub fn validate(self) -> Result<NewLeaveRequest, AppError> {
        let leave_type = LeaveType::parse(self.leave_type.trim())?;
        let start_date = self
            .start_date
            .ok_or_else(|| AppError::Validation("start_date is required".to_string()))?;
        let end_date = self
            .end_date
            .ok_or_else(|| AppError::Validation("end_date is required".to_string()))?;
        if start_date > end_date {
            return Err(AppError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }
        Ok(NewLeaveRequest {
            leave_type,
            start_date,
            end_date,
            reason: optional(self.reason),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Option<NaiveDate> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_pending_moves_to_decision() {
        assert_eq!(
            transition(LeaveStatus::Pending, Decision::Approve).unwrap(),
            LeaveStatus::Approved
        );
        assert_eq!(
            transition(LeaveStatus::Pending, Decision::Reject).unwrap(),
            LeaveStatus::Rejected
        );
    }

    #[test]
    fn test_decided_request_cannot_be_decided_again() {
        for decided in [LeaveStatus::Approved, LeaveStatus::Rejected] {
            for decision in [Decision::Approve, Decision::Reject] {
                assert!(matches!(
                    transition(decided, decision),
                    Err(AppError::Conflict(_))
                ));
            }
        }
    }

    #[test]
    fn test_decision_accepts_only_terminal_statuses() {
        assert_eq!(Decision::parse("approved").unwrap(), Decision::Approve);
        assert!(Decision::parse("pending").is_err());
        assert!(Decision::parse("APPROVED").is_err());
    }

    #[test]
    fn test_create_validates_dates_and_type() {
        let ok = CreateLeaveRequest {
            leave_type: "vacation".to_string(),
            start_date: date("2024-07-01"),
            end_date: date("2024-07-01"),
            reason: Some("  ".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.leave_type, LeaveType::Vacation);
        assert_eq!(ok.reason, None);

        let reversed = CreateLeaveRequest {
            leave_type: "sick".to_string(),
            start_date: date("2024-07-05"),
            end_date: date("2024-07-01"),
            reason: None,
        };
        assert!(matches!(reversed.validate(), Err(AppError::Validation(_))));

        let unknown = CreateLeaveRequest {
            leave_type: "sabbatical".to_string(),
            start_date: date("2024-07-01"),
            end_date: date("2024-07-02"),
            reason: None,
        };
        assert!(unknown.validate().is_err());
    }
}
