//! Company announcements targeted at roles.

pub mod handlers;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::access::Role;
use crate::errors::AppError;
use crate::models::announcement::AnnouncementRow;
use crate::validation::{one_of, required};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    const CHOICES: [(&'static str, Priority); 3] = [
        ("low", Priority::Low),
        ("normal", Priority::Normal),
        ("high", Priority::High),
    ];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        one_of("priority", value, &Self::CHOICES)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }

    /// Visual weight of the badge shown next to an announcement.
    pub fn tone(self) -> &'static str {
        match self {
            Priority::High => "destructive",
            Priority::Normal => "default",
            Priority::Low => "secondary",
        }
    }
}

/// An announcement as shown to a reader: the row plus its priority badge.
#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementView {
    #[serde(flatten)]
    pub announcement: AnnouncementRow,
    pub badge: String,
    pub badge_tone: &'static str,
}

impl From<AnnouncementRow> for AnnouncementView {
    fn from(announcement: AnnouncementRow) -> Self {
        // Rows are CHECK-constrained; fall back to the default look if not.
        let tone = Priority::parse(&announcement.priority)
            .map(Priority::tone)
            .unwrap_or("default");
        Self {
            badge: announcement.priority.clone(),
            badge_tone: tone,
            announcement,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub priority: Option<String>,
    pub target_roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub target_roles: Vec<Role>,
}

impl CreateAnnouncementRequest {
    pub fn validate(self) -> Result<NewAnnouncement, AppError> {
        let target_roles = match self.target_roles {
            None => Role::ALL.to_vec(),
            Some(names) => {
                let mut roles = Vec::with_capacity(names.len());
                for name in &names {
                    let role = Role::parse(name.trim()).ok_or_else(|| {
                        AppError::Validation(format!("'{name}' is not a role"))
                    })?;
                    if !roles.contains(&role) {
                        roles.push(role);
                    }
                }
                if roles.is_empty() {
                    return Err(AppError::Validation(
                        "target_roles must name at least one role".to_string(),
                    ));
                }
                roles
            }
        };

        Ok(NewAnnouncement {
            title: required("title", &self.title)?,
            content: required("content", &self.content)?,
            priority: match self.priority.as_deref() {
                Some(p) => Priority::parse(p.trim())?,
                None => Priority::Normal,
            },
            target_roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn announcement(priority: &str, targets: Option<&[&str]>) -> AnnouncementRow {
        AnnouncementRow {
            id: Uuid::new_v4(),
            title: "Office closed".to_string(),
            content: "Friday".to_string(),
            priority: priority.to_string(),
            target_roles: targets.map(|t| t.iter().map(|s| s.to_string()).collect()),
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_badge_reflects_priority() {
        let view = AnnouncementView::from(announcement("high", None));
        assert_eq!(view.badge, "high");
        assert_eq!(view.badge_tone, "destructive");

        let json = serde_json::to_value(AnnouncementView::from(announcement("low", None))).unwrap();
        assert_eq!(json["badge"], "low");
        assert_eq!(json["title"], "Office closed");
    }

    #[test]
    fn test_create_defaults_to_normal_for_all_roles() {
        let req: CreateAnnouncementRequest =
            serde_json::from_str(r#"{"title": "Payday", "content": "Moved to the 28th"}"#)
                .unwrap();
        let new = req.validate().unwrap();
        assert_eq!(new.priority, Priority::Normal);
        assert_eq!(new.target_roles, Role::ALL.to_vec());
    }

    #[test]
    fn test_create_rejects_unknown_or_empty_targets() {
        let req: CreateAnnouncementRequest = serde_json::from_str(
            r#"{"title": "t", "content": "c", "target_roles": ["contractor"]}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());

        let req: CreateAnnouncementRequest =
            serde_json::from_str(r#"{"title": "t", "content": "c", "target_roles": []}"#)
                .unwrap();
        assert!(req.validate().is_err());

        let req: CreateAnnouncementRequest =
            serde_json::from_str(r#"{"title": "t", "content": "c", "priority": "urgent"}"#)
                .unwrap();
        assert!(req.validate().is_err());
    }
}
