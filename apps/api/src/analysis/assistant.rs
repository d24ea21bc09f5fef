//! The role-aware chat assistant. Unlike the other AI functions its reply
//! is free text.

use serde::{Deserialize, Serialize};

use super::prompts::{
    ADMIN_ASSISTANT_SYSTEM, CAREER_COACH_SYSTEM, GENERAL_ASSISTANT_SYSTEM,
    RECRUITMENT_ASSISTANT_SYSTEM,
};
use crate::access::Role;
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, ChatModel, ChatRole};
use crate::validation::one_of;

/// Who the assistant presents itself as to each role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub title: &'static str,
    pub greeting: &'static str,
    #[serde(skip)]
    pub system: &'static str,
}

pub fn persona(role: Option<Role>) -> Persona {
    match role {
        Some(Role::Admin) => Persona {
            title: "Admin Assistant AI",
            greeting: "Hello! I'm your Admin Assistant. I can help you with analytics, \
                system management, and administrative tasks.",
            system: ADMIN_ASSISTANT_SYSTEM,
        },
        Some(Role::Hr) => Persona {
            title: "Recruitment AI Assistant",
            greeting: "Hello! I'm your Recruitment AI Assistant. I can help with resume \
                analysis, candidate evaluation, and hiring insights.",
            system: RECRUITMENT_ASSISTANT_SYSTEM,
        },
        Some(Role::Employee) => Persona {
            title: "Career Coach AI",
            greeting: "Hello! I'm your Career Coach. I can help with career development, \
                skill growth, and performance improvement advice.",
            system: CAREER_COACH_SYSTEM,
        },
        Some(Role::Manager) | None => Persona {
            title: "AI Assistant",
            greeting: "Hello! How can I assist you today?",
            system: GENERAL_ASSISTANT_SYSTEM,
        },
    }
}

const CLIENT_ROLES: &[(&str, ChatRole)] =
    &[("user", ChatRole::User), ("assistant", ChatRole::Assistant)];

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<IncomingMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatRequest {
    /// The conversation as sent by the browser. Clients may not supply
    /// their own system turns.
    pub fn validate(self) -> Result<Vec<ChatMessage>, AppError> {
        if self.messages.is_empty() {
            return Err(AppError::Validation("messages must not be empty".to_string()));
        }
        self.messages
            .into_iter()
            .map(|m| {
                let role = one_of("role", m.role.trim(), CLIENT_ROLES)?;
                if m.content.trim().is_empty() {
                    return Err(AppError::Validation(
                        "message content must not be empty".to_string(),
                    ));
                }
                Ok(ChatMessage {
                    role,
                    content: m.content,
                })
            })
            .collect()
    }
}

pub async fn reply(
    model: &dyn ChatModel,
    role: Option<Role>,
    conversation: Vec<ChatMessage>,
) -> Result<ChatResponse, AppError> {
    let mut messages = Vec::with_capacity(conversation.len() + 1);
    messages.push(ChatMessage::system(persona(role).system));
    messages.extend(conversation);

    let text = model.complete(&messages).await?;
    let response = text.trim().to_string();
    if response.is_empty() {
        return Err(AppError::AiMalformedReply("assistant reply is empty".to_string()));
    }
    Ok(ChatResponse { response })
}
