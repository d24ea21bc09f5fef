/// LLM client: the single point of entry for all AI gateway calls in the HRMS.
///
/// ARCHITECTURAL RULE: No other module may call the AI gateway directly.
/// All model interactions go through the `ChatModel` trait implemented here.
///
/// Calls are single-attempt: a failed call is reported to the caller, who may retry
/// manually. Nothing is retried or queued here.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// The model used for all AI calls. Hardcoded to keep every analysis comparable.
pub const MODEL: &str = "google/gemini-2.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the model produced any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GatewayError {
    error: GatewayErrorBody,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    message: String,
}

/// A chat-completion backend. `LlmClient` is the production implementation;
/// tests substitute canned replies.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends one conversation and returns the reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

/// HTTP client for an OpenAI-compatible chat-completions gateway.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(endpoint: String, api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            endpoint,
            api_key,
        })
    }

    /// Makes one raw call to the gateway, returning the full response object.
    pub async fn call(&self, messages: &[ChatMessage]) -> Result<ChatCompletionResponse, LlmError> {
        let request_body = ChatCompletionRequest {
            model: MODEL,
            messages,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GatewayError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "AI call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let completion = self.call(messages).await?;
        completion
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Calls the model and deserializes its reply as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn complete_json<T: DeserializeOwned>(
    model: &dyn ChatModel,
    system: &str,
    prompt: &str,
) -> Result<T, LlmError> {
    let messages = [ChatMessage::system(system), ChatMessage::user(prompt)];
    let text = model.complete(&messages).await?;

    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(&text);

    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Replays one canned reply and remembers what it was asked.
    pub struct CannedModel {
        reply: Mutex<Option<Result<String, LlmError>>>,
        pub seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl CannedModel {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Mutex::new(Some(Ok(text.to_string()))),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                reply: Mutex::new(Some(Err(LlmError::Api {
                    status,
                    message: "gateway unavailable".to_string(),
                }))),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatModel for CannedModel {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CannedModel;
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Shape {
        key: String,
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_response_text_skips_blank_content() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "   "}}], "usage": null}"#,
        )
        .unwrap();
        assert_eq!(response.text(), None);

        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "hi"}}]}"#).unwrap();
        assert_eq!(response.text(), Some("hi"));
    }

    #[test]
    fn test_request_serializes_lowercase_roles() {
        let messages = [ChatMessage::system("s"), ChatMessage::user("u")];
        let body = serde_json::to_value(ChatCompletionRequest {
            model: MODEL,
            messages: &messages,
        })
        .unwrap();
        assert_eq!(body["model"], MODEL);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
    }

    #[tokio::test]
    async fn test_complete_json_parses_fenced_reply() {
        let model = CannedModel::replying("```json\n{\"key\": \"value\"}\n```");
        let shape: Shape = complete_json(&model, "system", "prompt").await.unwrap();
        assert_eq!(shape.key, "value");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_complete_json_rejects_prose() {
        let model = CannedModel::replying("Sure! Here is your analysis.");
        let result = complete_json::<Shape>(&model, "system", "prompt").await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_complete_json_makes_a_single_attempt_on_failure() {
        let model = CannedModel::failing(503);
        let result = complete_json::<Shape>(&model, "system", "prompt").await;
        assert!(matches!(result, Err(LlmError::Api { status: 503, .. })));
        assert_eq!(model.calls(), 1);
    }
}
