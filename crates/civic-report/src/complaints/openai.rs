//! OpenAI-style chat-completion client for the scoring collaborator.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::scoring::{CompletionClient, CompletionError};
use crate::config::ScoringConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Completion client speaking the OpenAI chat-completions wire format.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiChatClient {
    /// Build a client from the scoring configuration.
    ///
    /// A missing key becomes an empty bearer token: the collaborator rejects
    /// every call and the scorer falls back, keeping intake available.
    pub fn from_config(config: &ScoringConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| CompletionError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiChatClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| CompletionError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::MalformedReply(err.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                CompletionError::MalformedReply("no message content in reply".to_string())
            })
    }
}
