//! OpenRouter chat-completion client for the story step.

use super::client::BearerHttpClient;
use super::{ApiResult, StoryService};
use crate::error::ApiError;
use crate::models::{ApiKey, Prompt, DEFAULT_TEXT_API_BASE_URL};
use crate::prompts;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct OpenRouterStoryClient {
    http: BearerHttpClient,
    model: String,
}

impl OpenRouterStoryClient {
    pub fn new(api_key: ApiKey, model: String) -> Self {
        Self::new_with_client(
            api_key,
            model,
            DEFAULT_TEXT_API_BASE_URL.to_string(),
            reqwest::Client::new(),
        )
    }

    pub fn new_with_client(
        api_key: ApiKey,
        model: String,
        base_url: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: BearerHttpClient::new_with_client(api_key, base_url, client, "OpenRouter"),
            model,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl StoryService for OpenRouterStoryClient {
    async fn generate_story(&self, prompt: &Prompt) -> ApiResult<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(prompts::STORY_SYSTEM.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(prompts::story_request(prompt.as_str())),
                },
            ],
        };

        let response: ChatCompletionResponse =
            self.http.post(CHAT_COMPLETIONS_PATH, &request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                ApiError::MalformedResponse("no story content in OpenRouter response".to_string())
            })
    }
}
