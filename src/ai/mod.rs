//! Remote generation services
//!
//! Story text comes from an OpenRouter chat-completion endpoint; images come
//! from an ImageRouter OpenAI-compatible image endpoint. Both sit behind traits
//! so the orchestrator can be driven by mocks.

pub mod client;
pub mod imagerouter;
pub mod mock;
pub mod openrouter;

pub use client::BearerHttpClient;
pub use imagerouter::ImageRouterClient;
pub use mock::{MockImageClient, MockStoryClient};
pub use openrouter::OpenRouterStoryClient;

use crate::error::ApiError;
use crate::image::GeneratedImage;
use crate::models::Prompt;
use async_trait::async_trait;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[async_trait]
pub trait StoryService: Send + Sync {
    /// Generate a short story for the prompt, trimmed of surrounding whitespace.
    async fn generate_story(&self, prompt: &Prompt) -> ApiResult<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate an illustration for the prompt and return it decoded.
    async fn generate_image(&self, prompt: &Prompt) -> ApiResult<GeneratedImage>;
}
