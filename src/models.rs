//! Data models and configuration
//!
//! Defines the prompt, the per-invocation results of the story and image steps,
//! and the process configuration loaded from the environment.

use crate::error::ApiError;
use crate::image::GeneratedImage;
use crate::{Error, Result};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_STORY_MODEL: &str = "deepseek/deepseek-r1-0528-qwen3-8b:free";
pub const DEFAULT_IMAGE_MODEL: &str = "google/gemini-2.0-flash-exp:free";
pub const DEFAULT_TEXT_API_BASE_URL: &str = "https://openrouter.ai/api";
pub const DEFAULT_IMAGE_API_BASE_URL: &str = "https://api.imagerouter.io";

/// User-supplied seed for both generation calls.
///
/// Holds the text exactly as entered; only construction checks that it is not
/// blank after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Returns `None` when the input is empty or whitespace-only.
    pub fn parse(input: impl Into<String>) -> Option<Self> {
        let input = input.into();
        if input.trim().is_empty() {
            None
        } else {
            Some(Self(input))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque bearer token. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Bearer tokens for the two remote services.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub text_api_key: ApiKey,
    pub image_api_key: ApiKey,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub story_model: String,
    pub image_model: String,
    pub text_api_base_url: String,
    pub image_api_base_url: String,
    /// `None` leaves the transport's default in place.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{} not set", key)))
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!(
                        "REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            credentials: Credentials {
                text_api_key: ApiKey::new(required("TEXT_API_KEY")?),
                image_api_key: ApiKey::new(required("IMAGE_API_KEY")?),
            },
            story_model: lookup("STORY_MODEL").unwrap_or_else(|| DEFAULT_STORY_MODEL.to_string()),
            image_model: lookup("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            text_api_base_url: lookup("TEXT_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TEXT_API_BASE_URL.to_string()),
            image_api_base_url: lookup("IMAGE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IMAGE_API_BASE_URL.to_string()),
            request_timeout,
        })
    }
}

/// Outcome of the story step.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryResult {
    Story(String),
    Failed(ApiError),
}

impl StoryResult {
    /// Text shown in the story slot: the story itself or the error descriptor.
    pub fn display_text(&self) -> String {
        match self {
            StoryResult::Story(text) => text.clone(),
            StoryResult::Failed(err) => format!("Error: {}", err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StoryResult::Story(_))
    }
}

impl From<std::result::Result<String, ApiError>> for StoryResult {
    fn from(result: std::result::Result<String, ApiError>) -> Self {
        match result {
            Ok(story) => StoryResult::Story(story),
            Err(err) => StoryResult::Failed(err),
        }
    }
}

/// Outcome of the image step. Failure is non-fatal.
#[derive(Debug, Clone)]
pub enum ImageResult {
    Generated(GeneratedImage),
    Unavailable(ApiError),
}

impl ImageResult {
    pub fn image(&self) -> Option<&GeneratedImage> {
        match self {
            ImageResult::Generated(image) => Some(image),
            ImageResult::Unavailable(_) => None,
        }
    }
}

impl From<std::result::Result<GeneratedImage, ApiError>> for ImageResult {
    fn from(result: std::result::Result<GeneratedImage, ApiError>) -> Self {
        match result {
            Ok(image) => ImageResult::Generated(image),
            Err(err) => ImageResult::Unavailable(err),
        }
    }
}

/// Everything one valid "Generate" trigger produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub id: Uuid,
    pub prompt: Prompt,
    pub story: StoryResult,
    pub image: ImageResult,
}

#[derive(Debug, Clone)]
pub enum Generation {
    /// Blank input; no remote call was made.
    Rejected,
    Completed(GenerationReport),
}
