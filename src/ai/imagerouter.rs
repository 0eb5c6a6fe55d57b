//! ImageRouter client for the image step.
//!
//! The generation endpoint answers with metadata; the image itself is either
//! inlined as base64 or, more commonly, published at a URL that has to be
//! fetched with a second request.

use super::client::BearerHttpClient;
use super::{ApiResult, ImageGenerationService};
use crate::error::ApiError;
use crate::image::GeneratedImage;
use crate::models::{ApiKey, Prompt, DEFAULT_IMAGE_API_BASE_URL};
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

const IMAGE_GENERATIONS_PATH: &str = "/v1/openai/images/generations";

#[derive(Debug, Serialize)]
struct ImageGenerationRequest {
    prompt: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
    b64_json: Option<String>,
}

pub struct ImageRouterClient {
    http: BearerHttpClient,
    model: String,
}

impl ImageRouterClient {
    pub fn new(api_key: ApiKey, model: String) -> Self {
        Self::new_with_client(
            api_key,
            model,
            DEFAULT_IMAGE_API_BASE_URL.to_string(),
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
            http: BearerHttpClient::new_with_client(api_key, base_url, client, "ImageRouter"),
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
impl ImageGenerationService for ImageRouterClient {
    async fn generate_image(&self, prompt: &Prompt) -> ApiResult<GeneratedImage> {
        let request = ImageGenerationRequest {
            prompt: prompt.as_str().to_string(),
            model: self.model.clone(),
        };

        let response: ImageGenerationResponse =
            self.http.post(IMAGE_GENERATIONS_PATH, &request).await?;

        let image_data = response.data.into_iter().next().ok_or_else(|| {
            ApiError::MalformedResponse("no image data in ImageRouter response".to_string())
        })?;

        let bytes = if let Some(url) = image_data.url {
            tracing::debug!("Fetching generated image from {}", url);
            self.http.get_bytes(&url).await?
        } else if let Some(b64_json) = image_data.b64_json {
            base64::engine::general_purpose::STANDARD
                .decode(b64_json)
                .map_err(|e| {
                    ApiError::MalformedResponse(format!("invalid base64 image data: {}", e))
                })?
        } else {
            return Err(ApiError::MalformedResponse(
                "image entry has neither url nor b64_json".to_string(),
            ));
        };

        let image = GeneratedImage::decode(bytes)
            .map_err(|e| ApiError::UndecodableImage(e.to_string()))?;

        tracing::info!(
            "Generated image: {}x{} {} ({} bytes)",
            image.width(),
            image.height(),
            image.mime_type(),
            image.bytes().len()
        );

        Ok(image)
    }
}
