use super::{ApiResult, ImageGenerationService, StoryService};
use crate::image::GeneratedImage;
use crate::models::Prompt;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Story service returning canned responses in rotation.
///
/// Clones share state, so a clone kept by a test observes calls made through
/// the instance that was boxed into an `App`.
#[derive(Clone, Default)]
pub struct MockStoryClient {
    responses: Arc<Mutex<Vec<ApiResult<String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockStoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: ApiResult<String>) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in call order.
    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryService for MockStoryClient {
    async fn generate_story(&self, prompt: &Prompt) -> ApiResult<String> {
        let count = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.as_str().to_string());
            prompts.len()
        };

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(format!("A short story about {}", prompt.as_str().trim()))
        } else {
            responses[(count - 1) % responses.len()].clone()
        }
    }
}

/// Image service returning canned responses in rotation.
#[derive(Clone, Default)]
pub struct MockImageClient {
    responses: Arc<Mutex<Vec<ApiResult<GeneratedImage>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: ApiResult<GeneratedImage>) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// 1x1 white PNG.
    pub fn placeholder_image() -> GeneratedImage {
        let pixel = image::RgbImage::from_pixel(1, 1, image::Rgb([255, 255, 255]));
        let mut bytes = Vec::new();
        pixel
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        GeneratedImage::decode(bytes).unwrap()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, prompt: &Prompt) -> ApiResult<GeneratedImage> {
        let count = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.as_str().to_string());
            prompts.len()
        };

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Self::placeholder_image())
        } else {
            responses[(count - 1) % responses.len()].clone()
        }
    }
}
