//! Generation orchestration: one prompt in, a story and an illustration out.

use crate::ai::{ImageGenerationService, ImageRouterClient, OpenRouterStoryClient, StoryService};
use crate::models::{Config, Generation, GenerationReport, ImageResult, Prompt, StoryResult};
use crate::Result;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Sequences the story and image steps and reconciles their outcomes.
pub struct App {
    story: Box<dyn StoryService>,
    image_gen: Box<dyn ImageGenerationService>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub story: Box<dyn StoryService>,
    pub image_gen: Box<dyn ImageGenerationService>,
}

impl App {
    pub fn with_services(services: AppServices) -> Self {
        Self {
            story: services.story,
            image_gen: services.image_gen,
        }
    }

    /// Build the OpenRouter and ImageRouter clients from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        // Both clients share one connection pool.
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        info!("Story provider: OpenRouter (model: {})", config.story_model);
        let story = OpenRouterStoryClient::new_with_client(
            config.credentials.text_api_key.clone(),
            config.story_model.clone(),
            config.text_api_base_url.clone(),
            http_client.clone(),
        );

        info!("Image provider: ImageRouter (model: {})", config.image_model);
        let image_gen = ImageRouterClient::new_with_client(
            config.credentials.image_api_key.clone(),
            config.image_model.clone(),
            config.image_api_base_url.clone(),
            http_client,
        );

        Ok(Self::with_services(AppServices {
            story: Box::new(story),
            image_gen: Box::new(image_gen),
        }))
    }

    /// Handle one "Generate" trigger.
    ///
    /// Blank input is rejected without any remote call. Otherwise the story
    /// step runs first and the image step runs after it settles, whatever its
    /// outcome. Neither failure aborts the other.
    pub async fn generate(&self, input: &str) -> Generation {
        let Some(prompt) = Prompt::parse(input) else {
            warn!("Rejected blank prompt");
            return Generation::Rejected;
        };

        let id = Uuid::new_v4();
        let span = info_span!("generation", %id);

        async move {
            info!("Generating story and image ({} chars of prompt)", prompt.as_str().len());

            let story = self.generate_story(&prompt).await;
            let image = self.generate_image(&prompt).await;

            info!(
                story_ok = story.is_success(),
                image_ok = image.image().is_some(),
                "Generation finished"
            );

            Generation::Completed(GenerationReport {
                id,
                prompt,
                story,
                image,
            })
        }
        .instrument(span)
        .await
    }

    /// Story step. Failures are kept as the displayed result, not raised.
    pub async fn generate_story(&self, prompt: &Prompt) -> StoryResult {
        let result = self.story.generate_story(prompt).await;
        match &result {
            Ok(story) => info!("Generated story ({} chars)", story.len()),
            Err(e) => error!("Story generation failed: {}", e),
        }
        result.into()
    }

    /// Image step. Failures degrade to a warning.
    pub async fn generate_image(&self, prompt: &Prompt) -> ImageResult {
        let result = self.image_gen.generate_image(prompt).await;
        if let Err(e) = &result {
            warn!("Image generation failed: {}", e);
        }
        result.into()
    }
}

/// Where a [`Session`] is in its current interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Generating,
    Done,
}

/// One user's sequence of "Generate" triggers against an [`App`].
pub struct Session<'a> {
    app: &'a App,
    state: GenerationState,
    last: Option<Generation>,
}

impl<'a> Session<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            app,
            state: GenerationState::Idle,
            last: None,
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Outcome of the most recent trigger.
    pub fn last(&self) -> Option<&Generation> {
        self.last.as_ref()
    }

    pub async fn trigger(&mut self, input: &str) -> &Generation {
        let generation = if Prompt::parse(input).is_some() {
            self.state = GenerationState::Generating;
            let generation = self.app.generate(input).await;
            self.state = GenerationState::Done;
            generation
        } else {
            self.state = GenerationState::Idle;
            Generation::Rejected
        };

        self.last.insert(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockImageClient, MockStoryClient};
    use crate::error::ApiError;

    fn build_test_app(story: MockStoryClient, image_gen: MockImageClient) -> App {
        App::with_services(AppServices {
            story: Box::new(story),
            image_gen: Box::new(image_gen),
        })
    }

    fn completed(generation: Generation) -> GenerationReport {
        match generation {
            Generation::Completed(report) => report,
            Generation::Rejected => panic!("expected a completed generation"),
        }
    }

    #[tokio::test]
    async fn test_blank_prompt_makes_no_calls() {
        let story = MockStoryClient::new();
        let image_gen = MockImageClient::new();
        let app = build_test_app(story.clone(), image_gen.clone());

        for input in ["", "   ", "\n\t"] {
            assert!(matches!(app.generate(input).await, Generation::Rejected));
        }

        assert_eq!(story.get_call_count(), 0);
        assert_eq!(image_gen.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_both_steps_receive_prompt_as_entered() {
        let story = MockStoryClient::new().with_response(Ok("A tale".to_string()));
        let image_gen = MockImageClient::new();
        let app = build_test_app(story.clone(), image_gen.clone());

        let report = completed(app.generate("  a whale in space ").await);

        assert_eq!(report.story, StoryResult::Story("A tale".to_string()));
        assert!(report.image.image().is_some());
        assert_eq!(story.get_prompts(), vec!["  a whale in space ".to_string()]);
        assert_eq!(image_gen.get_prompts(), vec!["  a whale in space ".to_string()]);
    }

    #[tokio::test]
    async fn test_story_failure_still_runs_image_step() {
        let story = MockStoryClient::new().with_response(Err(ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        }));
        let image_gen = MockImageClient::new();
        let app = build_test_app(story, image_gen.clone());

        let report = completed(app.generate("a storm").await);

        assert_eq!(report.story.display_text(), "Error: 500 - boom");
        assert!(report.image.image().is_some());
        assert_eq!(image_gen.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_image_failure_keeps_story() {
        let story = MockStoryClient::new().with_response(Ok("Kept".to_string()));
        let image_gen = MockImageClient::new().with_response(Err(ApiError::Status {
            status: 429,
            body: "slow down".to_string(),
        }));
        let app = build_test_app(story, image_gen);

        let report = completed(app.generate("a storm").await);

        assert_eq!(report.story, StoryResult::Story("Kept".to_string()));
        match report.image {
            ImageResult::Unavailable(err) => assert_eq!(err.status(), Some(429)),
            ImageResult::Generated(_) => panic!("image should be unavailable"),
        }
    }

    #[tokio::test]
    async fn test_repeated_prompt_is_not_cached() {
        let story = MockStoryClient::new();
        let image_gen = MockImageClient::new();
        let app = build_test_app(story.clone(), image_gen.clone());

        let first = completed(app.generate("same prompt").await);
        let second = completed(app.generate("same prompt").await);

        assert_ne!(first.id, second.id);
        assert_eq!(story.get_call_count(), 2);
        assert_eq!(image_gen.get_call_count(), 2);
    }

    #[tokio::test]
    async fn test_session_state_transitions() {
        let app = build_test_app(MockStoryClient::new(), MockImageClient::new());
        let mut session = Session::new(&app);
        assert_eq!(session.state(), GenerationState::Idle);
        assert!(session.last().is_none());

        let outcome = session.trigger("   ").await;
        assert!(matches!(outcome, Generation::Rejected));
        assert_eq!(session.state(), GenerationState::Idle);

        let outcome = session.trigger("a castle").await;
        assert!(matches!(outcome, Generation::Completed(_)));
        assert_eq!(session.state(), GenerationState::Done);

        session.trigger("another castle").await;
        assert_eq!(session.state(), GenerationState::Done);
        assert!(matches!(session.last(), Some(Generation::Completed(_))));
    }
}
