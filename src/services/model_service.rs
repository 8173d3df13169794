use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::config::Config;
use crate::constants::prompts::{build_quiz_prompt, QUIZ_SYSTEM_PROMPT};
use crate::errors::{AppError, AppResult};
use crate::models::domain::{Difficulty, SourceCitation};

/// Raw result of one generation call: free-form text expected to contain a
/// single JSON object, plus whatever grounding metadata the backend exposes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelOutput {
    pub text: String,
    pub citations: Vec<SourceCitation>,
}

/// The one external collaborator: a single request for quiz JSON.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
        question_count: usize,
    ) -> AppResult<ModelOutput>;
}

pub struct OpenAiModelService {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiModelService {
    pub fn new(config: &Config) -> Self {
        let openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait]
impl QuizGenerator for OpenAiModelService {
    async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
        question_count: usize,
    ) -> AppResult<ModelOutput> {
        log::info!(
            "Requesting {} {} questions about '{}' from model {}",
            question_count,
            difficulty,
            topic,
            self.model
        );

        let failed = |err: &dyn std::fmt::Display| {
            log::error!("Quiz generation call failed for '{}': {}", topic, err);
            AppError::QuizGenerationFailed(topic.to_string())
        };

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(QUIZ_SYSTEM_PROMPT)
                    .build()
                    .map_err(|e| failed(&e))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(build_quiz_prompt(topic, difficulty, question_count))
                    .build()
                    .map_err(|e| failed(&e))?
                    .into(),
            ])
            .build()
            .map_err(|e| failed(&e))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| failed(&e))?;

        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| failed(&"model returned no choices"))?;

        // Chat completions carry no grounding metadata; backends that do can
        // populate citations through their own QuizGenerator impl.
        Ok(ModelOutput {
            text,
            citations: Vec::new(),
        })
    }
}
