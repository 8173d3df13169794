use secrecy::SecretString;
use std::env;

pub const DEFAULT_QUIZ_LENGTH: usize = 10;
pub const DEFAULT_QUESTION_SECONDS: u32 = 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_model: String,
    pub quiz_length: usize,
    pub question_seconds: u32,
}

impl Config {
    pub fn from_env() -> Self {
        // Missing .env is fine in deployed environments.
        dotenvy::dotenv().ok();

        Self {
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_else(|_| "dev_api_key".to_string()),
            ),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            quiz_length: env::var("QUIZ_LENGTH")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_QUIZ_LENGTH),
            question_seconds: env::var("QUESTION_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_QUESTION_SECONDS),
        }
    }

    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("test_api_key".to_string()),
            openai_model: "gpt-4o-mini".to_string(),
            quiz_length: DEFAULT_QUIZ_LENGTH,
            question_seconds: DEFAULT_QUESTION_SECONDS,
        }
    }
}
