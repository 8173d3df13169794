use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Quiz generation failed for topic '{0}'")]
    QuizGenerationFailed(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AppError::QuizGenerationFailed(_) => "QUIZ_GENERATION_FAILED",
        }
    }

    /// Single user-facing sentence for the error screen. Raw parser and
    /// client errors stay in the logs and never reach rendered markup.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Please enter a topic to start the quiz.".to_string(),
            AppError::MalformedResponse(_) => {
                "We couldn't build a quiz from the response. Please try again.".to_string()
            }
            AppError::QuizGenerationFailed(topic) => format!(
                "Something went wrong while generating a quiz about \"{}\". Please try again.",
                topic
            ),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(format!("JSON deserialization error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
