use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{QuizPayload, OPTIONS_PER_QUESTION};

const REQUIRED_QUESTION_KEYS: [&str; 4] = ["question", "options", "correctAnswer", "explanation"];

/// Turns raw model output into a validated [`QuizPayload`].
///
/// The model is asked for bare JSON but routinely wraps it in prose or
/// markdown fences, so extraction is positional: everything between the
/// first `{` and the last `}` is treated as the payload.
pub struct PayloadService;

impl PayloadService {
    /// Extract, parse, and validate one payload from free-form model text.
    /// `expected_questions` is the configured quiz length; payloads of any
    /// other size are rejected.
    pub fn parse_and_validate(raw: &str, expected_questions: usize) -> AppResult<QuizPayload> {
        let json_slice = Self::extract_json_object(raw)?;

        let value: Value = serde_json::from_str(json_slice)
            .map_err(|_| AppError::MalformedResponse("invalid JSON".to_string()))?;

        Self::check_representative_shape(&value)?;

        let mut value = value;
        Self::normalize_resources(&mut value);

        let payload: QuizPayload = serde_json::from_value(value)?;

        if payload.questions.len() != expected_questions {
            return Err(AppError::MalformedResponse(format!(
                "expected {} questions, got {}",
                expected_questions,
                payload.questions.len()
            )));
        }

        Self::check_question_invariants(&payload)?;

        Ok(payload)
    }

    fn extract_json_object(raw: &str) -> AppResult<&str> {
        let start = raw.find('{');
        let end = raw.rfind('}');

        match (start, end) {
            (Some(start), Some(end)) if start < end => Ok(&raw[start..=end]),
            _ => Err(AppError::MalformedResponse(
                "no JSON object found".to_string(),
            )),
        }
    }

    /// Lightweight guard over the raw JSON: `questions` must be a non-empty
    /// array and its first element must carry all four keys with `options`
    /// an array. A representative-sample check, not an exhaustive one; the
    /// typed invariant pass below covers the rest.
    fn check_representative_shape(value: &Value) -> AppResult<()> {
        let questions = value
            .get("questions")
            .and_then(Value::as_array)
            .filter(|qs| !qs.is_empty())
            .ok_or_else(|| {
                AppError::MalformedResponse("questions is missing or empty".to_string())
            })?;

        let first = &questions[0];
        for key in REQUIRED_QUESTION_KEYS {
            if first.get(key).is_none() {
                return Err(AppError::MalformedResponse(format!(
                    "question is missing required key '{}'",
                    key
                )));
            }
        }
        if !first["options"].is_array() {
            return Err(AppError::MalformedResponse(
                "question options is not an array".to_string(),
            ));
        }

        Ok(())
    }

    /// Missing or malformed `resources` is non-fatal: substitute an empty
    /// array and proceed.
    fn normalize_resources(value: &mut Value) {
        let resources_ok = value.get("resources").is_some_and(Value::is_array);
        if !resources_ok {
            if let Some(object) = value.as_object_mut() {
                object.insert("resources".to_string(), Value::Array(Vec::new()));
            }
        }
    }

    fn check_question_invariants(payload: &QuizPayload) -> AppResult<()> {
        for (index, question) in payload.questions.iter().enumerate() {
            if question.options.len() != OPTIONS_PER_QUESTION {
                return Err(AppError::MalformedResponse(format!(
                    "question {} has {} options, expected {}",
                    index,
                    question.options.len(),
                    OPTIONS_PER_QUESTION
                )));
            }

            let mut unique = question.options.clone();
            unique.sort_unstable();
            unique.dedup();
            if unique.len() != question.options.len() {
                return Err(AppError::MalformedResponse(format!(
                    "question {} has duplicate options",
                    index
                )));
            }

            if !question.options.contains(&question.correct_answer) {
                return Err(AppError::MalformedResponse(format!(
                    "question {} correctAnswer is not one of its options",
                    index
                )));
            }
        }

        Ok(())
    }
}
