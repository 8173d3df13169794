pub mod quiz;

pub use quiz::{
    Difficulty, QuizPayload, QuizQuestion, Resource, SourceCitation, Theme, OPTIONS_PER_QUESTION,
};
