use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::domain::{Difficulty, QuizPayload, QuizQuestion, Resource, SourceCitation};
use crate::timer::QuestionTimer;

/// What the user has done with one question. A distinct `TimedOut` variant
/// (rather than a sentinel string) means a timed-out question can never be
/// scored as correct, even if an option's text happens to read "timed-out".
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AnswerRecord {
    #[default]
    Unanswered,
    Selected(String),
    TimedOut,
}

impl AnswerRecord {
    pub fn is_answered(&self) -> bool {
        !matches!(self, AnswerRecord::Unanswered)
    }
}

/// One quiz run: owned question set (shuffled once at creation), per-question
/// answers, cursor, and the per-question countdown. Created on successful
/// fetch+validate, discarded on restart.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuizQuestion>,
    pub resources: Vec<Resource>,
    pub citations: Vec<SourceCitation>,
    pub answers: Vec<AnswerRecord>,
    pub current_index: usize,
    pub score: usize,
    pub timer: QuestionTimer,
}

impl SessionState {
    pub fn new<R: Rng>(
        topic: String,
        difficulty: Difficulty,
        payload: QuizPayload,
        citations: Vec<SourceCitation>,
        question_seconds: u32,
        rng: &mut R,
    ) -> Self {
        let mut questions = payload.questions;
        // Fisher-Yates via rand: every permutation equally likely.
        questions.shuffle(rng);

        let answers = vec![AnswerRecord::Unanswered; questions.len()];
        let mut timer = QuestionTimer::new(question_seconds);
        timer.start();

        Self {
            topic,
            difficulty,
            questions,
            resources: payload.resources,
            citations,
            answers,
            current_index: 0,
            score: 0,
            timer,
        }
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current_index]
    }

    pub fn current_answer(&self) -> &AnswerRecord {
        &self.answers[self.current_index]
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }
}

/// Count of questions whose recorded answer is exactly the canonical
/// correct-answer string. `TimedOut` and `Unanswered` never count.
pub fn calculate_score(questions: &[QuizQuestion], answers: &[AnswerRecord]) -> usize {
    questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| {
            matches!(answer, AnswerRecord::Selected(choice) if *choice == question.correct_answer)
        })
        .count()
}
