use std::sync::Arc;

use rand::thread_rng;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::domain::{Difficulty, Theme};
use crate::repositories::ThemeStore;
use crate::services::model_service::QuizGenerator;
use crate::services::payload_service::PayloadService;
use crate::session::{calculate_score, AnswerRecord, SessionState};

/// Top-level application phase. `Error` runs parallel to the main
/// Idle -> Loading -> InProgress -> Finished track and is reachable only
/// from `Loading`.
#[derive(Clone, Debug)]
pub enum Phase {
    Idle,
    Loading {
        topic: String,
        difficulty: Difficulty,
    },
    InProgress(SessionState),
    Finished(SessionState),
    Error {
        message: String,
    },
}

/// UI events consumed by [`QuizController::dispatch`]. Topic submission is
/// separate ([`QuizController::submit`]) because it awaits the model call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    SelectDifficulty(Difficulty),
    Answer(String),
    Tick,
    Next,
    Back,
    Restart,
    ToggleTheme,
}

/// Owns the session state and applies guarded transitions. All mutation
/// happens between discrete event deliveries on one logical control thread;
/// the renderer only ever sees the state between transitions.
pub struct QuizController {
    generator: Arc<dyn QuizGenerator>,
    theme_store: Arc<dyn ThemeStore>,
    config: Config,
    phase: Phase,
    theme: Theme,
    selected_difficulty: Difficulty,
    fetch_in_flight: bool,
}

impl QuizController {
    pub fn new(
        generator: Arc<dyn QuizGenerator>,
        theme_store: Arc<dyn ThemeStore>,
        config: Config,
    ) -> Self {
        // Preference is read once at startup; absence means light.
        let theme = theme_store.load().unwrap_or_default();

        Self {
            generator,
            theme_store,
            config,
            phase: Phase::Idle,
            theme,
            selected_difficulty: Difficulty::Easy,
            fetch_in_flight: false,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn selected_difficulty(&self) -> Difficulty {
        self.selected_difficulty
    }

    /// Render the current screen. Pure projection of the controller state.
    pub fn view(&self) -> String {
        crate::render::render(&self.phase, self.theme, self.selected_difficulty)
    }

    /// `Idle --submit--> Loading --success/failure--> InProgress/Error`.
    ///
    /// An empty topic blocks submission silently (no screen change), and the
    /// in-flight guard swallows rapid repeated submissions while one request
    /// is outstanding.
    pub async fn submit(&mut self, topic: &str, difficulty: Difficulty) {
        let topic = topic.trim();
        if let Err(err) = Self::validate_topic(topic) {
            log::debug!("Submission blocked: {}", err);
            return;
        }
        if self.fetch_in_flight {
            log::debug!("Ignoring submit while a generation request is in flight");
            return;
        }
        if !matches!(self.phase, Phase::Idle) {
            log::debug!("Ignoring submit outside the Idle phase");
            return;
        }

        self.selected_difficulty = difficulty;
        self.fetch_in_flight = true;
        self.phase = Phase::Loading {
            topic: topic.to_string(),
            difficulty,
        };

        let result = self
            .generator
            .generate(topic, difficulty, self.config.quiz_length)
            .await
            .and_then(|output| {
                let payload =
                    PayloadService::parse_and_validate(&output.text, self.config.quiz_length)?;
                Ok((payload, output.citations))
            });
        self.fetch_in_flight = false;

        match result {
            Ok((payload, citations)) => {
                log::info!(
                    "Quiz ready: {} questions about '{}'",
                    payload.questions.len(),
                    topic
                );
                self.phase = Phase::InProgress(SessionState::new(
                    topic.to_string(),
                    difficulty,
                    payload,
                    citations,
                    self.config.question_seconds,
                    &mut thread_rng(),
                ));
            }
            Err(err) => {
                log::error!("Quiz generation pipeline failed: {}", err);
                self.phase = Phase::Error {
                    message: err.user_message(),
                };
            }
        }
    }

    fn validate_topic(topic: &str) -> Result<(), AppError> {
        if topic.is_empty() {
            return Err(AppError::ValidationError(
                "topic must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply one guarded transition. Events that fail their guard are
    /// silently ignored.
    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::SelectDifficulty(difficulty) => {
                if matches!(self.phase, Phase::Idle) {
                    self.selected_difficulty = difficulty;
                }
            }
            Event::Answer(choice) => self.record_answer(AnswerRecord::Selected(choice)),
            Event::Tick => self.handle_tick(),
            Event::Next => self.advance(),
            Event::Back => self.go_back(),
            Event::Restart => self.restart(),
            Event::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.theme_store.save(self.theme);
            }
        }
    }

    fn record_answer(&mut self, record: AnswerRecord) {
        let Phase::InProgress(session) = &mut self.phase else {
            return;
        };
        if session.current_answer().is_answered() {
            return;
        }

        // Stop before mutating so a late tick cannot double-record.
        session.timer.stop();
        session.answers[session.current_index] = record;
    }

    fn handle_tick(&mut self) {
        let fired = match &mut self.phase {
            Phase::InProgress(session) => session.timer.tick(),
            _ => return,
        };

        if fired {
            log::debug!("Question timer expired; recording timed-out answer");
            self.record_answer(AnswerRecord::TimedOut);
        }
    }

    fn advance(&mut self) {
        let Phase::InProgress(session) = &mut self.phase else {
            return;
        };
        if !session.current_answer().is_answered() {
            return;
        }

        if session.is_last_question() {
            session.timer.stop();
            let mut finished = session.clone();
            finished.score = calculate_score(&finished.questions, &finished.answers);
            log::info!(
                "Quiz finished: {}/{} on '{}'",
                finished.score,
                finished.questions.len(),
                finished.topic
            );
            self.phase = Phase::Finished(finished);
            return;
        }

        session.current_index += 1;
        // Revisited questions are already revealed; only a fresh question
        // gets a fresh countdown.
        if session.current_answer().is_answered() {
            session.timer.stop();
        } else {
            session.timer.start();
        }
    }

    fn go_back(&mut self) {
        let Phase::InProgress(session) = &mut self.phase else {
            return;
        };
        if session.current_index == 0 {
            return;
        }

        session.timer.stop();
        session.current_index -= 1;
    }

    fn restart(&mut self) {
        match self.phase {
            Phase::Finished(_) | Phase::Error { .. } => {
                self.phase = Phase::Idle;
                self.selected_difficulty = Difficulty::Easy;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::QuizPayload;
    use crate::repositories::InMemoryThemeStore;
    use crate::services::model_service::{MockQuizGenerator, ModelOutput};
    use crate::test_utils::fixtures::sample_payload_json;

    fn controller_with(generator: MockQuizGenerator) -> QuizController {
        QuizController::new(
            Arc::new(generator),
            Arc::new(InMemoryThemeStore::new()),
            Config::test_config(),
        )
    }

    fn succeeding_generator() -> MockQuizGenerator {
        let mut generator = MockQuizGenerator::new();
        generator.expect_generate().returning(|_, _, count| {
            Ok(ModelOutput {
                text: sample_payload_json(count),
                citations: Vec::new(),
            })
        });
        generator
    }

    async fn in_progress_controller() -> QuizController {
        let mut controller = controller_with(succeeding_generator());
        controller.submit("rust", Difficulty::Medium).await;
        assert!(matches!(controller.phase(), Phase::InProgress(_)));
        controller
    }

    fn current_correct_answer(controller: &QuizController) -> String {
        match controller.phase() {
            Phase::InProgress(session) => session.current_question().correct_answer.clone(),
            other => panic!("expected InProgress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_topic_blocks_submission_silently() {
        let mut generator = MockQuizGenerator::new();
        generator.expect_generate().never();
        let mut controller = controller_with(generator);

        controller.submit("   ", Difficulty::Easy).await;

        assert!(matches!(controller.phase(), Phase::Idle));
    }

    #[tokio::test]
    async fn generation_failure_reaches_error_phase_with_generic_message() {
        let mut generator = MockQuizGenerator::new();
        generator
            .expect_generate()
            .returning(|topic, _, _| Err(AppError::QuizGenerationFailed(topic.to_string())));
        let mut controller = controller_with(generator);

        controller.submit("rust", Difficulty::Easy).await;

        match controller.phase() {
            Phase::Error { message } => {
                assert!(message.contains("rust"));
                assert!(!message.contains("QUIZ_GENERATION_FAILED"));
            }
            other => panic!("expected Error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_payload_reaches_error_phase() {
        let mut generator = MockQuizGenerator::new();
        generator.expect_generate().returning(|_, _, _| {
            Ok(ModelOutput {
                text: "no json here".to_string(),
                citations: Vec::new(),
            })
        });
        let mut controller = controller_with(generator);

        controller.submit("rust", Difficulty::Easy).await;

        assert!(matches!(controller.phase(), Phase::Error { .. }));
    }

    #[tokio::test]
    async fn answering_stops_timer_and_records_choice() {
        let mut controller = in_progress_controller().await;
        let correct = current_correct_answer(&controller);

        controller.dispatch(Event::Answer(correct.clone()));

        match controller.phase() {
            Phase::InProgress(session) => {
                assert_eq!(session.current_answer(), &AnswerRecord::Selected(correct));
                assert!(!session.timer.is_running());
            }
            other => panic!("expected InProgress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn second_answer_to_same_question_is_ignored() {
        let mut controller = in_progress_controller().await;
        let correct = current_correct_answer(&controller);

        controller.dispatch(Event::Answer(correct.clone()));
        controller.dispatch(Event::Answer("something else".to_string()));

        match controller.phase() {
            Phase::InProgress(session) => {
                assert_eq!(session.current_answer(), &AnswerRecord::Selected(correct));
            }
            other => panic!("expected InProgress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn timeout_records_timed_out_exactly_once() {
        let mut controller = in_progress_controller().await;

        for _ in 0..Config::test_config().question_seconds + 5 {
            controller.dispatch(Event::Tick);
        }

        match controller.phase() {
            Phase::InProgress(session) => {
                assert_eq!(session.current_answer(), &AnswerRecord::TimedOut);
                assert!(!session.timer.is_running());
            }
            other => panic!("expected InProgress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn advance_requires_an_answer() {
        let mut controller = in_progress_controller().await;

        controller.dispatch(Event::Next);

        match controller.phase() {
            Phase::InProgress(session) => assert_eq!(session.current_index, 0),
            other => panic!("expected InProgress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn back_preserves_recorded_answer_and_advance_returns() {
        let mut controller = in_progress_controller().await;
        let first_correct = current_correct_answer(&controller);

        controller.dispatch(Event::Answer(first_correct.clone()));
        controller.dispatch(Event::Next);
        controller.dispatch(Event::Back);

        let view_before = controller.view();
        match controller.phase() {
            Phase::InProgress(session) => {
                assert_eq!(session.current_index, 0);
                assert_eq!(
                    session.current_answer(),
                    &AnswerRecord::Selected(first_correct)
                );
                assert!(!session.timer.is_running());
            }
            other => panic!("expected InProgress, got {:?}", other),
        }

        // Non-mutating navigation is idempotent on the rendered state.
        controller.dispatch(Event::Next);
        controller.dispatch(Event::Back);
        assert_eq!(controller.view(), view_before);
    }

    #[tokio::test]
    async fn back_at_first_question_is_ignored() {
        let mut controller = in_progress_controller().await;

        controller.dispatch(Event::Back);

        match controller.phase() {
            Phase::InProgress(session) => {
                assert_eq!(session.current_index, 0);
                assert!(session.timer.is_running());
            }
            other => panic!("expected InProgress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn answering_all_questions_finishes_with_full_score() {
        let mut controller = in_progress_controller().await;

        for _ in 0..10 {
            let correct = current_correct_answer(&controller);
            controller.dispatch(Event::Answer(correct));
            controller.dispatch(Event::Next);
        }

        match controller.phase() {
            Phase::Finished(session) => {
                assert_eq!(session.score, 10);
                assert!(!session.timer.is_running());
            }
            other => panic!("expected Finished, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn restart_resets_session_and_difficulty_but_not_theme() {
        let mut controller = in_progress_controller().await;
        controller.dispatch(Event::ToggleTheme);
        assert_eq!(controller.theme(), Theme::Dark);

        for _ in 0..10 {
            let correct = current_correct_answer(&controller);
            controller.dispatch(Event::Answer(correct));
            controller.dispatch(Event::Next);
        }
        controller.dispatch(Event::Restart);

        assert!(matches!(controller.phase(), Phase::Idle));
        assert_eq!(controller.selected_difficulty(), Difficulty::Easy);
        assert_eq!(controller.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn theme_toggle_persists_to_store() {
        let store = Arc::new(InMemoryThemeStore::new());
        let mut controller = QuizController::new(
            Arc::new(succeeding_generator()),
            store.clone(),
            Config::test_config(),
        );

        controller.dispatch(Event::ToggleTheme);

        assert_eq!(store.load(), Some(Theme::Dark));
    }

    #[tokio::test]
    async fn startup_reads_stored_theme_once() {
        let store = Arc::new(InMemoryThemeStore::with_theme(Theme::Dark));
        let controller = QuizController::new(
            Arc::new(MockQuizGenerator::new()),
            store,
            Config::test_config(),
        );

        assert_eq!(controller.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn difficulty_selection_only_applies_while_idle() {
        let mut controller = in_progress_controller().await;

        controller.dispatch(Event::SelectDifficulty(Difficulty::Hard));

        assert_eq!(controller.selected_difficulty(), Difficulty::Medium);
    }

    #[tokio::test]
    async fn session_questions_are_a_permutation_of_the_payload() {
        let controller = in_progress_controller().await;
        let expected: QuizPayload = serde_json::from_str(&sample_payload_json(10)).unwrap();

        match controller.phase() {
            Phase::InProgress(session) => {
                let mut before: Vec<&str> =
                    expected.questions.iter().map(|q| q.question.as_str()).collect();
                let mut after: Vec<&str> =
                    session.questions.iter().map(|q| q.question.as_str()).collect();
                before.sort();
                after.sort();
                assert_eq!(before, after);
            }
            other => panic!("expected InProgress, got {:?}", other),
        }
    }
}
