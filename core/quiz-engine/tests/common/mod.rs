#![allow(dead_code)]

use quiz_engine::error::PresenterError;
use quiz_engine::models::{AnalysisReport, AnswerRecord, Difficulty, Question, ShuffledQuestion};
use quiz_engine::presenter::{PresentResult, Presenter, ToastKind};
use quiz_engine::{ManualClock, MemoryStorage, QuizSession, SessionConfig};

pub const START_MS: i64 = 1_700_000_000_000;

pub type TestSession = QuizSession<RecordingPresenter, MemoryStorage, ManualClock>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Presenter that records every call by name and can be told to fail one of them.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<String>,
    pub question_texts: Vec<String>,
    pub rendered_options: Vec<Vec<String>>,
    pub timer_updates: Vec<u32>,
    pub warnings: Vec<u32>,
    pub toasts: Vec<(String, ToastKind)>,
    pub errors: Vec<String>,
    pub pause_states: Vec<bool>,
    pub fail_on: Option<&'static str>,
}

impl RecordingPresenter {
    pub fn failing_on(call: &'static str) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&mut self, call: &'static str) -> PresentResult {
        self.calls.push(call.to_string());
        if self.fail_on == Some(call) {
            return Err(PresenterError::Render(format!("{} exploded", call)));
        }
        Ok(())
    }
}

impl Presenter for RecordingPresenter {
    fn show_question_screen(&mut self) -> PresentResult {
        self.record("show_question_screen")
    }

    fn show_result_screen(&mut self) -> PresentResult {
        self.record("show_result_screen")
    }

    fn set_question_text(&mut self, text: &str) -> PresentResult {
        self.question_texts.push(text.to_string());
        self.record("set_question_text")
    }

    fn render_options(&mut self, options: &[String]) -> PresentResult {
        self.rendered_options.push(options.to_vec());
        self.record("render_options")
    }

    fn update_progress(&mut self, _current: usize, _total: usize, _percent: u32) -> PresentResult {
        self.record("update_progress")
    }

    fn update_timer(&mut self, seconds: u32) -> PresentResult {
        self.timer_updates.push(seconds);
        self.record("update_timer")
    }

    fn show_time_warning(&mut self, seconds: u32) -> PresentResult {
        self.warnings.push(seconds);
        self.record("show_time_warning")
    }

    fn show_answer_feedback(&mut self, _selected: Option<usize>, _correct: usize) -> PresentResult {
        self.record("show_answer_feedback")
    }

    fn show_explanation(&mut self, _text: &str) -> PresentResult {
        self.record("show_explanation")
    }

    fn update_score(&mut self, _score: u32, _total: usize, _percent: u32) -> PresentResult {
        self.record("update_score")
    }

    fn show_performance_analysis(&mut self, _report: &AnalysisReport) -> PresentResult {
        self.record("show_performance_analysis")
    }

    fn show_question_review(
        &mut self,
        _questions: &[ShuffledQuestion],
        _answers: &[AnswerRecord],
    ) -> PresentResult {
        self.record("show_question_review")
    }

    fn update_pause_button(&mut self, paused: bool) -> PresentResult {
        self.pause_states.push(paused);
        self.record("update_pause_button")
    }

    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.calls.push("show_toast".to_string());
        self.toasts.push((message.to_string(), kind));
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push("show_error".to_string());
        self.errors.push(message.to_string());
    }
}

pub fn question(i: usize) -> Question {
    Question {
        id: format!("q-{}", i),
        text: format!("Question {}?", i),
        options: (0..4).map(|o| format!("option {}-{}", i, o)).collect(),
        correct_option_index: i % 4,
        explanation: Some(format!("Because {}", i)),
        category: if i % 2 == 0 { "even" } else { "odd" }.to_string(),
        difficulty: Difficulty::Easy,
    }
}

pub fn questions(n: usize) -> Vec<Question> {
    (0..n).map(question).collect()
}

pub fn test_config() -> SessionConfig {
    let mut config = SessionConfig::new("js", Difficulty::Easy);
    config.seed = Some(42);
    config
}

pub fn new_session(n: usize) -> (TestSession, ManualClock) {
    new_session_with(questions(n), test_config(), RecordingPresenter::default())
}

pub fn new_session_with(
    questions: Vec<Question>,
    config: SessionConfig,
    presenter: RecordingPresenter,
) -> (TestSession, ManualClock) {
    let clock = ManualClock::new(START_MS);
    let session = QuizSession::new(
        questions,
        config,
        presenter,
        MemoryStorage::new(),
        clock.clone(),
    )
    .expect("session");
    (session, clock)
}

/// A session built over an existing storage, as after a page reload.
pub fn reloaded_session(storage: MemoryStorage, clock: &ManualClock) -> TestSession {
    QuizSession::new(
        questions(5),
        test_config(),
        RecordingPresenter::default(),
        storage,
        clock.clone(),
    )
    .expect("session")
}

pub fn correct_answer(session: &TestSession) -> usize {
    session
        .current_question()
        .expect("current question")
        .correct_option_index
}

pub fn wrong_answer(session: &TestSession) -> usize {
    (correct_answer(session) + 1) % 4
}

/// Lets one second of wall time pass and delivers the timer interrupt.
pub fn tick(session: &mut TestSession, clock: &ManualClock) {
    clock.advance_secs(1);
    session.on_interval();
}

/// Advances past the feedback window and fires the pending advance.
pub fn advance(session: &mut TestSession, clock: &ManualClock) -> bool {
    clock.advance_ms(2_000);
    session.poll()
}
