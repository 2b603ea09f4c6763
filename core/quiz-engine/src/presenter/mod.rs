use crate::error::PresenterError;
use crate::models::{AnalysisReport, AnswerRecord, ShuffledQuestion};

pub mod terminal;

pub use terminal::TerminalPresenter;

pub type PresentResult = Result<(), PresenterError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        }
    }
}

/// Rendering surface the quiz session drives.
///
/// The session only writes to it and never reads UI state back. Option
/// selection is reported by the host calling `QuizSession::submit_answer`.
/// All strings are plain text; a markup presenter escapes them itself.
pub trait Presenter {
    fn show_question_screen(&mut self) -> PresentResult;
    fn show_result_screen(&mut self) -> PresentResult;
    fn set_question_text(&mut self, text: &str) -> PresentResult;
    fn render_options(&mut self, options: &[String]) -> PresentResult;
    fn update_progress(&mut self, current: usize, total: usize, percent: u32) -> PresentResult;
    fn update_timer(&mut self, seconds: u32) -> PresentResult;
    fn show_time_warning(&mut self, seconds: u32) -> PresentResult;
    fn show_answer_feedback(&mut self, selected: Option<usize>, correct: usize) -> PresentResult;
    fn show_explanation(&mut self, text: &str) -> PresentResult;
    fn update_score(&mut self, score: u32, total: usize, percent: u32) -> PresentResult;
    fn show_performance_analysis(&mut self, report: &AnalysisReport) -> PresentResult;
    fn show_question_review(
        &mut self,
        questions: &[ShuffledQuestion],
        answers: &[AnswerRecord],
    ) -> PresentResult;
    fn update_pause_button(&mut self, paused: bool) -> PresentResult;
    fn show_toast(&mut self, message: &str, kind: ToastKind);
    fn show_error(&mut self, message: &str);
}
