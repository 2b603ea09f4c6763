pub mod analysis_service;
pub mod content_service;
pub mod session_service;
pub mod shuffle_service;
pub mod timer_service;
pub mod validation_service;

pub use content_service::QuestionBank;
pub use session_service::{
    AdvanceToken, QuizSession, RestoreOutcome, SessionConfig, SessionPhase, ShareSummary,
};
pub use timer_service::{CountdownTimer, TimerState};
