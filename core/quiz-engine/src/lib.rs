pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod presenter;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::AppConfig;
pub use error::{BankError, PresenterError, QuizError, StorageError};
pub use presenter::{Presenter, TerminalPresenter, ToastKind};
pub use services::{QuestionBank, QuizSession, RestoreOutcome, SessionConfig, SessionPhase};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use utils::time::{Clock, ManualClock, SystemClock};
