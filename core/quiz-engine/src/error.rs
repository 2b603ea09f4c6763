use thiserror::Error;

/// Errors that stop a quiz session from being created at all.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("cannot start a quiz without questions")]
    NoQuestions,

    #[error("seconds per question must be greater than zero")]
    InvalidTimeBudget,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

#[derive(Debug, Error)]
pub enum PresenterError {
    #[error("render failed: {0}")]
    Render(String),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown quiz type: {0}")]
    UnknownQuizType(String),
}
