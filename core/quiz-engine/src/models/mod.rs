use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

pub mod answer;
pub mod report;
pub mod snapshot;
pub mod timer;

pub use answer::AnswerRecord;
pub use report::{AnalysisReport, CategoryStats};
pub use snapshot::SessionSnapshot;
pub use timer::TimerEvent;

pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Number of questions a session of this difficulty is capped at.
    pub fn question_limit(self) -> usize {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
        }
    }

    /// Default per-question countdown.
    pub fn seconds_per_question(self) -> u32 {
        match self {
            Difficulty::Easy => 30,
            Difficulty::Medium => 45,
            Difficulty::Hard => 60,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Strict parse; `None` for anything outside easy/medium/hard.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        Difficulty::parse(&value).unwrap_or_default()
    }
}

impl From<Difficulty> for &'static str {
    fn from(value: Difficulty) -> Self {
        value.as_str()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Question {
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(self.correct_option_index)
            .map(String::as_str)
    }

    /// At least two options and a correct index that points at one of them.
    pub fn is_playable(&self) -> bool {
        self.options.len() >= 2 && self.correct_option_index < self.options.len()
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Per-session copy of a [`Question`] with its options permuted.
///
/// Only the shuffler builds these, so the correct index always tracks the
/// originally-correct option text. The wrapped question is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShuffledQuestion {
    question: Question,
}

impl ShuffledQuestion {
    pub(crate) fn new(question: Question) -> Self {
        Self { question }
    }

    /// Wraps a question keeping its option order as-is.
    pub fn unshuffled(question: Question) -> Self {
        Self { question }
    }

    pub fn into_inner(self) -> Question {
        self.question
    }
}

impl Deref for ShuffledQuestion {
    type Target = Question;

    fn deref(&self) -> &Question {
        &self.question
    }
}

/// A question record as it arrives from a question bank, before repair.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default, alias = "question")]
    pub text: Option<String>,
    #[serde(default)]
    pub options: Option<serde_json::Value>,
    #[serde(default, alias = "correct", alias = "correctAnswer")]
    pub correct_option_index: Option<serde_json::Value>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl From<Question> for RawQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: Some(serde_json::Value::String(q.id)),
            text: Some(q.text),
            options: Some(serde_json::Value::from(q.options)),
            correct_option_index: Some(serde_json::Value::from(q.correct_option_index)),
            explanation: q.explanation,
            category: Some(q.category),
            difficulty: Some(q.difficulty.as_str().to_string()),
        }
    }
}
