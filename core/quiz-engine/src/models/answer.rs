use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One committed answer. `selected_index` is `None` when the question timed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    pub question_index: usize,
    pub selected_index: Option<usize>,
    pub correct_index: usize,
    pub is_correct: bool,
    pub time_spent_seconds: u32,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

impl AnswerRecord {
    pub fn is_timeout(&self) -> bool {
        self.selected_index.is_none()
    }

    pub fn outcome_label(&self) -> &'static str {
        if self.is_timeout() {
            "timeout"
        } else if self.is_correct {
            "correct"
        } else {
            "incorrect"
        }
    }
}
