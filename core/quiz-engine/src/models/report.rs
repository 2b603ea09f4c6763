use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Difficulty;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: u32,
    pub correct: u32,
}

impl CategoryStats {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total)
        }
    }
}

/// Post-quiz statistics. Times are whole seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub quiz_type: String,
    pub difficulty: Difficulty,
    pub total_questions: usize,
    pub correct_answers: u32,
    pub percentage: u32,
    pub average_time_per_question: u32,
    pub average_time_correct: u32,
    pub average_time_incorrect: u32,
    pub category_stats: BTreeMap<String, CategoryStats>,
    pub weak_areas: Vec<String>,
    pub strong_areas: Vec<String>,
    pub fastest_answer: u32,
    pub slowest_answer: u32,
    pub unanswered_questions: u32,
}
