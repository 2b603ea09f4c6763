use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use super::validation_service::validate_questions;
use crate::error::BankError;
use crate::models::{Difficulty, Question, RawQuestion};

/// Question records grouped by quiz type, e.g. `{"js": [...], "ts": [...]}`.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    quizzes: BTreeMap<String, Vec<RawQuestion>>,
}

impl QuestionBank {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let bank = Self::from_json_str(&raw)?;
        tracing::info!(
            "Loaded question bank from {}: {} quiz types",
            path.display(),
            bank.quizzes.len()
        );
        Ok(bank)
    }

    /// Entries that are not JSON objects are dropped with a warning.
    pub fn from_json_str(raw: &str) -> Result<Self, BankError> {
        let parsed: BTreeMap<String, Vec<Value>> = serde_json::from_str(raw)?;
        let mut quizzes = BTreeMap::new();

        for (quiz_type, entries) in parsed {
            let mut records = Vec::with_capacity(entries.len());
            for (index, entry) in entries.into_iter().enumerate() {
                match serde_json::from_value::<RawQuestion>(entry) {
                    Ok(record) => records.push(record),
                    Err(e) => tracing::warn!(
                        "Dropping entry {} of quiz type {}: {}",
                        index,
                        quiz_type,
                        e
                    ),
                }
            }
            quizzes.insert(quiz_type, records);
        }

        Ok(Self { quizzes })
    }

    pub fn quiz_types(&self) -> Vec<&str> {
        self.quizzes.keys().map(String::as_str).collect()
    }

    /// Validated questions for one quiz type at one difficulty.
    ///
    /// When no question carries the requested difficulty the whole quiz type
    /// is returned instead.
    pub fn questions_for(
        &self,
        quiz_type: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<Question>, BankError> {
        let records = self
            .quizzes
            .get(quiz_type)
            .ok_or_else(|| BankError::UnknownQuizType(quiz_type.to_string()))?;

        let questions = validate_questions(records.clone());
        let matching: Vec<Question> = questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .cloned()
            .collect();

        if matching.is_empty() {
            tracing::info!(
                "No {} questions for {}, using all {} questions",
                difficulty,
                quiz_type,
                questions.len()
            );
            return Ok(questions);
        }
        Ok(matching)
    }
}
