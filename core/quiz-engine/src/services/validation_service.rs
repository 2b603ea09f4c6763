use serde_json::Value;

use crate::models::{Difficulty, Question, RawQuestion, DEFAULT_CATEGORY};

const PLACEHOLDER_OPTIONS: [&str; 2] = ["True", "False"];

/// Repairs question records into a playable set. Never fails.
///
/// Defects are logged and patched in place: a missing id becomes `q-<index>`,
/// unusable options become a True/False pair, and a missing or out-of-range
/// correct index becomes 0.
pub fn validate_questions(questions: Vec<RawQuestion>) -> Vec<Question> {
    questions
        .into_iter()
        .enumerate()
        .map(|(index, raw)| validate_question(index, raw))
        .collect()
}

/// Maps anything outside easy/medium/hard to easy.
pub fn validate_difficulty(value: &str) -> Difficulty {
    Difficulty::parse(value).unwrap_or_else(|| {
        tracing::debug!("Unknown difficulty {:?}, using easy", value);
        Difficulty::Easy
    })
}

fn validate_question(index: usize, raw: RawQuestion) -> Question {
    let id = match raw.id {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("q-{}", index),
    };

    let text = raw.text.unwrap_or_else(|| {
        tracing::warn!("Question {} has no text", id);
        String::new()
    });

    let options = match raw.options.as_ref().and_then(option_texts) {
        Some(options) if options.len() >= 2 => options,
        _ => {
            tracing::warn!(
                "Question {} has invalid options, replacing with placeholder",
                id
            );
            PLACEHOLDER_OPTIONS.iter().map(|s| s.to_string()).collect()
        }
    };

    let correct_option_index = match raw.correct_option_index.as_ref().and_then(index_value) {
        Some(i) if i < options.len() => i,
        _ => {
            tracing::warn!(
                "Question {} has missing or out-of-range correct index, defaulting to 0",
                id
            );
            0
        }
    };

    let category = raw
        .category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let difficulty = raw
        .difficulty
        .as_deref()
        .map(validate_difficulty)
        .unwrap_or_default();

    Question {
        id,
        text,
        options,
        correct_option_index,
        explanation: raw.explanation.filter(|e| !e.trim().is_empty()),
        category,
        difficulty,
    }
}

fn option_texts(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

fn index_value(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|i| usize::try_from(i).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
