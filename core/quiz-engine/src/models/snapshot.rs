use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{AnswerRecord, Difficulty, ShuffledQuestion};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted session state, written as JSON after every state change.
///
/// Numeric fields are read leniently: a value that is not a number comes back
/// as `None` and the session substitutes a safe default when restoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default = "Uuid::new_v4")]
    pub session_id: Uuid,
    pub shuffled_questions: Vec<ShuffledQuestion>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub current_question_index: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub score: Option<i64>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub quiz_type: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_paused: bool,
    #[serde(default)]
    pub has_shown_results: bool,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub seconds_per_question: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub time_remaining_seconds: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub saved_at_epoch_ms: Option<i64>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|f: &f64| f.is_finite()))
}
