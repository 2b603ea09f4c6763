use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

use crate::models::Difficulty;
use crate::services::session_service::{SessionConfig, DEFAULT_STORAGE_KEY};
use crate::services::validation_service::validate_difficulty;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("invalid value {value:?} for {key}")]
    BadValue { key: &'static str, value: String },

    #[error("configuration failed validation: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1))]
    pub question_bank_path: String,
    #[validate(length(min = 1))]
    pub storage_dir: String,
    #[validate(length(min = 1))]
    pub storage_key: String,
    #[validate(length(min = 1))]
    pub quiz_type: String,
    pub difficulty: Difficulty,
    #[validate(range(min = 1, max = 600))]
    pub seconds_per_question: Option<u32>,
    #[validate(range(max = 60000))]
    pub advance_delay_ms: u64,
    #[validate(range(min = 10, max = 10000))]
    pub tick_interval_ms: u64,
    #[validate(range(min = 1, max = 720))]
    pub max_snapshot_age_hours: u64,
    pub rng_seed: Option<u64>,
    pub print_metrics: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            question_bank_path: "data/questions.json".to_string(),
            storage_dir: ".quiz-state".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            quiz_type: "js".to_string(),
            difficulty: Difficulty::Easy,
            seconds_per_question: None,
            advance_delay_ms: 2000,
            tick_interval_ms: 1000,
            max_snapshot_age_hours: 24,
            rng_seed: None,
            print_metrics: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigLoadError> {
        // Local .env is optional
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables, e.g. APP_QUIZ__DIFFICULTY
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Self::from_settings(&settings)
    }

    /// Reads the `quiz.*` keys, falling back to defaults for anything unset.
    pub fn from_settings(settings: &config::Config) -> Result<Self, ConfigLoadError> {
        let defaults = Self::default();
        let text = |key: &str| settings.get_string(key).ok().filter(|v| !v.trim().is_empty());

        let cfg = Self {
            question_bank_path: text("quiz.question_bank_path")
                .unwrap_or(defaults.question_bank_path),
            storage_dir: text("quiz.storage_dir").unwrap_or(defaults.storage_dir),
            storage_key: text("quiz.storage_key").unwrap_or(defaults.storage_key),
            quiz_type: text("quiz.quiz_type").unwrap_or(defaults.quiz_type),
            difficulty: text("quiz.difficulty")
                .map(|v| validate_difficulty(&v))
                .unwrap_or(defaults.difficulty),
            seconds_per_question: parse_opt(
                "quiz.seconds_per_question",
                text("quiz.seconds_per_question"),
            )?,
            advance_delay_ms: parse_opt("quiz.advance_delay_ms", text("quiz.advance_delay_ms"))?
                .unwrap_or(defaults.advance_delay_ms),
            tick_interval_ms: parse_opt("quiz.tick_interval_ms", text("quiz.tick_interval_ms"))?
                .unwrap_or(defaults.tick_interval_ms),
            max_snapshot_age_hours: parse_opt(
                "quiz.max_snapshot_age_hours",
                text("quiz.max_snapshot_age_hours"),
            )?
            .unwrap_or(defaults.max_snapshot_age_hours),
            rng_seed: parse_opt("quiz.rng_seed", text("quiz.rng_seed"))?,
            print_metrics: parse_opt("quiz.print_metrics", text("quiz.print_metrics"))?
                .unwrap_or(defaults.print_metrics),
        };

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn session_config(&self) -> SessionConfig {
        let mut session = SessionConfig::new(self.quiz_type.clone(), self.difficulty);
        if let Some(seconds) = self.seconds_per_question {
            session.seconds_per_question = seconds;
        }
        session.advance_delay = Duration::from_millis(self.advance_delay_ms);
        session.max_snapshot_age = Duration::from_secs(self.max_snapshot_age_hours * 3600);
        session.storage_key = self.storage_key.clone();
        session.seed = self.rng_seed;
        session
    }
}

fn parse_opt<T: FromStr>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigLoadError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigLoadError::BadValue { key, value: raw }),
    }
}
