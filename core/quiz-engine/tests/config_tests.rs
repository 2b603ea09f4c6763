use std::env;

use quiz_engine::config::ConfigLoadError;
use quiz_engine::models::Difficulty;
use quiz_engine::AppConfig;
use serial_test::serial;

const VARS: [&str; 4] = [
    "APP_ENV",
    "APP_QUIZ__DIFFICULTY",
    "APP_QUIZ__SECONDS_PER_QUESTION",
    "APP_QUIZ__TICK_INTERVAL_MS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn loads_environment_file_for_app_env() {
    clear_env();
    env::set_var("APP_ENV", "test");

    let config = AppConfig::load().unwrap();

    assert_eq!(config.quiz_type, "ts");
    assert_eq!(config.difficulty, Difficulty::Medium);
    assert_eq!(config.rng_seed, Some(7));
    assert_eq!(config.advance_delay_ms, 0);
    assert_eq!(config.session_config().seconds_per_question, 45);
    clear_env();
}

#[test]
#[serial]
fn env_vars_override_file_values() {
    clear_env();
    env::set_var("APP_ENV", "test");
    env::set_var("APP_QUIZ__DIFFICULTY", "hard");
    env::set_var("APP_QUIZ__SECONDS_PER_QUESTION", "20");

    let config = AppConfig::load().unwrap();

    assert_eq!(config.difficulty, Difficulty::Hard);
    let session = config.session_config();
    assert_eq!(session.difficulty, Difficulty::Hard);
    assert_eq!(session.seconds_per_question, 20);
    clear_env();
}

#[test]
#[serial]
fn missing_environment_file_uses_defaults() {
    clear_env();
    env::set_var("APP_ENV", "nonexistent");

    let config = AppConfig::load().unwrap();

    assert_eq!(config.quiz_type, "js");
    assert_eq!(config.difficulty, Difficulty::Easy);
    assert_eq!(config.tick_interval_ms, 1000);
    clear_env();
}

#[test]
#[serial]
fn invalid_override_is_reported() {
    clear_env();
    env::set_var("APP_ENV", "nonexistent");
    env::set_var("APP_QUIZ__TICK_INTERVAL_MS", "5");

    assert!(matches!(
        AppConfig::load(),
        Err(ConfigLoadError::Invalid(_))
    ));
    clear_env();
}
