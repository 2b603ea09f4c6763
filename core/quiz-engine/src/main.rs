use std::io;
use std::time::Duration;

use anyhow::Context;
use quiz_engine::{
    handlers, metrics, AppConfig, FileStorage, QuestionBank, QuizSession, RestoreOutcome,
    SystemClock, TerminalPresenter,
};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting interview quiz engine");

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(
        "Configuration loaded for environment: {:?}",
        std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string())
    );

    let bank = QuestionBank::load_from_path(&config.question_bank_path)
        .with_context(|| format!("failed to load {}", config.question_bank_path))?;
    let questions = bank
        .questions_for(&config.quiz_type, config.difficulty)
        .context("failed to select questions")?;

    let storage = FileStorage::open(&config.storage_dir)
        .with_context(|| format!("failed to open storage at {}", config.storage_dir))?;
    let presenter = TerminalPresenter::new(io::stdout());

    let mut session = QuizSession::new(
        questions,
        config.session_config(),
        presenter,
        storage,
        SystemClock,
    )?;

    match session.resume_saved() {
        RestoreOutcome::Restored => tracing::info!("Resumed saved quiz"),
        other => {
            tracing::info!("No resumable quiz ({:?}), starting fresh", other);
            session.start();
        }
    }

    let stdin = BufReader::new(tokio::io::stdin());
    handlers::run(
        &mut session,
        stdin,
        Duration::from_millis(config.tick_interval_ms),
    )
    .await?;

    if config.print_metrics {
        println!("{}", metrics::render_metrics()?);
    }

    tracing::info!("Shutting down");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quiz_engine=info,interview_quiz_engine=info".into());

    // logs go to stderr so they never interleave with the quiz on stdout
    let json = std::env::var("APP_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}
