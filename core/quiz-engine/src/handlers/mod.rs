pub mod driver;

pub use driver::run;

use crate::presenter::{Presenter, ToastKind};
use crate::services::QuizSession;
use crate::storage::Storage;
use crate::utils::time::Clock;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Zero-based option index.
    Answer(usize),
    TogglePause,
    Restart,
    Finish,
    Share,
    Quit,
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    /// Options are numbered from 1 on screen.
    pub fn parse(line: &str) -> Self {
        let input = line.trim();
        if let Ok(n) = input.parse::<usize>() {
            return match n.checked_sub(1) {
                Some(index) => Command::Answer(index),
                None => Command::Unknown(input.to_string()),
            };
        }
        match input.to_ascii_lowercase().as_str() {
            "p" | "pause" | "resume" => Command::TogglePause,
            "r" | "restart" => Command::Restart,
            "f" | "finish" => Command::Finish,
            "s" | "share" => Command::Share,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(input.to_string()),
        }
    }
}

pub fn apply<P, S, C>(session: &mut QuizSession<P, S, C>, command: Command) -> Flow
where
    P: Presenter,
    S: Storage,
    C: Clock + Clone,
{
    tracing::debug!("Command: {:?}", command);
    match command {
        Command::Answer(index) => {
            session.submit_answer(Some(index));
        }
        Command::TogglePause => {
            session.toggle_pause();
        }
        Command::Restart => session.restart(),
        Command::Finish => session.finish(),
        Command::Share => {
            if let Some(summary) = session.share_results() {
                session
                    .presenter_mut()
                    .show_toast(&summary.text, ToastKind::Info);
            }
        }
        Command::Quit => return Flow::Quit,
        Command::Unknown(input) if input.is_empty() => {}
        Command::Unknown(input) => session
            .presenter_mut()
            .show_toast(&format!("Unknown command: {}", input), ToastKind::Warning),
    }
    Flow::Continue
}
