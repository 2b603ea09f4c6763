use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{interval, MissedTickBehavior};

use super::{apply, Command, Flow};
use crate::presenter::Presenter;
use crate::services::{QuizSession, SessionPhase};
use crate::storage::Storage;
use crate::utils::time::Clock;

const TIMER_INTERRUPT: Duration = Duration::from_secs(1);

/// Host loop: a once-per-second timer interrupt, a faster poll for the
/// deferred advance, and one command per input line.
///
/// Returns when the user quits or the input closes. An unfinished quiz is
/// abandoned with its snapshot kept for the next run.
pub async fn run<P, S, C, R>(
    session: &mut QuizSession<P, S, C>,
    input: R,
    poll_interval: Duration,
) -> anyhow::Result<()>
where
    P: Presenter,
    S: Storage,
    C: Clock + Clone,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    let mut timer = interval(TIMER_INTERRUPT);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval's first tick completes immediately
    timer.tick().await;

    let mut poll = interval(poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(
        "Host loop started (poll interval {}ms)",
        poll_interval.as_millis()
    );

    loop {
        tokio::select! {
            _ = timer.tick() => session.on_interval(),
            _ = poll.tick() => {
                session.poll();
            }
            line = lines.next_line() => {
                match line.context("failed to read input")? {
                    Some(line) => {
                        if apply(session, Command::parse(&line)) == Flow::Quit {
                            tracing::info!("Quit requested");
                            break;
                        }
                    }
                    None => {
                        tracing::info!("Input closed");
                        break;
                    }
                }
            }
        }
    }

    if session.phase() != SessionPhase::Finished {
        session.abandon();
    }
    Ok(())
}
