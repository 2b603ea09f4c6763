use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use super::analysis_service::{generate_analysis, percentage};
use super::shuffle_service::shuffle;
use super::timer_service::CountdownTimer;
use crate::error::{PresenterError, QuizError};
use crate::metrics;
use crate::models::snapshot::SNAPSHOT_VERSION;
use crate::models::{
    AnalysisReport, AnswerRecord, Difficulty, Question, SessionSnapshot, ShuffledQuestion,
    TimerEvent,
};
use crate::presenter::{PresentResult, Presenter, ToastKind};
use crate::storage::Storage;
use crate::utils::time::Clock;

pub const DEFAULT_STORAGE_KEY: &str = "interview-quiz-state";
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_SNAPSHOT_AGE: Duration = Duration::from_secs(24 * 60 * 60);
const MAX_SECONDS_PER_QUESTION: i64 = 600;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub quiz_type: String,
    pub difficulty: Difficulty,
    pub seconds_per_question: u32,
    /// How long answer feedback stays up before the next question loads.
    pub advance_delay: Duration,
    pub storage_key: String,
    pub max_snapshot_age: Duration,
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new(quiz_type: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            quiz_type: quiz_type.into(),
            difficulty,
            seconds_per_question: difficulty.seconds_per_question(),
            advance_delay: DEFAULT_ADVANCE_DELAY,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_snapshot_age: DEFAULT_MAX_SNAPSHOT_AGE,
            seed: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new("js", Difficulty::Easy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Created,
    Active,
    Paused,
    /// Answer committed; further input is rejected until the next question loads.
    Transitioning,
    Finished,
}

/// Identifies one deferred advance. Stale tokens are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken {
    generation: u64,
    answered: usize,
}

#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    token: AdvanceToken,
    due_at_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored,
    NotFound,
    Stale,
    Invalid(&'static str),
    Corrupt,
}

impl RestoreOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, RestoreOutcome::Restored)
    }

    fn label(&self) -> &'static str {
        match self {
            RestoreOutcome::Restored => "restored",
            RestoreOutcome::NotFound => "empty",
            RestoreOutcome::Stale => "stale",
            RestoreOutcome::Invalid(_) => "invalid",
            RestoreOutcome::Corrupt => "corrupt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareSummary {
    pub text: String,
    pub score: u32,
    pub total: usize,
    pub percentage: u32,
}

/// The quiz state machine.
///
/// `Created -> Active <-> Paused`, every answer passes through
/// `Transitioning` for `advance_delay`, and the last question leads to
/// `Finished`. The host drives time: it calls [`on_interval`] once per second
/// and [`poll`] to let a due advance fire. After construction no operation
/// returns an error; render failures are reported through
/// [`Presenter::show_error`] and storage failures are logged.
///
/// [`on_interval`]: QuizSession::on_interval
/// [`poll`]: QuizSession::poll
pub struct QuizSession<P, S, C>
where
    P: Presenter,
    S: Storage,
    C: Clock + Clone,
{
    config: SessionConfig,
    source: Vec<Question>,
    questions: Vec<ShuffledQuestion>,
    current_index: usize,
    score: u32,
    answers: Vec<AnswerRecord>,
    phase: SessionPhase,
    has_shown_results: bool,
    timer: CountdownTimer<C>,
    clock: C,
    generation: u64,
    pending: Option<PendingAdvance>,
    report: Option<AnalysisReport>,
    session_id: Uuid,
    presenter: P,
    storage: S,
    rng: StdRng,
}

impl<P, S, C> QuizSession<P, S, C>
where
    P: Presenter,
    S: Storage,
    C: Clock + Clone,
{
    pub fn new(
        questions: Vec<Question>,
        config: SessionConfig,
        presenter: P,
        storage: S,
        clock: C,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        if config.seconds_per_question == 0 {
            return Err(QuizError::InvalidTimeBudget);
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let timer = CountdownTimer::new(config.seconds_per_question, clock.clone());

        Ok(Self {
            config,
            source: questions,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            answers: Vec::new(),
            phase: SessionPhase::Created,
            has_shown_results: false,
            timer,
            clock,
            generation: 0,
            pending: None,
            report: None,
            session_id: Uuid::new_v4(),
            presenter,
            storage,
            rng,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == SessionPhase::Transitioning
    }

    pub fn has_shown_results(&self) -> bool {
        self.has_shown_results
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn questions(&self) -> &[ShuffledQuestion] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&ShuffledQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn time_remaining(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    pub fn pending_advance(&self) -> Option<AdvanceToken> {
        self.pending.map(|p| p.token)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Shuffles a fresh question set and shows the first question.
    pub fn start(&mut self) {
        self.cancel_pending();
        self.timer.stop();

        let outcome = shuffle(&self.source, self.config.difficulty, &mut self.rng);
        self.questions = outcome.truncated();
        self.current_index = 0;
        self.score = 0;
        self.answers.clear();
        self.has_shown_results = false;
        self.report = None;
        self.session_id = Uuid::new_v4();
        self.phase = SessionPhase::Active;

        tracing::info!(
            session_id = %self.session_id,
            "Quiz started: type={}, difficulty={}, questions={}",
            self.config.quiz_type,
            self.config.difficulty,
            self.questions.len()
        );
        metrics::record_session_event("started");

        if let Err(e) = self.presenter.show_question_screen() {
            self.render_failed("starting the quiz", e);
        }
        self.load_question();
    }

    /// Throws the current attempt away and starts over with a new shuffle.
    pub fn restart(&mut self) {
        tracing::info!(session_id = %self.session_id, "Quiz restarted");
        metrics::record_session_event("restarted");

        self.timer.stop();
        self.cancel_pending();
        self.score = 0;
        self.current_index = 0;
        self.answers.clear();
        self.has_shown_results = false;
        self.start();
    }

    /// Shows the question at the current index, or the results once past the end.
    pub fn load_question(&mut self) {
        if matches!(self.phase, SessionPhase::Created | SessionPhase::Finished) {
            tracing::debug!("load_question ignored in phase {:?}", self.phase);
            return;
        }

        while self
            .questions
            .get(self.current_index)
            .is_some_and(|q| !q.is_playable())
        {
            self.skip_current_question();
        }

        if self.current_index >= self.questions.len() {
            self.finish();
            return;
        }

        self.phase = SessionPhase::Active;
        self.timer.reset();

        tracing::debug!(
            session_id = %self.session_id,
            question_index = self.current_index,
            "Question loaded"
        );

        if let Err(e) = self.render_question(false) {
            self.render_failed("loading the question", e);
        }
        self.persist();
    }

    /// Commits an answer for the current question; `None` records a timeout.
    ///
    /// Ignored unless a question is actively being answered, so a second
    /// click during the feedback window never records anything.
    pub fn submit_answer(&mut self, selected: Option<usize>) -> Option<AnswerRecord> {
        if self.phase != SessionPhase::Active {
            tracing::debug!("Answer ignored in phase {:?}", self.phase);
            return None;
        }
        let option_count = self.questions.get(self.current_index)?.options.len();
        if selected.is_some_and(|i| i >= option_count) {
            tracing::warn!("Answer index {:?} out of range, ignoring", selected);
            return None;
        }

        self.phase = SessionPhase::Transitioning;
        self.timer.stop();

        let question = &self.questions[self.current_index];
        let correct_index = question.correct_option_index;
        let is_correct = selected == Some(correct_index);
        let time_spent_seconds = self
            .config
            .seconds_per_question
            .saturating_sub(self.timer.remaining())
            .max(1);

        let record = AnswerRecord {
            question_id: question.id.clone(),
            question_index: self.current_index,
            selected_index: selected,
            correct_index,
            is_correct,
            time_spent_seconds,
            category: question.category.clone(),
            timestamp: self.clock.now_utc(),
        };
        self.answers.push(record.clone());
        if is_correct {
            self.score += 1;
        }

        metrics::record_answer(record.outcome_label());
        metrics::observe_answer_time(self.config.difficulty.as_str(), time_spent_seconds);
        tracing::info!(
            session_id = %self.session_id,
            question_index = self.current_index,
            "Answer committed: outcome={}, time_spent={}s, score={}",
            record.outcome_label(),
            time_spent_seconds,
            self.score
        );

        if let Err(e) = self.render_feedback(selected, correct_index) {
            self.render_failed("showing the answer", e);
        }
        self.persist();

        let delay_ms = i64::try_from(self.config.advance_delay.as_millis()).unwrap_or(i64::MAX);
        self.pending = Some(PendingAdvance {
            token: AdvanceToken {
                generation: self.generation,
                answered: self.answers.len(),
            },
            due_at_ms: self.clock.now_ms().saturating_add(delay_ms),
        });

        Some(record)
    }

    /// Timer expiry: records a timeout unless the quiz is paused.
    pub fn time_expire(&mut self) {
        if self.is_paused() || self.timer.is_paused() {
            tracing::debug!("Expiry suppressed while paused");
            return;
        }
        if self.phase != SessionPhase::Active {
            return;
        }
        tracing::info!(
            session_id = %self.session_id,
            question_index = self.current_index,
            "Time expired"
        );
        self.submit_answer(None);
    }

    /// Pauses or resumes the countdown. Returns the resulting pause state.
    pub fn toggle_pause(&mut self) -> bool {
        let paused = match self.phase {
            SessionPhase::Active => {
                self.timer.pause();
                self.phase = SessionPhase::Paused;
                true
            }
            SessionPhase::Paused => {
                self.timer.resume();
                self.phase = SessionPhase::Active;
                false
            }
            other => {
                tracing::debug!("Pause toggle ignored in phase {:?}", other);
                return self.is_paused();
            }
        };

        tracing::info!(session_id = %self.session_id, "Quiz {}", if paused { "paused" } else { "resumed" });

        if let Err(e) = self.presenter.update_pause_button(paused) {
            self.render_failed("updating the pause state", e);
        }
        self.persist();
        paused
    }

    /// Shows the results. Safe to call repeatedly; only the first call renders.
    pub fn finish(&mut self) {
        if self.has_shown_results {
            tracing::debug!("Results already shown");
            return;
        }
        if self.phase == SessionPhase::Created {
            tracing::warn!("finish called before the quiz started");
            return;
        }

        self.has_shown_results = true;
        self.phase = SessionPhase::Finished;
        self.timer.stop();
        self.cancel_pending();

        let report = generate_analysis(
            &self.questions,
            &self.answers,
            &self.config.quiz_type,
            self.config.difficulty,
        );

        tracing::info!(
            session_id = %self.session_id,
            "Quiz finished: score={}/{} ({}%), unanswered={}",
            self.score,
            self.questions.len(),
            report.percentage,
            report.unanswered_questions
        );
        metrics::record_session_event("finished");

        if let Err(e) = self.render_results(&report) {
            self.render_failed("showing your results", e);
        }
        self.report = Some(report);
        self.clear_snapshot();
    }

    /// Stops the clock for a host that navigates away. The snapshot is kept.
    pub fn abandon(&mut self) {
        if matches!(self.phase, SessionPhase::Created | SessionPhase::Finished) {
            return;
        }
        tracing::info!(session_id = %self.session_id, "Quiz abandoned");
        metrics::record_session_event("abandoned");

        self.timer.stop();
        self.cancel_pending();
        self.phase = SessionPhase::Created;
    }

    /// Once-per-second timer interrupt.
    pub fn on_interval(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }

        let mut expired = false;
        for event in self.timer.tick() {
            tracing::debug!("Timer event: {}", event.event_name());
            let rendered = match event {
                TimerEvent::Tick { remaining_seconds } => {
                    self.presenter.update_timer(remaining_seconds)
                }
                TimerEvent::LowTimeWarning { remaining_seconds } => {
                    self.presenter.show_time_warning(remaining_seconds)
                }
                TimerEvent::Expired => {
                    expired = true;
                    Ok(())
                }
                TimerEvent::PauseChanged { .. } => Ok(()),
            };
            if let Err(e) = rendered {
                self.render_failed("updating the timer", e);
            }
        }

        if expired {
            self.time_expire();
        } else {
            self.persist();
        }
    }

    /// Fires the deferred advance once it is due. Returns whether it fired.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if self.clock.now_ms() < pending.due_at_ms {
            return false;
        }
        self.complete_transition(pending.token)
    }

    /// Moves past the feedback window to the next question.
    ///
    /// Tokens from before a restart, abandon or finish, or from an earlier
    /// answer, are rejected.
    pub fn complete_transition(&mut self, token: AdvanceToken) -> bool {
        let current = AdvanceToken {
            generation: self.generation,
            answered: self.answers.len(),
        };
        if self.phase != SessionPhase::Transitioning || token != current {
            tracing::debug!("Ignoring stale advance {:?}", token);
            return false;
        }

        self.pending = None;
        self.phase = SessionPhase::Active;
        self.current_index += 1;
        self.load_question();
        true
    }

    /// Loads the saved snapshot from storage, if any, and restores it.
    pub fn resume_saved(&mut self) -> RestoreOutcome {
        let raw = match self.storage.get(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                metrics::record_restore(RestoreOutcome::NotFound.label());
                return RestoreOutcome::NotFound;
            }
            Err(e) => {
                tracing::warn!("Failed to read saved quiz state: {}", e);
                metrics::record_restore(RestoreOutcome::NotFound.label());
                return RestoreOutcome::NotFound;
            }
        };

        match SessionSnapshot::from_json(&raw) {
            Ok(snapshot) => self.restore(snapshot),
            Err(e) => {
                tracing::warn!("Discarding unreadable quiz state: {}", e);
                self.clear_snapshot();
                metrics::record_restore(RestoreOutcome::Corrupt.label());
                RestoreOutcome::Corrupt
            }
        }
    }

    /// Rehydrates a persisted session.
    ///
    /// Stale or structurally invalid snapshots are rejected and purged from
    /// storage. Accepted ones are clamped into range: the index is kept inside
    /// the question list and reconciled with the answer log, the score is
    /// recomputed when it disagrees with the log, and a missing or
    /// non-positive remaining time becomes a full countdown. The saved time
    /// budget comes back with the session, and unplayable questions at the
    /// restored index are skipped.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> RestoreOutcome {
        if let Err(outcome) = self.check_snapshot(&snapshot) {
            tracing::warn!("Rejecting saved quiz state: {:?}", outcome);
            self.clear_snapshot();
            metrics::record_restore(outcome.label());
            return outcome;
        }

        self.timer.stop();
        self.cancel_pending();

        let total = snapshot.shuffled_questions.len();
        let seconds_per_question = match snapshot.seconds_per_question {
            Some(s) if (1..=MAX_SECONDS_PER_QUESTION).contains(&s) => s as u32,
            None if snapshot.difficulty == self.config.difficulty => {
                self.config.seconds_per_question
            }
            other => {
                let seconds = snapshot.difficulty.seconds_per_question();
                if other.is_some() {
                    tracing::warn!("Saved time budget {:?} reset to {}s", other, seconds);
                }
                seconds
            }
        };
        let saved_index = snapshot
            .current_question_index
            .unwrap_or(0)
            .clamp(0, total as i64 - 1) as usize;

        let mut answers = snapshot.answers;
        answers.truncate(total);

        let mut index = saved_index;
        if answers.len() != index {
            // an answer committed just before the reload never got its advance
            tracing::warn!(
                "Saved index {} disagrees with {} recorded answers, using the answer log",
                saved_index,
                answers.len()
            );
            index = answers.len();
        }

        let correct = answers.iter().filter(|a| a.is_correct).count() as u32;
        let score = match snapshot.score {
            Some(s) if s == i64::from(correct) => correct,
            other => {
                tracing::warn!("Saved score {:?} reset to {}", other, correct);
                correct
            }
        };

        self.questions = snapshot.shuffled_questions;
        self.answers = answers;
        self.current_index = index;
        self.score = score;
        self.has_shown_results = false;
        self.report = None;
        self.session_id = snapshot.session_id;
        if !snapshot.quiz_type.trim().is_empty() {
            self.config.quiz_type = snapshot.quiz_type;
        }
        self.config.difficulty = snapshot.difficulty;
        self.config.seconds_per_question = seconds_per_question;
        self.timer = CountdownTimer::new(seconds_per_question, self.clock.clone());

        while self
            .questions
            .get(self.current_index)
            .is_some_and(|q| !q.is_playable())
        {
            self.skip_current_question();
        }
        let index = self.current_index;

        let remaining = match snapshot.time_remaining_seconds {
            Some(t) if t >= 1.0 && index == saved_index => {
                (t.floor() as u32).min(seconds_per_question)
            }
            _ => seconds_per_question,
        };

        tracing::info!(
            session_id = %self.session_id,
            "Quiz restored at question {}/{} (score {}, {}s left, paused={})",
            index + 1,
            total,
            score,
            remaining,
            snapshot.is_paused
        );
        metrics::record_restore(RestoreOutcome::Restored.label());
        metrics::record_session_event("restored");

        if index >= total {
            self.phase = SessionPhase::Active;
            self.finish();
            return RestoreOutcome::Restored;
        }

        let paused = snapshot.is_paused;
        self.phase = if paused {
            SessionPhase::Paused
        } else {
            SessionPhase::Active
        };
        self.timer.restore(remaining, paused);

        let rendered = self
            .presenter
            .show_question_screen()
            .and_then(|_| self.render_question(paused));
        if let Err(e) = rendered {
            self.render_failed("restoring your quiz", e);
        }
        self.persist();
        RestoreOutcome::Restored
    }

    /// Builds shareable result text. Only available after the results screen.
    pub fn share_results(&mut self) -> Option<ShareSummary> {
        if !self.has_shown_results || self.questions.is_empty() {
            self.presenter
                .show_toast("Finish the quiz before sharing your results", ToastKind::Warning);
            return None;
        }

        let total = self.questions.len();
        let percentage = percentage(self.score, total);
        let text = format!(
            "I scored {}/{} ({}%) on the {} interview quiz ({} difficulty).",
            self.score, total, percentage, self.config.quiz_type, self.config.difficulty
        );
        self.presenter
            .show_toast("Results ready to share", ToastKind::Success);

        Some(ShareSummary {
            text,
            score: self.score,
            total,
            percentage,
        })
    }

    /// Current state in its persisted form.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            session_id: self.session_id,
            shuffled_questions: self.questions.clone(),
            current_question_index: Some(self.current_index as i64),
            score: Some(i64::from(self.score)),
            answers: self.answers.clone(),
            quiz_type: self.config.quiz_type.clone(),
            difficulty: self.config.difficulty,
            is_paused: self.is_paused(),
            has_shown_results: self.has_shown_results,
            seconds_per_question: Some(i64::from(self.config.seconds_per_question)),
            time_remaining_seconds: Some(f64::from(self.timer.remaining())),
            saved_at_epoch_ms: Some(self.clock.now_ms()),
        }
    }

    fn check_snapshot(&self, snapshot: &SessionSnapshot) -> Result<(), RestoreOutcome> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(RestoreOutcome::Invalid("unsupported snapshot version"));
        }
        if snapshot.shuffled_questions.is_empty() {
            return Err(RestoreOutcome::Invalid("no questions"));
        }
        if snapshot.has_shown_results {
            return Err(RestoreOutcome::Invalid("quiz already finished"));
        }
        let saved_at = match snapshot.saved_at_epoch_ms {
            Some(ms) if ms > 0 => ms,
            _ => return Err(RestoreOutcome::Invalid("missing save time")),
        };
        let max_age_ms = i64::try_from(self.config.max_snapshot_age.as_millis()).unwrap_or(i64::MAX);
        if self.clock.now_ms().saturating_sub(saved_at) > max_age_ms {
            return Err(RestoreOutcome::Stale);
        }
        Ok(())
    }

    fn skip_current_question(&mut self) {
        let question = &self.questions[self.current_index];
        tracing::warn!(
            "Skipping unplayable question {} at index {}",
            question.id,
            self.current_index
        );
        self.answers.push(AnswerRecord {
            question_id: question.id.clone(),
            question_index: self.current_index,
            selected_index: None,
            correct_index: question.correct_option_index,
            is_correct: false,
            time_spent_seconds: 1,
            category: question.category.clone(),
            timestamp: self.clock.now_utc(),
        });
        self.current_index += 1;
    }

    fn render_question(&mut self, paused: bool) -> PresentResult {
        let total = self.questions.len();
        let question = &self.questions[self.current_index];
        let progress = percentage(self.current_index as u32, total);

        self.presenter.set_question_text(&question.text)?;
        self.presenter.render_options(&question.options)?;
        self.presenter
            .update_progress(self.current_index + 1, total, progress)?;
        self.presenter
            .update_score(self.score, total, percentage(self.score, total))?;
        self.presenter.update_timer(self.timer.remaining())?;
        self.presenter.update_pause_button(paused)?;
        Ok(())
    }

    fn render_feedback(&mut self, selected: Option<usize>, correct_index: usize) -> PresentResult {
        let total = self.questions.len();
        self.presenter.show_answer_feedback(selected, correct_index)?;
        if let Some(explanation) = self.questions[self.current_index].explanation.as_deref() {
            self.presenter.show_explanation(explanation)?;
        }
        self.presenter
            .update_score(self.score, total, percentage(self.score, total))?;
        Ok(())
    }

    fn render_results(&mut self, report: &AnalysisReport) -> PresentResult {
        self.presenter.show_result_screen()?;
        self.presenter
            .update_score(self.score, self.questions.len(), report.percentage)?;
        self.presenter.show_performance_analysis(report)?;
        self.presenter
            .show_question_review(&self.questions, &self.answers)?;
        Ok(())
    }

    fn render_failed(&mut self, action: &str, error: PresenterError) {
        tracing::error!(session_id = %self.session_id, "Render failed while {}: {}", action, error);
        self.presenter
            .show_error(&format!("Something went wrong while {}.", action));
    }

    fn persist(&mut self) {
        let json = match self.snapshot().to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize quiz state: {}", e);
                metrics::record_snapshot_write(false);
                return;
            }
        };
        match self.storage.set(&self.config.storage_key, &json) {
            Ok(()) => {
                tracing::debug!("Snapshot saved ({} bytes)", json.len());
                metrics::record_snapshot_write(true);
            }
            Err(e) => {
                tracing::warn!("Failed to save quiz state: {}", e);
                metrics::record_snapshot_write(false);
            }
        }
    }

    fn clear_snapshot(&mut self) {
        if let Err(e) = self.storage.remove(&self.config.storage_key) {
            tracing::warn!("Failed to clear saved quiz state: {}", e);
        }
    }

    fn cancel_pending(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}
