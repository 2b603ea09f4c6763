use crate::models::TimerEvent;
use crate::utils::time::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
    Stopped,
}

/// Per-question countdown driven by an external once-per-second interrupt.
///
/// Each `tick` deducts the wall-clock seconds actually elapsed since the
/// previous tick (at least one), so a throttled host that delivers one tick
/// after a long gap still drains the right amount of time.
#[derive(Debug)]
pub struct CountdownTimer<C: Clock> {
    clock: C,
    seconds_per_question: u32,
    remaining: u32,
    state: TimerState,
    last_tick_ms: i64,
    warned: bool,
}

impl<C: Clock> CountdownTimer<C> {
    pub fn new(seconds_per_question: u32, clock: C) -> Self {
        let seconds_per_question = seconds_per_question.max(1);
        let now = clock.now_ms();
        Self {
            clock,
            seconds_per_question,
            remaining: seconds_per_question,
            state: TimerState::Idle,
            last_tick_ms: now,
            warned: false,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Remaining-seconds value at or below which the low-time warning fires.
    ///
    /// The warning fires once, on the first tick that lands at or below this
    /// value, so a drift-corrected jump past it still warns. Below five
    /// seconds per question the threshold is 0 and no warning is ever shown,
    /// since expiry takes over at 0.
    pub fn low_time_threshold(&self) -> u32 {
        self.seconds_per_question / 5
    }

    /// Starts (or restarts) the countdown from the current remaining time.
    pub fn start(&mut self) {
        self.stop();
        if self.remaining == 0 {
            self.remaining = self.seconds_per_question;
            self.warned = false;
        }
        self.state = TimerState::Running;
        self.last_tick_ms = self.clock.now_ms();
    }

    /// Full duration, pause cleared, running.
    pub fn reset(&mut self) {
        self.stop();
        self.remaining = self.seconds_per_question;
        self.warned = false;
        self.start();
    }

    /// Seeds the countdown from persisted state.
    pub fn restore(&mut self, remaining: u32, paused: bool) {
        self.stop();
        self.remaining = remaining.clamp(1, self.seconds_per_question);
        self.warned = self.remaining <= self.low_time_threshold();
        self.state = if paused {
            TimerState::Paused
        } else {
            TimerState::Running
        };
        self.last_tick_ms = self.clock.now_ms();
    }

    pub fn stop(&mut self) {
        if matches!(self.state, TimerState::Running | TimerState::Paused) {
            self.state = TimerState::Stopped;
        }
    }

    pub fn pause(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(TimerEvent::PauseChanged { paused: true })
    }

    pub fn resume(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        // the paused interval must not count as elapsed time
        self.last_tick_ms = self.clock.now_ms();
        Some(TimerEvent::PauseChanged { paused: false })
    }

    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if self.state != TimerState::Running {
            return Vec::new();
        }

        let now = self.clock.now_ms();
        let elapsed_secs = u32::try_from((now - self.last_tick_ms).max(0) / 1000).unwrap_or(u32::MAX);
        self.last_tick_ms = now;
        self.remaining = self.remaining.saturating_sub(elapsed_secs.max(1));

        let mut events = vec![TimerEvent::Tick {
            remaining_seconds: self.remaining,
        }];

        if !self.warned && self.remaining > 0 && self.remaining <= self.low_time_threshold() {
            self.warned = true;
            events.push(TimerEvent::LowTimeWarning {
                remaining_seconds: self.remaining,
            });
        }

        if self.remaining == 0 {
            self.state = TimerState::Expired;
            events.push(TimerEvent::Expired);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::ManualClock;

    fn running_timer(seconds: u32) -> (CountdownTimer<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        let mut timer = CountdownTimer::new(seconds, clock.clone());
        timer.start();
        (timer, clock)
    }

    fn tick_after(timer: &mut CountdownTimer<ManualClock>, clock: &ManualClock, secs: i64) -> Vec<TimerEvent> {
        clock.advance_secs(secs);
        timer.tick()
    }

    #[test]
    fn throttled_gap_is_deducted_in_full() {
        let (mut timer, clock) = running_timer(30);
        let events = tick_after(&mut timer, &clock, 7);
        assert_eq!(timer.remaining(), 23);
        assert_eq!(events[0], TimerEvent::Tick { remaining_seconds: 23 });
    }

    #[test]
    fn short_gap_still_counts_one_second() {
        let (mut timer, clock) = running_timer(30);
        clock.advance_ms(400);
        timer.tick();
        assert_eq!(timer.remaining(), 29);
    }

    #[test]
    fn paused_interval_is_not_counted() {
        let (mut timer, clock) = running_timer(30);
        for _ in 0..3 {
            tick_after(&mut timer, &clock, 1);
        }
        assert_eq!(timer.remaining(), 27);

        assert_eq!(timer.pause(), Some(TimerEvent::PauseChanged { paused: true }));
        clock.advance_secs(50);
        assert!(timer.tick().is_empty());
        assert_eq!(timer.resume(), Some(TimerEvent::PauseChanged { paused: false }));

        tick_after(&mut timer, &clock, 1);
        assert_eq!(timer.remaining(), 26);
    }

    #[test]
    fn low_time_warning_fires_once() {
        let (mut timer, clock) = running_timer(10);
        let mut warnings = 0;
        for _ in 0..9 {
            let events = tick_after(&mut timer, &clock, 1);
            warnings += events
                .iter()
                .filter(|e| matches!(e, TimerEvent::LowTimeWarning { remaining_seconds: 2 }))
                .count();
            if timer.remaining() == 2 {
                timer.pause();
                timer.resume();
            }
        }
        assert_eq!(warnings, 1);
        assert_eq!(timer.remaining(), 1);
    }

    #[test]
    fn expires_exactly_once() {
        let (mut timer, clock) = running_timer(3);
        let events = tick_after(&mut timer, &clock, 5);
        assert_eq!(timer.remaining(), 0);
        assert_eq!(events.last(), Some(&TimerEvent::Expired));
        assert_eq!(timer.state(), TimerState::Expired);
        assert!(tick_after(&mut timer, &clock, 1).is_empty());
    }

    #[test]
    fn paused_timer_never_expires() {
        let (mut timer, clock) = running_timer(2);
        timer.pause();
        clock.advance_secs(10);
        assert!(timer.tick().is_empty());
        assert_eq!(timer.remaining(), 2);
    }

    #[test]
    fn stop_is_idempotent_and_reset_restores_full_time() {
        let (mut timer, clock) = running_timer(20);
        tick_after(&mut timer, &clock, 4);
        timer.stop();
        timer.stop();
        assert_eq!(timer.state(), TimerState::Stopped);
        assert!(tick_after(&mut timer, &clock, 1).is_empty());

        timer.reset();
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 20);
    }

    #[test]
    fn start_twice_keeps_a_single_run() {
        let (mut timer, clock) = running_timer(20);
        clock.advance_secs(5);
        timer.start();
        tick_after(&mut timer, &clock, 1);
        assert_eq!(timer.remaining(), 19);
    }

    #[test]
    fn restore_keeps_pause_and_clamps() {
        let clock = ManualClock::new(0);
        let mut timer = CountdownTimer::new(30, clock.clone());
        timer.restore(90, true);
        assert!(timer.is_paused());
        assert_eq!(timer.remaining(), 30);

        timer.restore(4, false);
        clock.advance_secs(1);
        let events = timer.tick();
        // already under the threshold when restored, so no second warning
        assert_eq!(events, vec![TimerEvent::Tick { remaining_seconds: 3 }]);
    }

    #[test]
    fn short_budget_never_warns() {
        let (mut timer, clock) = running_timer(4);
        assert_eq!(timer.low_time_threshold(), 0);

        let events: Vec<TimerEvent> = (0..4)
            .flat_map(|_| tick_after(&mut timer, &clock, 1))
            .collect();
        assert!(!events
            .iter()
            .any(|e| matches!(e, TimerEvent::LowTimeWarning { .. })));
        assert_eq!(events.last(), Some(&TimerEvent::Expired));
    }
}
