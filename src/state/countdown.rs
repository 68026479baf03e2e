//! Countdown engine: elapsed-time accounting and announcement triggering
//!
//! The engine never schedules itself. An external source calls [`CountdownEngine::tick`]
//! once per second while the engine is running.

use tracing::{debug, info};

use super::announcement::{announcement_for, AnnouncementGuard, TIMES_UP};
use super::timer_state::{RunState, TimerSnapshot};
use crate::error::{TimerError, TimerResult};
use crate::utils::time_format::format_time;

pub type TickHook = Box<dyn FnMut(u64, &str) + Send>;
pub type AnnouncementHook = Box<dyn FnMut(&str) + Send>;
pub type CompleteHook = Box<dyn FnMut() + Send>;

/// Outward notification callbacks; any of them may be left unset
#[derive(Default)]
pub struct TimerHooks {
    pub on_tick: Option<TickHook>,
    pub on_announcement: Option<AnnouncementHook>,
    pub on_complete: Option<CompleteHook>,
}

impl std::fmt::Debug for TimerHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHooks")
            .field("on_tick", &self.on_tick.is_some())
            .field("on_announcement", &self.on_announcement.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Countdown timer state machine
#[derive(Debug, Default)]
pub struct CountdownEngine {
    total_seconds: u64,
    remaining_seconds: u64,
    run_state: RunState,
    guard: AnnouncementGuard,
    hooks: TimerHooks,
}

impl CountdownEngine {
    /// Create an idle engine with no duration configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle engine with the given hooks installed
    pub fn with_hooks(hooks: TimerHooks) -> Self {
        Self {
            hooks,
            ..Self::default()
        }
    }

    pub fn set_on_tick<F>(&mut self, hook: F)
    where
        F: FnMut(u64, &str) + Send + 'static,
    {
        self.hooks.on_tick = Some(Box::new(hook));
    }

    pub fn set_on_announcement<F>(&mut self, hook: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.hooks.on_announcement = Some(Box::new(hook));
    }

    pub fn set_on_complete<F>(&mut self, hook: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.hooks.on_complete = Some(Box::new(hook));
    }

    /// Set the countdown duration. Returns the new total in seconds.
    ///
    /// Leaves the engine idle with the full duration remaining. Fails while running.
    pub fn configure(&mut self, hours: u64, minutes: u64, seconds: u64) -> TimerResult<u64> {
        if self.run_state == RunState::Running {
            return Err(TimerError::InvalidState);
        }

        let total = hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds);

        self.total_seconds = total;
        self.remaining_seconds = total;
        self.run_state = RunState::Idle;
        self.guard.clear();

        info!("Timer configured for {} ({}s)", format_time(total).display, total);
        Ok(total)
    }

    /// Begin counting down. Returns false if already running.
    pub fn start(&mut self) -> TimerResult<bool> {
        if self.run_state == RunState::Running {
            debug!("Start ignored, timer already running");
            return Ok(false);
        }
        if self.remaining_seconds == 0 {
            return Err(TimerError::ZeroDuration);
        }

        self.run_state = RunState::Running;
        info!("Timer started with {}s remaining", self.remaining_seconds);
        Ok(true)
    }

    /// Returns false if the timer was not running
    pub fn pause(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        self.run_state = RunState::Paused;
        info!("Timer paused with {}s remaining", self.remaining_seconds);
        true
    }

    /// Returns false if the timer was not paused
    pub fn resume(&mut self) -> bool {
        if self.run_state != RunState::Paused {
            return false;
        }
        self.run_state = RunState::Running;
        info!("Timer resumed with {}s remaining", self.remaining_seconds);
        true
    }

    /// Return to idle with the configured duration restored
    pub fn reset(&mut self) {
        self.run_state = RunState::Idle;
        self.remaining_seconds = self.total_seconds;
        self.guard.clear();
        info!("Timer reset to {}s", self.total_seconds);
    }

    /// Return to idle and discard the configured duration
    pub fn stop(&mut self) {
        self.run_state = RunState::Idle;
        self.total_seconds = 0;
        self.remaining_seconds = 0;
        self.guard.clear();
        info!("Timer stopped");
    }

    /// Advance the countdown by one second. No-op unless running.
    pub fn tick(&mut self) {
        if self.run_state != RunState::Running {
            debug!("Tick ignored in {} state", self.run_state.as_str());
            return;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        let formatted = format_time(self.remaining_seconds);
        debug!("Tick: {}", formatted.display);
        if let Some(hook) = self.hooks.on_tick.as_mut() {
            hook(self.remaining_seconds, &formatted.display);
        }

        self.check_announcements();

        if self.remaining_seconds == 0 {
            self.complete();
        }
    }

    /// Emit the announcement for the current remaining time, unless it was
    /// the last one emitted
    pub fn check_announcements(&mut self) {
        let Some(message) = announcement_for(self.remaining_seconds) else {
            return;
        };
        if self.guard.admit(&message) {
            self.announce(&message);
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> TimerSnapshot {
        TimerSnapshot::new(self.total_seconds, self.remaining_seconds, self.run_state)
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Last announcement admitted by the de-duplication guard
    pub fn last_announcement(&self) -> Option<&str> {
        self.guard.last()
    }

    fn complete(&mut self) {
        self.remaining_seconds = 0;
        self.run_state = RunState::Completed;
        info!("Timer completed");

        self.guard.force(TIMES_UP);
        self.announce(TIMES_UP);

        if let Some(hook) = self.hooks.on_complete.as_mut() {
            hook();
        }
    }

    fn announce(&mut self, message: &str) {
        info!("Announcement: {}", message);
        if let Some(hook) = self.hooks.on_announcement.as_mut() {
            hook(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Engine whose announcements are collected into a shared vector
    fn recording_engine() -> (CountdownEngine, Arc<Mutex<Vec<String>>>) {
        let said = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&said);
        let mut engine = CountdownEngine::new();
        engine.set_on_announcement(move |msg| sink.lock().unwrap().push(msg.to_string()));
        (engine, said)
    }

    #[test]
    fn configure_computes_total() {
        let mut engine = CountdownEngine::new();
        for (h, m, s) in [(0, 0, 0), (1, 2, 3), (0, 59, 59), (23, 0, 1)] {
            let total = engine.configure(h, m, s).unwrap();
            assert_eq!(total, h * 3600 + m * 60 + s);
            assert_eq!(engine.remaining_seconds(), total);
        }
    }

    #[test]
    fn start_with_zero_duration_fails() {
        let mut engine = CountdownEngine::new();
        assert_eq!(engine.start(), Err(TimerError::ZeroDuration));
        assert_eq!(engine.run_state(), RunState::Idle);
    }

    #[test]
    fn second_start_is_noop() {
        let mut engine = CountdownEngine::new();
        engine.configure(0, 0, 5).unwrap();
        assert_eq!(engine.start(), Ok(true));
        assert_eq!(engine.start(), Ok(false));
        assert_eq!(engine.run_state(), RunState::Running);
    }

    #[test]
    fn configure_while_running_is_rejected() {
        let mut engine = CountdownEngine::new();
        engine.configure(0, 1, 0).unwrap();
        engine.start().unwrap();
        engine.tick();

        assert_eq!(engine.configure(0, 0, 10), Err(TimerError::InvalidState));
        assert_eq!(engine.total_seconds(), 60);
        assert_eq!(engine.remaining_seconds(), 59);
        assert_eq!(engine.run_state(), RunState::Running);
    }

    #[test]
    fn configure_while_paused_returns_to_idle() {
        let mut engine = CountdownEngine::new();
        engine.configure(0, 0, 20).unwrap();
        engine.start().unwrap();
        engine.pause();

        assert_eq!(engine.configure(0, 0, 8), Ok(8));
        assert_eq!(engine.run_state(), RunState::Idle);
    }

    #[test]
    fn pause_and_resume_preserve_remaining() {
        let mut engine = CountdownEngine::new();
        engine.configure(0, 0, 20).unwrap();
        engine.start().unwrap();
        engine.tick();
        engine.tick();

        assert!(engine.pause());
        assert!(!engine.pause());
        engine.tick();
        assert_eq!(engine.remaining_seconds(), 18);

        assert!(engine.resume());
        assert!(!engine.resume());
        assert_eq!(engine.remaining_seconds(), 18);
        assert_eq!(engine.run_state(), RunState::Running);
    }

    #[test]
    fn resume_requires_paused() {
        let mut engine = CountdownEngine::new();
        engine.configure(0, 0, 3).unwrap();
        assert!(!engine.resume());
        assert_eq!(engine.run_state(), RunState::Idle);
    }

    #[test]
    fn reset_restores_total_and_clears_guard() {
        let (mut engine, _) = recording_engine();
        engine.configure(0, 0, 12).unwrap();
        engine.start().unwrap();
        for _ in 0..4 {
            engine.tick();
        }
        assert_eq!(engine.last_announcement(), Some("8"));

        engine.reset();
        assert_eq!(engine.remaining_seconds(), 12);
        assert_eq!(engine.run_state(), RunState::Idle);
        assert_eq!(engine.last_announcement(), None);

        engine.reset();
        assert_eq!(engine.remaining_seconds(), 12);
    }

    #[test]
    fn stop_discards_configuration() {
        let mut engine = CountdownEngine::new();
        engine.configure(1, 0, 0).unwrap();
        engine.start().unwrap();
        engine.stop();

        assert_eq!(engine.total_seconds(), 0);
        assert_eq!(engine.remaining_seconds(), 0);
        assert_eq!(engine.run_state(), RunState::Idle);
        assert_eq!(engine.start(), Err(TimerError::ZeroDuration));
    }

    #[test]
    fn tick_outside_running_is_ignored() {
        let mut engine = CountdownEngine::new();
        engine.configure(0, 0, 5).unwrap();
        engine.tick();
        assert_eq!(engine.remaining_seconds(), 5);
    }

    #[test]
    fn final_tick_completes_once() {
        let (mut engine, said) = recording_engine();
        let completions = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&completions);
        engine.set_on_complete(move || *counter.lock().unwrap() += 1);

        engine.configure(0, 0, 1).unwrap();
        engine.start().unwrap();
        engine.tick();
        engine.tick();

        let snap = engine.state();
        assert_eq!(snap.remaining_seconds, 0);
        assert!(snap.is_completed);
        assert_eq!(*completions.lock().unwrap(), 1);

        let said = said.lock().unwrap();
        assert_eq!(said.iter().filter(|m| *m == TIMES_UP).count(), 1);
        assert_eq!(said.last().map(String::as_str), Some(TIMES_UP));
    }

    #[test]
    fn tick_hook_receives_formatted_time() {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ticks);
        let mut engine = CountdownEngine::new();
        engine.set_on_tick(move |remaining, display| {
            sink.lock().unwrap().push((remaining, display.to_string()))
        });

        engine.configure(1, 0, 1).unwrap();
        engine.start().unwrap();
        engine.tick();
        engine.tick();

        let ticks = ticks.lock().unwrap();
        assert_eq!(ticks[0], (3600, "01:00:00".to_string()));
        assert_eq!(ticks[1], (3599, "00:59:59".to_string()));
    }

    #[test]
    fn check_announcements_deduplicates() {
        let (mut engine, said) = recording_engine();
        engine.configure(0, 0, 7).unwrap();

        engine.check_announcements();
        engine.check_announcements();

        assert_eq!(*said.lock().unwrap(), vec!["7".to_string()]);
    }

    #[test]
    fn unset_hooks_are_tolerated() {
        let mut engine = CountdownEngine::new();
        engine.configure(0, 0, 2).unwrap();
        engine.start().unwrap();
        engine.tick();
        engine.tick();
        assert_eq!(engine.run_state(), RunState::Completed);
    }

    #[test]
    fn start_after_completion_fails() {
        let mut engine = CountdownEngine::new();
        engine.configure(0, 0, 1).unwrap();
        engine.start().unwrap();
        engine.tick();
        assert_eq!(engine.start(), Err(TimerError::ZeroDuration));

        engine.reset();
        assert_eq!(engine.start(), Ok(true));
    }
}
