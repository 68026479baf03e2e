//! Run state and read-only timer snapshots

use serde::Serialize;

use crate::utils::time_format::{format_time, FormattedTime};

/// Lifecycle phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Completed => "completed",
        }
    }
}

/// Point-in-time view of the countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub run_state: RunState,
    pub is_running: bool,
    pub is_paused: bool,
    pub is_completed: bool,
    pub formatted: FormattedTime,
}

impl TimerSnapshot {
    /// Build a snapshot, clamping remaining time to the configured total
    pub fn new(total_seconds: u64, remaining_seconds: u64, run_state: RunState) -> Self {
        let remaining_seconds = remaining_seconds.min(total_seconds);
        Self {
            total_seconds,
            remaining_seconds,
            run_state,
            is_running: run_state == RunState::Running,
            is_paused: run_state == RunState::Paused,
            is_completed: run_state == RunState::Completed,
            formatted: format_time(remaining_seconds),
        }
    }

    /// Snapshot of an unconfigured idle timer
    pub fn idle() -> Self {
        Self::new(0, 0, RunState::Idle)
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}
