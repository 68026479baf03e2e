//! Voice Countdown - A countdown timer with spoken time announcements
//!
//! This library provides the countdown engine, its announcement policy and the
//! background tasks that tick it once per second and voice its announcements.

pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, Preferences, TimerPreset};
pub use error::{PresetError, TimerError, TimerResult};
pub use state::{AppState, CountdownEngine, RunState, TimerEvent, TimerSnapshot};
pub use utils::{format_time, signals::shutdown_signal};
