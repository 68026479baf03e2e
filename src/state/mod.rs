//! State management module
//!
//! This module contains the countdown engine, its announcement policy and the
//! shared application state that connects it to background tasks.

pub mod announcement;
pub mod app_state;
pub mod countdown;
pub mod timer_state;

// Re-export main types
pub use announcement::{announcement_for, AnnouncementGuard, TIMES_UP};
pub use app_state::{AppState, TimerEvent};
pub use countdown::{CountdownEngine, TimerHooks};
pub use timer_state::{RunState, TimerSnapshot};
