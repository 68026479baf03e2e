//! Background tasks module
//!
//! This module contains the tick source and the tasks that consume timer events.

pub mod announcer;
pub mod controls;
pub mod ticker;

// Re-export main functions
pub use announcer::announcer_task;
pub use controls::{apply_command, controls_task, ControlCommand};
pub use ticker::ticker_task;
