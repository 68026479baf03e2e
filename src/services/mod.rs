//! External service module
//!
//! This module contains the text-to-speech sink that voices announcements.

pub mod speech;

// Re-export main functions
pub use speech::*;
