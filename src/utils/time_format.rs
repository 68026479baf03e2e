//! Clock-style formatting of second counts

use serde::Serialize;

/// A second count split into clock components
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Zero-padded `HH:MM:SS`; hours widen past two digits when needed
    pub display: String,
}

/// Split seconds into hours/minutes/seconds and render them as `HH:MM:SS`
pub fn format_time(total_seconds: u64) -> FormattedTime {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    FormattedTime {
        hours,
        minutes,
        seconds,
        display: format!("{:02}:{:02}:{:02}", hours, minutes, seconds),
    }
}
