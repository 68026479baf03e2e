//! Announcement policy and de-duplication guard

use tracing::debug;

/// Spoken when the countdown reaches zero
pub const TIMES_UP: &str = "Time's up!";

/// Pick the announcement for a remaining-seconds value, if any.
///
/// Priority: final ten-second numerals, then the 30 second mark, then
/// whole minutes.
pub fn announcement_for(remaining_seconds: u64) -> Option<String> {
    match remaining_seconds {
        1..=10 => Some(remaining_seconds.to_string()),
        30 => Some("30 seconds remaining".to_string()),
        n if n > 0 && n % 60 == 0 => {
            let minutes = n / 60;
            let unit = if minutes == 1 { "minute" } else { "minutes" };
            Some(format!("{} {} remaining", minutes, unit))
        }
        _ => None,
    }
}

/// Remembers the last announcement so a value is never spoken twice in a row
#[derive(Debug, Clone, Default)]
pub struct AnnouncementGuard {
    last: Option<String>,
}

impl AnnouncementGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` and return true unless it matches the last admitted key
    pub fn admit(&mut self, key: &str) -> bool {
        if self.last.as_deref() == Some(key) {
            debug!("Suppressing repeated announcement: {}", key);
            return false;
        }
        self.last = Some(key.to_string());
        true
    }

    /// Store a key without the equality check
    pub fn force(&mut self, key: &str) {
        self.last = Some(key.to_string());
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_seconds_announce_numerals() {
        for n in 1..=10 {
            assert_eq!(announcement_for(n), Some(n.to_string()));
        }
    }

    #[test]
    fn thirty_seconds_wins_over_nothing() {
        assert_eq!(announcement_for(30).as_deref(), Some("30 seconds remaining"));
    }

    #[test]
    fn minute_marks_use_singular_and_plural() {
        assert_eq!(announcement_for(60).as_deref(), Some("1 minute remaining"));
        assert_eq!(announcement_for(120).as_deref(), Some("2 minutes remaining"));
        assert_eq!(announcement_for(3600).as_deref(), Some("60 minutes remaining"));
    }

    #[test]
    fn other_values_are_silent() {
        for n in [0, 11, 29, 31, 59, 61, 119] {
            assert_eq!(announcement_for(n), None, "value {}", n);
        }
    }

    #[test]
    fn guard_rejects_repeats_until_cleared() {
        let mut guard = AnnouncementGuard::new();
        assert!(guard.admit("5"));
        assert!(!guard.admit("5"));
        assert!(guard.admit("4"));
        assert_eq!(guard.last(), Some("4"));

        guard.clear();
        assert_eq!(guard.last(), None);
        assert!(guard.admit("4"));
    }
}
