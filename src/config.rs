//! Configuration, CLI argument handling, preferences and presets

use std::collections::HashMap;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::PresetError;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "voice-countdown")]
#[command(about = "A countdown timer with spoken time announcements")]
#[command(version = "2.0.0")]
pub struct Config {
    /// Hours to count down (invalid values count as 0)
    #[arg(long)]
    pub hours: Option<String>,

    /// Minutes to count down (invalid values count as 0)
    #[arg(short, long)]
    pub minutes: Option<String>,

    /// Seconds to count down (invalid values count as 0)
    #[arg(short, long)]
    pub seconds: Option<String>,

    /// Use a built-in preset instead of hours/minutes/seconds
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Disable spoken announcements
    #[arg(long)]
    pub no_voice: bool,

    /// Text-to-speech command that receives each announcement as its argument
    #[arg(long, default_value = "espeak")]
    pub speech_command: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the duration to run as (hours, minutes, seconds).
    ///
    /// A preset wins; otherwise each part falls back to the preference default
    /// when it is not given on the command line.
    pub fn duration(&self, prefs: &Preferences) -> Result<(u64, u64, u64), PresetError> {
        if let Some(name) = &self.preset {
            let preset = TimerPreset::builtin(name)?;
            return Ok((preset.hours, preset.minutes, preset.seconds));
        }

        let part = |arg: &Option<String>, default: u64| {
            arg.as_deref().map(parse_or_zero).unwrap_or(default)
        };
        Ok((
            part(&self.hours, prefs.default_hours),
            part(&self.minutes, prefs.default_minutes),
            part(&self.seconds, prefs.default_seconds),
        ))
    }

    /// Whether announcements should be spoken
    pub fn voice_enabled(&self, prefs: &Preferences) -> bool {
        prefs.voice_enabled && !self.no_voice
    }
}

/// Parse a non-negative integer, treating anything else as 0
pub fn parse_or_zero(value: &str) -> u64 {
    value.trim().parse().unwrap_or(0)
}

/// User preferences as stored by the preferences service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub voice_enabled: bool,
    pub default_hours: u64,
    pub default_minutes: u64,
    pub default_seconds: u64,
}

impl Preferences {
    /// Build preferences from raw string values, falling back to defaults
    /// for missing keys and to 0 for unparseable numbers
    pub fn from_map(values: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str, default: u64| {
            values.get(key).map(|v| parse_or_zero(v)).unwrap_or(default)
        };

        Self {
            voice_enabled: values
                .get("voice_enabled")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.voice_enabled),
            default_hours: number("default_hours", defaults.default_hours),
            default_minutes: number("default_minutes", defaults.default_minutes),
            default_seconds: number("default_seconds", defaults.default_seconds),
        }
    }

    /// Raw string form, keyed the same way `from_map` reads it
    pub fn to_map(&self) -> HashMap<String, String> {
        HashMap::from([
            ("voice_enabled".to_string(), self.voice_enabled.to_string()),
            ("default_hours".to_string(), self.default_hours.to_string()),
            ("default_minutes".to_string(), self.default_minutes.to_string()),
            ("default_seconds".to_string(), self.default_seconds.to_string()),
        ])
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            voice_enabled: true,
            default_hours: 0,
            default_minutes: 1,
            default_seconds: 0,
        }
    }
}

/// A named timer duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerPreset {
    pub name: String,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimerPreset {
    /// Create a validated preset
    pub fn new(name: &str, hours: u64, minutes: u64, seconds: u64) -> Result<Self, PresetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PresetError::MissingName);
        }
        if hours > 23 {
            return Err(PresetError::HoursOutOfRange(hours));
        }
        if minutes > 59 {
            return Err(PresetError::MinutesOutOfRange(minutes));
        }
        if seconds > 59 {
            return Err(PresetError::SecondsOutOfRange(seconds));
        }

        Ok(Self {
            name: name.to_string(),
            hours,
            minutes,
            seconds,
        })
    }

    /// Look up a built-in preset by name
    pub fn builtin(name: &str) -> Result<Self, PresetError> {
        match name {
            "pomodoro" => Self::new(name, 0, 25, 0),
            "short-break" => Self::new(name, 0, 5, 0),
            "long-break" => Self::new(name, 0, 15, 0),
            "one-minute" => Self::new(name, 0, 1, 0),
            _ => Err(PresetError::Unknown(name.to_string())),
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}
