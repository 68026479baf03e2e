//! Text-to-speech through an external command

use tokio::process::Command;
use tracing::{debug, info, warn};

/// How announcements are voiced
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// Program that receives the message as its only argument
    pub command: String,
}

impl SpeechConfig {
    pub fn new(enabled: bool, command: impl Into<String>) -> Self {
        Self {
            enabled,
            command: command.into(),
        }
    }

    /// Log-only configuration
    pub fn disabled() -> Self {
        Self::new(false, String::new())
    }
}

/// Speak a message with the configured command
pub async fn speak(config: &SpeechConfig, message: &str) -> Result<(), String> {
    if !config.enabled {
        debug!("Voice disabled, not speaking: {}", message);
        return Ok(());
    }

    debug!("Speaking with {}: {}", config.command, message);

    let output = Command::new(&config.command)
        .arg(message)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", config.command, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", config.command, stderr));
    }

    Ok(())
}

/// Check that the speech command can be launched; disables voice if it cannot
pub async fn check_speech_available(config: SpeechConfig) -> SpeechConfig {
    if !config.enabled {
        return config;
    }

    match Command::new(&config.command).arg("--version").output().await {
        Ok(_) => {
            info!("{} is available for announcements", config.command);
            config
        }
        Err(e) => {
            warn!(
                "{} is not available ({}), announcements will only be logged",
                config.command, e
            );
            SpeechConfig::disabled()
        }
    }
}
