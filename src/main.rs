//! Voice Countdown - A countdown timer with spoken time announcements
//!
//! This is the main entry point for the voice-countdown application.

use std::sync::Arc;
use tracing::info;

use voice_countdown::{
    config::{Config, Preferences},
    services::{check_speech_available, SpeechConfig},
    state::AppState,
    tasks::{announcer_task, controls_task, ticker_task},
    utils::{format_time, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("voice_countdown={}", config.log_level()))
        .init();

    info!("Starting voice-countdown v2.0.0");

    let prefs = Preferences::default();
    let (hours, minutes, seconds) = config.duration(&prefs)?;
    let speech = check_speech_available(SpeechConfig::new(
        config.voice_enabled(&prefs),
        config.speech_command.clone(),
    ))
    .await;

    let state = Arc::new(AppState::new());
    let total = state
        .configure(hours, minutes, seconds)
        .map_err(anyhow::Error::msg)?;
    info!("Configuration: duration={}, voice={}", format_time(total).display, speech.enabled);

    // Start the tick source before the timer so no second is missed
    tokio::spawn(ticker_task(Arc::clone(&state)));
    let announcer = tokio::spawn(announcer_task(Arc::clone(&state), speech));
    let controls = tokio::spawn(controls_task(Arc::clone(&state)));

    // Let the announcer subscribe before the first event can fire
    tokio::task::yield_now().await;
    state.start().map_err(anyhow::Error::msg)?;

    tokio::select! {
        result = announcer => {
            let delivered = result?;
            info!("Delivered {} announcements", delivered);
        }
        _ = controls => {
            info!("Stopping at user request");
            state.stop().map_err(anyhow::Error::msg)?;
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            state.stop().map_err(anyhow::Error::msg)?;
        }
    }

    info!("voice-countdown finished");
    Ok(())
}
