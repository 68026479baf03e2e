//! Announcement delivery task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{
    services::{speak, SpeechConfig},
    state::{AppState, TimerEvent},
};

/// Background task that voices announcements until the countdown completes.
///
/// Returns the number of announcements delivered.
pub async fn announcer_task(state: Arc<AppState>, speech: SpeechConfig) -> usize {
    info!("Starting announcer task (voice {})", if speech.enabled { "on" } else { "off" });

    let mut events = state.event_tx.subscribe();
    let mut delivered = 0;

    loop {
        match events.recv().await {
            Ok(TimerEvent::Tick { formatted, .. }) => {
                info!("{}", formatted);
            }
            Ok(TimerEvent::Announcement { message }) => {
                delivered += 1;
                if let Err(e) = speak(&speech, &message).await {
                    warn!("Failed to speak announcement '{}': {}", message, e);
                }
            }
            Ok(TimerEvent::Complete) => {
                info!("Countdown complete");
                return delivered;
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Announcer lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Event channel closed, announcer exiting");
                return delivered;
            }
        }
    }
}
