//! Shared application state wiring the countdown engine to async tasks

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::{CountdownEngine, TimerSnapshot};
use crate::error::TimerError;

/// Notifications published by the engine hooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum TimerEvent {
    Tick { remaining_seconds: u64, formatted: String },
    Announcement { message: String },
    Complete,
}

/// Application state that owns the countdown engine
#[derive(Debug)]
pub struct AppState {
    /// The countdown engine; hooks forward into `event_tx`
    pub engine: Arc<Mutex<CountdownEngine>>,
    /// Tick, announcement and completion notifications
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Latest snapshot, refreshed after every operation
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState with an idle, unconfigured engine
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::idle());

        let mut engine = CountdownEngine::new();

        let tx = event_tx.clone();
        engine.set_on_tick(move |remaining_seconds, formatted| {
            // No subscribers is not an error
            let _ = tx.send(TimerEvent::Tick {
                remaining_seconds,
                formatted: formatted.to_string(),
            });
        });
        let tx = event_tx.clone();
        engine.set_on_announcement(move |message| {
            let _ = tx.send(TimerEvent::Announcement { message: message.to_string() });
        });
        let tx = event_tx.clone();
        engine.set_on_complete(move || {
            let _ = tx.send(TimerEvent::Complete);
        });

        Self {
            engine: Arc::new(Mutex::new(engine)),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Run an operation against the engine, record it and publish the new snapshot
    pub fn with_engine<T, F>(&self, action: &str, op: F) -> Result<T, String>
    where
        F: FnOnce(&mut CountdownEngine) -> T,
    {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))?;

        let result = op(&mut *engine);
        let snapshot = engine.state();
        drop(engine); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send snapshot update: {}", e);
        }

        Ok(result)
    }

    /// Configure the countdown duration
    pub fn configure(&self, hours: u64, minutes: u64, seconds: u64) -> Result<u64, String> {
        info!("Configuring timer: {}h {}m {}s", hours, minutes, seconds);
        self.with_engine("configure", |e| e.configure(hours, minutes, seconds))?
            .map_err(|e: TimerError| e.to_string())
    }

    pub fn start(&self) -> Result<bool, String> {
        self.with_engine("start", |e| e.start())?
            .map_err(|e| e.to_string())
    }

    pub fn pause(&self) -> Result<bool, String> {
        self.with_engine("pause", |e| e.pause())
    }

    pub fn resume(&self) -> Result<bool, String> {
        self.with_engine("resume", |e| e.resume())
    }

    pub fn reset(&self) -> Result<(), String> {
        self.with_engine("reset", |e| e.reset())
    }

    pub fn stop(&self) -> Result<(), String> {
        self.with_engine("stop", |e| e.stop())
    }

    /// Advance the countdown by one second
    pub fn tick(&self) -> Result<(), String> {
        self.with_engine("tick", |e| e.tick())
    }

    /// Get the current timer snapshot
    pub fn get_timer_state(&self) -> Result<TimerSnapshot, String> {
        self.engine.lock()
            .map(|engine| engine.state())
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Elapsed wall time since the application started, as `1h 2m 3s`
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
