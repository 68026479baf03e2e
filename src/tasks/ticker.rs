//! Once-per-second tick source for the countdown engine

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that ticks the engine while it is running.
///
/// Ticking starts one full period after the engine enters the running state
/// and stops as soon as it leaves it, so paused time is never counted.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task");

    let mut snapshot_rx = state.snapshot_tx.subscribe();

    loop {
        let running = snapshot_rx.borrow_and_update().is_running;
        if !running {
            // Wait for the next state change before checking again
            if snapshot_rx.changed().await.is_err() {
                debug!("Snapshot channel closed, ticker exiting");
                return;
            }
            continue;
        }

        debug!("Timer running, ticking every {:?}", TICK_PERIOD);
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = state.tick() {
                        error!("Failed to tick timer: {}", e);
                    }
                }

                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        debug!("Snapshot channel closed, ticker exiting");
                        return;
                    }
                    let running = snapshot_rx.borrow_and_update().is_running;
                    if !running {
                        debug!("Timer left running state, ticks suspended");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{RunState, TimerEvent};
    use tokio::sync::broadcast;

    async fn next_tick(events: &mut broadcast::Receiver<TimerEvent>) -> u64 {
        loop {
            if let TimerEvent::Tick { remaining_seconds, .. } = events.recv().await.unwrap() {
                return remaining_seconds;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_until_complete() {
        let state = Arc::new(AppState::new());
        let mut events = state.event_tx.subscribe();
        tokio::spawn(ticker_task(Arc::clone(&state)));

        state.configure(0, 0, 3).unwrap();
        let started = Instant::now();
        state.start().unwrap();

        let mut ticks = Vec::new();
        loop {
            match events.recv().await.unwrap() {
                TimerEvent::Tick { remaining_seconds, .. } => ticks.push(remaining_seconds),
                TimerEvent::Complete => break,
                TimerEvent::Announcement { .. } => {}
            }
        }

        assert_eq!(ticks, vec![2, 1, 0]);
        assert_eq!(started.elapsed().as_secs(), 3);
        assert_eq!(state.get_timer_state().unwrap().run_state, RunState::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn no_ticks_while_paused() {
        let state = Arc::new(AppState::new());
        let mut events = state.event_tx.subscribe();
        tokio::spawn(ticker_task(Arc::clone(&state)));

        state.configure(0, 0, 20).unwrap();
        state.start().unwrap();
        assert_eq!(next_tick(&mut events).await, 19);

        state.pause().unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 19);
        assert!(events.try_recv().is_err());

        state.resume().unwrap();
        assert_eq!(next_tick(&mut events).await, 18);
    }
}
