//! Interactive control commands read from standard input

use std::sync::Arc;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::{config::parse_or_zero, state::AppState};

/// A control word typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Set { hours: u64, minutes: u64, seconds: u64 },
    Start,
    Pause,
    Resume,
    Reset,
    Stop,
    Status,
    Quit,
}

impl ControlCommand {
    /// Parse a line such as `pause` or `set 0 5 0`
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = match words.next()?.to_lowercase().as_str() {
            "set" => {
                let mut part = || words.next().map(parse_or_zero).unwrap_or(0);
                let (hours, minutes, seconds) = (part(), part(), part());
                Self::Set { hours, minutes, seconds }
            }
            "start" => Self::Start,
            "pause" | "p" => Self::Pause,
            "resume" | "r" => Self::Resume,
            "reset" => Self::Reset,
            "stop" => Self::Stop,
            "status" => Self::Status,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Apply a command to the timer. Returns false when the user asked to quit.
pub fn apply_command(state: &AppState, command: ControlCommand) -> bool {
    let result = match command {
        ControlCommand::Set { hours, minutes, seconds } => {
            state.configure(hours, minutes, seconds).map(|_| ())
        }
        ControlCommand::Start => state.start().map(|started| {
            if !started {
                info!("Timer is already running");
            }
        }),
        ControlCommand::Pause => state.pause().map(|paused| {
            if !paused {
                info!("Timer is not running");
            }
        }),
        ControlCommand::Resume => state.resume().map(|resumed| {
            if !resumed {
                info!("Timer is not paused");
            }
        }),
        ControlCommand::Reset => state.reset(),
        ControlCommand::Stop => state.stop(),
        ControlCommand::Status => state.get_timer_state().and_then(|snapshot| {
            let json = serde_json::to_string(&snapshot)
                .map_err(|e| format!("Failed to serialize status: {}", e))?;
            info!("Status: {} (uptime {})", json, state.get_uptime());
            Ok(())
        }),
        ControlCommand::Quit => return false,
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
    }
    true
}

/// Background task that reads control commands from stdin until quit or EOF
pub async fn controls_task(state: Arc<AppState>) {
    info!("Commands: set H M S | start | pause | resume | reset | stop | status | quit");

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match ControlCommand::parse(&line) {
                    Some(command) => {
                        if !apply_command(&state, command) {
                            info!("Quit requested");
                            return;
                        }
                    }
                    None => warn!("Unknown command: {}", line.trim()),
                }
            }
            Ok(None) => {
                info!("Input closed, controls disabled");
                // Keep running without interactive input
                std::future::pending::<()>().await;
            }
            Err(e) => {
                error!("Failed to read command: {}", e);
                return;
            }
        }
    }
}
