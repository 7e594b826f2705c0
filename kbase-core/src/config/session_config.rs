use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Session protocol configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Interval between heartbeats on an active session.
    pub heartbeat_interval_ms: u64,
    /// How long an outstanding heartbeat may go unanswered.
    pub heartbeat_timeout_ms: u64,
    /// Text of the welcome frame sent on activation.
    pub welcome_message: String,
    /// Frames a session buffers behind the question in flight. Frames
    /// past this are answered with an error and dropped.
    pub max_pending_frames: usize,
}

impl SessionConfig {
    /// Never shorter than 1 ms; a zero period cannot drive a timer.
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms.max(1))
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_millis(self.heartbeat_timeout_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_ms: defaults::DEFAULT_HEARTBEAT_INTERVAL_MS,
            heartbeat_timeout_ms: defaults::DEFAULT_HEARTBEAT_TIMEOUT_MS,
            welcome_message: defaults::DEFAULT_WELCOME_MESSAGE.to_string(),
            max_pending_frames: defaults::DEFAULT_MAX_PENDING_FRAMES,
        }
    }
}
