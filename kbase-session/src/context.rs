//! SessionContext: registry snapshot of one live session.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle: `Connecting → Active → Closing → Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Connecting,
    Active,
    Closing,
    Closed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Active => "active",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-session bookkeeping visible through the manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// Unique session identifier.
    pub session_id: String,
    /// When the connection was accepted.
    pub created_at: DateTime<Utc>,
    /// Last inbound or outbound frame.
    pub last_activity: DateTime<Utc>,
    pub state: SessionState,
    /// Questions that received an answer frame (including degraded ones).
    pub questions_answered: u64,
    /// Error frames sent.
    pub errors_reported: u64,
}

impl SessionContext {
    pub fn new(session_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            created_at: now,
            last_activity: now,
            state: SessionState::Connecting,
            questions_answered: 0,
            errors_reported: 0,
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn record_answer(&mut self) {
        self.questions_answered += 1;
        self.touch();
    }

    pub fn record_error(&mut self) {
        self.errors_reported += 1;
        self.touch();
    }

    /// Time since the last frame in either direction.
    pub fn idle_for(&self) -> chrono::Duration {
        Utc::now() - self.last_activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_connecting() {
        let ctx = SessionContext::new("s1".into());
        assert_eq!(ctx.state, SessionState::Connecting);
        assert_eq!(ctx.created_at, ctx.last_activity);
        assert_eq!(ctx.questions_answered, 0);
    }

    #[test]
    fn counters_advance_activity() {
        let mut ctx = SessionContext::new("s1".into());
        let before = ctx.last_activity;
        ctx.record_answer();
        ctx.record_error();
        assert_eq!(ctx.questions_answered, 1);
        assert_eq!(ctx.errors_reported, 1);
        assert!(ctx.last_activity >= before);
    }

    #[test]
    fn state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionState::Closing).unwrap(),
            "\"closing\""
        );
    }
}
