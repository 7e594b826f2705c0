/// Session-level protocol and transport errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("malformed request: {reason}")]
    MalformedRequest { reason: String },

    #[error("too many pending requests (limit {limit})")]
    Backlogged { limit: usize },

    #[error("transport closed")]
    TransportClosed,

    #[error("heartbeat not acknowledged within {waited_ms} ms")]
    HeartbeatTimeout { waited_ms: u64 },
}
