//! # kbase-session
//!
//! One session per connected client: a welcome frame, then strict
//! question → answer exchange with heartbeats, over any [`Transport`].
//! [`SessionManager`] spawns sessions and keeps a registry of their state.

pub mod context;
pub mod manager;
pub mod protocol;
pub mod session;
pub mod transport;

pub use context::{SessionContext, SessionState};
pub use manager::{SessionHandle, SessionManager};
pub use protocol::{FrameType, Inbound, OutboundFrame};
pub use session::{CloseReason, SessionSummary};
pub use transport::{channel_pair, ChannelTransport, ClientEndpoint, LineTransport, Transport, TransportEvent};
