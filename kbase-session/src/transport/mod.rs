//! Transport abstraction: an ordered, message-oriented, bidirectional
//! channel owned by exactly one session.

mod channel;
mod line;

use std::future::Future;

use kbase_core::errors::SessionError;

pub use channel::{channel_pair, ChannelTransport, ClientEndpoint};
pub use line::LineTransport;

/// What `receive` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Message(String),
    /// A frame the transport refused to deliver, such as an oversized line.
    /// The connection stays usable.
    Rejected(SessionError),
    Disconnected,
}

/// A session's connection to its client.
///
/// `receive` must be cancel-safe: the session polls it inside `select!`
/// and a dropped call must not lose a message.
pub trait Transport: Send + 'static {
    /// Wait for the next inbound frame or the disconnect signal.
    fn receive(&mut self) -> impl Future<Output = TransportEvent> + Send;

    /// Deliver one outbound frame. Fails with `TransportClosed` once the
    /// channel is gone.
    fn send(&mut self, frame: String) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Release the channel. Further sends fail.
    fn close(&mut self) -> impl Future<Output = ()> + Send;
}
