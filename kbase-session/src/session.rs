//! One client session: welcome, then a strict FIFO question/answer loop
//! with heartbeats, until disconnect, local close, write failure, or
//! heartbeat timeout.

use std::collections::VecDeque;
use std::future::pending;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn, Instrument};

use kbase_core::config::SessionConfig;
use kbase_core::constants::WARMING_UP_MESSAGE;
use kbase_core::errors::{KbaseResult, SessionError};
use kbase_core::Answer;
use kbase_retrieval::RetrievalEngine;

use crate::context::SessionState;
use crate::manager::Registry;
use crate::protocol::{self, Inbound, OutboundFrame};
use crate::transport::{Transport, TransportEvent};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// The client went away.
    Disconnected,
    /// `close_session` or `shutdown` on the manager.
    LocalClose,
    /// An outbound write failed.
    TransportClosed,
    /// A heartbeat went unanswered.
    HeartbeatTimeout,
}

/// Final account of a session, returned from its task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub final_state: SessionState,
    pub questions_answered: u64,
    pub errors_reported: u64,
    pub close_reason: CloseReason,
}

type InFlight = JoinHandle<KbaseResult<Answer>>;

/// A question to answer or a malformed frame to report, in arrival order.
type Pending = Result<String, SessionError>;

pub(crate) struct Session<T> {
    id: String,
    transport: T,
    engine: Arc<RetrievalEngine>,
    config: SessionConfig,
    registry: Registry,
    close_rx: watch::Receiver<bool>,
    state: SessionState,
    questions_answered: u64,
    errors_reported: u64,
}

impl<T: Transport> Session<T> {
    pub(crate) fn new(
        id: String,
        transport: T,
        engine: Arc<RetrievalEngine>,
        config: SessionConfig,
        registry: Registry,
        close_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            id,
            transport,
            engine,
            config,
            registry,
            close_rx,
            state: SessionState::Connecting,
            questions_answered: 0,
            errors_reported: 0,
        }
    }

    /// Drive the session to `Closed`.
    pub(crate) async fn run(self) -> SessionSummary {
        let span = kbase_observability::session_span!(self.id);
        self.run_to_close().instrument(span).await
    }

    async fn run_to_close(mut self) -> SessionSummary {
        let reason = self.serve().await;

        self.set_state(SessionState::Closing);
        self.transport.close().await;
        self.set_state(SessionState::Closed);
        self.registry.remove(&self.id);

        info!(
            reason = ?reason,
            questions = self.questions_answered,
            errors = self.errors_reported,
            "session closed"
        );

        SessionSummary {
            session_id: self.id,
            final_state: self.state,
            questions_answered: self.questions_answered,
            errors_reported: self.errors_reported,
            close_reason: reason,
        }
    }

    async fn serve(&mut self) -> CloseReason {
        self.set_state(SessionState::Active);
        info!("session active");
        let welcome = OutboundFrame::welcome(self.config.welcome_message.clone());
        if let Err(reason) = self.send(welcome).await {
            return reason;
        }

        let period = self.config.heartbeat_interval();
        let mut heartbeat = time::interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ping_deadline: Option<Instant> = None;

        let mut queue: VecDeque<Pending> = VecDeque::new();
        let mut in_flight: Option<InFlight> = None;

        loop {
            tokio::select! {
                _ = self.close_rx.changed() => {
                    abandon(&mut in_flight);
                    return CloseReason::LocalClose;
                }
                joined = join_in_flight(&mut in_flight) => {
                    in_flight = None;
                    if let Err(reason) = self.reply(joined).await {
                        return reason;
                    }
                }
                event = self.transport.receive() => match event {
                    TransportEvent::Message(raw) => {
                        ping_deadline = None;
                        self.touch();
                        let pending = match protocol::parse_inbound(&raw) {
                            Ok(Inbound::HeartbeatAck) => {
                                debug!("heartbeat acknowledged");
                                None
                            }
                            Ok(Inbound::Question(question)) => Some(Ok(question)),
                            Err(err) => Some(Err(err)),
                        };
                        if let Some(pending) = pending {
                            if let Err(reason) = self.enqueue(&mut queue, pending).await {
                                return reason;
                            }
                        }
                    }
                    TransportEvent::Rejected(err) => {
                        ping_deadline = None;
                        self.touch();
                        if let Err(reason) = self.enqueue(&mut queue, Err(err)).await {
                            return reason;
                        }
                    }
                    TransportEvent::Disconnected => {
                        abandon(&mut in_flight);
                        return CloseReason::Disconnected;
                    }
                },
                _ = heartbeat.tick() => {
                    if ping_deadline.is_none() {
                        if let Err(reason) = self.send(OutboundFrame::heartbeat()).await {
                            return reason;
                        }
                        ping_deadline = Some(Instant::now() + self.config.heartbeat_timeout());
                    }
                }
                _ = wait_until(ping_deadline) => {
                    let err = SessionError::HeartbeatTimeout {
                        waited_ms: self.config.heartbeat_timeout_ms,
                    };
                    warn!(error = %err, "closing unresponsive session");
                    abandon(&mut in_flight);
                    return CloseReason::HeartbeatTimeout;
                }
            }

            if in_flight.is_none() {
                match self.dispatch(&mut queue).await {
                    Ok(next) => in_flight = next,
                    Err(reason) => return reason,
                }
            }
        }
    }

    /// Buffer a frame behind the question in flight. Past the limit the
    /// frame is dropped and answered at once with an error.
    async fn enqueue(
        &mut self,
        queue: &mut VecDeque<Pending>,
        pending: Pending,
    ) -> Result<(), CloseReason> {
        let limit = self.config.max_pending_frames.max(1);
        if queue.len() < limit {
            queue.push_back(pending);
            return Ok(());
        }
        let err = SessionError::Backlogged { limit };
        warn!(error = %err, "dropping inbound frame");
        self.record_error();
        self.send(OutboundFrame::error(err.to_string())).await
    }

    /// Report queued malformed frames in order until the next question,
    /// which is started on the blocking pool.
    async fn dispatch(
        &mut self,
        queue: &mut VecDeque<Pending>,
    ) -> Result<Option<InFlight>, CloseReason> {
        while let Some(next) = queue.pop_front() {
            match next {
                Ok(question) => {
                    debug!(question = %question, "question received");
                    let engine = Arc::clone(&self.engine);
                    let task = tokio::task::spawn_blocking(move || engine.answer(&question));
                    return Ok(Some(task));
                }
                Err(err) => {
                    debug!(error = %err, "rejecting inbound frame");
                    self.record_error();
                    self.send(OutboundFrame::error(err.to_string())).await?;
                }
            }
        }
        Ok(None)
    }

    /// Exactly one outbound frame per answered question.
    async fn reply(
        &mut self,
        joined: Result<KbaseResult<Answer>, JoinError>,
    ) -> Result<(), CloseReason> {
        let frame = match joined {
            Ok(Ok(answer)) => {
                self.record_answer();
                OutboundFrame::answer(&answer)
            }
            Ok(Err(err)) if err.is_embedding_unavailable() => {
                warn!(error = %err, "embedding unavailable, sending degraded answer");
                self.record_answer();
                OutboundFrame::answer(&Answer::degraded(WARMING_UP_MESSAGE))
            }
            Ok(Err(err)) => {
                error!(error = %err, "question failed");
                self.record_error();
                OutboundFrame::error(err.to_string())
            }
            Err(err) => {
                error!(error = %err, "answer task failed");
                self.record_error();
                OutboundFrame::error("internal error while answering")
            }
        };
        self.send(frame).await
    }

    async fn send(&mut self, frame: OutboundFrame) -> Result<(), CloseReason> {
        let payload = match frame.to_json() {
            Ok(payload) => payload,
            Err(err) => {
                error!(error = %err, "failed to encode frame");
                OutboundFrame::error("internal error").to_json().unwrap_or_default()
            }
        };
        if self.transport.send(payload).await.is_err() {
            debug!("outbound write failed");
            return Err(CloseReason::TransportClosed);
        }
        self.touch();
        Ok(())
    }

    fn set_state(&mut self, state: SessionState) {
        debug!(from = %self.state, to = %state, "session state");
        self.state = state;
        self.registry.update(&self.id, |ctx| ctx.state = state);
    }

    fn touch(&self) {
        self.registry.update(&self.id, |ctx| ctx.touch());
    }

    fn record_answer(&mut self) {
        self.questions_answered += 1;
        self.registry.update(&self.id, |ctx| ctx.record_answer());
    }

    fn record_error(&mut self) {
        self.errors_reported += 1;
        self.registry.update(&self.id, |ctx| ctx.record_error());
    }
}

async fn join_in_flight(slot: &mut Option<InFlight>) -> Result<KbaseResult<Answer>, JoinError> {
    match slot {
        Some(task) => task.await,
        None => pending().await,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => pending().await,
    }
}

/// The blocking call itself cannot be interrupted; its result is dropped.
fn abandon(in_flight: &mut Option<InFlight>) {
    if let Some(task) = in_flight.take() {
        task.abort();
        debug!("in-flight question abandoned");
    }
}
