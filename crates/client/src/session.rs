//! The streaming session state machine

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use logtide_protocol::LogRecord;

use crate::connector::{Connector, RecordStream};

/// Default wait between reconnect attempts
pub const DEFAULT_RECONNECT_BACKOFF: Duration = Duration::from_secs(5);

/// Observable session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Opening a stream
    Connecting,
    /// Receiving records
    Streaming,
    /// Stream broke; waiting out the backoff
    Erroring,
    /// Terminal: the session is done and will not reconnect
    Closed,
}

/// Configuration for a streaming session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Fixed wait before each reconnect attempt
    pub reconnect_backoff: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reconnect_backoff: DEFAULT_RECONNECT_BACKOFF,
        }
    }
}

impl SessionConfig {
    /// Set the reconnect backoff
    #[must_use]
    pub fn with_reconnect_backoff(mut self, backoff: Duration) -> Self {
        self.reconnect_backoff = backoff;
        self
    }
}

/// Totals for one finished session
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSummary {
    /// Records handed to the consumer
    pub records_delivered: u64,
    /// Reconnect attempts, successful or not
    pub reconnects: u64,
}

/// Outcome of pumping one stream to exhaustion
enum Pump {
    /// The session is done
    Closed,
    /// The transport broke; reconnect
    Broken,
}

/// Keeps one record stream alive across transport failures
///
/// Drives the `Connecting -> Streaming -> Erroring` loop until cancelled,
/// until the stream ends cleanly, or until the consumer goes away. Each
/// reconnect opens a fresh stream through the [`Connector`]; nothing
/// published during `Erroring` is replayed.
pub struct StreamingSession<C: Connector> {
    connector: C,
    config: SessionConfig,
    state_tx: watch::Sender<SessionState>,
    cancel: CancellationToken,
}

impl<C: Connector> StreamingSession<C> {
    /// Create a session with default configuration
    pub fn new(connector: C) -> Self {
        Self::with_config(connector, SessionConfig::default())
    }

    /// Create a session with explicit configuration
    pub fn with_config(connector: C, config: SessionConfig) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Connecting);
        Self {
            connector,
            config,
            state_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Watch the session state
    ///
    /// The receiver stays valid after [`run`](Self::run) consumes the
    /// session; it observes `Closed` last.
    pub fn state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Token that cancels the session
    ///
    /// Cancellation is honored at every await point; the session moves
    /// to `Closed` without draining in-flight records.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the session until it closes
    ///
    /// Delivered records go to `delivery` in stream order, each exactly
    /// once. Returns the totals for the whole session.
    pub async fn run(self, delivery: mpsc::Sender<LogRecord>) -> SessionSummary {
        let mut summary = SessionSummary::default();

        loop {
            self.set_state(SessionState::Connecting);

            let stream = tokio::select! {
                _ = self.cancel.cancelled() => break,
                connected = self.connector.connect() => match connected {
                    Ok(stream) => stream,
                    Err(err) => {
                        warn!(error = %err, "connect failed");
                        if !self.backoff(&mut summary).await {
                            break;
                        }
                        continue;
                    }
                },
            };

            self.set_state(SessionState::Streaming);
            debug!("stream open");

            match self.pump(stream, &delivery, &mut summary).await {
                Pump::Closed => break,
                Pump::Broken => {
                    if !self.backoff(&mut summary).await {
                        break;
                    }
                }
            }
        }

        self.set_state(SessionState::Closed);
        info!(
            records = summary.records_delivered,
            reconnects = summary.reconnects,
            "session closed"
        );
        summary
    }

    /// Forward one stream until it ends, breaks, or the session closes
    async fn pump(
        &self,
        mut stream: C::Stream,
        delivery: &mpsc::Sender<LogRecord>,
        summary: &mut SessionSummary,
    ) -> Pump {
        loop {
            let next = tokio::select! {
                _ = self.cancel.cancelled() => return Pump::Closed,
                next = stream.next() => next,
            };

            match next {
                Ok(Some(record)) => {
                    if delivery.send(record).await.is_err() {
                        debug!("consumer gone, closing");
                        return Pump::Closed;
                    }
                    summary.records_delivered += 1;
                }
                Ok(None) => {
                    debug!("stream ended");
                    return Pump::Closed;
                }
                Err(err) => {
                    warn!(error = %err, "stream broke, will reconnect");
                    return Pump::Broken;
                }
            }
        }
    }

    /// Wait out the reconnect backoff; false means the session was
    /// cancelled while waiting
    async fn backoff(&self, summary: &mut SessionSummary) -> bool {
        self.set_state(SessionState::Erroring);
        summary.reconnects += 1;

        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(self.config.reconnect_backoff) => true,
        }
    }

    fn set_state(&self, state: SessionState) {
        // no receivers is fine; nobody has to watch
        let _ = self.state_tx.send(state);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
