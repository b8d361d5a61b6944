//! Pluggable stream transport
//!
//! The session does not care where records come from. A [`Connector`]
//! opens one [`RecordStream`]; the session opens a new one on every
//! reconnect, so connectors must be reusable.

use std::sync::Arc;

use async_trait::async_trait;

use logtide_protocol::{FileId, LogRecord};
use logtide_tail::{TailBroadcaster, TailHandle, TailMode};

use crate::error::{Result, SessionError};

/// One live stream of records
#[async_trait]
pub trait RecordStream: Send {
    /// Receive the next record
    ///
    /// `Ok(None)` means the stream ended cleanly and the session should
    /// close. `Err` means the transport broke and the session should
    /// back off and reconnect.
    async fn next(&mut self) -> Result<Option<LogRecord>>;
}

/// Opens record streams for a session
#[async_trait]
pub trait Connector: Send + Sync {
    /// The stream type this connector produces
    type Stream: RecordStream;

    /// Open a fresh stream
    async fn connect(&self) -> Result<Self::Stream>;
}

/// Connector backed by an in-process tail broadcaster
pub struct TailConnector {
    broadcaster: Arc<TailBroadcaster>,
    file_id: FileId,
    mode: TailMode,
}

impl TailConnector {
    /// Create a connector for one file's tail point
    pub fn new(broadcaster: Arc<TailBroadcaster>, file_id: FileId, mode: TailMode) -> Self {
        Self {
            broadcaster,
            file_id,
            mode,
        }
    }
}

#[async_trait]
impl Connector for TailConnector {
    type Stream = TailStream;

    async fn connect(&self) -> Result<TailStream> {
        let handle = self
            .broadcaster
            .subscribe(self.file_id, self.mode)
            .map_err(|err| SessionError::Connect(err.to_string()))?;
        Ok(TailStream { handle })
    }
}

/// Stream over a tail subscription
pub struct TailStream {
    handle: TailHandle,
}

#[async_trait]
impl RecordStream for TailStream {
    async fn next(&mut self) -> Result<Option<LogRecord>> {
        match self.handle.recv().await {
            Some(item) => Ok(Some((*item.record).clone())),
            None => Ok(None),
        }
    }
}
