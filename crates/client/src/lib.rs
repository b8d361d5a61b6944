//! Streaming tail client
//!
//! A [`StreamingSession`] consumes a live record stream on behalf of one
//! viewer and keeps it alive across transport failures. The session is a
//! small state machine:
//!
//! ```text
//!             connect ok                stream error
//! Connecting ───────────► Streaming ──────────────► Erroring
//!     ▲                       │                         │
//!     │                       │ stream end / cancel     │ backoff elapsed
//!     └───────────────────────┼─────────────────────────┘
//!                             ▼
//!                          Closed
//! ```
//!
//! Every reconnect opens a fresh subscription: the session never resumes
//! at a remembered offset, so records published while it was in
//! `Erroring` are not replayed. `Closed` is terminal - it is entered on
//! cancellation, on a clean end of stream, or when the consumer goes
//! away, and the session never leaves it.
//!
//! The transport is pluggable through [`Connector`]; [`TailConnector`]
//! adapts an in-process [`TailBroadcaster`](logtide_tail::TailBroadcaster).

mod connector;
mod error;
mod session;

pub use connector::{Connector, RecordStream, TailConnector, TailStream};
pub use error::{Result, SessionError};
pub use session::{SessionConfig, SessionState, SessionSummary, StreamingSession};
