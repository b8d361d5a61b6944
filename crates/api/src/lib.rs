//! HTTP API
//!
//! Exposes the pipeline over HTTP:
//!
//! - `POST /upload` - multipart upload, returns the upload manifest
//! - `GET /api/logs` - list registered files, newest first
//! - `GET /api/logs/{filename}` - SSE replay-then-follow of one file
//! - `GET /api/logs/{filename}/stream` - SSE of new records only
//! - `GET /health` - liveness check
//!
//! Streaming uses Server-Sent Events; each event carries one record as
//! JSON. Handlers hold no locks across awaits - they borrow the shared
//! registry, pipeline and broadcaster through [`AppState`].

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, Result};
pub use routes::build_router;
pub use state::AppState;
