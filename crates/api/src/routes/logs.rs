//! Listing and streaming routes
//!
//! The two SSE routes differ only in where the subscription starts:
//! `/api/logs/{filename}` replays the whole file and then follows new
//! records; `/api/logs/{filename}/stream` delivers new records only.
//! Both streams end when the server shuts the file's tail point down;
//! a dropped response releases the subscriber slot.

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::Serialize;

use logtide_protocol::LogRecord;
use logtide_registry::ListOrder;
use logtide_tail::{TailItem, TailMode};

use crate::error::Result;
use crate::state::AppState;

/// Listing and streaming routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/logs", get(list_handler))
        .route("/api/logs/{filename}", get(replay_handler))
        .route("/api/logs/{filename}/stream", get(live_handler))
}

/// One row of the file listing
#[derive(Debug, Serialize)]
pub struct LogFileEntry {
    /// Display name
    pub name: String,
    /// Registration time
    pub timestamp: DateTime<Utc>,
    /// "original" or "sanitized"
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Content length in bytes
    pub size_bytes: u64,
}

/// One SSE payload: a record, plus a gap marker after dropped records
#[derive(Debug, Serialize)]
struct StreamEvent<'a> {
    #[serde(flatten)]
    record: &'a LogRecord,
    /// True when records were dropped right before this one
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    gap: bool,
}

/// File listing endpoint
///
/// GET /api/logs
///
/// Newest files first; ties broken deterministically.
async fn list_handler(State(state): State<AppState>) -> Json<Vec<LogFileEntry>> {
    let entries = state
        .registry
        .list(ListOrder::NewestFirst)
        .into_iter()
        .map(|file| LogFileEntry {
            name: file.display_name,
            timestamp: file.created_at,
            kind: file.kind.as_str(),
            size_bytes: file.size_bytes,
        })
        .collect();
    Json(entries)
}

/// Replay-then-follow endpoint
///
/// GET /api/logs/{filename}
async fn replay_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>> {
    stream_for(&state, &filename, TailMode::FromStart).await
}

/// Live-only endpoint
///
/// GET /api/logs/{filename}/stream
async fn live_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>> {
    stream_for(&state, &filename, TailMode::Live).await
}

async fn stream_for(
    state: &AppState,
    filename: &str,
    mode: TailMode,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>> {
    let file = state.registry.find_by_name(filename)?;
    // The point may have been shut down or lost to a restart while the
    // file stayed registered; rebuild it from the stored content
    state.pipeline.reseed_tail(&file).await?;
    let handle = state.broadcaster.subscribe(file.id, mode)?;

    tracing::debug!(file = filename, id = %file.id, ?mode, "stream opened");

    let stream = futures::stream::unfold(handle, |mut handle| async move {
        let item = handle.recv().await?;
        Some((record_event(&item), handle))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn record_event(item: &TailItem) -> std::result::Result<Event, axum::Error> {
    Event::default().json_data(StreamEvent {
        record: item.record.as_ref(),
        gap: item.gap,
    })
}
