//! Calendar source and sync endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use joyboard_core::{CalendarEvent, CalendarSource, SyncError, pull_all, sync};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/calendars", get(list_calendars).post(add_calendar))
        .route("/api/calendars/{id}", delete(remove_calendar))
        .route("/api/calendars/sync", post(sync_calendars))
        .route("/api/calendar-events", get(live_events))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarsResponse {
    connected: Vec<CalendarSource>,
    last_sync: Option<DateTime<Utc>>,
}

/// GET /api/calendars - list configured sources and the last sync time
async fn list_calendars(
    State(state): State<AppState>,
) -> Result<Json<CalendarsResponse>, AppError> {
    let store = state.store();

    Ok(Json(CalendarsResponse {
        connected: store.sources()?,
        last_sync: store.last_sync()?,
    }))
}

#[derive(Deserialize)]
struct AddCalendarRequest {
    name: String,
    url: String,
    color: Option<String>,
}

#[derive(Serialize)]
struct CreatedResponse {
    success: bool,
    id: String,
}

/// POST /api/calendars - add a source
async fn add_calendar(
    State(state): State<AppState>,
    Json(req): Json<AddCalendarRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    let source = state.store().add_source(&req.name, &req.url, req.color)?;
    tracing::info!(name = %source.name, "calendar source added");

    Ok(Json(CreatedResponse {
        success: true,
        id: source.id,
    }))
}

#[derive(Serialize)]
struct SuccessResponse {
    success: bool,
}

/// DELETE /api/calendars/:id - remove a source
async fn remove_calendar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store().remove_source(&id)?;
    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncResponse {
    success: bool,
    events_synced: usize,
    new_links: usize,
    last_sync: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<SyncError>,
}

/// POST /api/calendars/sync - run the full orchestration
async fn sync_calendars(State(state): State<AppState>) -> Result<Json<SyncResponse>, AppError> {
    let store = state.store();
    let snapshot = state.snapshot()?;

    let report = sync(state.fetcher(), &store, &snapshot).await?;

    Ok(Json(SyncResponse {
        success: true,
        events_synced: report.events_synced,
        new_links: report.new_links,
        last_sync: report.last_sync,
        errors: report.errors,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LiveEventsResponse {
    events: Vec<CalendarEvent>,
    last_sync: Option<DateTime<Utc>>,
    count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<SyncError>,
}

/// GET /api/calendar-events - fetch and parse every source live, without
/// touching the link store
async fn live_events(State(state): State<AppState>) -> Result<Json<LiveEventsResponse>, AppError> {
    let store = state.store();
    let sources = store.sources()?;

    let mut events = Vec::new();
    let mut errors = Vec::new();
    for pull in pull_all(state.fetcher(), &sources).await {
        match pull.error {
            Some(error) => errors.push(SyncError {
                source: pull.source_name,
                error,
            }),
            None => events.extend(pull.events),
        }
    }

    let count = events.len();
    Ok(Json(LiveEventsResponse {
        events,
        last_sync: store.last_sync()?,
        count,
        errors,
    }))
}
