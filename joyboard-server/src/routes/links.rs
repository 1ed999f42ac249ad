//! Linked-event endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};

use joyboard_core::{CandidateLink, EventTime, LinkedEvent};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/linked-events", get(list_links).post(create_link))
        .route("/api/linked-events/{id}", delete(remove_link))
}

#[derive(Serialize)]
struct LinksResponse {
    links: Vec<LinkedEvent>,
}

/// GET /api/linked-events - list persisted links
async fn list_links(State(state): State<AppState>) -> Result<Json<LinksResponse>, AppError> {
    Ok(Json(LinksResponse {
        links: state.store().links()?,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLinkRequest {
    calendar_uid: String,
    calendar_name: String,
    event_summary: String,
    event_date: EventTime,
    links: Vec<CandidateLink>,
    notes: Option<String>,
}

#[derive(Serialize)]
struct CreatedResponse {
    success: bool,
    id: String,
}

/// POST /api/linked-events - create a manual link
///
/// The caller supplies the candidate list directly; the matcher is never
/// consulted, and no calendar source needs to be configured.
async fn create_link(
    State(state): State<AppState>,
    Json(req): Json<CreateLinkRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    let link = LinkedEvent::new(
        req.calendar_uid,
        req.calendar_name,
        req.event_summary,
        req.event_date,
        req.links,
        req.notes,
    );

    let id = state.store().add_link(link)?;

    Ok(Json(CreatedResponse { success: true, id }))
}

#[derive(Serialize)]
struct SuccessResponse {
    success: bool,
}

/// DELETE /api/linked-events/:id - remove a link
async fn remove_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store().remove_link(&id)?;
    Ok(Json(SuccessResponse { success: true }))
}
