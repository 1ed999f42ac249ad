//! Link types: proposed and confirmed associations between calendar events
//! and dashboard items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::{CalendarEvent, EventTime};

/// Category of dashboard item a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Travel,
    Local,
    // The frontend's manual-link path historically sent the plural form.
    #[serde(alias = "experiences")]
    Experience,
}

/// A proposed association between one calendar event and one dashboard item.
///
/// Never persisted on its own; it exists within a single matching pass and
/// inside the `links` list of a [`LinkedEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateLink {
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub id: String,
    pub name: String,
}

/// The persisted outcome of matching: one calendar event confirmed as linked
/// to one or more dashboard items.
///
/// At most one LinkedEvent exists per `calendar_uid` value; the sync
/// orchestrator enforces this by checking existing links before appending.
/// Created automatically by sync or manually by the user, deleted by explicit
/// user action, never otherwise mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedEvent {
    pub id: String,
    pub calendar_uid: String,
    pub calendar_name: String,
    pub event_summary: String,
    pub event_date: EventTime,
    pub links: Vec<CandidateLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LinkedEvent {
    pub fn new(
        calendar_uid: impl Into<String>,
        calendar_name: impl Into<String>,
        event_summary: impl Into<String>,
        event_date: EventTime,
        links: Vec<CandidateLink>,
        notes: Option<String>,
    ) -> Self {
        LinkedEvent {
            id: Uuid::new_v4().to_string(),
            calendar_uid: calendar_uid.into(),
            calendar_name: calendar_name.into(),
            event_summary: event_summary.into(),
            event_date,
            links,
            notes,
            created_at: Utc::now(),
        }
    }

    /// Build a link record from a matched event and its candidates.
    pub fn from_event(event: &CalendarEvent, links: Vec<CandidateLink>) -> Self {
        Self::new(
            event.uid.clone(),
            event.calendar_name.clone(),
            event.summary.clone(),
            event.start.clone(),
            links,
            None,
        )
    }
}
