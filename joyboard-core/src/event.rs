//! Calendar event types.
//!
//! Events are transient: they are produced by parsing one feed, displayed or
//! matched, and never persisted on their own. Field names follow the wire
//! format the dashboard frontend consumes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::source::CalendarSource;

/// Start or end of an event: either a timed UTC instant or an all-day date.
///
/// All-day dates serialize without a time component (`"2024-02-08"`), with no
/// timezone conversion applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

/// A calendar event parsed from one feed.
///
/// `uid` is assigned by the feed and expected unique within it; it may
/// collide across feeds. Invariant upheld by the parser: `summary` is
/// non-empty and `start` resolved, or the event is never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "startDate")]
    pub start: EventTime,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,

    /// Owning source, attached after parsing (the parser itself only sees
    /// raw feed text).
    #[serde(default)]
    pub calendar_id: String,
    #[serde(default)]
    pub calendar_name: String,
}

impl CalendarEvent {
    /// Attach the owning source's attribution to a freshly parsed event.
    pub fn attach_source(mut self, source: &CalendarSource) -> Self {
        self.calendar_id = source.id.clone();
        self.calendar_name = source.name.clone();
        self
    }
}
