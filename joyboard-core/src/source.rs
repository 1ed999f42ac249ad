//! Configured calendar sources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display colors cycled through as sources are added.
pub const SOURCE_COLORS: &[&str] = &[
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899",
];

/// A configured external calendar feed.
///
/// Created and removed by user action, immutable otherwise. Owned
/// exclusively by the [`LinkStore`](crate::store::LinkStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSource {
    pub id: String,
    pub name: String,
    pub url: String,
    pub color: String,
    pub added_at: DateTime<Utc>,
}

impl CalendarSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, color: impl Into<String>) -> Self {
        CalendarSource {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            url: url.into(),
            color: color.into(),
            added_at: Utc::now(),
        }
    }
}
