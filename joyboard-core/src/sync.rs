//! Sync orchestration: fetch + parse + match across all configured sources.
//!
//! Sources are processed sequentially, in source-list order. That keeps error
//! attribution and the aggregate event count deterministic, and means a
//! single slow or misbehaving feed cannot race the final store write.
//! One bad feed never prevents other feeds from syncing, and never prevents
//! already-accumulated links from being persisted.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::JoyboardResult;
use crate::event::CalendarEvent;
use crate::fetch::FeedFetcher;
use crate::ics::parse_feed;
use crate::link::LinkedEvent;
use crate::matcher::find_links;
use crate::snapshot::DashboardSnapshot;
use crate::source::CalendarSource;
use crate::store::LinkStore;

/// One source's failure, as surfaced in the sync report.
#[derive(Debug, Clone, Serialize)]
pub struct SyncError {
    pub source: String,
    pub error: String,
}

/// The result of one orchestration run. Not persisted beyond the last-sync
/// instant, which is written to the calendar source collection's metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub events_synced: usize,
    pub new_links: usize,
    pub last_sync: DateTime<Utc>,
    pub errors: Vec<SyncError>,
}

/// The partial result of pulling one source: its events, the count of
/// records the parser dropped, and the error if the pull failed outright.
#[derive(Debug)]
pub struct FeedPull {
    pub source_name: String,
    pub events: Vec<CalendarEvent>,
    pub skipped: usize,
    pub error: Option<String>,
}

/// Fetch and parse one source, attaching its attribution to every event.
///
/// A fetch failure yields zero events and an error message; it never
/// propagates.
pub async fn pull_source(fetcher: &FeedFetcher, source: &CalendarSource) -> FeedPull {
    match fetcher.fetch_text(&source.url).await {
        Ok(text) => {
            let parsed = parse_feed(&text);
            if parsed.skipped > 0 {
                tracing::debug!(
                    source = %source.name,
                    skipped = parsed.skipped,
                    "dropped unparseable feed records"
                );
            }
            FeedPull {
                source_name: source.name.clone(),
                events: parsed
                    .events
                    .into_iter()
                    .map(|e| e.attach_source(source))
                    .collect(),
                skipped: parsed.skipped,
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!(source = %source.name, error = %err, "feed pull failed");
            FeedPull {
                source_name: source.name.clone(),
                events: Vec::new(),
                skipped: 0,
                error: Some(err.to_string()),
            }
        }
    }
}

/// Pull every source sequentially, in list order.
pub async fn pull_all(fetcher: &FeedFetcher, sources: &[CalendarSource]) -> Vec<FeedPull> {
    let mut pulls = Vec::with_capacity(sources.len());
    for source in sources {
        pulls.push(pull_source(fetcher, source).await);
    }
    pulls
}

/// Run a full sync: pull all configured sources, match events against the
/// dashboard snapshot, persist new links in one batched write, and advance
/// the last-sync instant.
///
/// An event stages a new link only when the matcher proposes at least one
/// candidate and no link with the same feed uid exists yet. Re-running
/// against an unchanged feed therefore creates nothing, whether the existing
/// link was automatic or manual.
pub async fn sync(
    fetcher: &FeedFetcher,
    store: &LinkStore,
    snapshot: &DashboardSnapshot,
) -> JoyboardResult<SyncReport> {
    let sources = store.sources()?;
    let pulls = pull_all(fetcher, &sources).await;

    // Seeded from the store; staged uids join the set as links are created,
    // which also dedups a uid appearing in more than one feed this run.
    let mut linked_uids: HashSet<String> =
        store.links()?.into_iter().map(|l| l.calendar_uid).collect();

    let mut events_synced = 0;
    let mut staged = Vec::new();
    let mut errors = Vec::new();

    for pull in pulls {
        if let Some(error) = pull.error {
            errors.push(SyncError {
                source: pull.source_name,
                error,
            });
            continue;
        }

        events_synced += pull.events.len();

        for event in &pull.events {
            let candidates = find_links(event, snapshot);
            if candidates.is_empty() {
                continue;
            }
            if linked_uids.insert(event.uid.clone()) {
                staged.push(LinkedEvent::from_event(event, candidates));
            }
        }
    }

    let new_links = staged.len();
    store.append_links(staged)?;

    let last_sync = Utc::now();
    store.set_last_sync(last_sync)?;

    tracing::info!(events_synced, new_links, failed_sources = errors.len(), "sync complete");

    Ok(SyncReport {
        events_synced,
        new_links,
        last_sync,
        errors,
    })
}
