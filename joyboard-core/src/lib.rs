//! Core engine for the joyboard dashboard's calendar integration.
//!
//! This crate covers everything between a configured calendar feed URL and a
//! persisted link on the dashboard:
//! - `fetch`: retrieving raw feed text over HTTP(S)
//! - `ics`: parsing feed text into calendar events
//! - `matcher`: proposing links between events and dashboard items
//! - `sync`: orchestrating fetch + parse + match across all sources
//! - `store`: durable storage for sources and confirmed links
//!
//! The dashboard's own record stores (travel, local places, experiences) are
//! read-only inputs here, modeled by `snapshot`.

pub mod error;
pub mod event;
pub mod fetch;
pub mod ics;
pub mod link;
pub mod matcher;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod sync;

pub use error::{JoyboardError, JoyboardResult};
pub use event::{CalendarEvent, EventTime};
pub use fetch::FeedFetcher;
pub use ics::{ParsedFeed, parse_feed};
pub use link::{CandidateLink, LinkKind, LinkedEvent};
pub use matcher::find_links;
pub use snapshot::{DashboardSnapshot, Destination, Experience, Place};
pub use source::CalendarSource;
pub use store::LinkStore;
pub use sync::{FeedPull, SyncError, SyncReport, pull_all, pull_source, sync};
