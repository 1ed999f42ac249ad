//! Durable storage for calendar sources and confirmed links.
//!
//! Each collection is one JSON document, read-modify-written as a whole per
//! operation (the same shape the dashboard uses for its other records).
//! Callers must treat each read+write pair as a critical section: concurrent
//! writers against the same store risk a lost update unless the host
//! serializes requests.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{JoyboardError, JoyboardResult};
use crate::link::LinkedEvent;
use crate::source::{CalendarSource, SOURCE_COLORS};

const CALENDARS_FILE: &str = "calendars.json";
const LINKS_FILE: &str = "linked-events.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CalendarsDoc {
    connected: Vec<CalendarSource>,
    last_sync: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct LinksDoc {
    links: Vec<LinkedEvent>,
}

/// JSON-file-backed store for [`CalendarSource`] and [`LinkedEvent`] records.
#[derive(Debug, Clone)]
pub struct LinkStore {
    dir: PathBuf,
}

impl LinkStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LinkStore { dir: dir.into() }
    }

    // --- Calendar sources ---

    pub fn sources(&self) -> JoyboardResult<Vec<CalendarSource>> {
        Ok(self.read_calendars()?.connected)
    }

    pub fn last_sync(&self) -> JoyboardResult<Option<DateTime<Utc>>> {
        Ok(self.read_calendars()?.last_sync)
    }

    /// Add a feed. The display color defaults to a palette color cycled by
    /// the number of already-connected sources.
    pub fn add_source(
        &self,
        name: &str,
        url: &str,
        color: Option<String>,
    ) -> JoyboardResult<CalendarSource> {
        let mut doc = self.read_calendars()?;

        let color = color
            .unwrap_or_else(|| SOURCE_COLORS[doc.connected.len() % SOURCE_COLORS.len()].to_string());
        let source = CalendarSource::new(name, url, color);

        doc.connected.push(source.clone());
        self.write(CALENDARS_FILE, &doc)?;

        Ok(source)
    }

    pub fn remove_source(&self, id: &str) -> JoyboardResult<()> {
        let mut doc = self.read_calendars()?;

        let before = doc.connected.len();
        doc.connected.retain(|s| s.id != id);
        if doc.connected.len() == before {
            return Err(JoyboardError::NotFound(format!("calendar {}", id)));
        }

        self.write(CALENDARS_FILE, &doc)
    }

    pub fn set_last_sync(&self, at: DateTime<Utc>) -> JoyboardResult<()> {
        let mut doc = self.read_calendars()?;
        doc.last_sync = Some(at);
        self.write(CALENDARS_FILE, &doc)
    }

    // --- Linked events ---

    pub fn links(&self) -> JoyboardResult<Vec<LinkedEvent>> {
        Ok(self.read_links()?.links)
    }

    /// Append one link (the manual path; the matcher is never consulted).
    pub fn add_link(&self, link: LinkedEvent) -> JoyboardResult<String> {
        let id = link.id.clone();
        self.append_links(vec![link])?;
        Ok(id)
    }

    /// Append a batch of links in one persisted write.
    pub fn append_links(&self, links: Vec<LinkedEvent>) -> JoyboardResult<()> {
        if links.is_empty() {
            return Ok(());
        }
        let mut doc = self.read_links()?;
        doc.links.extend(links);
        self.write(LINKS_FILE, &doc)
    }

    pub fn remove_link(&self, id: &str) -> JoyboardResult<()> {
        let mut doc = self.read_links()?;

        let before = doc.links.len();
        doc.links.retain(|l| l.id != id);
        if doc.links.len() == before {
            return Err(JoyboardError::NotFound(format!("linked event {}", id)));
        }

        self.write(LINKS_FILE, &doc)
    }

    // --- Document IO ---

    fn read_calendars(&self) -> JoyboardResult<CalendarsDoc> {
        self.read(CALENDARS_FILE)
    }

    fn read_links(&self) -> JoyboardResult<LinksDoc> {
        self.read(LINKS_FILE)
    }

    fn read<T: Default + DeserializeOwned>(&self, filename: &str) -> JoyboardResult<T> {
        let path = self.dir.join(filename);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write<T: Serialize>(&self, filename: &str, doc: &T) -> JoyboardResult<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(doc)?;
        fs::write(self.dir.join(filename), content)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
