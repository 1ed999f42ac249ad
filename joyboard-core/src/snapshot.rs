//! Read-only snapshot of the dashboard's record stores.
//!
//! Travel destinations, local places and bucket-list experiences are owned by
//! the rest of the dashboard; this engine only reads them. The snapshot is
//! assembled once per sync invocation and passed by value into the matcher,
//! so matching never depends on hidden process-wide state.

use std::path::Path;

use serde::Deserialize;

use crate::error::JoyboardResult;

/// A travel destination (from `travel.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A local place (from `local.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A bucket-list experience (from `experiences.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Everything the link matcher needs to know about the dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub destinations: Vec<Destination>,
    pub places: Vec<Place>,
    pub experiences: Vec<Experience>,
}

#[derive(Default, Deserialize)]
struct TravelFile {
    #[serde(default)]
    destinations: Vec<Destination>,
}

#[derive(Default, Deserialize)]
struct LocalFile {
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Default, Deserialize)]
struct ExperiencesFile {
    #[serde(default)]
    experiences: Vec<Experience>,
}

impl DashboardSnapshot {
    /// Load the snapshot from the dashboard's data directory.
    ///
    /// A missing file reads as an empty collection; unknown fields in the
    /// records are ignored.
    pub fn load(dir: &Path) -> JoyboardResult<Self> {
        let travel: TravelFile = read_or_default(&dir.join("travel.json"))?;
        let local: LocalFile = read_or_default(&dir.join("local.json"))?;
        let experiences: ExperiencesFile = read_or_default(&dir.join("experiences.json"))?;

        Ok(DashboardSnapshot {
            destinations: travel.destinations,
            places: local.places,
            experiences: experiences.experiences,
        })
    }
}

fn read_or_default<T: Default + for<'de> Deserialize<'de>>(path: &Path) -> JoyboardResult<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
