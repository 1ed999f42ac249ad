use std::path::PathBuf;

use anyhow::Result;
use joyboard_core::{DashboardSnapshot, FeedFetcher, JoyboardResult, LinkStore};

/// Shared application state.
///
/// The store and the dashboard snapshot are re-read on each request to pick
/// up filesystem changes made by the rest of the dashboard; only the HTTP
/// client is long-lived.
#[derive(Clone)]
pub struct AppState {
    data_dir: PathBuf,
    fetcher: FeedFetcher,
}

impl AppState {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        let fetcher = FeedFetcher::new()?;
        Ok(AppState { data_dir, fetcher })
    }

    pub fn store(&self) -> LinkStore {
        LinkStore::new(&self.data_dir)
    }

    pub fn snapshot(&self) -> JoyboardResult<DashboardSnapshot> {
        DashboardSnapshot::load(&self.data_dir)
    }

    pub fn fetcher(&self) -> &FeedFetcher {
        &self.fetcher
    }
}
