//! Looking up comic metadata in an external database through the server.
//!
//! A scrape is two steps: search the volumes matching a series and start
//! year, then scrape one issue of the chosen volume into a comic. The slice
//! remembers the series and volume searched so results can be ranked against
//! them (see [`matching`]).

pub mod effects;
pub mod matching;
pub mod reducer;
pub mod service;

use comicdesk_store::{action_types, Action, ActionCategory};
use serde::Serialize;

use crate::models::{ComicBook, ScrapingVolume};
use crate::state::AppState;

pub use matching::{classify, rank, VolumeMatch};
pub use reducer::Scraping;
pub use service::ScrapingService;

action_types! {
    pub mod types {
        LOAD_VOLUMES = "[Scraping] Load volumes";
        VOLUMES_LOADED = "[Scraping] Volumes loaded";
        LOAD_VOLUMES_FAILED = "[Scraping] Load volumes failed";
        SCRAPE_COMIC = "[Scraping] Scrape comic";
        COMIC_SCRAPED = "[Scraping] Comic scraped";
        SCRAPE_COMIC_FAILED = "[Scraping] Scrape comic failed";
        RESET_VOLUMES = "[Scraping] Reset volumes";
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScrapingState {
    pub busy: bool,
    pub volumes: Vec<ScrapingVolume>,
    /// Series name of the last volume search.
    pub series: String,
    /// Start year of the last volume search.
    pub volume: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScrapingAction {
    LoadVolumes {
        api_key: String,
        series: String,
        volume: String,
        max_records: u32,
        skip_cache: bool,
    },
    VolumesLoaded {
        volumes: Vec<ScrapingVolume>,
    },
    LoadVolumesFailed,
    ScrapeComic {
        api_key: String,
        issue_id: u64,
        comic_id: u64,
        skip_cache: bool,
    },
    ComicScraped {
        comic: ComicBook,
    },
    ScrapeComicFailed,
    ResetVolumes,
}

impl Action for ScrapingAction {
    fn action_type(&self) -> &'static str {
        use ScrapingAction::*;
        match self {
            LoadVolumes { .. } => types::LOAD_VOLUMES,
            VolumesLoaded { .. } => types::VOLUMES_LOADED,
            LoadVolumesFailed => types::LOAD_VOLUMES_FAILED,
            ScrapeComic { .. } => types::SCRAPE_COMIC,
            ComicScraped { .. } => types::COMIC_SCRAPED,
            ScrapeComicFailed => types::SCRAPE_COMIC_FAILED,
            ResetVolumes => types::RESET_VOLUMES,
        }
    }

    fn category(&self) -> ActionCategory {
        use ScrapingAction::*;
        match self {
            LoadVolumes { .. } | ScrapeComic { .. } | ResetVolumes => ActionCategory::Command,
            VolumesLoaded { .. } | ComicScraped { .. } => ActionCategory::Success,
            LoadVolumesFailed | ScrapeComicFailed => ActionCategory::Failure,
        }
    }
}

pub fn select_state(state: &AppState) -> ScrapingState {
    (*state.scraping).clone()
}

pub fn select_volumes(state: &AppState) -> Vec<ScrapingVolume> {
    state.scraping.volumes.clone()
}

pub fn select_busy(state: &AppState) -> bool {
    state.scraping.busy
}
