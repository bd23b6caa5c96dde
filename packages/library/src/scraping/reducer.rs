use comicdesk_store::Feature;

use super::{ScrapingAction, ScrapingState};
use crate::state::AppAction;

pub struct Scraping;

impl Feature<AppAction> for Scraping {
    const KEY: &'static str = "scraping";
    type State = ScrapingState;

    fn reduce(state: &ScrapingState, action: &AppAction) -> Option<ScrapingState> {
        match action {
            AppAction::Scraping(action) => Some(reduce(state, action)),
            _ => None,
        }
    }
}

fn reduce(state: &ScrapingState, action: &ScrapingAction) -> ScrapingState {
    use ScrapingAction::*;
    let mut next = state.clone();
    match action {
        LoadVolumes { series, volume, .. } => {
            next.busy = true;
            next.volumes.clear();
            next.series = series.clone();
            next.volume = volume.clone();
        }
        VolumesLoaded { volumes } => {
            next.busy = false;
            next.volumes = volumes.clone();
        }
        ScrapeComic { .. } => next.busy = true,
        // The volume list stays so another issue can be picked.
        ComicScraped { .. } | LoadVolumesFailed | ScrapeComicFailed => next.busy = false,
        ResetVolumes => return ScrapingState::default(),
    }
    next
}
