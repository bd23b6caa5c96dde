//! Views that combine more than one slice.

use comicdesk_store::combine;

use crate::models::{LastRead, ScrapingVolume};
use crate::scraping::{rank, VolumeMatch};
use crate::state::AppState;
use crate::{
    blocked_pages, comic_book, comic_import, last_read, reading_lists, rest_audit_log, scraping,
};

/// Whether any feature has a request in flight.
pub fn select_busy(state: &AppState) -> bool {
    blocked_pages::select_busy(state)
        || rest_audit_log::select_busy(state)
        || comic_import::select_busy(state)
        || comic_book::select_busy(state)
        || reading_lists::select_busy(state)
        || scraping::select_busy(state)
        || last_read::select_busy(state)
}

/// Search results ranked against the last search, best match first.
pub fn select_ranked_volumes(state: &AppState) -> Vec<(VolumeMatch, ScrapingVolume)> {
    let slice = &state.scraping;
    rank(&slice.volumes, &slice.series, &slice.volume)
}

pub fn select_selected_file_count(state: &AppState) -> usize {
    state.comic_import.selections.len()
}

/// When the open comic was last read, if ever.
pub fn select_current_comic_last_read(state: &AppState) -> Option<LastRead> {
    combine(
        comic_book::select_current,
        last_read::select_entries,
        |comic, entries| {
            let comic = comic?;
            entries.into_iter().find(|e| e.comic_id == comic.id)
        },
    )(state)
}
