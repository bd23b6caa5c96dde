//! The comic book currently open for viewing or editing.

pub mod effects;
pub mod reducer;
pub mod service;

use comicdesk_store::{action_types, Action, ActionCategory};
use serde::Serialize;

use crate::models::ComicBook;
use crate::state::AppState;

pub use reducer::ComicBookFeature;
pub use service::ComicBookService;

action_types! {
    pub mod types {
        LOAD_COMIC = "[Comic Book] Load comic";
        COMIC_LOADED = "[Comic Book] Comic loaded";
        LOAD_COMIC_FAILED = "[Comic Book] Load comic failed";
        UPDATE_COMIC = "[Comic Book] Update comic";
        COMIC_UPDATED = "[Comic Book] Comic updated";
        UPDATE_COMIC_FAILED = "[Comic Book] Update comic failed";
        DELETE_COMIC = "[Comic Book] Delete comic";
        COMIC_DELETED = "[Comic Book] Comic deleted";
        DELETE_COMIC_FAILED = "[Comic Book] Delete comic failed";
        RESTORE_COMIC = "[Comic Book] Restore comic";
        COMIC_RESTORED = "[Comic Book] Comic restored";
        RESTORE_COMIC_FAILED = "[Comic Book] Restore comic failed";
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComicBookState {
    pub loading: bool,
    pub current: Option<ComicBook>,
    pub saving: bool,
    pub deleting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComicBookAction {
    LoadComic { id: u64 },
    ComicLoaded { comic: ComicBook },
    LoadComicFailed,
    UpdateComic { comic: ComicBook },
    ComicUpdated { comic: ComicBook },
    UpdateComicFailed,
    DeleteComic { comic: ComicBook },
    ComicDeleted { comic: ComicBook },
    DeleteComicFailed,
    RestoreComic { comic: ComicBook },
    ComicRestored { comic: ComicBook },
    RestoreComicFailed,
}

impl Action for ComicBookAction {
    fn action_type(&self) -> &'static str {
        use ComicBookAction::*;
        match self {
            LoadComic { .. } => types::LOAD_COMIC,
            ComicLoaded { .. } => types::COMIC_LOADED,
            LoadComicFailed => types::LOAD_COMIC_FAILED,
            UpdateComic { .. } => types::UPDATE_COMIC,
            ComicUpdated { .. } => types::COMIC_UPDATED,
            UpdateComicFailed => types::UPDATE_COMIC_FAILED,
            DeleteComic { .. } => types::DELETE_COMIC,
            ComicDeleted { .. } => types::COMIC_DELETED,
            DeleteComicFailed => types::DELETE_COMIC_FAILED,
            RestoreComic { .. } => types::RESTORE_COMIC,
            ComicRestored { .. } => types::COMIC_RESTORED,
            RestoreComicFailed => types::RESTORE_COMIC_FAILED,
        }
    }

    fn category(&self) -> ActionCategory {
        use ComicBookAction::*;
        match self {
            LoadComic { .. } | UpdateComic { .. } | DeleteComic { .. } | RestoreComic { .. } => {
                ActionCategory::Command
            }
            ComicLoaded { .. } | ComicUpdated { .. } | ComicDeleted { .. }
            | ComicRestored { .. } => ActionCategory::Success,
            LoadComicFailed | UpdateComicFailed | DeleteComicFailed | RestoreComicFailed => {
                ActionCategory::Failure
            }
        }
    }
}

pub fn select_state(state: &AppState) -> ComicBookState {
    (*state.comic_book).clone()
}

pub fn select_current(state: &AppState) -> Option<ComicBook> {
    state.comic_book.current.clone()
}

pub fn select_busy(state: &AppState) -> bool {
    let slice = &state.comic_book;
    slice.loading || slice.saving || slice.deleting
}
