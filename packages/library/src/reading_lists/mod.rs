//! User-curated reading lists.

pub mod effects;
pub mod reducer;
pub mod service;

use comicdesk_store::{action_types, Action, ActionCategory};
use serde::Serialize;

use crate::models::ReadingList;
use crate::state::AppState;

pub use reducer::ReadingLists;
pub use service::ReadingListsService;

action_types! {
    pub mod types {
        LOAD_LISTS = "[Reading Lists] Load lists";
        LISTS_LOADED = "[Reading Lists] Lists loaded";
        LOAD_LISTS_FAILED = "[Reading Lists] Load lists failed";
        LOAD_LIST = "[Reading Lists] Load list";
        LIST_LOADED = "[Reading Lists] List loaded";
        LOAD_LIST_FAILED = "[Reading Lists] Load list failed";
        SAVE_LIST = "[Reading Lists] Save list";
        LIST_SAVED = "[Reading Lists] List saved";
        SAVE_LIST_FAILED = "[Reading Lists] Save list failed";
        DELETE_LISTS = "[Reading Lists] Delete lists";
        LISTS_DELETED = "[Reading Lists] Lists deleted";
        DELETE_LISTS_FAILED = "[Reading Lists] Delete lists failed";
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadingListsState {
    pub loading: bool,
    pub lists: Vec<ReadingList>,
    pub current: Option<ReadingList>,
    pub saving: bool,
    pub deleting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadingListsAction {
    LoadLists,
    ListsLoaded { lists: Vec<ReadingList> },
    LoadListsFailed,
    LoadList { id: u64 },
    ListLoaded { list: ReadingList },
    LoadListFailed,
    SaveList { list: ReadingList },
    ListSaved { list: ReadingList },
    SaveListFailed,
    DeleteLists { ids: Vec<u64> },
    ListsDeleted { ids: Vec<u64> },
    DeleteListsFailed,
}

impl Action for ReadingListsAction {
    fn action_type(&self) -> &'static str {
        use ReadingListsAction::*;
        match self {
            LoadLists => types::LOAD_LISTS,
            ListsLoaded { .. } => types::LISTS_LOADED,
            LoadListsFailed => types::LOAD_LISTS_FAILED,
            LoadList { .. } => types::LOAD_LIST,
            ListLoaded { .. } => types::LIST_LOADED,
            LoadListFailed => types::LOAD_LIST_FAILED,
            SaveList { .. } => types::SAVE_LIST,
            ListSaved { .. } => types::LIST_SAVED,
            SaveListFailed => types::SAVE_LIST_FAILED,
            DeleteLists { .. } => types::DELETE_LISTS,
            ListsDeleted { .. } => types::LISTS_DELETED,
            DeleteListsFailed => types::DELETE_LISTS_FAILED,
        }
    }

    fn category(&self) -> ActionCategory {
        use ReadingListsAction::*;
        match self {
            LoadLists | LoadList { .. } | SaveList { .. } | DeleteLists { .. } => {
                ActionCategory::Command
            }
            ListsLoaded { .. } | ListLoaded { .. } | ListSaved { .. } | ListsDeleted { .. } => {
                ActionCategory::Success
            }
            LoadListsFailed | LoadListFailed | SaveListFailed | DeleteListsFailed => {
                ActionCategory::Failure
            }
        }
    }
}

pub fn select_state(state: &AppState) -> ReadingListsState {
    (*state.reading_lists).clone()
}

pub fn select_lists(state: &AppState) -> Vec<ReadingList> {
    state.reading_lists.lists.clone()
}

pub fn select_busy(state: &AppState) -> bool {
    let slice = &state.reading_lists;
    slice.loading || slice.saving || slice.deleting
}
