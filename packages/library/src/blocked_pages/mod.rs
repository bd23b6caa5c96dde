//! Blocked pages: page hashes the server skips when importing comics.

pub mod effects;
pub mod reducer;
pub mod service;

use comicdesk_store::{action_types, Action, ActionCategory};
use serde::Serialize;

use crate::models::BlockedPage;
use crate::state::AppState;

pub use reducer::BlockedPages;
pub use service::BlockedPagesService;

pub const UPDATE_TOPIC: &str = "/topic/blocked-hash-list.update";
pub const REMOVAL_TOPIC: &str = "/topic/blocked-hash-list.removal";

action_types! {
    pub mod types {
        LOAD_LIST = "[Blocked Pages] Load list";
        LIST_LOADED = "[Blocked Pages] List loaded";
        LOAD_LIST_FAILED = "[Blocked Pages] Load list failed";
        LOAD_BY_HASH = "[Blocked Pages] Load by hash";
        LOADED = "[Blocked Pages] Loaded";
        LOAD_FAILED = "[Blocked Pages] Load failed";
        SAVE = "[Blocked Pages] Save";
        SAVED = "[Blocked Pages] Saved";
        SAVE_FAILED = "[Blocked Pages] Save failed";
        SET_BLOCKED_STATE = "[Blocked Pages] Set blocked state";
        BLOCKED_STATE_SET = "[Blocked Pages] Blocked state set";
        SET_BLOCKED_STATE_FAILED = "[Blocked Pages] Set blocked state failed";
        DELETE_ENTRIES = "[Blocked Pages] Delete entries";
        ENTRIES_DELETED = "[Blocked Pages] Entries deleted";
        DELETE_ENTRIES_FAILED = "[Blocked Pages] Delete entries failed";
        ENTRY_UPDATED = "[Blocked Pages] Entry updated";
        ENTRY_REMOVED = "[Blocked Pages] Entry removed";
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockedPagesState {
    pub loading: bool,
    pub entries: Vec<BlockedPage>,
    pub current: Option<BlockedPage>,
    pub saving: bool,
    pub deleting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockedPagesAction {
    LoadList,
    ListLoaded { entries: Vec<BlockedPage> },
    LoadListFailed,
    LoadByHash { hash: String },
    Loaded { entry: BlockedPage },
    LoadFailed,
    Save { entry: BlockedPage },
    Saved { entry: BlockedPage },
    SaveFailed,
    SetBlockedState { hashes: Vec<String>, blocked: bool },
    BlockedStateSet { hashes: Vec<String>, blocked: bool },
    SetBlockedStateFailed,
    DeleteEntries { hashes: Vec<String> },
    EntriesDeleted { hashes: Vec<String> },
    DeleteEntriesFailed,
    EntryUpdated { entry: BlockedPage },
    EntryRemoved { entry: BlockedPage },
}

impl Action for BlockedPagesAction {
    fn action_type(&self) -> &'static str {
        use BlockedPagesAction::*;
        match self {
            LoadList => types::LOAD_LIST,
            ListLoaded { .. } => types::LIST_LOADED,
            LoadListFailed => types::LOAD_LIST_FAILED,
            LoadByHash { .. } => types::LOAD_BY_HASH,
            Loaded { .. } => types::LOADED,
            LoadFailed => types::LOAD_FAILED,
            Save { .. } => types::SAVE,
            Saved { .. } => types::SAVED,
            SaveFailed => types::SAVE_FAILED,
            SetBlockedState { .. } => types::SET_BLOCKED_STATE,
            BlockedStateSet { .. } => types::BLOCKED_STATE_SET,
            SetBlockedStateFailed => types::SET_BLOCKED_STATE_FAILED,
            DeleteEntries { .. } => types::DELETE_ENTRIES,
            EntriesDeleted { .. } => types::ENTRIES_DELETED,
            DeleteEntriesFailed => types::DELETE_ENTRIES_FAILED,
            EntryUpdated { .. } => types::ENTRY_UPDATED,
            EntryRemoved { .. } => types::ENTRY_REMOVED,
        }
    }

    fn category(&self) -> ActionCategory {
        use BlockedPagesAction::*;
        match self {
            LoadList | LoadByHash { .. } | Save { .. } | SetBlockedState { .. }
            | DeleteEntries { .. } => ActionCategory::Command,
            ListLoaded { .. } | Loaded { .. } | Saved { .. } | BlockedStateSet { .. }
            | EntriesDeleted { .. } => ActionCategory::Success,
            LoadListFailed | LoadFailed | SaveFailed | SetBlockedStateFailed
            | DeleteEntriesFailed => ActionCategory::Failure,
            EntryUpdated { .. } | EntryRemoved { .. } => ActionCategory::Event,
        }
    }
}

pub fn select_state(state: &AppState) -> BlockedPagesState {
    (*state.blocked_pages).clone()
}

pub fn select_entries(state: &AppState) -> Vec<BlockedPage> {
    state.blocked_pages.entries.clone()
}

pub fn select_busy(state: &AppState) -> bool {
    let slice = &state.blocked_pages;
    slice.loading || slice.saving || slice.deleting
}
