//! When each comic was last read.
//!
//! Entries are pulled in pages keyed by entry id. `last_id` tracks the
//! highest id seen so the next load continues after it, and `last_payload`
//! is set once the server has nothing more to send. The server also pushes
//! changes on [`UPDATE_TOPIC`] and [`REMOVAL_TOPIC`].

pub mod effects;
pub mod reducer;
pub mod service;

use comicdesk_store::{action_types, Action, ActionCategory};
use serde::Serialize;

use crate::models::LastRead;
use crate::state::AppState;

pub use reducer::LastReadFeature;
pub use service::{LastReadPage, LastReadService};

pub const UPDATE_TOPIC: &str = "/topic/last-read-list.update";
pub const REMOVAL_TOPIC: &str = "/topic/last-read-list.removal";

action_types! {
    pub mod types {
        LOAD_ENTRIES = "[Last Read] Load entries";
        ENTRIES_LOADED = "[Last Read] Entries loaded";
        LOAD_ENTRIES_FAILED = "[Last Read] Load entries failed";
        SET_READ_STATE = "[Last Read] Set read state";
        READ_STATE_SET = "[Last Read] Read state set";
        SET_READ_STATE_FAILED = "[Last Read] Set read state failed";
        ENTRY_UPDATED = "[Last Read] Entry updated";
        ENTRY_REMOVED = "[Last Read] Entry removed";
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LastReadState {
    pub loading: bool,
    pub entries: Vec<LastRead>,
    pub last_id: u64,
    pub last_payload: bool,
    pub updating: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LastReadAction {
    LoadEntries {
        last_id: u64,
    },
    EntriesLoaded {
        entries: Vec<LastRead>,
        last_payload: bool,
    },
    LoadEntriesFailed,
    /// Mark comics read, or unread when `read` is false.
    SetReadState {
        ids: Vec<u64>,
        read: bool,
    },
    ReadStateSet {
        ids: Vec<u64>,
        read: bool,
    },
    SetReadStateFailed,
    EntryUpdated {
        entry: LastRead,
    },
    EntryRemoved {
        entry: LastRead,
    },
}

impl Action for LastReadAction {
    fn action_type(&self) -> &'static str {
        use LastReadAction::*;
        match self {
            LoadEntries { .. } => types::LOAD_ENTRIES,
            EntriesLoaded { .. } => types::ENTRIES_LOADED,
            LoadEntriesFailed => types::LOAD_ENTRIES_FAILED,
            SetReadState { .. } => types::SET_READ_STATE,
            ReadStateSet { .. } => types::READ_STATE_SET,
            SetReadStateFailed => types::SET_READ_STATE_FAILED,
            EntryUpdated { .. } => types::ENTRY_UPDATED,
            EntryRemoved { .. } => types::ENTRY_REMOVED,
        }
    }

    fn category(&self) -> ActionCategory {
        use LastReadAction::*;
        match self {
            LoadEntries { .. } | SetReadState { .. } => ActionCategory::Command,
            EntriesLoaded { .. } | ReadStateSet { .. } => ActionCategory::Success,
            LoadEntriesFailed | SetReadStateFailed => ActionCategory::Failure,
            EntryUpdated { .. } | EntryRemoved { .. } => ActionCategory::Event,
        }
    }
}

pub fn select_state(state: &AppState) -> LastReadState {
    (*state.last_read).clone()
}

pub fn select_entries(state: &AppState) -> Vec<LastRead> {
    state.last_read.entries.clone()
}

pub fn select_busy(state: &AppState) -> bool {
    state.last_read.loading || state.last_read.updating
}
