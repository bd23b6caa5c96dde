//! The server's log of REST calls, fetched incrementally by timestamp.
//!
//! Each fetch asks for entries newer than a cutoff and the reply carries the
//! newest timestamp seen, which becomes the next cutoff. Results are appended
//! to what is already loaded.

pub mod effects;
pub mod reducer;
pub mod service;

use comicdesk_store::{action_types, Action, ActionCategory};
use serde::Serialize;

use crate::models::RestAuditLogEntry;
use crate::state::AppState;

pub use reducer::RestAuditLog;
pub use service::{AuditLogPage, RestAuditLogService};

action_types! {
    pub mod types {
        GET_ENTRIES = "[REST Audit Log] Get entries";
        ENTRIES_RECEIVED = "[REST Audit Log] Entries received";
        GET_ENTRIES_FAILED = "[REST Audit Log] Get entries failed";
        CLEAR = "[REST Audit Log] Clear";
        CLEARED = "[REST Audit Log] Cleared";
        CLEAR_FAILED = "[REST Audit Log] Clear failed";
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RestAuditLogState {
    pub loading: bool,
    pub entries: Vec<RestAuditLogEntry>,
    /// Cutoff for the next fetch, in milliseconds since the epoch.
    pub latest: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestAuditLogAction {
    GetEntries {
        cutoff: u64,
    },
    EntriesReceived {
        entries: Vec<RestAuditLogEntry>,
        latest: u64,
    },
    GetEntriesFailed,
    Clear,
    Cleared,
    ClearFailed,
}

impl Action for RestAuditLogAction {
    fn action_type(&self) -> &'static str {
        use RestAuditLogAction::*;
        match self {
            GetEntries { .. } => types::GET_ENTRIES,
            EntriesReceived { .. } => types::ENTRIES_RECEIVED,
            GetEntriesFailed => types::GET_ENTRIES_FAILED,
            Clear => types::CLEAR,
            Cleared => types::CLEARED,
            ClearFailed => types::CLEAR_FAILED,
        }
    }

    fn category(&self) -> ActionCategory {
        use RestAuditLogAction::*;
        match self {
            GetEntries { .. } | Clear => ActionCategory::Command,
            EntriesReceived { .. } | Cleared => ActionCategory::Success,
            GetEntriesFailed | ClearFailed => ActionCategory::Failure,
        }
    }
}

pub fn select_state(state: &AppState) -> RestAuditLogState {
    (*state.rest_audit_log).clone()
}

pub fn select_latest(state: &AppState) -> u64 {
    state.rest_audit_log.latest
}

pub fn select_busy(state: &AppState) -> bool {
    state.rest_audit_log.loading
}
