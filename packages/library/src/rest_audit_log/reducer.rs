use comicdesk_store::Feature;

use super::{RestAuditLogAction, RestAuditLogState};
use crate::state::AppAction;

pub struct RestAuditLog;

impl Feature<AppAction> for RestAuditLog {
    const KEY: &'static str = "rest-audit-log";
    type State = RestAuditLogState;

    fn reduce(state: &RestAuditLogState, action: &AppAction) -> Option<RestAuditLogState> {
        match action {
            AppAction::RestAuditLog(action) => Some(reduce(state, action)),
            _ => None,
        }
    }
}

fn reduce(state: &RestAuditLogState, action: &RestAuditLogAction) -> RestAuditLogState {
    use RestAuditLogAction::*;
    let mut next = state.clone();
    match action {
        GetEntries { .. } | Clear => next.loading = true,
        EntriesReceived { entries, latest } => {
            next.loading = false;
            next.entries.extend(entries.iter().cloned());
            next.latest = *latest;
        }
        Cleared => {
            next.loading = false;
            next.entries.clear();
            next.latest = 0;
        }
        GetEntriesFailed | ClearFailed => next.loading = false,
    }
    next
}
