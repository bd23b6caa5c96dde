use comicdesk_store::{replace_by, Feature};

use super::{BlockedPagesAction, BlockedPagesState};
use crate::state::AppAction;

pub struct BlockedPages;

impl Feature<AppAction> for BlockedPages {
    const KEY: &'static str = "blocked-pages";
    type State = BlockedPagesState;

    fn reduce(state: &BlockedPagesState, action: &AppAction) -> Option<BlockedPagesState> {
        match action {
            AppAction::BlockedPages(action) => Some(reduce(state, action)),
            _ => None,
        }
    }
}

fn reduce(state: &BlockedPagesState, action: &BlockedPagesAction) -> BlockedPagesState {
    use BlockedPagesAction::*;
    let mut next = state.clone();
    match action {
        LoadList => {
            next.loading = true;
            next.entries.clear();
        }
        ListLoaded { entries } => {
            next.loading = false;
            next.entries = entries.clone();
        }
        LoadByHash { .. } => next.loading = true,
        Loaded { entry } => {
            next.loading = false;
            next.current = Some(entry.clone());
        }
        LoadListFailed | LoadFailed => next.loading = false,
        Save { .. } | SetBlockedState { .. } => next.saving = true,
        Saved { entry } => {
            next.saving = false;
            next.entries = replace_by(&next.entries, entry.clone(), |e| e.hash.clone());
            next.current = Some(entry.clone());
        }
        BlockedStateSet { .. } | SaveFailed | SetBlockedStateFailed => next.saving = false,
        DeleteEntries { .. } => next.deleting = true,
        EntriesDeleted { hashes } => {
            next.deleting = false;
            next.entries.retain(|e| !hashes.contains(&e.hash));
            if next.current.as_ref().is_some_and(|c| hashes.contains(&c.hash)) {
                next.current = None;
            }
        }
        DeleteEntriesFailed => next.deleting = false,
        EntryUpdated { entry } => {
            next.entries = replace_by(&next.entries, entry.clone(), |e| e.hash.clone());
            if next.current.as_ref().is_some_and(|c| c.hash == entry.hash) {
                next.current = Some(entry.clone());
            }
        }
        EntryRemoved { entry } => {
            next.entries.retain(|e| e.hash != entry.hash);
            if next.current.as_ref().is_some_and(|c| c.hash == entry.hash) {
                next.current = None;
            }
        }
    }
    next
}
