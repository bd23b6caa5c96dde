use comicdesk_store::{replace_by, Feature};

use super::{LastReadAction, LastReadState};
use crate::models::LastRead;
use crate::state::AppAction;

pub struct LastReadFeature;

impl Feature<AppAction> for LastReadFeature {
    const KEY: &'static str = "last-read";
    type State = LastReadState;

    fn reduce(state: &LastReadState, action: &AppAction) -> Option<LastReadState> {
        match action {
            AppAction::LastRead(action) => Some(reduce(state, action)),
            _ => None,
        }
    }
}

fn merge(state: &mut LastReadState, entry: &LastRead) {
    state.entries = replace_by(&state.entries, entry.clone(), |e| e.id);
    state.last_id = state.last_id.max(entry.id);
}

fn reduce(state: &LastReadState, action: &LastReadAction) -> LastReadState {
    use LastReadAction::*;
    let mut next = state.clone();
    match action {
        LoadEntries { .. } => next.loading = true,
        EntriesLoaded {
            entries,
            last_payload,
        } => {
            next.loading = false;
            for entry in entries {
                merge(&mut next, entry);
            }
            next.last_payload = *last_payload;
        }
        LoadEntriesFailed => next.loading = false,
        SetReadState { .. } => next.updating = true,
        // Individual entries change through the pushed topics.
        ReadStateSet { .. } | SetReadStateFailed => next.updating = false,
        EntryUpdated { entry } => merge(&mut next, entry),
        EntryRemoved { entry } => next.entries.retain(|e| e.id != entry.id),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::last_read;
    use crate::reading_lists::ReadingListsAction;
    use comicdesk_store::feature_test_suite::{assert_identity, reduce_all};

    #[test]
    fn ignores_other_features() {
        assert_identity::<AppAction, LastReadFeature>(
            LastReadState {
                entries: vec![last_read(1, 10)],
                last_id: 1,
                ..Default::default()
            },
            &ReadingListsAction::LoadLists.into(),
        );
    }

    #[test]
    fn pages_merge_and_advance_cursor() {
        let state = reduce_all::<AppAction, LastReadFeature>(
            LastReadState::default(),
            &[
                LastReadAction::LoadEntries { last_id: 0 }.into(),
                LastReadAction::EntriesLoaded {
                    entries: vec![last_read(1, 10), last_read(4, 40)],
                    last_payload: false,
                }
                .into(),
            ],
        );
        assert!(!state.loading);
        assert_eq!(state.last_id, 4);
        assert!(!state.last_payload);

        let mut reread = last_read(1, 10);
        reread.last_read = 99_999;
        let state = reduce_all::<AppAction, LastReadFeature>(
            state,
            &[
                LastReadAction::LoadEntries { last_id: 4 }.into(),
                LastReadAction::EntriesLoaded {
                    entries: vec![reread.clone(), last_read(6, 60)],
                    last_payload: true,
                }
                .into(),
            ],
        );
        assert_eq!(state.entries.len(), 3);
        assert!(state.entries.contains(&reread));
        assert_eq!(state.last_id, 6);
        assert!(state.last_payload);
    }

    #[test]
    fn load_failure_keeps_entries() {
        let before = LastReadState {
            entries: vec![last_read(2, 20)],
            last_id: 2,
            loading: true,
            ..Default::default()
        };
        let state = reduce_all::<AppAction, LastReadFeature>(
            before.clone(),
            &[LastReadAction::LoadEntriesFailed.into()],
        );
        assert_eq!(
            state,
            LastReadState {
                loading: false,
                ..before
            }
        );
    }

    #[test]
    fn pushed_entries() {
        let state = reduce_all::<AppAction, LastReadFeature>(
            LastReadState {
                entries: vec![last_read(1, 10), last_read(2, 20)],
                last_id: 2,
                ..Default::default()
            },
            &[
                LastReadAction::EntryUpdated {
                    entry: last_read(8, 80),
                }
                .into(),
                LastReadAction::EntryRemoved {
                    entry: last_read(1, 10),
                }
                .into(),
            ],
        );
        assert_eq!(state.entries, vec![last_read(2, 20), last_read(8, 80)]);
        assert_eq!(state.last_id, 8);
    }

    #[test]
    fn read_state_toggles_updating() {
        let state = reduce_all::<AppAction, LastReadFeature>(
            LastReadState::default(),
            &[LastReadAction::SetReadState {
                ids: vec![10],
                read: true,
            }
            .into()],
        );
        assert!(state.updating);

        let state = reduce_all::<AppAction, LastReadFeature>(
            state,
            &[LastReadAction::ReadStateSet {
                ids: vec![10],
                read: true,
            }
            .into()],
        );
        assert!(!state.updating);
    }
}
