use comicdesk_store::{replace_by, Feature};

use super::{ReadingListsAction, ReadingListsState};
use crate::state::AppAction;

pub struct ReadingLists;

impl Feature<AppAction> for ReadingLists {
    const KEY: &'static str = "reading-lists";
    type State = ReadingListsState;

    fn reduce(state: &ReadingListsState, action: &AppAction) -> Option<ReadingListsState> {
        match action {
            AppAction::ReadingLists(action) => Some(reduce(state, action)),
            _ => None,
        }
    }
}

fn reduce(state: &ReadingListsState, action: &ReadingListsAction) -> ReadingListsState {
    use ReadingListsAction::*;
    let mut next = state.clone();
    match action {
        LoadLists => {
            next.loading = true;
            next.lists.clear();
        }
        ListsLoaded { lists } => {
            next.loading = false;
            next.lists = lists.clone();
        }
        LoadList { .. } => next.loading = true,
        ListLoaded { list } => {
            next.loading = false;
            next.current = Some(list.clone());
        }
        LoadListsFailed | LoadListFailed => next.loading = false,
        SaveList { .. } => next.saving = true,
        ListSaved { list } => {
            next.saving = false;
            next.lists = replace_by(&next.lists, list.clone(), |l| l.id);
            next.current = Some(list.clone());
        }
        SaveListFailed => next.saving = false,
        DeleteLists { .. } => next.deleting = true,
        ListsDeleted { ids } => {
            next.deleting = false;
            next.lists.retain(|l| !l.id.is_some_and(|id| ids.contains(&id)));
            if next
                .current
                .as_ref()
                .and_then(|c| c.id)
                .is_some_and(|id| ids.contains(&id))
            {
                next.current = None;
            }
        }
        DeleteListsFailed => next.deleting = false,
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::MessagingAction;
    use crate::models::fixtures::reading_list;
    use comicdesk_store::feature_test_suite::{assert_identity, reduce_all};

    fn with_lists(ids: &[u64]) -> ReadingListsState {
        ReadingListsState {
            lists: ids
                .iter()
                .map(|id| reading_list(Some(*id), &format!("List {}", id)))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn ignores_other_features() {
        assert_identity::<AppAction, ReadingLists>(
            with_lists(&[1, 2]),
            &MessagingAction::Connected.into(),
        );
    }

    #[test]
    fn load_replaces_lists() {
        let fresh = vec![reading_list(Some(7), "Fresh")];
        let state = reduce_all::<AppAction, ReadingLists>(
            with_lists(&[1, 2]),
            &[
                ReadingListsAction::LoadLists.into(),
                ReadingListsAction::ListsLoaded {
                    lists: fresh.clone(),
                }
                .into(),
            ],
        );
        assert!(!state.loading);
        assert_eq!(state.lists, fresh);
    }

    #[test]
    fn first_save_adds_the_stored_list() {
        let stored = reading_list(Some(3), "Summer");
        let state = reduce_all::<AppAction, ReadingLists>(
            with_lists(&[1]),
            &[
                ReadingListsAction::SaveList {
                    list: reading_list(None, "Summer"),
                }
                .into(),
                ReadingListsAction::ListSaved {
                    list: stored.clone(),
                }
                .into(),
            ],
        );
        assert!(!state.saving);
        assert_eq!(state.lists.len(), 2);
        assert_eq!(state.current, Some(stored));
    }

    #[test]
    fn resave_replaces_stale_copy() {
        let mut renamed = reading_list(Some(1), "Renamed");
        renamed.comic_ids = vec![10, 11];
        let state = reduce_all::<AppAction, ReadingLists>(
            with_lists(&[1, 2]),
            &[ReadingListsAction::ListSaved {
                list: renamed.clone(),
            }
            .into()],
        );
        assert_eq!(state.lists.len(), 2);
        assert_eq!(state.lists.iter().filter(|l| l.id == Some(1)).count(), 1);
        assert!(state.lists.contains(&renamed));
    }

    #[test]
    fn save_failure_keeps_lists() {
        let before = with_lists(&[1]);
        let state = reduce_all::<AppAction, ReadingLists>(
            before.clone(),
            &[
                ReadingListsAction::SaveList {
                    list: reading_list(Some(1), "x"),
                }
                .into(),
                ReadingListsAction::SaveListFailed.into(),
            ],
        );
        assert_eq!(state, before);
    }

    #[test]
    fn deleted_lists_are_removed() {
        let mut before = with_lists(&[1, 2, 3]);
        before.current = Some(reading_list(Some(2), "List 2"));
        let state = reduce_all::<AppAction, ReadingLists>(
            before,
            &[ReadingListsAction::ListsDeleted { ids: vec![2, 3] }.into()],
        );
        assert_eq!(state.lists, with_lists(&[1]).lists);
        assert_eq!(state.current, None);
    }
}
