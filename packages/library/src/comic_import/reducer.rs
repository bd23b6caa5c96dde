use comicdesk_store::Feature;

use super::{ComicImportAction, ComicImportState};
use crate::models::ComicFile;
use crate::state::AppAction;

pub struct ComicImport;

impl Feature<AppAction> for ComicImport {
    const KEY: &'static str = "comic-import";
    type State = ComicImportState;

    fn reduce(state: &ComicImportState, action: &AppAction) -> Option<ComicImportState> {
        match action {
            AppAction::ComicImport(action) => Some(reduce(state, action)),
            _ => None,
        }
    }
}

fn reduce(state: &ComicImportState, action: &ComicImportAction) -> ComicImportState {
    use ComicImportAction::*;
    let mut next = state.clone();
    match action {
        LoadFiles { .. } => {
            next.loading = true;
            next.files.clear();
            next.selections.clear();
        }
        FilesLoaded { files } => {
            next.loading = false;
            next.files = files.clone();
        }
        LoadFilesFailed => next.loading = false,
        SetSelectedState { files, selected } => {
            if *selected {
                for file in files {
                    if !contains(&next.selections, file) {
                        next.selections.push(file.clone());
                    }
                }
            } else {
                next.selections.retain(|s| !contains(files, s));
            }
        }
        ClearSelections => next.selections.clear(),
        ImportFiles { .. } => next.importing = true,
        FilesImported { files } => {
            next.importing = false;
            next.files.retain(|f| !contains(files, f));
            next.selections.retain(|s| !contains(files, s));
        }
        ImportFilesFailed => next.importing = false,
    }
    next
}

fn contains(files: &[ComicFile], file: &ComicFile) -> bool {
    files.iter().any(|f| f.filename == file.filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::MessagingAction;
    use crate::models::fixtures::comic_file;
    use comicdesk_store::feature_test_suite::{assert_identity, reduce_all};

    fn select(files: &[ComicFile], selected: bool) -> AppAction {
        ComicImportAction::SetSelectedState {
            files: files.to_vec(),
            selected,
        }
        .into()
    }

    #[test]
    fn ignores_other_features() {
        assert_identity::<AppAction, ComicImport>(
            ComicImportState {
                files: vec![comic_file("a.cbz")],
                ..Default::default()
            },
            &MessagingAction::Disconnected.into(),
        );
    }

    #[test]
    fn selecting_twice_keeps_one_copy() {
        let f = comic_file("f.cbz");
        let state = reduce_all::<AppAction, ComicImport>(
            ComicImportState::default(),
            &[select(&[f.clone()], true)],
        );
        assert_eq!(state.selections, vec![f.clone()]);

        let state = reduce_all::<AppAction, ComicImport>(state, &[select(&[f.clone()], true)]);
        assert_eq!(state.selections, vec![f.clone()]);

        let state = reduce_all::<AppAction, ComicImport>(state, &[select(&[f], false)]);
        assert!(state.selections.is_empty());
    }

    #[test]
    fn selection_matches_on_filename() {
        let f = comic_file("f.cbz");
        let mut resized = f.clone();
        resized.size = 2;
        let state = reduce_all::<AppAction, ComicImport>(
            ComicImportState {
                selections: vec![f],
                ..Default::default()
            },
            &[select(&[resized], false)],
        );
        assert!(state.selections.is_empty());
    }

    #[test]
    fn load_resets_files_and_selections() {
        let state = reduce_all::<AppAction, ComicImport>(
            ComicImportState {
                files: vec![comic_file("old.cbz")],
                selections: vec![comic_file("old.cbz")],
                ..Default::default()
            },
            &[ComicImportAction::LoadFiles {
                directory: "/incoming".into(),
                maximum: 10,
            }
            .into()],
        );
        assert!(state.loading);
        assert!(state.files.is_empty());
        assert!(state.selections.is_empty());
    }

    #[test]
    fn imported_files_leave_both_lists() {
        let (a, b, c) = (comic_file("a.cbz"), comic_file("b.cbz"), comic_file("c.cbz"));
        let state = reduce_all::<AppAction, ComicImport>(
            ComicImportState {
                files: vec![a.clone(), b.clone(), c.clone()],
                selections: vec![a.clone(), b.clone()],
                ..Default::default()
            },
            &[
                ComicImportAction::ImportFiles {
                    files: vec![a.clone(), b.clone()],
                    skip_metadata: false,
                    skip_blocking_pages: false,
                }
                .into(),
                ComicImportAction::FilesImported {
                    files: vec![a, b],
                }
                .into(),
            ],
        );
        assert!(!state.importing);
        assert_eq!(state.files, vec![c]);
        assert!(state.selections.is_empty());
    }

    #[test]
    fn clear_selections_keeps_files() {
        let state = reduce_all::<AppAction, ComicImport>(
            ComicImportState {
                files: vec![comic_file("a.cbz")],
                selections: vec![comic_file("a.cbz")],
                ..Default::default()
            },
            &[ComicImportAction::ClearSelections.into()],
        );
        assert_eq!(state.files.len(), 1);
        assert!(state.selections.is_empty());
    }
}
