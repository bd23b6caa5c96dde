//! Browsing a server-side directory for comic files and importing a selection.

pub mod effects;
pub mod reducer;
pub mod service;

use comicdesk_store::{action_types, Action, ActionCategory};
use serde::Serialize;

use crate::models::ComicFile;
use crate::state::AppState;

pub use reducer::ComicImport;
pub use service::ComicImportService;

action_types! {
    pub mod types {
        LOAD_FILES = "[Comic Import] Load files";
        FILES_LOADED = "[Comic Import] Files loaded";
        LOAD_FILES_FAILED = "[Comic Import] Load files failed";
        SET_SELECTED_STATE = "[Comic Import] Set selected state";
        CLEAR_SELECTIONS = "[Comic Import] Clear selections";
        IMPORT_FILES = "[Comic Import] Import files";
        FILES_IMPORTED = "[Comic Import] Files imported";
        IMPORT_FILES_FAILED = "[Comic Import] Import files failed";
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComicImportState {
    pub loading: bool,
    pub files: Vec<ComicFile>,
    pub selections: Vec<ComicFile>,
    pub importing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComicImportAction {
    LoadFiles {
        directory: String,
        maximum: usize,
    },
    FilesLoaded {
        files: Vec<ComicFile>,
    },
    LoadFilesFailed,
    SetSelectedState {
        files: Vec<ComicFile>,
        selected: bool,
    },
    ClearSelections,
    ImportFiles {
        files: Vec<ComicFile>,
        skip_metadata: bool,
        skip_blocking_pages: bool,
    },
    FilesImported {
        files: Vec<ComicFile>,
    },
    ImportFilesFailed,
}

impl Action for ComicImportAction {
    fn action_type(&self) -> &'static str {
        use ComicImportAction::*;
        match self {
            LoadFiles { .. } => types::LOAD_FILES,
            FilesLoaded { .. } => types::FILES_LOADED,
            LoadFilesFailed => types::LOAD_FILES_FAILED,
            SetSelectedState { .. } => types::SET_SELECTED_STATE,
            ClearSelections => types::CLEAR_SELECTIONS,
            ImportFiles { .. } => types::IMPORT_FILES,
            FilesImported { .. } => types::FILES_IMPORTED,
            ImportFilesFailed => types::IMPORT_FILES_FAILED,
        }
    }

    fn category(&self) -> ActionCategory {
        use ComicImportAction::*;
        match self {
            LoadFiles { .. } | SetSelectedState { .. } | ClearSelections | ImportFiles { .. } => {
                ActionCategory::Command
            }
            FilesLoaded { .. } | FilesImported { .. } => ActionCategory::Success,
            LoadFilesFailed | ImportFilesFailed => ActionCategory::Failure,
        }
    }
}

pub fn select_state(state: &AppState) -> ComicImportState {
    (*state.comic_import).clone()
}

pub fn select_files(state: &AppState) -> Vec<ComicFile> {
    state.comic_import.files.clone()
}

pub fn select_selections(state: &AppState) -> Vec<ComicFile> {
    state.comic_import.selections.clone()
}

pub fn select_busy(state: &AppState) -> bool {
    state.comic_import.loading || state.comic_import.importing
}
