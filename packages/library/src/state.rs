//! The application state and action catalog.

use std::sync::Arc;

use comicdesk_store::{apply, Action, ActionCategory, Feature, Store};

use crate::blocked_pages::{self, BlockedPages, BlockedPagesAction, BlockedPagesState};
use crate::comic_book::{self, ComicBookAction, ComicBookFeature, ComicBookState};
use crate::comic_import::{self, ComicImport, ComicImportAction, ComicImportState};
use crate::last_read::{self, LastReadAction, LastReadFeature, LastReadState};
use crate::messaging::{Messaging, MessagingAction, MessagingState};
use crate::reading_lists::{self, ReadingLists, ReadingListsAction, ReadingListsState};
use crate::rest_audit_log::{self, RestAuditLog, RestAuditLogAction, RestAuditLogState};
use crate::scraping::{self, Scraping, ScrapingAction, ScrapingState};

pub type AppStore = Store<AppState, AppAction>;

/// One shared slice per feature.
///
/// Slices a dispatch leaves alone keep their `Arc`, so comparing slices
/// with `Arc::ptr_eq` tells which features an action touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub blocked_pages: Arc<BlockedPagesState>,
    pub rest_audit_log: Arc<RestAuditLogState>,
    pub comic_import: Arc<ComicImportState>,
    pub comic_book: Arc<ComicBookState>,
    pub reading_lists: Arc<ReadingListsState>,
    pub scraping: Arc<ScrapingState>,
    pub last_read: Arc<LastReadState>,
    pub messaging: Arc<MessagingState>,
}

/// Every action the application knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    BlockedPages(BlockedPagesAction),
    RestAuditLog(RestAuditLogAction),
    ComicImport(ComicImportAction),
    ComicBook(ComicBookAction),
    ReadingLists(ReadingListsAction),
    Scraping(ScrapingAction),
    LastRead(LastReadAction),
    Messaging(MessagingAction),
}

macro_rules! wrap_actions {
    ($($variant:ident($action:ty)),* $(,)?) => {
        $(
            impl From<$action> for AppAction {
                fn from(action: $action) -> Self {
                    AppAction::$variant(action)
                }
            }
        )*

        impl Action for AppAction {
            fn action_type(&self) -> &'static str {
                match self {
                    $(AppAction::$variant(action) => action.action_type(),)*
                }
            }

            fn category(&self) -> ActionCategory {
                match self {
                    $(AppAction::$variant(action) => action.category(),)*
                }
            }
        }
    };
}

wrap_actions! {
    BlockedPages(BlockedPagesAction),
    RestAuditLog(RestAuditLogAction),
    ComicImport(ComicImportAction),
    ComicBook(ComicBookAction),
    ReadingLists(ReadingListsAction),
    Scraping(ScrapingAction),
    LastRead(LastReadAction),
    Messaging(MessagingAction),
}

impl AppAction {
    /// Whether this action ends a request.
    pub fn is_result(&self) -> bool {
        matches!(
            self.category(),
            ActionCategory::Success | ActionCategory::Failure
        )
    }

    pub fn is_failure(&self) -> bool {
        self.category() == ActionCategory::Failure
    }

    /// Whether an effect answers this command with a result action.
    ///
    /// Selection changes and search resets are commands the reducers
    /// handle alone.
    pub fn calls_server(&self) -> bool {
        request_for(self.action_type()).is_some()
    }

    /// Whether this action is the success or failure outcome of `command`.
    pub fn answers(&self, command: &AppAction) -> bool {
        let outcome = self.action_type();
        request_for(command.action_type())
            .is_some_and(|request| request.success == outcome || request.failure == outcome)
    }
}

/// A server command and the two actions that can end it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub command: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
}

macro_rules! requests {
    ($($module:ident: $command:ident => $success:ident | $failure:ident;)*) => {
        /// Every command that goes through an effect.
        pub const REQUESTS: &[Request] = &[
            $(Request {
                command: $module::types::$command,
                success: $module::types::$success,
                failure: $module::types::$failure,
            },)*
        ];
    };
}

requests! {
    blocked_pages: LOAD_LIST => LIST_LOADED | LOAD_LIST_FAILED;
    blocked_pages: LOAD_BY_HASH => LOADED | LOAD_FAILED;
    blocked_pages: SAVE => SAVED | SAVE_FAILED;
    blocked_pages: SET_BLOCKED_STATE => BLOCKED_STATE_SET | SET_BLOCKED_STATE_FAILED;
    blocked_pages: DELETE_ENTRIES => ENTRIES_DELETED | DELETE_ENTRIES_FAILED;
    rest_audit_log: GET_ENTRIES => ENTRIES_RECEIVED | GET_ENTRIES_FAILED;
    rest_audit_log: CLEAR => CLEARED | CLEAR_FAILED;
    comic_import: LOAD_FILES => FILES_LOADED | LOAD_FILES_FAILED;
    comic_import: IMPORT_FILES => FILES_IMPORTED | IMPORT_FILES_FAILED;
    comic_book: LOAD_COMIC => COMIC_LOADED | LOAD_COMIC_FAILED;
    comic_book: UPDATE_COMIC => COMIC_UPDATED | UPDATE_COMIC_FAILED;
    comic_book: DELETE_COMIC => COMIC_DELETED | DELETE_COMIC_FAILED;
    comic_book: RESTORE_COMIC => COMIC_RESTORED | RESTORE_COMIC_FAILED;
    reading_lists: LOAD_LISTS => LISTS_LOADED | LOAD_LISTS_FAILED;
    reading_lists: LOAD_LIST => LIST_LOADED | LOAD_LIST_FAILED;
    reading_lists: SAVE_LIST => LIST_SAVED | SAVE_LIST_FAILED;
    reading_lists: DELETE_LISTS => LISTS_DELETED | DELETE_LISTS_FAILED;
    scraping: LOAD_VOLUMES => VOLUMES_LOADED | LOAD_VOLUMES_FAILED;
    scraping: SCRAPE_COMIC => COMIC_SCRAPED | SCRAPE_COMIC_FAILED;
    last_read: LOAD_ENTRIES => ENTRIES_LOADED | LOAD_ENTRIES_FAILED;
    last_read: SET_READ_STATE => READ_STATE_SET | SET_READ_STATE_FAILED;
}

pub fn request_for(command: &str) -> Option<&'static Request> {
    REQUESTS.iter().find(|request| request.command == command)
}

/// Every slice key, in `AppState` field order.
pub const FEATURE_KEYS: &[&str] = &[
    BlockedPages::KEY,
    RestAuditLog::KEY,
    ComicImport::KEY,
    ComicBookFeature::KEY,
    ReadingLists::KEY,
    Scraping::KEY,
    LastReadFeature::KEY,
    Messaging::KEY,
];

/// The root reducer.
///
/// Runs every feature reducer; returns `state` itself when none of them
/// handled the action.
pub fn reduce(state: &Arc<AppState>, action: &AppAction) -> Arc<AppState> {
    let next = AppState {
        blocked_pages: apply::<_, BlockedPages>(&state.blocked_pages, action),
        rest_audit_log: apply::<_, RestAuditLog>(&state.rest_audit_log, action),
        comic_import: apply::<_, ComicImport>(&state.comic_import, action),
        comic_book: apply::<_, ComicBookFeature>(&state.comic_book, action),
        reading_lists: apply::<_, ReadingLists>(&state.reading_lists, action),
        scraping: apply::<_, Scraping>(&state.scraping, action),
        last_read: apply::<_, LastReadFeature>(&state.last_read, action),
        messaging: apply::<_, Messaging>(&state.messaging, action),
    };

    let unchanged = Arc::ptr_eq(&next.blocked_pages, &state.blocked_pages)
        && Arc::ptr_eq(&next.rest_audit_log, &state.rest_audit_log)
        && Arc::ptr_eq(&next.comic_import, &state.comic_import)
        && Arc::ptr_eq(&next.comic_book, &state.comic_book)
        && Arc::ptr_eq(&next.reading_lists, &state.reading_lists)
        && Arc::ptr_eq(&next.scraping, &state.scraping)
        && Arc::ptr_eq(&next.last_read, &state.last_read)
        && Arc::ptr_eq(&next.messaging, &state.messaging);

    if unchanged {
        Arc::clone(state)
    } else {
        Arc::new(next)
    }
}

pub fn new_store() -> AppStore {
    Store::new(AppState::default(), reduce)
}
