use comicdesk_store::Feature;

use super::{ComicBookAction, ComicBookState};
use crate::models::ComicBook;
use crate::scraping::ScrapingAction;
use crate::state::AppAction;

pub struct ComicBookFeature;

impl Feature<AppAction> for ComicBookFeature {
    const KEY: &'static str = "comic-book";
    type State = ComicBookState;

    fn reduce(state: &ComicBookState, action: &AppAction) -> Option<ComicBookState> {
        match action {
            AppAction::ComicBook(action) => Some(reduce(state, action)),
            // A scrape rewrites the comic's metadata on the server.
            AppAction::Scraping(ScrapingAction::ComicScraped { comic })
                if is_current(state, comic) =>
            {
                Some(ComicBookState {
                    current: Some(comic.clone()),
                    ..state.clone()
                })
            }
            _ => None,
        }
    }
}

fn is_current(state: &ComicBookState, comic: &ComicBook) -> bool {
    state.current.as_ref().is_some_and(|c| c.id == comic.id)
}

fn reduce(state: &ComicBookState, action: &ComicBookAction) -> ComicBookState {
    use ComicBookAction::*;
    let mut next = state.clone();
    match action {
        LoadComic { .. } => next.loading = true,
        ComicLoaded { comic } => {
            next.loading = false;
            next.current = Some(comic.clone());
        }
        LoadComicFailed => next.loading = false,
        UpdateComic { .. } => next.saving = true,
        ComicUpdated { comic } => {
            next.saving = false;
            next.current = Some(comic.clone());
        }
        UpdateComicFailed => next.saving = false,
        DeleteComic { .. } | RestoreComic { .. } => next.deleting = true,
        ComicDeleted { comic } | ComicRestored { comic } => {
            next.deleting = false;
            if is_current(state, comic) {
                next.current = Some(comic.clone());
            }
        }
        DeleteComicFailed | RestoreComicFailed => next.deleting = false,
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::MessagingAction;
    use crate::models::fixtures::comic;
    use comicdesk_store::feature_test_suite::{assert_identity, reduce_all};

    fn viewing(id: u64) -> ComicBookState {
        ComicBookState {
            current: Some(comic(id)),
            ..Default::default()
        }
    }

    #[test]
    fn ignores_other_features() {
        assert_identity::<AppAction, ComicBookFeature>(
            viewing(1),
            &MessagingAction::Started.into(),
        );
    }

    #[test]
    fn scrape_of_another_comic_is_identity() {
        assert_identity::<AppAction, ComicBookFeature>(
            viewing(1),
            &ScrapingAction::ComicScraped { comic: comic(2) }.into(),
        );
    }

    #[test]
    fn load_keeps_previous_comic_until_success() {
        let state = reduce_all::<AppAction, ComicBookFeature>(
            viewing(1),
            &[ComicBookAction::LoadComic { id: 2 }.into()],
        );
        assert!(state.loading);
        assert_eq!(state.current, Some(comic(1)));

        let state = reduce_all::<AppAction, ComicBookFeature>(
            state,
            &[ComicBookAction::ComicLoaded { comic: comic(2) }.into()],
        );
        assert!(!state.loading);
        assert_eq!(state.current, Some(comic(2)));
    }

    #[test]
    fn update_round_trip_adopts_server_echo() {
        let mut edited = comic(1);
        edited.title = Some("The Will".to_string());
        let mut echoed = edited.clone();
        echoed.cover_date = Some("2012-03-14".to_string());

        let state = reduce_all::<AppAction, ComicBookFeature>(
            viewing(1),
            &[
                ComicBookAction::UpdateComic { comic: edited }.into(),
                ComicBookAction::ComicUpdated {
                    comic: echoed.clone(),
                }
                .into(),
            ],
        );
        assert!(!state.saving);
        assert_eq!(state.current, Some(echoed));
    }

    #[test]
    fn update_failure_keeps_local_copy() {
        let state = reduce_all::<AppAction, ComicBookFeature>(
            viewing(1),
            &[
                ComicBookAction::UpdateComic { comic: comic(1) }.into(),
                ComicBookAction::UpdateComicFailed.into(),
            ],
        );
        assert_eq!(state, viewing(1));
    }

    #[test]
    fn delete_and_restore_mark_the_comic() {
        let mut deleted = comic(1);
        deleted.deleted = true;

        let state = reduce_all::<AppAction, ComicBookFeature>(
            viewing(1),
            &[
                ComicBookAction::DeleteComic { comic: comic(1) }.into(),
                ComicBookAction::ComicDeleted {
                    comic: deleted.clone(),
                }
                .into(),
            ],
        );
        assert!(!state.deleting);
        assert_eq!(state.current, Some(deleted.clone()));

        let state = reduce_all::<AppAction, ComicBookFeature>(
            state,
            &[
                ComicBookAction::RestoreComic { comic: deleted }.into(),
                ComicBookAction::ComicRestored { comic: comic(1) }.into(),
            ],
        );
        assert_eq!(state.current, Some(comic(1)));
    }

    #[test]
    fn adopts_scraped_current_comic() {
        let mut scraped = comic(1);
        scraped.title = Some("Chapter One".to_string());
        let state = reduce_all::<AppAction, ComicBookFeature>(
            viewing(1),
            &[ScrapingAction::ComicScraped {
                comic: scraped.clone(),
            }
            .into()],
        );
        assert_eq!(state.current, Some(scraped));
    }
}
