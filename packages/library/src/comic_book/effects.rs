use std::sync::Arc;

use async_trait::async_trait;
use comicdesk_http::ApiClient;
use comicdesk_store::{EffectError, EffectHandle, Notification, Notifier, RequestEffect};

use super::{ComicBookAction, ComicBookService};
use crate::models::ComicBook;
use crate::state::{AppAction, AppStore};

pub fn register(
    store: &AppStore,
    client: &ApiClient,
    notifier: &Arc<dyn Notifier>,
) -> Vec<EffectHandle> {
    let service = ComicBookService::new(client.clone());
    vec![
        store.register(LoadComicEffect::new(service.clone()), notifier.clone()),
        store.register(UpdateComicEffect::new(service.clone()), notifier.clone()),
        store.register(DeleteComicEffect::new(service.clone()), notifier.clone()),
        store.register(RestoreComicEffect::new(service), notifier.clone()),
    ]
}

fn comic_book(action: &AppAction) -> Option<&ComicBookAction> {
    match action {
        AppAction::ComicBook(action) => Some(action),
        _ => None,
    }
}

pub struct LoadComicEffect {
    service: ComicBookService,
}

impl LoadComicEffect {
    pub fn new(service: ComicBookService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for LoadComicEffect {
    type Action = AppAction;
    type Trigger = u64;
    type Response = ComicBook;

    fn name(&self) -> &'static str {
        "comic-book.load"
    }

    fn trigger(&self, action: &AppAction) -> Option<u64> {
        match comic_book(action)? {
            ComicBookAction::LoadComic { id } => Some(*id),
            _ => None,
        }
    }

    async fn call(&self, id: u64) -> Result<ComicBook, EffectError> {
        Ok(self.service.load(id).await?)
    }

    fn succeeded(&self, comic: ComicBook) -> AppAction {
        ComicBookAction::ComicLoaded { comic }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ComicBookAction::LoadComicFailed.into()
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("comic-book.load.failure")
    }
}

pub struct UpdateComicEffect {
    service: ComicBookService,
}

impl UpdateComicEffect {
    pub fn new(service: ComicBookService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for UpdateComicEffect {
    type Action = AppAction;
    type Trigger = ComicBook;
    type Response = ComicBook;

    fn name(&self) -> &'static str {
        "comic-book.update"
    }

    fn trigger(&self, action: &AppAction) -> Option<ComicBook> {
        match comic_book(action)? {
            ComicBookAction::UpdateComic { comic } => Some(comic.clone()),
            _ => None,
        }
    }

    async fn call(&self, comic: ComicBook) -> Result<ComicBook, EffectError> {
        Ok(self.service.update(&comic).await?)
    }

    fn succeeded(&self, comic: ComicBook) -> AppAction {
        ComicBookAction::ComicUpdated { comic }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ComicBookAction::UpdateComicFailed.into()
    }

    fn success_notification(&self, comic: &ComicBook) -> Option<Notification> {
        Some(Notification::info("comic-book.update.success").with_param("id", comic.id))
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("comic-book.update.failure")
    }
}

pub struct DeleteComicEffect {
    service: ComicBookService,
}

impl DeleteComicEffect {
    pub fn new(service: ComicBookService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for DeleteComicEffect {
    type Action = AppAction;
    type Trigger = ComicBook;
    type Response = ComicBook;

    fn name(&self) -> &'static str {
        "comic-book.delete"
    }

    fn trigger(&self, action: &AppAction) -> Option<ComicBook> {
        match comic_book(action)? {
            ComicBookAction::DeleteComic { comic } => Some(comic.clone()),
            _ => None,
        }
    }

    async fn call(&self, comic: ComicBook) -> Result<ComicBook, EffectError> {
        Ok(self.service.delete(&comic).await?)
    }

    fn succeeded(&self, comic: ComicBook) -> AppAction {
        ComicBookAction::ComicDeleted { comic }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ComicBookAction::DeleteComicFailed.into()
    }

    fn success_notification(&self, comic: &ComicBook) -> Option<Notification> {
        Some(Notification::info("comic-book.delete.success").with_param("id", comic.id))
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("comic-book.delete.failure")
    }
}

pub struct RestoreComicEffect {
    service: ComicBookService,
}

impl RestoreComicEffect {
    pub fn new(service: ComicBookService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for RestoreComicEffect {
    type Action = AppAction;
    type Trigger = ComicBook;
    type Response = ComicBook;

    fn name(&self) -> &'static str {
        "comic-book.restore"
    }

    fn trigger(&self, action: &AppAction) -> Option<ComicBook> {
        match comic_book(action)? {
            ComicBookAction::RestoreComic { comic } => Some(comic.clone()),
            _ => None,
        }
    }

    async fn call(&self, comic: ComicBook) -> Result<ComicBook, EffectError> {
        Ok(self.service.restore(&comic).await?)
    }

    fn succeeded(&self, comic: ComicBook) -> AppAction {
        ComicBookAction::ComicRestored { comic }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ComicBookAction::RestoreComicFailed.into()
    }

    fn success_notification(&self, comic: &ComicBook) -> Option<Notification> {
        Some(Notification::info("comic-book.restore.success").with_param("id", comic.id))
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("comic-book.restore.failure")
    }
}
