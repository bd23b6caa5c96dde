use std::sync::Arc;

use async_trait::async_trait;
use comicdesk_http::ApiClient;
use comicdesk_store::{EffectError, EffectHandle, Notification, Notifier, RequestEffect};

use super::service::{ScrapeQuery, VolumeQuery};
use super::{ScrapingAction, ScrapingService};
use crate::models::{ComicBook, ScrapingVolume};
use crate::state::{AppAction, AppStore};

pub fn register(
    store: &AppStore,
    client: &ApiClient,
    notifier: &Arc<dyn Notifier>,
) -> Vec<EffectHandle> {
    let service = ScrapingService::new(client.clone());
    vec![
        store.register(LoadVolumesEffect::new(service.clone()), notifier.clone()),
        store.register(ScrapeComicEffect::new(service), notifier.clone()),
    ]
}

pub struct LoadVolumesEffect {
    service: ScrapingService,
}

impl LoadVolumesEffect {
    pub fn new(service: ScrapingService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for LoadVolumesEffect {
    type Action = AppAction;
    type Trigger = VolumeQuery;
    type Response = Vec<ScrapingVolume>;

    fn name(&self) -> &'static str {
        "scraping.load-volumes"
    }

    fn trigger(&self, action: &AppAction) -> Option<VolumeQuery> {
        match action {
            AppAction::Scraping(ScrapingAction::LoadVolumes {
                api_key,
                series,
                volume,
                max_records,
                skip_cache,
            }) => Some(VolumeQuery {
                api_key: api_key.clone(),
                series: series.clone(),
                volume: volume.clone(),
                max_records: *max_records,
                skip_cache: *skip_cache,
            }),
            _ => None,
        }
    }

    async fn call(&self, query: VolumeQuery) -> Result<Vec<ScrapingVolume>, EffectError> {
        Ok(self.service.load_volumes(&query).await?)
    }

    fn succeeded(&self, volumes: Vec<ScrapingVolume>) -> AppAction {
        ScrapingAction::VolumesLoaded { volumes }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ScrapingAction::LoadVolumesFailed.into()
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("scraping.load-volumes.failure")
    }
}

pub struct ScrapeComicEffect {
    service: ScrapingService,
}

impl ScrapeComicEffect {
    pub fn new(service: ScrapingService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for ScrapeComicEffect {
    type Action = AppAction;
    type Trigger = ScrapeQuery;
    type Response = ComicBook;

    fn name(&self) -> &'static str {
        "scraping.scrape-comic"
    }

    fn trigger(&self, action: &AppAction) -> Option<ScrapeQuery> {
        match action {
            AppAction::Scraping(ScrapingAction::ScrapeComic {
                api_key,
                issue_id,
                comic_id,
                skip_cache,
            }) => Some(ScrapeQuery {
                api_key: api_key.clone(),
                issue_id: *issue_id,
                comic_id: *comic_id,
                skip_cache: *skip_cache,
            }),
            _ => None,
        }
    }

    async fn call(&self, query: ScrapeQuery) -> Result<ComicBook, EffectError> {
        Ok(self.service.scrape_comic(&query).await?)
    }

    fn succeeded(&self, comic: ComicBook) -> AppAction {
        ScrapingAction::ComicScraped { comic }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ScrapingAction::ScrapeComicFailed.into()
    }

    fn success_notification(&self, comic: &ComicBook) -> Option<Notification> {
        Some(Notification::info("scraping.scrape-comic.success").with_param("id", comic.id))
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("scraping.scrape-comic.failure")
    }
}
