use std::sync::Arc;

use async_trait::async_trait;
use comicdesk_http::ApiClient;
use comicdesk_store::{EffectError, EffectHandle, Notification, Notifier, RequestEffect};

use super::{ComicImportAction, ComicImportService};
use crate::models::ComicFile;
use crate::state::{AppAction, AppStore};

/// `limit` caps the number of files a single scan may list.
pub fn register(
    store: &AppStore,
    client: &ApiClient,
    notifier: &Arc<dyn Notifier>,
    limit: usize,
) -> Vec<EffectHandle> {
    let service = ComicImportService::new(client.clone()).with_limit(limit);
    vec![
        store.register(LoadFilesEffect::new(service.clone()), notifier.clone()),
        store.register(ImportFilesEffect::new(service), notifier.clone()),
    ]
}

pub struct LoadFilesEffect {
    service: ComicImportService,
}

impl LoadFilesEffect {
    pub fn new(service: ComicImportService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for LoadFilesEffect {
    type Action = AppAction;
    type Trigger = (String, usize);
    type Response = Vec<ComicFile>;

    fn name(&self) -> &'static str {
        "comic-import.load-files"
    }

    fn trigger(&self, action: &AppAction) -> Option<(String, usize)> {
        match action {
            AppAction::ComicImport(ComicImportAction::LoadFiles { directory, maximum }) => {
                Some((directory.clone(), *maximum))
            }
            _ => None,
        }
    }

    async fn call(
        &self,
        (directory, maximum): (String, usize),
    ) -> Result<Vec<ComicFile>, EffectError> {
        Ok(self.service.load_files(&directory, maximum).await?)
    }

    fn succeeded(&self, files: Vec<ComicFile>) -> AppAction {
        ComicImportAction::FilesLoaded { files }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ComicImportAction::LoadFilesFailed.into()
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("comic-import.load-files.failure")
    }
}

pub struct ImportRequest {
    files: Vec<ComicFile>,
    skip_metadata: bool,
    skip_blocking_pages: bool,
}

pub struct ImportFilesEffect {
    service: ComicImportService,
}

impl ImportFilesEffect {
    pub fn new(service: ComicImportService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for ImportFilesEffect {
    type Action = AppAction;
    type Trigger = ImportRequest;
    type Response = Vec<ComicFile>;

    fn name(&self) -> &'static str {
        "comic-import.import-files"
    }

    fn trigger(&self, action: &AppAction) -> Option<ImportRequest> {
        match action {
            AppAction::ComicImport(ComicImportAction::ImportFiles {
                files,
                skip_metadata,
                skip_blocking_pages,
            }) => Some(ImportRequest {
                files: files.clone(),
                skip_metadata: *skip_metadata,
                skip_blocking_pages: *skip_blocking_pages,
            }),
            _ => None,
        }
    }

    async fn call(&self, request: ImportRequest) -> Result<Vec<ComicFile>, EffectError> {
        self.service
            .import_files(
                &request.files,
                request.skip_metadata,
                request.skip_blocking_pages,
            )
            .await?;
        Ok(request.files)
    }

    fn succeeded(&self, files: Vec<ComicFile>) -> AppAction {
        ComicImportAction::FilesImported { files }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ComicImportAction::ImportFilesFailed.into()
    }

    fn success_notification(&self, files: &Vec<ComicFile>) -> Option<Notification> {
        Some(
            Notification::info("comic-import.import-files.success")
                .with_param("count", files.len()),
        )
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("comic-import.import-files.failure")
    }
}
