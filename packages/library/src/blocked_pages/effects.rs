use std::sync::Arc;

use async_trait::async_trait;
use comicdesk_http::ApiClient;
use comicdesk_store::{EffectError, EffectHandle, Notification, Notifier, RequestEffect};

use super::{BlockedPagesAction, BlockedPagesService};
use crate::models::BlockedPage;
use crate::state::{AppAction, AppStore};

pub fn register(
    store: &AppStore,
    client: &ApiClient,
    notifier: &Arc<dyn Notifier>,
) -> Vec<EffectHandle> {
    let service = BlockedPagesService::new(client.clone());
    vec![
        store.register(LoadListEffect::new(service.clone()), notifier.clone()),
        store.register(LoadByHashEffect::new(service.clone()), notifier.clone()),
        store.register(SaveEffect::new(service.clone()), notifier.clone()),
        store.register(SetBlockedStateEffect::new(service.clone()), notifier.clone()),
        store.register(DeleteEntriesEffect::new(service), notifier.clone()),
    ]
}

fn blocked_pages(action: &AppAction) -> Option<&BlockedPagesAction> {
    match action {
        AppAction::BlockedPages(action) => Some(action),
        _ => None,
    }
}

pub struct LoadListEffect {
    service: BlockedPagesService,
}

impl LoadListEffect {
    pub fn new(service: BlockedPagesService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for LoadListEffect {
    type Action = AppAction;
    type Trigger = ();
    type Response = Vec<BlockedPage>;

    fn name(&self) -> &'static str {
        "blocked-pages.load-list"
    }

    fn trigger(&self, action: &AppAction) -> Option<()> {
        matches!(blocked_pages(action)?, BlockedPagesAction::LoadList).then_some(())
    }

    async fn call(&self, _: ()) -> Result<Vec<BlockedPage>, EffectError> {
        Ok(self.service.load_all().await?)
    }

    fn succeeded(&self, entries: Vec<BlockedPage>) -> AppAction {
        BlockedPagesAction::ListLoaded { entries }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        BlockedPagesAction::LoadListFailed.into()
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("blocked-pages.load-list.failure")
    }
}

pub struct LoadByHashEffect {
    service: BlockedPagesService,
}

impl LoadByHashEffect {
    pub fn new(service: BlockedPagesService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for LoadByHashEffect {
    type Action = AppAction;
    type Trigger = String;
    type Response = BlockedPage;

    fn name(&self) -> &'static str {
        "blocked-pages.load-by-hash"
    }

    fn trigger(&self, action: &AppAction) -> Option<String> {
        match blocked_pages(action)? {
            BlockedPagesAction::LoadByHash { hash } => Some(hash.clone()),
            _ => None,
        }
    }

    async fn call(&self, hash: String) -> Result<BlockedPage, EffectError> {
        Ok(self.service.load_by_hash(&hash).await?)
    }

    fn succeeded(&self, entry: BlockedPage) -> AppAction {
        BlockedPagesAction::Loaded { entry }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        BlockedPagesAction::LoadFailed.into()
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("blocked-pages.load-by-hash.failure")
    }
}

pub struct SaveEffect {
    service: BlockedPagesService,
}

impl SaveEffect {
    pub fn new(service: BlockedPagesService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for SaveEffect {
    type Action = AppAction;
    type Trigger = BlockedPage;
    type Response = BlockedPage;

    fn name(&self) -> &'static str {
        "blocked-pages.save"
    }

    fn trigger(&self, action: &AppAction) -> Option<BlockedPage> {
        match blocked_pages(action)? {
            BlockedPagesAction::Save { entry } => Some(entry.clone()),
            _ => None,
        }
    }

    async fn call(&self, entry: BlockedPage) -> Result<BlockedPage, EffectError> {
        Ok(self.service.save(&entry).await?)
    }

    fn succeeded(&self, entry: BlockedPage) -> AppAction {
        BlockedPagesAction::Saved { entry }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        BlockedPagesAction::SaveFailed.into()
    }

    fn success_notification(&self, entry: &BlockedPage) -> Option<Notification> {
        Some(Notification::info("blocked-pages.save.success").with_param("hash", &entry.hash))
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("blocked-pages.save.failure")
    }
}

pub struct SetBlockedStateEffect {
    service: BlockedPagesService,
}

impl SetBlockedStateEffect {
    pub fn new(service: BlockedPagesService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for SetBlockedStateEffect {
    type Action = AppAction;
    type Trigger = (Vec<String>, bool);
    type Response = (Vec<String>, bool);

    fn name(&self) -> &'static str {
        "blocked-pages.set-blocked-state"
    }

    fn trigger(&self, action: &AppAction) -> Option<(Vec<String>, bool)> {
        match blocked_pages(action)? {
            BlockedPagesAction::SetBlockedState { hashes, blocked } => {
                Some((hashes.clone(), *blocked))
            }
            _ => None,
        }
    }

    async fn call(
        &self,
        (hashes, blocked): (Vec<String>, bool),
    ) -> Result<(Vec<String>, bool), EffectError> {
        self.service.set_blocked_state(&hashes, blocked).await?;
        Ok((hashes, blocked))
    }

    fn succeeded(&self, (hashes, blocked): (Vec<String>, bool)) -> AppAction {
        BlockedPagesAction::BlockedStateSet { hashes, blocked }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        BlockedPagesAction::SetBlockedStateFailed.into()
    }

    fn success_notification(
        &self,
        (hashes, blocked): &(Vec<String>, bool),
    ) -> Option<Notification> {
        let key = if *blocked {
            "blocked-pages.block.success"
        } else {
            "blocked-pages.unblock.success"
        };
        Some(Notification::info(key).with_param("count", hashes.len()))
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("blocked-pages.set-blocked-state.failure")
    }
}

pub struct DeleteEntriesEffect {
    service: BlockedPagesService,
}

impl DeleteEntriesEffect {
    pub fn new(service: BlockedPagesService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for DeleteEntriesEffect {
    type Action = AppAction;
    type Trigger = Vec<String>;
    type Response = Vec<String>;

    fn name(&self) -> &'static str {
        "blocked-pages.delete-entries"
    }

    fn trigger(&self, action: &AppAction) -> Option<Vec<String>> {
        match blocked_pages(action)? {
            BlockedPagesAction::DeleteEntries { hashes } => Some(hashes.clone()),
            _ => None,
        }
    }

    async fn call(&self, hashes: Vec<String>) -> Result<Vec<String>, EffectError> {
        self.service.delete_entries(&hashes).await?;
        Ok(hashes)
    }

    fn succeeded(&self, hashes: Vec<String>) -> AppAction {
        BlockedPagesAction::EntriesDeleted { hashes }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        BlockedPagesAction::DeleteEntriesFailed.into()
    }

    fn success_notification(&self, hashes: &Vec<String>) -> Option<Notification> {
        Some(
            Notification::info("blocked-pages.delete.success").with_param("count", hashes.len()),
        )
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("blocked-pages.delete.failure")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::blocked_page;
    use crate::testing::{client, run};
    use comicdesk_http::executor::mock::MockExecutor;
    use comicdesk_http::{HttpResponse, Method};
    use comicdesk_store::GENERAL_FAILURE_KEY;
    use serde_json::json;

    fn service(executor: &MockExecutor) -> BlockedPagesService {
        BlockedPagesService::new(client(executor))
    }

    #[test]
    fn triggers_only_on_its_command() {
        let effect = LoadListEffect::new(service(&MockExecutor::new()));
        assert_eq!(effect.trigger(&BlockedPagesAction::LoadList.into()), Some(()));
        assert_eq!(effect.trigger(&BlockedPagesAction::LoadListFailed.into()), None);
    }

    #[tokio::test]
    async fn load_list_success() {
        let executor = MockExecutor::new().with_response(
            Method::Get,
            "/api/pages/blocked",
            MockExecutor::success_response(json!([{"hash": "p1", "label": "ad"}])),
        );
        let (action, notifier) = run(LoadListEffect::new(service(&executor)), ()).await;

        let mut expected = blocked_page("p1");
        expected.label = "ad".to_string();
        assert_eq!(
            action,
            BlockedPagesAction::ListLoaded {
                entries: vec![expected]
            }
            .into()
        );
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn load_list_service_failure() {
        let executor = MockExecutor::new()
            .with_default_response(HttpResponse::with_status(500, "database down"));
        let (action, notifier) = run(LoadListEffect::new(service(&executor)), ()).await;

        assert_eq!(action, BlockedPagesAction::LoadListFailed.into());
        let errors = notifier.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, "blocked-pages.load-list.failure");
    }

    #[tokio::test]
    async fn load_list_panicking_service_yields_one_failure() {
        let executor = MockExecutor::new().panic_with("service threw");
        let (action, notifier) = run(LoadListEffect::new(service(&executor)), ()).await;

        assert_eq!(action, BlockedPagesAction::LoadListFailed.into());
        let errors = notifier.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, GENERAL_FAILURE_KEY);
    }

    #[tokio::test]
    async fn save_puts_to_hash_url() {
        let entry = blocked_page("abc");
        let executor = MockExecutor::new().with_response(
            Method::Put,
            "/api/pages/blocked/abc",
            MockExecutor::success_response(serde_json::to_value(&entry).unwrap()),
        );
        let (action, notifier) = run(SaveEffect::new(service(&executor)), entry.clone()).await;

        assert_eq!(
            action,
            BlockedPagesAction::Saved {
                entry: entry.clone()
            }
            .into()
        );
        assert_eq!(notifier.infos().len(), 1);
        let recorded = executor.recorded_requests();
        assert_eq!(recorded[0].body, Some(serde_json::to_value(&entry).unwrap()));
    }

    #[tokio::test]
    async fn set_blocked_state_chooses_endpoint() {
        let executor = MockExecutor::new()
            .with_default_response(HttpResponse::with_status(200, ""));
        let hashes = vec!["a".to_string(), "b".to_string()];

        let (action, notifier) = run(
            SetBlockedStateEffect::new(service(&executor)),
            (hashes.clone(), false),
        )
        .await;

        assert_eq!(
            action,
            BlockedPagesAction::BlockedStateSet {
                hashes,
                blocked: false
            }
            .into()
        );
        assert!(executor.recorded_requests()[0]
            .path
            .ends_with("/api/pages/blocked/remove"));
        let infos = notifier.infos();
        assert_eq!(infos[0].key, "blocked-pages.unblock.success");
        assert_eq!(infos[0].params.get("count"), Some(&"2".to_string()));
    }

    #[tokio::test]
    async fn delete_entries_transport_failure() {
        let executor = MockExecutor::new().fail_with("connection refused");
        let (action, notifier) = run(
            DeleteEntriesEffect::new(service(&executor)),
            vec!["a".to_string()],
        )
        .await;

        assert_eq!(action, BlockedPagesAction::DeleteEntriesFailed.into());
        assert_eq!(notifier.errors()[0].key, "blocked-pages.delete.failure");
    }
}
