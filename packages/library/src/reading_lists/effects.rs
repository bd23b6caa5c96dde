use std::sync::Arc;

use async_trait::async_trait;
use comicdesk_http::ApiClient;
use comicdesk_store::{EffectError, EffectHandle, Notification, Notifier, RequestEffect};

use super::{ReadingListsAction, ReadingListsService};
use crate::models::ReadingList;
use crate::state::{AppAction, AppStore};

pub fn register(
    store: &AppStore,
    client: &ApiClient,
    notifier: &Arc<dyn Notifier>,
) -> Vec<EffectHandle> {
    let service = ReadingListsService::new(client.clone());
    vec![
        store.register(LoadListsEffect::new(service.clone()), notifier.clone()),
        store.register(LoadListEffect::new(service.clone()), notifier.clone()),
        store.register(SaveListEffect::new(service.clone()), notifier.clone()),
        store.register(DeleteListsEffect::new(service), notifier.clone()),
    ]
}

fn reading_lists(action: &AppAction) -> Option<&ReadingListsAction> {
    match action {
        AppAction::ReadingLists(action) => Some(action),
        _ => None,
    }
}

pub struct LoadListsEffect {
    service: ReadingListsService,
}

impl LoadListsEffect {
    pub fn new(service: ReadingListsService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for LoadListsEffect {
    type Action = AppAction;
    type Trigger = ();
    type Response = Vec<ReadingList>;

    fn name(&self) -> &'static str {
        "reading-lists.load-lists"
    }

    fn trigger(&self, action: &AppAction) -> Option<()> {
        matches!(reading_lists(action)?, ReadingListsAction::LoadLists).then_some(())
    }

    async fn call(&self, _: ()) -> Result<Vec<ReadingList>, EffectError> {
        Ok(self.service.load_all().await?)
    }

    fn succeeded(&self, lists: Vec<ReadingList>) -> AppAction {
        ReadingListsAction::ListsLoaded { lists }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ReadingListsAction::LoadListsFailed.into()
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("reading-lists.load-lists.failure")
    }
}

pub struct LoadListEffect {
    service: ReadingListsService,
}

impl LoadListEffect {
    pub fn new(service: ReadingListsService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for LoadListEffect {
    type Action = AppAction;
    type Trigger = u64;
    type Response = ReadingList;

    fn name(&self) -> &'static str {
        "reading-lists.load-list"
    }

    fn trigger(&self, action: &AppAction) -> Option<u64> {
        match reading_lists(action)? {
            ReadingListsAction::LoadList { id } => Some(*id),
            _ => None,
        }
    }

    async fn call(&self, id: u64) -> Result<ReadingList, EffectError> {
        Ok(self.service.load(id).await?)
    }

    fn succeeded(&self, list: ReadingList) -> AppAction {
        ReadingListsAction::ListLoaded { list }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ReadingListsAction::LoadListFailed.into()
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("reading-lists.load-list.failure")
    }
}

pub struct SaveListEffect {
    service: ReadingListsService,
}

impl SaveListEffect {
    pub fn new(service: ReadingListsService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for SaveListEffect {
    type Action = AppAction;
    type Trigger = ReadingList;
    type Response = ReadingList;

    fn name(&self) -> &'static str {
        "reading-lists.save-list"
    }

    fn trigger(&self, action: &AppAction) -> Option<ReadingList> {
        match reading_lists(action)? {
            ReadingListsAction::SaveList { list } => Some(list.clone()),
            _ => None,
        }
    }

    async fn call(&self, list: ReadingList) -> Result<ReadingList, EffectError> {
        Ok(self.service.save(&list).await?)
    }

    fn succeeded(&self, list: ReadingList) -> AppAction {
        ReadingListsAction::ListSaved { list }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ReadingListsAction::SaveListFailed.into()
    }

    fn success_notification(&self, list: &ReadingList) -> Option<Notification> {
        Some(Notification::info("reading-lists.save-list.success").with_param("name", &list.name))
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("reading-lists.save-list.failure")
    }
}

pub struct DeleteListsEffect {
    service: ReadingListsService,
}

impl DeleteListsEffect {
    pub fn new(service: ReadingListsService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for DeleteListsEffect {
    type Action = AppAction;
    type Trigger = Vec<u64>;
    type Response = Vec<u64>;

    fn name(&self) -> &'static str {
        "reading-lists.delete-lists"
    }

    fn trigger(&self, action: &AppAction) -> Option<Vec<u64>> {
        match reading_lists(action)? {
            ReadingListsAction::DeleteLists { ids } => Some(ids.clone()),
            _ => None,
        }
    }

    async fn call(&self, ids: Vec<u64>) -> Result<Vec<u64>, EffectError> {
        self.service.delete(&ids).await?;
        Ok(ids)
    }

    fn succeeded(&self, ids: Vec<u64>) -> AppAction {
        ReadingListsAction::ListsDeleted { ids }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        ReadingListsAction::DeleteListsFailed.into()
    }

    fn success_notification(&self, ids: &Vec<u64>) -> Option<Notification> {
        Some(
            Notification::info("reading-lists.delete-lists.success")
                .with_param("count", ids.len()),
        )
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("reading-lists.delete-lists.failure")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::reading_list;
    use crate::testing::{client, run};
    use comicdesk_http::executor::mock::MockExecutor;
    use comicdesk_http::{HttpResponse, Method};
    use serde_json::json;

    fn service(executor: &MockExecutor) -> ReadingListsService {
        ReadingListsService::new(client(executor))
    }

    #[tokio::test]
    async fn new_list_is_posted() {
        let stored = reading_list(Some(4), "Summer");
        let executor = MockExecutor::new().with_response(
            Method::Post,
            "/api/lists/reading",
            MockExecutor::success_response(serde_json::to_value(&stored).unwrap()),
        );

        let (action, notifier) =
            run(SaveListEffect::new(service(&executor)), reading_list(None, "Summer")).await;

        assert_eq!(action, ReadingListsAction::ListSaved { list: stored }.into());
        assert_eq!(notifier.infos()[0].params.get("name"), Some(&"Summer".to_string()));
    }

    #[tokio::test]
    async fn stored_list_is_put() {
        let list = reading_list(Some(4), "Summer");
        let executor = MockExecutor::new().with_response(
            Method::Put,
            "/api/lists/reading/4",
            MockExecutor::success_response(serde_json::to_value(&list).unwrap()),
        );

        let (action, _) = run(SaveListEffect::new(service(&executor)), list.clone()).await;

        assert_eq!(action, ReadingListsAction::ListSaved { list }.into());
        assert_eq!(executor.recorded_requests()[0].method, Method::Put);
    }

    #[tokio::test]
    async fn load_lists_failure() {
        let executor = MockExecutor::new().fail_with("connection reset");
        let (action, notifier) = run(LoadListsEffect::new(service(&executor)), ()).await;

        assert_eq!(action, ReadingListsAction::LoadListsFailed.into());
        assert_eq!(notifier.errors()[0].key, "reading-lists.load-lists.failure");
    }

    #[tokio::test]
    async fn delete_posts_ids() {
        let executor = MockExecutor::new().with_response(
            Method::Post,
            "/api/lists/reading/remove",
            HttpResponse::with_status(200, ""),
        );

        let (action, _) = run(DeleteListsEffect::new(service(&executor)), vec![1, 2]).await;

        assert_eq!(action, ReadingListsAction::ListsDeleted { ids: vec![1, 2] }.into());
        assert_eq!(executor.recorded_requests()[0].body, Some(json!({"ids": [1, 2]})));
    }
}
