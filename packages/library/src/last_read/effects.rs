use std::sync::Arc;

use async_trait::async_trait;
use comicdesk_http::ApiClient;
use comicdesk_store::{EffectError, EffectHandle, Notification, Notifier, RequestEffect};

use super::{LastReadAction, LastReadPage, LastReadService};
use crate::state::{AppAction, AppStore};

pub fn register(
    store: &AppStore,
    client: &ApiClient,
    notifier: &Arc<dyn Notifier>,
) -> Vec<EffectHandle> {
    let service = LastReadService::new(client.clone());
    vec![
        store.register(LoadEntriesEffect::new(service.clone()), notifier.clone()),
        store.register(SetReadStateEffect::new(service), notifier.clone()),
    ]
}

pub struct LoadEntriesEffect {
    service: LastReadService,
}

impl LoadEntriesEffect {
    pub fn new(service: LastReadService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for LoadEntriesEffect {
    type Action = AppAction;
    type Trigger = u64;
    type Response = LastReadPage;

    fn name(&self) -> &'static str {
        "last-read.load-entries"
    }

    fn trigger(&self, action: &AppAction) -> Option<u64> {
        match action {
            AppAction::LastRead(LastReadAction::LoadEntries { last_id }) => Some(*last_id),
            _ => None,
        }
    }

    async fn call(&self, last_id: u64) -> Result<LastReadPage, EffectError> {
        Ok(self.service.load_entries(last_id).await?)
    }

    fn succeeded(&self, page: LastReadPage) -> AppAction {
        LastReadAction::EntriesLoaded {
            entries: page.entries,
            last_payload: page.last_payload,
        }
        .into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        LastReadAction::LoadEntriesFailed.into()
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("last-read.load-entries.failure")
    }
}

pub struct SetReadStateEffect {
    service: LastReadService,
}

impl SetReadStateEffect {
    pub fn new(service: LastReadService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for SetReadStateEffect {
    type Action = AppAction;
    type Trigger = (Vec<u64>, bool);
    type Response = (Vec<u64>, bool);

    fn name(&self) -> &'static str {
        "last-read.set-read-state"
    }

    fn trigger(&self, action: &AppAction) -> Option<(Vec<u64>, bool)> {
        match action {
            AppAction::LastRead(LastReadAction::SetReadState { ids, read }) => {
                Some((ids.clone(), *read))
            }
            _ => None,
        }
    }

    async fn call(
        &self,
        (ids, read): (Vec<u64>, bool),
    ) -> Result<(Vec<u64>, bool), EffectError> {
        self.service.set_read_state(&ids, read).await?;
        Ok((ids, read))
    }

    fn succeeded(&self, (ids, read): (Vec<u64>, bool)) -> AppAction {
        LastReadAction::ReadStateSet { ids, read }.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        LastReadAction::SetReadStateFailed.into()
    }

    fn success_notification(&self, (ids, read): &(Vec<u64>, bool)) -> Option<Notification> {
        let key = if *read {
            "last-read.mark-read.success"
        } else {
            "last-read.mark-unread.success"
        };
        Some(Notification::info(key).with_param("count", ids.len()))
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("last-read.set-read-state.failure")
    }
}
