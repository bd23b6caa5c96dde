use std::sync::Arc;

use async_trait::async_trait;
use comicdesk_http::ApiClient;
use comicdesk_store::{EffectError, EffectHandle, Notification, Notifier, RequestEffect};

use super::{AuditLogPage, RestAuditLogAction, RestAuditLogService};
use crate::state::{AppAction, AppStore};

pub fn register(
    store: &AppStore,
    client: &ApiClient,
    notifier: &Arc<dyn Notifier>,
) -> Vec<EffectHandle> {
    let service = RestAuditLogService::new(client.clone());
    vec![
        store.register(GetEntriesEffect::new(service.clone()), notifier.clone()),
        store.register(ClearEffect::new(service), notifier.clone()),
    ]
}

pub struct GetEntriesEffect {
    service: RestAuditLogService,
}

impl GetEntriesEffect {
    pub fn new(service: RestAuditLogService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for GetEntriesEffect {
    type Action = AppAction;
    type Trigger = u64;
    type Response = AuditLogPage;

    fn name(&self) -> &'static str {
        "rest-audit-log.get-entries"
    }

    fn trigger(&self, action: &AppAction) -> Option<u64> {
        match action {
            AppAction::RestAuditLog(RestAuditLogAction::GetEntries { cutoff }) => Some(*cutoff),
            _ => None,
        }
    }

    async fn call(&self, cutoff: u64) -> Result<AuditLogPage, EffectError> {
        Ok(self.service.get_entries(cutoff).await?)
    }

    fn succeeded(&self, page: AuditLogPage) -> AppAction {
        RestAuditLogAction::EntriesReceived {
            entries: page.entries,
            latest: page.latest,
        }
        .into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        RestAuditLogAction::GetEntriesFailed.into()
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("rest-audit-log.get-entries.failure")
    }
}

pub struct ClearEffect {
    service: RestAuditLogService,
}

impl ClearEffect {
    pub fn new(service: RestAuditLogService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RequestEffect for ClearEffect {
    type Action = AppAction;
    type Trigger = ();
    type Response = ();

    fn name(&self) -> &'static str {
        "rest-audit-log.clear"
    }

    fn trigger(&self, action: &AppAction) -> Option<()> {
        matches!(action, AppAction::RestAuditLog(RestAuditLogAction::Clear)).then_some(())
    }

    async fn call(&self, _: ()) -> Result<(), EffectError> {
        Ok(self.service.clear().await?)
    }

    fn succeeded(&self, _: ()) -> AppAction {
        RestAuditLogAction::Cleared.into()
    }

    fn failed(&self, _: Option<&EffectError>) -> AppAction {
        RestAuditLogAction::ClearFailed.into()
    }

    fn success_notification(&self, _: &()) -> Option<Notification> {
        Some(Notification::info("rest-audit-log.clear.success"))
    }

    fn failure_notification(&self, _: &EffectError) -> Notification {
        Notification::error("rest-audit-log.clear.failure")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::audit_entry;
    use crate::testing::{client, run};
    use comicdesk_http::executor::mock::MockExecutor;
    use comicdesk_http::{HttpResponse, Method};
    use serde_json::json;

    #[tokio::test]
    async fn cutoff_goes_in_the_path() {
        let executor = MockExecutor::new().with_response(
            Method::Get,
            "/api/admin/audit/rest/entries/1500",
            MockExecutor::success_response(json!({
                "entries": [serde_json::to_value(audit_entry(2)).unwrap()],
                "latest": 2000
            })),
        );
        let effect = GetEntriesEffect::new(RestAuditLogService::new(client(&executor)));
        let (action, notifier) = run(effect, 1500).await;

        assert_eq!(
            action,
            RestAuditLogAction::EntriesReceived {
                entries: vec![audit_entry(2)],
                latest: 2000
            }
            .into()
        );
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn get_entries_failure_notifies_once() {
        let executor = MockExecutor::new();
        let effect = GetEntriesEffect::new(RestAuditLogService::new(client(&executor)));
        let (action, notifier) = run(effect, 0).await;

        assert_eq!(action, RestAuditLogAction::GetEntriesFailed.into());
        assert_eq!(notifier.errors().len(), 1);
        assert_eq!(notifier.errors()[0].key, "rest-audit-log.get-entries.failure");
    }

    #[tokio::test]
    async fn clear_accepts_empty_reply() {
        let executor = MockExecutor::new().with_response(
            Method::Delete,
            "/api/admin/audit/rest/entries",
            HttpResponse::with_status(204, ""),
        );
        let effect = ClearEffect::new(RestAuditLogService::new(client(&executor)));
        let (action, notifier) = run(effect, ()).await;

        assert_eq!(action, RestAuditLogAction::Cleared.into());
        assert_eq!(notifier.infos()[0].key, "rest-audit-log.clear.success");
    }
}
