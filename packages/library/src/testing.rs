//! Shared helpers for effect tests.

use std::sync::Arc;

use comicdesk_http::executor::mock::MockExecutor;
use comicdesk_http::ApiClient;
use comicdesk_store::{execute, RecordingNotifier, RequestEffect};

use crate::state::AppAction;

pub(crate) fn client(executor: &MockExecutor) -> ApiClient {
    ApiClient::new("http://localhost:7171", Arc::new(executor.clone())).unwrap()
}

/// Run one effect pipeline to completion, recording its notifications.
pub(crate) async fn run<E>(effect: E, trigger: E::Trigger) -> (AppAction, Arc<RecordingNotifier>)
where
    E: RequestEffect<Action = AppAction>,
{
    let notifier = Arc::new(RecordingNotifier::new());
    let action = execute(Arc::new(effect), trigger, notifier.clone()).await;
    (action, notifier)
}
