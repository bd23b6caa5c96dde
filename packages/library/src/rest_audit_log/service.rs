use collection_literals::btree;
use comicdesk_http::{ApiClient, Error, Params, UrlTemplate};
use serde::Deserialize;

use crate::models::RestAuditLogEntry;

pub const ENTRIES_SINCE: UrlTemplate = UrlTemplate::new("/api/admin/audit/rest/entries/{cutoff}");
pub const ENTRIES: UrlTemplate = UrlTemplate::new("/api/admin/audit/rest/entries");

/// One batch of audit entries and the cutoff to ask for next.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditLogPage {
    #[serde(default)]
    pub entries: Vec<RestAuditLogEntry>,
    pub latest: u64,
}

#[derive(Debug, Clone)]
pub struct RestAuditLogService {
    client: ApiClient,
}

impl RestAuditLogService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_entries(&self, cutoff: u64) -> Result<AuditLogPage, Error> {
        let params: Params = btree! { "cutoff" => cutoff.to_string() };
        self.client.get(ENTRIES_SINCE, &params).await
    }

    pub async fn clear(&self) -> Result<(), Error> {
        self.client.delete(ENTRIES, &Params::new()).await
    }
}
