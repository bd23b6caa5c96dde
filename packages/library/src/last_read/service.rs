use collection_literals::btree;
use comicdesk_http::{ApiClient, Error, Params, UrlTemplate};
use serde::{Deserialize, Serialize};

use crate::models::LastRead;

pub const ENTRIES_AFTER: UrlTemplate = UrlTemplate::new("/api/library/read/{lastId}");
pub const READ_STATE: UrlTemplate = UrlTemplate::new("/api/library/read");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastReadPage {
    #[serde(default)]
    pub entries: Vec<LastRead>,
    /// No entries remain after this page.
    #[serde(default)]
    pub last_payload: bool,
}

#[derive(Serialize)]
struct IdsRequest<'a> {
    ids: &'a [u64],
}

#[derive(Debug, Clone)]
pub struct LastReadService {
    client: ApiClient,
}

impl LastReadService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn load_entries(&self, last_id: u64) -> Result<LastReadPage, Error> {
        let params: Params = btree! { "lastId" => last_id.to_string() };
        self.client.get(ENTRIES_AFTER, &params).await
    }

    pub async fn set_read_state(&self, ids: &[u64], read: bool) -> Result<(), Error> {
        let body = IdsRequest { ids };
        if read {
            self.client.put(READ_STATE, &Params::new(), &body).await
        } else {
            self.client.delete_with(READ_STATE, &Params::new(), &body).await
        }
    }
}
