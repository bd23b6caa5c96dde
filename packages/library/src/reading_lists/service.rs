use collection_literals::btree;
use comicdesk_http::{ApiClient, Error, Params, UrlTemplate};
use serde::Serialize;

use crate::models::ReadingList;

pub const LISTS: UrlTemplate = UrlTemplate::new("/api/lists/reading");
pub const LIST: UrlTemplate = UrlTemplate::new("/api/lists/reading/{id}");
pub const REMOVE: UrlTemplate = UrlTemplate::new("/api/lists/reading/remove");

#[derive(Serialize)]
struct IdsRequest<'a> {
    ids: &'a [u64],
}

#[derive(Debug, Clone)]
pub struct ReadingListsService {
    client: ApiClient,
}

impl ReadingListsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn load_all(&self) -> Result<Vec<ReadingList>, Error> {
        self.client.get(LISTS, &Params::new()).await
    }

    pub async fn load(&self, id: u64) -> Result<ReadingList, Error> {
        let params: Params = btree! { "id" => id.to_string() };
        self.client.get(LIST, &params).await
    }

    /// Create the list if it has no id yet, otherwise update it.
    pub async fn save(&self, list: &ReadingList) -> Result<ReadingList, Error> {
        match list.id {
            Some(id) => {
                let params: Params = btree! { "id" => id.to_string() };
                self.client.put(LIST, &params, list).await
            }
            None => self.client.post(LISTS, &Params::new(), list).await,
        }
    }

    pub async fn delete(&self, ids: &[u64]) -> Result<(), Error> {
        self.client
            .post(REMOVE, &Params::new(), &IdsRequest { ids })
            .await
    }
}
