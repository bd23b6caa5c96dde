use collection_literals::btree;
use comicdesk_http::{ApiClient, Error, Params, UrlTemplate};
use serde::Serialize;

use crate::models::BlockedPage;

pub const LOAD_ALL: UrlTemplate = UrlTemplate::new("/api/pages/blocked");
pub const BY_HASH: UrlTemplate = UrlTemplate::new("/api/pages/blocked/{hash}");
pub const ADD: UrlTemplate = UrlTemplate::new("/api/pages/blocked/add");
pub const REMOVE: UrlTemplate = UrlTemplate::new("/api/pages/blocked/remove");
pub const DELETE: UrlTemplate = UrlTemplate::new("/api/pages/blocked/delete");

#[derive(Serialize)]
struct HashesRequest<'a> {
    hashes: &'a [String],
}

#[derive(Debug, Clone)]
pub struct BlockedPagesService {
    client: ApiClient,
}

impl BlockedPagesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn load_all(&self) -> Result<Vec<BlockedPage>, Error> {
        self.client.get(LOAD_ALL, &Params::new()).await
    }

    pub async fn load_by_hash(&self, hash: &str) -> Result<BlockedPage, Error> {
        let params: Params = btree! { "hash" => hash.to_string() };
        self.client.get(BY_HASH, &params).await
    }

    pub async fn save(&self, entry: &BlockedPage) -> Result<BlockedPage, Error> {
        let params: Params = btree! { "hash" => entry.hash.clone() };
        self.client.put(BY_HASH, &params, entry).await
    }

    pub async fn set_blocked_state(&self, hashes: &[String], blocked: bool) -> Result<(), Error> {
        let template = if blocked { ADD } else { REMOVE };
        self.client
            .post(template, &Params::new(), &HashesRequest { hashes })
            .await
    }

    pub async fn delete_entries(&self, hashes: &[String]) -> Result<(), Error> {
        self.client
            .post(DELETE, &Params::new(), &HashesRequest { hashes })
            .await
    }
}
