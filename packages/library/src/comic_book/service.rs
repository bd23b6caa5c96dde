use collection_literals::btree;
use comicdesk_http::{ApiClient, Error, Params, UrlTemplate};

use crate::models::ComicBook;

pub const COMIC: UrlTemplate = UrlTemplate::new("/api/comics/{id}");
pub const RESTORE: UrlTemplate = UrlTemplate::new("/api/comics/{id}/restore");

fn id_params(id: u64) -> Params {
    btree! { "id" => id.to_string() }
}

#[derive(Debug, Clone)]
pub struct ComicBookService {
    client: ApiClient,
}

impl ComicBookService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn load(&self, id: u64) -> Result<ComicBook, Error> {
        self.client.get(COMIC, &id_params(id)).await
    }

    pub async fn update(&self, comic: &ComicBook) -> Result<ComicBook, Error> {
        self.client.put(COMIC, &id_params(comic.id), comic).await
    }

    /// Marks the comic deleted; the server returns it with `deleted` set.
    pub async fn delete(&self, comic: &ComicBook) -> Result<ComicBook, Error> {
        self.client.delete(COMIC, &id_params(comic.id)).await
    }

    pub async fn restore(&self, comic: &ComicBook) -> Result<ComicBook, Error> {
        self.client
            .post(RESTORE, &id_params(comic.id), &serde_json::json!({}))
            .await
    }
}
