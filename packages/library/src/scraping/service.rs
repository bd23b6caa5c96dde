use collection_literals::btree;
use comicdesk_http::{ApiClient, Error, Params, UrlTemplate};
use serde::Serialize;

use crate::models::{ComicBook, ScrapingVolume};

pub const VOLUMES: UrlTemplate = UrlTemplate::new("/api/scraping/volumes");
pub const SCRAPE_COMIC: UrlTemplate = UrlTemplate::new("/api/scraping/comics/{comicId}");

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VolumesRequest<'a> {
    api_key: &'a str,
    series: &'a str,
    volume: &'a str,
    max_records: u32,
    skip_cache: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeRequest<'a> {
    api_key: &'a str,
    issue_id: u64,
    skip_cache: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeQuery {
    pub api_key: String,
    pub series: String,
    pub volume: String,
    pub max_records: u32,
    pub skip_cache: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeQuery {
    pub api_key: String,
    pub issue_id: u64,
    pub comic_id: u64,
    pub skip_cache: bool,
}

#[derive(Debug, Clone)]
pub struct ScrapingService {
    client: ApiClient,
}

impl ScrapingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn load_volumes(&self, query: &VolumeQuery) -> Result<Vec<ScrapingVolume>, Error> {
        let request = VolumesRequest {
            api_key: &query.api_key,
            series: &query.series,
            volume: &query.volume,
            max_records: query.max_records,
            skip_cache: query.skip_cache,
        };
        self.client.post(VOLUMES, &Params::new(), &request).await
    }

    /// Scrape one issue into the comic; returns the updated comic.
    pub async fn scrape_comic(&self, query: &ScrapeQuery) -> Result<ComicBook, Error> {
        let params: Params = btree! { "comicId" => query.comic_id.to_string() };
        let request = ScrapeRequest {
            api_key: &query.api_key,
            issue_id: query.issue_id,
            skip_cache: query.skip_cache,
        };
        self.client.post(SCRAPE_COMIC, &params, &request).await
    }
}
