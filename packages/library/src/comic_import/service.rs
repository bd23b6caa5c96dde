use comicdesk_http::{ApiClient, Error, Params, UrlTemplate};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_IMPORT_MAXIMUM;
use crate::models::ComicFile;

pub const FILE_CONTENTS: UrlTemplate = UrlTemplate::new("/api/files/contents");
pub const IMPORT: UrlTemplate = UrlTemplate::new("/api/comics/import");

#[derive(Serialize)]
struct LoadFilesRequest<'a> {
    directory: &'a str,
    maximum: usize,
}

#[derive(Deserialize)]
struct LoadFilesResponse {
    #[serde(default)]
    files: Vec<ComicFile>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportRequest<'a> {
    filenames: Vec<&'a str>,
    skip_metadata: bool,
    skip_blocking_pages: bool,
}

#[derive(Debug, Clone)]
pub struct ComicImportService {
    client: ApiClient,
    limit: usize,
}

impl ComicImportService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            limit: DEFAULT_IMPORT_MAXIMUM,
        }
    }

    /// Cap every scan at `limit` files, whatever the caller asks for.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// List up to `maximum` comic files below `directory` on the server.
    ///
    /// `maximum` is clamped to the service limit.
    pub async fn load_files(
        &self,
        directory: &str,
        maximum: usize,
    ) -> Result<Vec<ComicFile>, Error> {
        let response: LoadFilesResponse = self
            .client
            .post(
                FILE_CONTENTS,
                &Params::new(),
                &LoadFilesRequest {
                    directory,
                    maximum: maximum.min(self.limit),
                },
            )
            .await?;
        Ok(response.files)
    }

    /// Queue `files` for import. The server only acknowledges the request.
    pub async fn import_files(
        &self,
        files: &[ComicFile],
        skip_metadata: bool,
        skip_blocking_pages: bool,
    ) -> Result<(), Error> {
        let request = ImportRequest {
            filenames: files.iter().map(|f| f.filename.as_str()).collect(),
            skip_metadata,
            skip_blocking_pages,
        };
        self.client.post(IMPORT, &Params::new(), &request).await
    }
}
