//! HTTP client for the project file endpoints.
//!
//! [`HttpFileApi`] implements [`FileApi`] with the Fetch API (via
//! `gloo-net`). Status and body interpretation is delegated to
//! [`crate::core::api`] so it stays testable off the browser.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;

use crate::config::{ApiConfig, endpoints};
use crate::core::api::{FileApi, parse_ack, parse_tree};
use crate::core::error::FetchError;
use crate::models::FileNode;

// =============================================================================
// Request Bodies
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilePathBody<'a> {
    file_path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FolderPathBody<'a> {
    folder_path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenameBody<'a> {
    old_path: &'a str,
    new_path: &'a str,
}

// =============================================================================
// HttpFileApi
// =============================================================================

/// Backend client bound to a base URL.
#[derive(Clone, Debug)]
pub struct HttpFileApi {
    config: ApiConfig,
}

impl HttpFileApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    async fn send_json<B: Serialize>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<(), FetchError> {
        let request = builder
            .json(body)
            .map_err(|_| FetchError::RequestCreationFailed)?;
        let (status, text) = read(request.send().await).await?;
        parse_ack(status, &text)
    }
}

impl FileApi for HttpFileApi {
    async fn fetch_tree(&self) -> Result<Vec<FileNode>, FetchError> {
        let url = self.config.url(endpoints::FILES);
        let (status, text) = read(Request::get(&url).send().await).await?;
        parse_tree(status, &text)
    }

    async fn create_file(&self, path: &str) -> Result<(), FetchError> {
        let url = self.config.url(endpoints::FILE_CREATE);
        self.send_json(Request::post(&url), &FilePathBody { file_path: path })
            .await
    }

    async fn create_folder(&self, path: &str) -> Result<(), FetchError> {
        let url = self.config.url(endpoints::FOLDER_CREATE);
        self.send_json(Request::post(&url), &FolderPathBody { folder_path: path })
            .await
    }

    async fn delete_file(&self, path: &str) -> Result<(), FetchError> {
        let url = self.config.url(endpoints::FILE_DELETE);
        self.send_json(Request::delete(&url), &FilePathBody { file_path: path })
            .await
    }

    async fn delete_folder(&self, path: &str) -> Result<(), FetchError> {
        let url = self.config.url(endpoints::FOLDER_DELETE);
        self.send_json(Request::delete(&url), &FolderPathBody { folder_path: path })
            .await
    }

    async fn rename_file(&self, old_path: &str, new_path: &str) -> Result<(), FetchError> {
        let url = self.config.url(endpoints::FILE_RENAME);
        let body = RenameBody { old_path, new_path };
        self.send_json(Request::patch(&url), &body).await
    }
}

/// Read status and body text of a completed request.
async fn read(response: Result<Response, gloo_net::Error>) -> Result<(u16, String), FetchError> {
    let response = response.map_err(|e| FetchError::NetworkError(e.to_string()))?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| FetchError::JsonParseError(e.to_string()))?;
    Ok((status, text))
}
