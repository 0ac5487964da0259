//! `reqwest`-backed store client.

use std::future::Future;
use std::pin::Pin;

use goflux_protocol::constants::{
    DOWNLOAD_ENDPOINT, LIST_ENDPOINT, PATH_QUERY_PARAM, UPLOAD_ENDPOINT,
};
use goflux_protocol::{ChunkData, RemotePath, parse_list_response};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::transport::{Ack, BlockTransport, NamespaceStore};

/// HTTP client for the store's `/upload`, `/list` and `/download` endpoints.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Creates a client for the store at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/');
        reqwest::Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// The store's base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Uploads one block. Any 2xx status is an acknowledgement.
    pub async fn upload_chunk(&self, chunk: &ChunkData) -> Result<Ack, ClientError> {
        let url = format!("{}{}", self.base_url, UPLOAD_ENDPOINT);
        let resp = self.http.post(&url).json(chunk).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(
                path = %chunk.path,
                chunk = chunk.chunk_id,
                status = status.as_u16(),
                "block rejected"
            );
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(
            path = %chunk.path,
            chunk = chunk.chunk_id,
            total = chunk.total,
            bytes = chunk.data.len(),
            "block acknowledged"
        );
        Ok(Ack {
            status: status.as_u16(),
        })
    }

    /// Lists entry names under `path`.
    pub async fn list(&self, path: &RemotePath) -> Result<Vec<String>, ClientError> {
        let body = self.get(LIST_ENDPOINT, path).await?;
        Ok(parse_list_response(&body)?)
    }

    /// Downloads the raw content stored at `path`.
    pub async fn download(&self, path: &RemotePath) -> Result<Vec<u8>, ClientError> {
        self.get(DOWNLOAD_ENDPOINT, path).await
    }

    /// Performs a GET with the namespace path as a URL-encoded query value.
    async fn get(&self, endpoint: &str, path: &RemotePath) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self
            .http
            .get(&url)
            .query(&[(PATH_QUERY_PARAM, path.as_str())])
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

impl BlockTransport for HttpClient {
    fn send<'a>(
        &'a self,
        chunk: &'a ChunkData,
    ) -> Pin<Box<dyn Future<Output = Result<Ack, ClientError>> + Send + 'a>> {
        Box::pin(self.upload_chunk(chunk))
    }
}

impl NamespaceStore for HttpClient {
    fn list<'a>(
        &'a self,
        path: &'a RemotePath,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, ClientError>> + Send + 'a>> {
        Box::pin(HttpClient::list(self, path))
    }

    fn download<'a>(
        &'a self,
        path: &'a RemotePath,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, ClientError>> + Send + 'a>> {
        Box::pin(HttpClient::download(self, path))
    }
}
