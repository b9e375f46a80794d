use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::domain::PhotoRecord;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

pub const DEFAULT_API_BASE_URL: &str = "https://android-kotlin-fun-mars-server.appspot.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PHOTOS_PATH: &str = "photos";

/// Source of the photo list consumed by [`crate::PhotoFeed`].
#[async_trait]
pub trait PhotoFetchClient: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<PhotoRecord>, FetchError>;
}

/// Fetches photos from `GET {base_url}/photos`.
#[derive(Debug, Clone)]
pub struct HttpPhotoClient {
    http: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpPhotoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = photos_endpoint(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self {
            http,
            endpoint,
            timeout,
        })
    }

    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PhotoFetchClient for HttpPhotoClient {
    async fn fetch_all(&self) -> Result<Vec<PhotoRecord>, FetchError> {
        let timeout = self.timeout;
        let body = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|err| FetchError::from_reqwest(err, timeout))?
            .error_for_status()
            .map_err(|err| FetchError::from_reqwest(err, timeout))?
            .bytes()
            .await
            .map_err(|err| FetchError::from_reqwest(err, timeout))?;

        let photos: Vec<PhotoRecord> = serde_json::from_slice(&body)?;
        debug!(endpoint = %self.endpoint, count = photos.len(), "fetched photo list");
        Ok(photos)
    }
}

fn photos_endpoint(base_url: &str) -> Result<Url, FetchError> {
    let raw = format!("{}/{PHOTOS_PATH}", base_url.trim().trim_end_matches('/'));
    Url::parse(&raw).map_err(|source| FetchError::InvalidEndpoint { url: raw, source })
}

#[cfg(test)]
#[path = "tests/photo_client_tests.rs"]
mod tests;
