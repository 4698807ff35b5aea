//! Show persistence client
//!
//! A save sends the whole serialized show in one POST; the response carries
//! the canonical slug for newly created shows. Network failures, non-2xx
//! statuses, and unparseable bodies are all surfaced as the same kind of
//! recoverable error so the editor can offer a retry.

use super::USER_AGENT;
use super::wire::{SaveResponse, StoredShow, WireShow};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("save endpoint returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Parse(String),
}

/// HTTP client for the show endpoints
#[derive(Clone)]
pub struct HttpShowStore {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpShowStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Persist a show; exactly one request per call
    pub async fn save_show(&self, payload: &WireShow) -> Result<SaveResponse, StoreError> {
        let url = format!("{}/control/setbuilder/shows/save/", self.base_url);
        log::info!(
            "Saving show {:?} ({} items) to {}",
            payload.label,
            payload.items.len(),
            url
        );

        let response = self
            .http_client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    /// Fetch a stored show for editing
    pub async fn fetch_show(&self, slug: &str) -> Result<StoredShow, StoreError> {
        let url = format!("{}/control/setbuilder/api/shows/{}/", self.base_url, slug);
        log::debug!("Loading show {} from {}", slug, url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }
}
