/// HTTP client for the external merge service
///
/// One POST per merge. The body carries every image in list order plus the
/// layout options; the service answers `{url}` on success and `{detail}` on
/// failure.

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::options::MergeOptions;
use crate::collection::{ImageCollection, Rotation};

/// Message shown when the service fails without saying why
const GENERIC_SERVER_ERROR: &str = "The server returned an error.";

#[derive(Debug, Clone, Error)]
pub enum MergeError {
    #[error("There are no images to merge.")]
    EmptyCollection,
    #[error("A merge is already in progress.")]
    Busy,
    #[error("Error while merging images: {0}")]
    Network(Arc<reqwest::Error>),
    #[error("Error while merging images: {}", .detail.as_deref().unwrap_or(GENERIC_SERVER_ERROR))]
    Server { status: u16, detail: Option<String> },
    #[error("The merge service sent an unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Could not build the merge request: {0}")]
    Encode(Arc<serde_json::Error>),
    #[error("Download failed: {0}")]
    Download(String),
}

impl From<reqwest::Error> for MergeError {
    fn from(e: reqwest::Error) -> Self {
        MergeError::Network(Arc::new(e))
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FileMeta<'a> {
    name: &'a str,
    size: u64,
    #[serde(rename = "type")]
    mime: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<i64>,
}

#[derive(Serialize, Debug)]
struct MergeImage<'a> {
    file: FileMeta<'a>,
    name: &'a str,
    src: &'a str,
    base64: &'a str,
    rotation: Rotation,
    selected: bool,
}

/// Request body, borrowing from the collection
#[derive(Serialize, Debug)]
pub struct MergeRequest<'a> {
    images: Vec<MergeImage<'a>>,
    options: &'a MergeOptions,
}

impl<'a> MergeRequest<'a> {
    /// Refuses an empty collection before anything is sent
    pub fn new(collection: &'a ImageCollection, options: &'a MergeOptions) -> Result<Self, MergeError> {
        if collection.is_empty() {
            return Err(MergeError::EmptyCollection);
        }

        let images = collection
            .entries()
            .iter()
            .map(|entry| MergeImage {
                file: FileMeta {
                    name: &entry.name,
                    size: entry.size,
                    mime: &entry.mime,
                    last_modified: entry.last_modified,
                },
                name: &entry.name,
                src: &entry.data_url,
                base64: entry.base64(),
                rotation: entry.rotation,
                selected: entry.selected,
            })
            .collect();

        Ok(Self { images, options })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn to_body(&self) -> Result<Vec<u8>, MergeError> {
        serde_json::to_vec(self).map_err(|e| MergeError::Encode(Arc::new(e)))
    }
}

#[derive(Deserialize, Debug)]
struct MergeSuccess {
    url: String,
}

#[derive(Deserialize, Debug)]
struct MergeFailure {
    detail: Option<String>,
}

/// Cheap to clone; clones share the connection pool
#[derive(Debug, Clone)]
pub struct MergeClient {
    http: reqwest::Client,
    endpoint: String,
}

impl MergeClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, MergeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST an encoded request; returns the merged image URL
    pub async fn submit(self, body: Vec<u8>) -> Result<String, MergeError> {
        tracing::info!("🚀 Sending merge request ({} KB) to {}", body.len() / 1024, self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<MergeFailure>(&text)
                .ok()
                .and_then(|failure| failure.detail)
                .filter(|detail| !detail.trim().is_empty());
            tracing::warn!("⚠️  Merge service answered {}: {:?}", status, detail);
            return Err(MergeError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let success: MergeSuccess = serde_json::from_str(&text)
            .map_err(|e| MergeError::InvalidResponse(e.to_string()))?;
        tracing::info!("✅ Merge complete: {}", success.url);
        Ok(success.url)
    }

    /// Fetch `url` and write it to `target`
    pub async fn download(self, url: String, target: PathBuf) -> Result<PathBuf, MergeError> {
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|e| MergeError::Download(format!("{}: {e}", target.display())))?;
        tracing::info!("💾 Saved {} bytes to {}", bytes.len(), target.display());
        Ok(target)
    }
}
