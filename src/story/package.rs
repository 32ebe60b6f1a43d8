//! Packaging request for the `/export-custom-story` endpoint.
//!
//! The backend turns a story into an installable mod pack. This module only
//! builds and sends the request; editor state is never touched, so a failed
//! request leaves nothing to roll back.

use serde::{Deserialize, Serialize};

use crate::scene::SceneRecord;

/// Path of the packaging endpoint.
pub const EXPORT_ENDPOINT: &str = "/export-custom-story";

/// Shown to the user when packaging fails.
pub const PACKAGING_FAILURE_HINT: &str =
    "There was an error exporting the story. Please make sure each scene has valid SEKAI-Stories JSON.";

/// JSON body of a packaging request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub file_name: String,
    pub data: Vec<SceneRecord>,
}

impl ExportRequest {
    pub fn new(file_name: impl Into<String>, data: Vec<SceneRecord>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }
}

/// Where packaging requests are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingConfig {
    pub base_url: String,
    pub endpoint: String,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3939".to_string(),
            endpoint: EXPORT_ENDPOINT.to_string(),
        }
    }
}

impl PackagingConfig {
    /// Creates a config for `base_url` with the default endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL of the packaging endpoint.
    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}

/// User-facing message for a failed packaging attempt.
pub fn failure_message(error: &impl std::fmt::Display) -> String {
    format!("{PACKAGING_FAILURE_HINT} Error: {error}")
}

#[cfg(feature = "packaging")]
pub use client::{PackagingClient, PackagingError};

#[cfg(feature = "packaging")]
mod client {
    use reqwest::{header, Client};

    use super::{ExportRequest, PackagingConfig};

    /// Packaging errors.
    #[derive(Debug, thiserror::Error)]
    pub enum PackagingError {
        #[error("HTTP error: {0}")]
        Http(#[from] reqwest::Error),
        #[error("API error: {status} - {message}")]
        Api { status: u16, message: String },
    }

    /// HTTP client for the packaging backend.
    pub struct PackagingClient {
        client: Client,
        url: String,
    }

    impl PackagingClient {
        /// Create a new client for the given config.
        pub fn new(config: &PackagingConfig) -> Result<Self, PackagingError> {
            let client = Client::builder().build()?;
            Ok(Self {
                client,
                url: config.url(),
            })
        }

        /// The endpoint URL requests go to.
        pub fn url(&self) -> &str {
            &self.url
        }

        /// POST /export-custom-story - Package a story, returns the backend's text reply
        pub async fn export_story(&self, request: &ExportRequest) -> Result<String, PackagingError> {
            tracing::info!(
                url = %self.url,
                file_name = %request.file_name,
                scenes = request.data.len(),
                "submitting story for packaging"
            );
            let resp = self
                .client
                .post(&self.url)
                .header(header::CONTENT_TYPE, "application/json")
                .json(request)
                .send()
                .await?;

            if !resp.status().is_success() {
                let status = resp.status().as_u16();
                let message = resp.text().await.unwrap_or_default();
                return Err(PackagingError::Api { status, message });
            }

            Ok(resp.text().await?)
        }
    }
}
