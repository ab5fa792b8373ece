//! HTTP transport implementation.
//!
//! [`GithubContentsClient`] talks to a repository contents API;
//! [`LocalEndpointClient`] posts the collection to the local write endpoint.
//! Both are thin: status handling and retries live in the stores.

use crate::config::{LocalConfig, RemoteConfig};
use crate::error::{SyncError, SyncResult};
use crate::transport::{
    ContentsTransport, LocalTransport, ReadResponse, RemoteFile, WriteRequest, WriteResponse,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use teamdir_core::Member;
use tracing::{debug, warn};

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("teamdir/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocalErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutBody<'a> {
    message: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    branch: &'a str,
}

fn build_client(timeout: Option<Duration>) -> SyncResult<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| SyncError::transport_fatal(format!("failed to build HTTP client: {e}")))
}

fn send_error(e: reqwest::Error) -> SyncError {
    if e.is_timeout() {
        warn!(error = %e, "Request timed out");
    } else {
        warn!(error = %e, "Request failed before a response arrived");
    }
    SyncError::transport_retryable(e.to_string())
}

fn provider_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| fallback.to_string())
}

/// Contents API client for the stored file.
#[derive(Debug, Clone)]
pub struct GithubContentsClient {
    config: RemoteConfig,
    http: Client,
}

impl GithubContentsClient {
    /// Creates a client for the configured file.
    pub fn new(config: RemoteConfig) -> SyncResult<Self> {
        let http = build_client(config.timeout)?;
        Ok(Self { config, http })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn authorization(&self) -> String {
        format!("token {}", self.config.token.expose())
    }
}

#[async_trait]
impl ContentsTransport for GithubContentsClient {
    #[tracing::instrument(skip(self), fields(path = %self.config.path, branch = %self.config.branch))]
    async fn read(&self) -> SyncResult<ReadResponse> {
        let response = self
            .http
            .get(self.config.contents_url())
            .query(&[("ref", self.config.branch.as_str())])
            .header("Authorization", self.authorization())
            .header("Accept", ACCEPT)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Stored file not found");
            return Ok(ReadResponse::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = provider_message(&body, "Unknown error");
            warn!(status = status.as_u16(), message = %message, "Read failed");
            return Ok(ReadResponse::Failed {
                status: status.as_u16(),
                message,
            });
        }

        let body: ContentResponse = response
            .json()
            .await
            .map_err(|e| SyncError::Protocol(format!("invalid contents response: {e}")))?;
        debug!(sha = %body.sha, "Stored file fetched");
        Ok(ReadResponse::Found(RemoteFile {
            sha: body.sha,
            content: body.content.unwrap_or_default(),
        }))
    }

    #[tracing::instrument(skip(self, request), fields(path = %self.config.path, has_sha = request.sha.is_some()))]
    async fn write(&self, request: &WriteRequest) -> SyncResult<WriteResponse> {
        let body = PutBody {
            message: &request.message,
            content: &request.content,
            sha: request.sha.as_deref(),
            branch: &self.config.branch,
        };

        let response = self
            .http
            .put(self.config.contents_url())
            .header("Authorization", self.authorization())
            .header("Accept", ACCEPT)
            .json(&body)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Stored file written");
            return Ok(WriteResponse::Written);
        }

        let text = response.text().await.unwrap_or_default();
        let message = provider_message(&text, "Save failed");
        if status == StatusCode::CONFLICT {
            return Ok(WriteResponse::Conflict { message });
        }
        Ok(WriteResponse::Failed {
            status: status.as_u16(),
            message,
        })
    }
}

/// Client for the local write endpoint.
#[derive(Debug, Clone)]
pub struct LocalEndpointClient {
    endpoint: String,
    http: Client,
}

impl LocalEndpointClient {
    /// Creates a client for the configured endpoint.
    pub fn new(config: LocalConfig) -> SyncResult<Self> {
        let http = build_client(config.timeout)?;
        Ok(Self {
            endpoint: config.endpoint,
            http,
        })
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LocalTransport for LocalEndpointClient {
    #[tracing::instrument(skip(self, members), fields(endpoint = %self.endpoint, count = members.len()))]
    async fn post_members(&self, members: &[Member]) -> SyncResult<()> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(members)
            .send()
            .await
            .map_err(|e| SyncError::Local(format!("Local save failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<LocalErrorBody>(&text)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| "Local save failed".to_string());
        warn!(status = status.as_u16(), message = %message, "Local save rejected");
        Err(SyncError::Local(message))
    }
}
