// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Best-effort lookups against the GitHub REST API: latest tag and branch tip.
//!
//! Requests are unauthenticated, made once per call and never retried or cached.

use crate::models::build_info::VERSION;
use crate::models::github::{BranchCommit, RemoteTag};
use anyhow::{ensure, Context, Result};
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_REPO_OWNER: &str = "adamjsturge";
pub const DEFAULT_REPO_NAME: &str = "xsshunter-go";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Configuration for the GitHub client.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_base_url: String,
    pub owner: String,
    pub repo: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            owner: DEFAULT_REPO_OWNER.to_string(),
            repo: DEFAULT_REPO_NAME.to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: format!("version-reporter/{VERSION}"),
        }
    }
}

impl GitHubConfig {
    /// Load GitHub configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            api_base_url: env::var("VERSION_API_BASE_URL").unwrap_or(defaults.api_base_url),
            owner: env::var("VERSION_REPO_OWNER").unwrap_or(defaults.owner),
            repo: env::var("VERSION_REPO_NAME").unwrap_or(defaults.repo),
            request_timeout: match env::var("VERSION_REQUEST_TIMEOUT_SECS") {
                Ok(secs) => Duration::from_secs(
                    secs.parse()
                        .context("VERSION_REQUEST_TIMEOUT_SECS must be a valid number")?,
                ),
                Err(_) => defaults.request_timeout,
            },
            user_agent: env::var("VERSION_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

/// Why a remote lookup produced nothing usable.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("request to {url} failed: {source}")]
    Request { url: Url, source: reqwest::Error },
    #[error("{url} returned {status}")]
    Status { url: Url, status: StatusCode },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: Url,
        source: serde_json::Error,
    },
}

/// `Ok(None)` when upstream answered but had nothing, `Err` when it was unavailable.
pub type Lookup<T> = std::result::Result<Option<T>, ResolveError>;

/// Client for one repository on a GitHub-compatible API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
    owner: String,
    repo: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .with_context(|| format!("Invalid API base URL: {}", config.api_base_url))?;
        ensure!(
            !base_url.cannot_be_a_base(),
            "API base URL must be hierarchical: {}",
            config.api_base_url
        );

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            owner: config.owner.clone(),
            repo: config.repo.clone(),
        })
    }

    /// First tag of `GET /repos/{owner}/{repo}/tags`, in the order upstream returns them.
    pub async fn latest_tag(&self) -> Lookup<RemoteTag> {
        let tags: Vec<RemoteTag> = self.get_json(self.endpoint(&["tags"])).await?;
        Ok(tags.into_iter().next())
    }

    /// SHA of the newest commit on `branch`.
    pub async fn branch_tip(&self, branch: &str) -> Lookup<String> {
        let commit: BranchCommit = self.get_json(self.endpoint(&["commits", branch])).await?;
        Ok(Some(commit.sha).filter(|sha| !sha.is_empty()))
    }

    /// `{base}/repos/{owner}/{repo}/{tail...}` with every segment percent-encoded.
    fn endpoint(&self, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot fail: base_url is checked to be hierarchical in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str()])
                .extend(tail);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ResolveError> {
        tracing::debug!(%url, "Fetching from GitHub");

        let response = self
            .http
            .get(url.clone())
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|source| ResolveError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ResolveError::Status { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ResolveError::Request {
                url: url.clone(),
                source,
            })?;

        decode_first_value(&body).map_err(|source| ResolveError::Decode { url, source })
    }
}

/// Decode the leading JSON value, ignoring anything after it.
fn decode_first_value<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    T::deserialize(&mut deserializer)
}
