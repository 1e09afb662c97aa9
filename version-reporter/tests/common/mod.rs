// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! In-process stand-in for the GitHub REST API.

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use version_reporter::services::github::{GitHubClient, GitHubConfig};

pub const TAGS_BODY: &str = r#"[{"name":"v1.3.0","commit":{"sha":"def456","url":"https://api.github.com/repos/adamjsturge/xsshunter-go/commits/def456"}}]"#;
pub const COMMIT_BODY: &str = r#"{"sha":"ghi789"}"#;

/// Canned upstream responses plus a record of what was requested.
#[derive(Clone)]
pub struct MockUpstream {
    pub tags: (StatusCode, &'static str),
    pub commit: (StatusCode, &'static str),
    pub delay: Duration,
    pub tag_hits: Arc<AtomicUsize>,
    pub commit_hits: Arc<AtomicUsize>,
    pub requested_paths: Arc<Mutex<Vec<String>>>,
    pub user_agents: Arc<Mutex<Vec<String>>>,
    pub accepts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self {
            tags: (StatusCode::OK, TAGS_BODY),
            commit: (StatusCode::OK, COMMIT_BODY),
            delay: Duration::ZERO,
            tag_hits: Arc::default(),
            commit_hits: Arc::default(),
            requested_paths: Arc::default(),
            user_agents: Arc::default(),
            accepts: Arc::default(),
        }
    }
}

impl MockUpstream {
    pub fn with_tags(mut self, status: StatusCode, body: &'static str) -> Self {
        self.tags = (status, body);
        self
    }

    pub fn with_commit(mut self, status: StatusCode, body: &'static str) -> Self {
        self.commit = (status, body);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn tag_hits(&self) -> usize {
        self.tag_hits.load(Ordering::SeqCst)
    }

    pub fn commit_hits(&self) -> usize {
        self.commit_hits.load(Ordering::SeqCst)
    }

    pub fn requested_paths(&self) -> Vec<String> {
        self.requested_paths.lock().unwrap().clone()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }

    pub fn accepts(&self) -> Vec<String> {
        self.accepts.lock().unwrap().clone()
    }

    fn record(&self, path: String, headers: &HeaderMap) {
        let value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        self.user_agents
            .lock()
            .unwrap()
            .push(value(header::USER_AGENT));
        self.accepts.lock().unwrap().push(value(header::ACCEPT));
        self.requested_paths.lock().unwrap().push(path);
    }

    /// Serve on an ephemeral loopback port and return the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/repos/{owner}/{repo}/tags", get(tags_handler))
            .route("/repos/{owner}/{repo}/commits/{branch}", get(commit_handler))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }
}

async fn tags_handler(
    State(upstream): State<MockUpstream>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    upstream.tag_hits.fetch_add(1, Ordering::SeqCst);
    upstream.record(format!("/repos/{owner}/{repo}/tags"), &headers);
    tokio::time::sleep(upstream.delay).await;

    let (status, body) = upstream.tags;
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

async fn commit_handler(
    State(upstream): State<MockUpstream>,
    Path((owner, repo, branch)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    upstream.commit_hits.fetch_add(1, Ordering::SeqCst);
    upstream.record(format!("/repos/{owner}/{repo}/commits/{branch}"), &headers);
    tokio::time::sleep(upstream.delay).await;

    let (status, body) = upstream.commit;
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

pub fn github_config(base_url: &str) -> GitHubConfig {
    GitHubConfig {
        api_base_url: base_url.to_string(),
        ..GitHubConfig::default()
    }
}

pub fn github_client(base_url: &str) -> GitHubClient {
    GitHubClient::new(&github_config(base_url)).expect("Failed to build GitHub client")
}
