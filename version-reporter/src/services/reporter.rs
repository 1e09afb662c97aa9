// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Merges the local build info with the remote lookups into a `VersionResponse`.

use crate::models::build_info::BuildInfo;
use crate::models::github::RemoteTag;
use crate::models::version::VersionResponse;
use crate::services::github::{GitHubClient, Lookup};
use futures::future;
use std::env;

/// Branches whose tip commit is reported instead of the latest tag's commit.
pub const DEFAULT_TIP_BRANCHES: [&str; 2] = ["dev", "main"];

/// Reporting policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    pub tip_branches: Vec<String>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            tip_branches: DEFAULT_TIP_BRANCHES.iter().map(|b| b.to_string()).collect(),
        }
    }
}

impl ReporterConfig {
    /// Load from `VERSION_TIP_BRANCHES` (comma-separated), defaulting to `dev,main`.
    pub fn from_env() -> Self {
        env::var("VERSION_TIP_BRANCHES")
            .map(|raw| Self {
                tip_branches: parse_tip_branches(&raw),
            })
            .unwrap_or_default()
    }

    pub fn prefers_branch_tip(&self, branch: &str) -> bool {
        self.tip_branches.iter().any(|b| b == branch)
    }
}

fn parse_tip_branches(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

/// Combine build info with remote results.
///
/// `branch_override` is `Some` when the running branch prefers its tip commit; it then
/// replaces the tag's SHA even when empty.
pub fn build_report(
    build_info: &BuildInfo,
    latest_tag: Option<RemoteTag>,
    branch_override: Option<String>,
) -> VersionResponse {
    let (latest_version, tag_commit) = latest_tag
        .map(|tag| (tag.name, tag.commit.sha))
        .unwrap_or_default();

    VersionResponse {
        current_version: build_info.version.clone(),
        current_git_commit: build_info.commit.clone(),
        git_branch: build_info.branch.clone(),
        latest_version,
        latest_git_commit: branch_override.unwrap_or(tag_commit),
    }
}

/// Produces version reports for one build against one repository.
#[derive(Debug)]
pub struct VersionReporter {
    build_info: BuildInfo,
    github: GitHubClient,
    config: ReporterConfig,
}

impl VersionReporter {
    pub fn new(build_info: BuildInfo, github: GitHubClient, config: ReporterConfig) -> Self {
        Self {
            build_info,
            github,
            config,
        }
    }

    /// Query upstream and build a report. Upstream failures are logged and leave the
    /// affected fields empty.
    pub async fn report(&self) -> VersionResponse {
        let branch = self.build_info.branch.as_str();

        let tag_lookup = async { recover("latest tag", self.github.latest_tag().await) };
        let tip_lookup = async {
            if !self.config.prefers_branch_tip(branch) {
                return None;
            }
            Some(recover("branch tip", self.github.branch_tip(branch).await).unwrap_or_default())
        };

        let (latest_tag, branch_override) = future::join(tag_lookup, tip_lookup).await;
        build_report(&self.build_info, latest_tag, branch_override)
    }
}

fn recover<T>(lookup: &str, result: Lookup<T>) -> Option<T> {
    match result {
        Ok(value) => {
            if value.is_none() {
                tracing::debug!(lookup, "Upstream returned no result");
            }
            value
        }
        Err(e) => {
            tracing::warn!(lookup, error = %e, "Remote lookup failed");
            None
        }
    }
}
