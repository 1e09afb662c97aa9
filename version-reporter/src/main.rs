// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use version_reporter::app::{create_router, AppState};
use version_reporter::models::build_info::BuildInfo;
use version_reporter::services::github::{GitHubClient, GitHubConfig};
use version_reporter::services::reporter::{ReporterConfig, VersionReporter};

#[derive(Parser, Debug)]
#[command(
    name = "version-reporter",
    about = "Serves build information and the latest upstream release",
    disable_version_flag = true
)]
struct Cli {
    /// Print version and platform information, then exit
    #[arg(short = 'V', long)]
    version: bool,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let build_info = BuildInfo::from_build_env();

    if cli.version {
        print!("{}", build_info.render_text());
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let github_config = GitHubConfig::from_env()?;
    let github = GitHubClient::new(&github_config)?;
    let reporter_config = ReporterConfig::from_env();

    tracing::info!(
        version = %build_info.version,
        commit = %build_info.commit,
        branch = %build_info.branch,
        build_date = %build_info.build_date,
        "Starting version-reporter"
    );
    tracing::info!(
        api = %github_config.api_base_url,
        repo = %format!("{}/{}", github_config.owner, github_config.repo),
        tip_branches = ?reporter_config.tip_branches,
        "Resolving latest release from upstream"
    );

    let reporter = VersionReporter::new(build_info, github, reporter_config);
    let app = create_router(AppState {
        reporter: Arc::new(reporter),
    });

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;

    tracing::info!("version-reporter listening on {}", cli.bind);

    axum::serve(listener, app).await.context("Server error")
}
