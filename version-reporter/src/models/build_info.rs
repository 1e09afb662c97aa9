// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Identifiers of the running build, embedded at compile time by `build.rs`.

/// Application version from `Cargo.toml`; patch overridable via `VR_PATCH_VERSION`.
pub const VERSION: &str = env!("VR_VERSION");
pub const GIT_COMMIT: &str = env!("VR_GIT_COMMIT");
pub const GIT_BRANCH: &str = env!("VR_GIT_BRANCH");
pub const BUILD_DATE: &str = env!("VR_BUILD_DATE");
pub const RUSTC_VERSION: &str = env!("VR_RUSTC_VERSION");

/// Version, commit, branch and build date of a compiled artifact.
///
/// Constructed once at startup and handed to the reporter; tests build their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub commit: String,
    pub branch: String,
    pub build_date: String,
}

impl BuildInfo {
    /// Build info of the current binary.
    pub fn from_build_env() -> Self {
        Self {
            version: VERSION.to_string(),
            commit: GIT_COMMIT.to_string(),
            branch: GIT_BRANCH.to_string(),
            build_date: BUILD_DATE.to_string(),
        }
    }

    /// Multi-line report printed for `--version`.
    pub fn render_text(&self) -> String {
        format!(
            "Version: {}\nGit Commit: {}\nGit Branch: {}\nRust Version: {}\nOS/Arch: {}/{}\nBuild Date: {}\n",
            self.version,
            self.commit,
            self.branch,
            RUSTC_VERSION,
            std::env::consts::OS,
            std::env::consts::ARCH,
            self.build_date,
        )
    }
}
