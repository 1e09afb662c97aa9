// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /version`. Remote values are empty strings when unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    pub current_version: String,
    pub current_git_commit: String,
    pub git_branch: String,
    pub latest_version: String,
    pub latest_git_commit: String,
}
