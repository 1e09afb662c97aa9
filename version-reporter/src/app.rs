// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::models::version::VersionResponse;
use crate::services::reporter::VersionReporter;
use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub reporter: Arc<VersionReporter>,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// Report the running build and the latest upstream release.
///
/// Always answers 200; remote values are empty strings when upstream is unavailable.
#[utoipa::path(
    get,
    path = "/version",
    tag = "version",
    responses(
        (status = 200, description = "Current build and latest upstream release", body = VersionResponse)
    )
)]
pub async fn version_handler(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(state.reporter.report().await)
}

#[derive(OpenApi)]
#[openapi(
    paths(version_handler),
    components(schemas(VersionResponse)),
    tags((name = "version", description = "Build and release information"))
)]
pub struct VersionApiDoc;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

const NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

const SECURE_HEADERS: [(HeaderName, &str); 3] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::REFERRER_POLICY, "no-referrer"),
];

/// Build the Axum application router.
///
/// `/version` responses carry no-cache and security headers. Swagger UI is served at
/// `/swagger-ui` with the document at `/api-docs/openapi.json`.
pub fn create_router(state: AppState) -> Router {
    let mut version_routes = Router::new().route("/version", get(version_handler));
    for (name, value) in NO_CACHE_HEADERS.into_iter().chain(SECURE_HEADERS) {
        version_routes = version_routes.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }

    version_routes
        .with_state(state)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", VersionApiDoc::openapi()),
        )
        .layer(TraceLayer::new_for_http())
}
