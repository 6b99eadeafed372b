// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, JSON API handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::models::domain::ListDomainsResponse;
use crate::models::search::{
    ErrorResponse, FeaturedImage, ResultMetadata, SearchFilters, SearchResponse, SearchResult,
    SearchStatus, SortBy, SortOrder, StatusField,
};
use crate::models::stats::Stats;
use crate::models::version::{HealthResponse, VersionResponse};
use crate::routes::pages;
use crate::services::search::{SearchError, SearchService};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `GATEWAY_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("GATEWAY_VERSION");

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
}

impl AppState {
    pub fn new(search: SearchService) -> Self {
        Self {
            search: Arc::new(search),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure at the JSON API boundary. The cause is logged, never returned.
#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    Internal {
        message: &'static str,
        source: SearchError,
    },
}

impl ApiError {
    fn internal(message: &'static str) -> impl FnOnce(SearchError) -> Self {
        move |source| ApiError::Internal { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal { message, source } => {
                tracing::error!(error = ?source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/version",
    responses((status = 200, body = VersionResponse))
)]
pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: "search-gateway".to_string(),
        version: VERSION.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Filter, search and sort the indexed pages.
#[utoipa::path(
    post,
    path = "/api/search",
    request_body = SearchFilters,
    responses(
        (status = 200, description = "Matching results", body = SearchResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
pub async fn search_handler(
    State(state): State<AppState>,
    Json(filters): Json<SearchFilters>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = state
        .search
        .list_results(&filters)
        .await
        .map_err(ApiError::internal("Failed to search results"))?;

    Ok(Json(SearchResponse::from(results)))
}

#[utoipa::path(
    get,
    path = "/api/results/{slug}",
    params(("slug" = String, Path, description = "Result slug")),
    responses(
        (status = 200, body = SearchResult),
        (status = 404, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
pub async fn get_result_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SearchResult>, ApiError> {
    state
        .search
        .get_result(&slug)
        .await
        .map_err(ApiError::internal("Failed to fetch search result"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Result not found"))
}

#[utoipa::path(
    get,
    path = "/api/domains",
    responses(
        (status = 200, body = ListDomainsResponse),
        (status = 500, body = ErrorResponse)
    )
)]
pub async fn list_domains_handler(
    State(state): State<AppState>,
) -> Result<Json<ListDomainsResponse>, ApiError> {
    let domains = state
        .search
        .list_domains()
        .await
        .map_err(ApiError::internal("Failed to fetch available domains"))?;

    Ok(Json(ListDomainsResponse::from(domains)))
}

/// Counts per status. Always 200; failures show up as `degraded: true`.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses((status = 200, body = Stats))
)]
pub async fn stats_handler(State(state): State<AppState>) -> Json<Stats> {
    Json(state.search.get_stats().await)
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        version_handler,
        health_handler,
        search_handler,
        get_result_handler,
        list_domains_handler,
        stats_handler
    ),
    components(schemas(
        SearchFilters,
        SearchStatus,
        SortBy,
        SortOrder,
        SearchResponse,
        SearchResult,
        ResultMetadata,
        StatusField,
        FeaturedImage,
        ListDomainsResponse,
        Stats,
        ErrorResponse,
        VersionResponse,
        HealthResponse
    )),
    tags((name = "search", description = "Indexed page search"))
)]
pub struct ApiDoc;

/// Build the Axum application router: HTML pages, the JSON API, and its docs.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home_handler))
        .route("/results/{slug}", get(pages::result_detail_handler))
        .route("/version", get(version_handler))
        .route("/health", get(health_handler))
        .route("/api/search", post(search_handler))
        .route("/api/results/{slug}", get(get_result_handler))
        .route("/api/domains", get(list_domains_handler))
        .route("/api/stats", get(stats_handler))
        .fallback(pages::not_found_handler)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
