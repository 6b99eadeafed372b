// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! HTML page handlers.

use crate::app::AppState;
use crate::models::search::{SearchFilters, SearchStatus};
use crate::views::{detail, results};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, error};

/// Landing page with results for the filters in the query string.
///
/// With no query string at all the list shows active results only.
pub async fn home_handler(
    State(state): State<AppState>,
    uri: Uri,
    filters: Result<Query<SearchFilters>, QueryRejection>,
) -> Response {
    let filters = match (uri.query().filter(|q| !q.is_empty()), filters) {
        (None, _) => SearchFilters::with_status(SearchStatus::Active),
        (Some(_), Ok(Query(filters))) => filters,
        (Some(_), Err(rejection)) => {
            debug!(error = %rejection, "Ignoring unreadable filters");
            SearchFilters::default()
        }
    };

    match state.search.load_home(&filters).await {
        Ok(home) => Html(results::home_page(&home, &filters)).into_response(),
        Err(e) => {
            error!(error = ?e, "Failed to load home page");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(detail::error_page())).into_response()
        }
    }
}

pub async fn result_detail_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.search.get_result(&slug).await {
        Ok(Some(result)) => Html(detail::detail_page(&result)).into_response(),
        Ok(None) => not_found().into_response(),
        Err(e) => {
            error!(error = ?e, slug = %slug, "Failed to load search result");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(detail::error_page())).into_response()
        }
    }
}

/// Router fallback for unknown paths.
pub async fn not_found_handler() -> (StatusCode, Html<String>) {
    not_found()
}

fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(detail::not_found_page()))
}
