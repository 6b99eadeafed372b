// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Lifecycle classification of an indexed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Active,
    Pending,
    Blocked,
}

impl SearchStatus {
    pub const ALL: [SearchStatus; 3] = [
        SearchStatus::Active,
        SearchStatus::Pending,
        SearchStatus::Blocked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStatus::Active => "active",
            SearchStatus::Pending => "pending",
            SearchStatus::Blocked => "blocked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SearchStatus::Active),
            "pending" => Some(SearchStatus::Pending),
            "blocked" => Some(SearchStatus::Blocked),
            _ => None,
        }
    }

    /// Label used by the filter bar; the backend carries its own label per record.
    pub fn label(&self) -> &'static str {
        match self {
            SearchStatus::Active => "Active",
            SearchStatus::Pending => "Pending Review",
            SearchStatus::Blocked => "Blocked",
        }
    }
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select-dropdown value as stored by the content backend: a key plus its label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusField {
    pub key: SearchStatus,
    pub value: String,
}

/// Image asset reference, expanded one level deep by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeaturedImage {
    pub url: String,
    /// Base URL of the image rendering service
    pub imgix_url: String,
}

impl FeaturedImage {
    /// Cropped, auto-formatted rendition of the image at the given size.
    pub fn rendition(&self, width: u32, height: u32) -> String {
        format!(
            "{}?w={}&h={}&fit=crop&auto=format,compress",
            self.imgix_url, width, height
        )
    }
}

/// Metadata payload of an indexed page. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResultMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,
    /// Comma-separated tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Higher is more relevant; rendered on a 0-100 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_ranking: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_indexed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<FeaturedImage>,
}

impl ResultMetadata {
    pub fn is_empty(&self) -> bool {
        *self == ResultMetadata::default()
    }
}

/// An indexed web page record as returned by the content backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResult {
    /// Opaque backend-assigned identifier
    pub id: String,
    /// URL-safe unique identifier used for detail lookups
    pub slug: String,
    pub title: String,
    /// Missing and `null` payloads both decode to an empty metadata value
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ResultMetadata,
}

impl SearchResult {
    /// Page title when present, otherwise the object title.
    pub fn display_title(&self) -> &str {
        self.metadata
            .page_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.title)
    }

    /// Ranking used for ordering; a missing ranking counts as zero.
    pub fn ranking(&self) -> f64 {
        self.metadata.search_ranking.unwrap_or(0.0)
    }

    /// Parsed `last_indexed` timestamp, if present and readable.
    pub fn indexed_at(&self) -> Option<DateTime<Utc>> {
        self.metadata.last_indexed.as_deref().and_then(parse_timestamp)
    }

    /// Trimmed, non-empty keywords in their stored order.
    pub fn keyword_list(&self) -> Vec<&str> {
        self.metadata
            .keywords
            .as_deref()
            .map(|k| {
                k.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn status(&self) -> Option<SearchStatus> {
        self.metadata.status.as_ref().map(|s| s.key)
    }
}

/// Parse the timestamp formats the backend emits for date fields:
/// RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC), or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sort criterion for result lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Ranking,
    Date,
    /// No independent relevance score exists; ordered as descending ranking
    Relevance,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Ranking => "ranking",
            SortBy::Date => "date",
            SortBy::Relevance => "relevance",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Filter request for the result list.
///
/// Absent fields place no constraint on their dimension. Blank strings, as
/// submitted by an untouched HTML form control, are read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Free text matched against title, page title, description, keywords and preview
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub query: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_status_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<SearchStatus>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub domain: Option<String>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl SearchFilters {
    pub fn with_status(status: SearchStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Whether a status or domain restriction is applied
    pub fn has_active_filters(&self) -> bool {
        self.status.is_some() || self.domain.is_some()
    }
}

/// Response body of the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    /// Always equal to `results.len()`
    pub total: usize,
}

impl From<Vec<SearchResult>> for SearchResponse {
    fn from(results: Vec<SearchResult>) -> Self {
        let total = results.len();
        Self { results, total }
    }
}

/// Generic error body; never carries backend detail
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn blank_status_as_none<'de, D>(deserializer: D) -> Result<Option<SearchStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match blank_as_none(deserializer)? {
        None => Ok(None),
        Some(raw) => SearchStatus::parse(raw.trim()).map(Some).ok_or_else(|| {
            de::Error::unknown_variant(raw.trim(), &["active", "pending", "blocked"])
        }),
    }
}
