// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Server-rendered HTML for the search pages.
//!
//! Every value that reaches markup goes through [`text`] or [`attr`].

pub mod detail;
pub mod results;

use crate::models::search::{SearchFilters, SearchStatus};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use url::{form_urlencoded, Url};

pub const SITE_TITLE: &str = "Web Search Gateway";
const SITE_DESCRIPTION: &str = "A sophisticated web search gateway providing curated access to \
     indexed content with advanced filtering and search capabilities.";

/// `<head>` metadata of a page
pub struct PageMeta<'a> {
    pub title: Cow<'a, str>,
    pub description: Cow<'a, str>,
}

impl Default for PageMeta<'_> {
    fn default() -> Self {
        Self {
            title: Cow::Borrowed(SITE_TITLE),
            description: Cow::Borrowed(SITE_DESCRIPTION),
        }
    }
}

pub(crate) fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

pub(crate) fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Wrap page content in the document shell.
pub fn layout(meta: &PageMeta<'_>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<meta name="keywords" content="search, gateway, content discovery, web search, indexed content">
<style>{css}</style>
</head>
<body>
<main class="container">
{body}
</main>
</body>
</html>"#,
        title = text(&meta.title),
        description = attr(&meta.description),
        css = STYLESHEET,
    )
}

/// Link to the list page with the given filters applied.
///
/// Sort parameters are always written, so a filtered link is never mistaken
/// for the unfiltered landing page.
pub fn filters_href(filters: &SearchFilters) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(q) = filters.query.as_deref() {
        query.append_pair("query", q);
    }
    if let Some(status) = filters.status {
        query.append_pair("status", status.as_str());
    }
    if let Some(domain) = filters.domain.as_deref() {
        query.append_pair("domain", domain);
    }
    query.append_pair("sortBy", filters.sort_by.as_str());
    query.append_pair("sortOrder", filters.sort_order.as_str());
    format!("/?{}", query.finish())
}

/// Detail page link; the slug is always a single path segment.
pub fn result_href(slug: &str) -> String {
    format!("/results/{}", urlencoding::encode(slug))
}

/// Link target for a crawled page URL. Only absolute `http`/`https` URLs
/// are linked; anything else is shown as text.
pub fn external_href(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

/// Badge markup for a status; the label comes from the record.
pub fn status_badge(status: SearchStatus, label: &str) -> String {
    format!(
        r#"<span class="badge badge-{key}">{label}</span>"#,
        key = status.as_str(),
        label = text(label),
    )
}

/// Short numeric date, e.g. `3/1/2024`.
pub fn short_date(raw: &str, parsed: Option<DateTime<Utc>>) -> String {
    parsed
        .map(|dt| dt.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Long date, e.g. `March 1, 2024`.
pub fn long_date(raw: &str, parsed: Option<DateTime<Utc>>) -> String {
    parsed
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

const STYLESHEET: &str = r#"
:root { --bg: #0b0d12; --card: #151923; --border: #262c3a; --fg: #e8eaf0; --muted: #8b93a7; --primary: #6d8cff; }
* { box-sizing: border-box; }
body { margin: 0; background: var(--bg); color: var(--fg); font-family: system-ui, sans-serif; }
a { color: inherit; }
.container { max-width: 1200px; margin: 0 auto; padding: 2rem 1rem; }
.hero { text-align: center; margin-bottom: 3rem; }
.hero h1 { font-size: 3rem; margin: 0 0 1rem; }
.muted { color: var(--muted); }
.stats { display: flex; justify-content: center; gap: 2rem; margin-top: 2rem; }
.stat-value { font-size: 1.5rem; font-weight: 700; color: var(--primary); }
.search-bar { max-width: 42rem; margin: 0 auto 2rem; display: flex; gap: .5rem; }
.search-bar input[type=text] { flex: 1; padding: 1rem; font-size: 1.1rem; background: var(--card); color: var(--fg); border: 1px solid var(--border); border-radius: .75rem; }
.filter-bar { display: flex; flex-wrap: wrap; gap: 1rem; align-items: center; background: var(--card); border: 1px solid var(--border); border-radius: .5rem; padding: 1rem; margin-bottom: 2rem; }
.filter-bar select, button { background: var(--bg); color: var(--fg); border: 1px solid var(--border); border-radius: .25rem; padding: .25rem .75rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(320px, 1fr)); gap: 1.5rem; }
.card { background: var(--card); border: 1px solid var(--border); border-radius: .5rem; overflow: hidden; }
.card-image { position: relative; aspect-ratio: 2 / 1; }
.card-image img { width: 100%; height: 100%; object-fit: cover; }
.card-image .badge { position: absolute; top: .5rem; right: .5rem; }
.card-body { padding: 1.5rem; }
.card-footer { display: flex; justify-content: space-between; border-top: 1px solid var(--border); padding-top: .5rem; font-size: .8rem; }
.tag { display: inline-block; padding: .2rem .6rem; margin: 0 .25rem .25rem 0; border-radius: 999px; background: var(--border); font-size: .8rem; }
.badge { padding: .2rem .6rem; border-radius: 999px; font-size: .75rem; border: 1px solid; }
.badge-active { color: #4ade80; border-color: #4ade8033; background: #14532d55; }
.badge-pending { color: #facc15; border-color: #facc1533; background: #713f1255; }
.badge-blocked { color: #f87171; border-color: #f8717133; background: #7f1d1d55; }
.detail { max-width: 64rem; margin: 0 auto; }
.detail-grid { display: grid; grid-template-columns: 2fr 1fr; gap: 2rem; }
.panel { background: var(--card); border: 1px solid var(--border); border-radius: .5rem; padding: 1.5rem; margin-bottom: 1.5rem; }
.button { display: block; text-align: center; padding: .5rem 1rem; background: var(--primary); color: #fff; border-radius: .375rem; text-decoration: none; }
.empty { text-align: center; padding: 3rem 0; }
"#;
