// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use super::{
    attr, external_href, layout, long_date, short_date, status_badge, text, PageMeta,
};
use crate::models::search::SearchResult;
use std::borrow::Cow;
use std::fmt::Write;

const BACK_LINK: &str = r#"<a href="/" class="muted">&larr; Back to Search</a>"#;

/// Full page for a single indexed result.
pub fn detail_page(result: &SearchResult) -> String {
    let meta = &result.metadata;
    let title = result.display_title();

    let page_meta = PageMeta {
        title: Cow::Owned(format!("{} | Web Search Gateway", title)),
        description: meta
            .description
            .as_deref()
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Owned(format!("View details for {}", title))),
    };

    let mut body = format!(r#"<div class="detail"><nav>{BACK_LINK}</nav>"#);

    // Header
    body.push_str("<header><h1>");
    body.push_str(&text(title));
    body.push_str("</h1><p>");
    if let Some(status) = &meta.status {
        body.push_str(&status_badge(status.key, &status.value));
        body.push(' ');
    }
    if let Some(domain) = meta.domain.as_deref() {
        let _ = write!(body, r#"<span class="muted">{}</span> "#, text(domain));
    }
    if let Some(ranking) = ranking(result) {
        let _ = write!(body, r#"<span class="muted">Ranking: {}</span> "#, ranking);
    }
    if let Some(raw) = meta.last_indexed.as_deref() {
        let _ = write!(
            body,
            r#"<span class="muted">Last indexed: {}</span>"#,
            text(&short_date(raw, result.indexed_at()))
        );
    }
    body.push_str("</p></header>");

    if let Some(image) = &meta.featured_image {
        let _ = write!(
            body,
            r#"<img src="{}" alt="{}" width="800" height="400">"#,
            attr(&image.rendition(800, 400)),
            attr(&result.title),
        );
    }

    body.push_str(r#"<div class="detail-grid"><section>"#);
    if let Some(description) = meta.description.as_deref() {
        let _ = write!(
            body,
            r#"<div class="panel"><h2>Description</h2><p>{}</p></div>"#,
            text(description)
        );
    }
    if let Some(preview) = meta.content_preview.as_deref() {
        let _ = write!(
            body,
            r#"<div class="panel"><h2>Content Preview</h2><p>{}</p></div>"#,
            text(preview)
        );
    }
    let keywords = result.keyword_list();
    if !keywords.is_empty() {
        body.push_str(r#"<div class="panel"><h2>Keywords</h2><div>"#);
        for keyword in keywords {
            let _ = write!(body, r#"<span class="tag">{}</span>"#, text(keyword));
        }
        body.push_str("</div></div>");
    }
    body.push_str("</section><aside>");

    if let Some(url) = meta.url.as_deref() {
        let _ = write!(
            body,
            r#"<div class="panel"><h3>Visit Site</h3><p class="muted">{}</p>"#,
            text(url)
        );
        if let Some(href) = external_href(url) {
            let _ = write!(
                body,
                r#"<a class="button" href="{}" target="_blank" rel="noopener noreferrer">Open Website</a>"#,
                attr(&href)
            );
        }
        body.push_str("</div>");
    }

    body.push_str(r#"<div class="panel"><h3>Details</h3><dl>"#);
    if let Some(domain) = meta.domain.as_deref() {
        let _ = write!(body, "<dt>Domain</dt><dd>{}</dd>", text(domain));
    }
    if let Some(status) = &meta.status {
        let _ = write!(body, "<dt>Status</dt><dd>{}</dd>", text(&status.value));
    }
    if let Some(ranking) = ranking(result) {
        let _ = write!(body, "<dt>Search Ranking</dt><dd>{}/100</dd>", ranking);
    }
    if let Some(raw) = meta.last_indexed.as_deref() {
        let _ = write!(
            body,
            "<dt>Last Indexed</dt><dd>{}</dd>",
            text(&long_date(raw, result.indexed_at()))
        );
    }
    body.push_str("</dl></div></aside></div></div>");

    layout(&page_meta, &body)
}

/// Shown for unknown routes and missing records.
pub fn not_found_page() -> String {
    let meta = PageMeta {
        title: Cow::Borrowed("Result Not Found | Web Search Gateway"),
        ..PageMeta::default()
    };
    layout(
        &meta,
        &format!(
            r#"<div class="empty"><h1>Result Not Found</h1>
<p class="muted">The search result you're looking for doesn't exist or has been removed.</p>
<p>{BACK_LINK}</p></div>"#
        ),
    )
}

pub fn error_page() -> String {
    layout(
        &PageMeta::default(),
        &format!(
            r#"<div class="empty"><h1>Something went wrong</h1>
<p class="muted">We couldn't load the search results. Please try again later.</p>
<p>{BACK_LINK}</p></div>"#
        ),
    )
}

fn ranking(result: &SearchResult) -> Option<f64> {
    result.metadata.search_ranking.filter(|r| *r != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(metadata: serde_json::Value) -> SearchResult {
        serde_json::from_value(json!({
            "id": "1",
            "slug": "rust-lang",
            "title": "Rust",
            "metadata": metadata,
        }))
        .unwrap()
    }

    #[test]
    fn test_detail_page_full_record() {
        let page = detail_page(&result(json!({
            "url": "https://www.rust-lang.org",
            "page_title": "Rust Programming Language",
            "description": "A language empowering everyone",
            "content_preview": "Rust is blazingly fast",
            "keywords": "rust, systems, memory safety, performance",
            "domain": "rust-lang.org",
            "search_ranking": 95,
            "last_indexed": "2024-01-15T10:00:00Z",
            "status": { "key": "active", "value": "Active" },
            "featured_image": { "url": "u", "imgix_url": "https://imgix.example.com/r.png" },
        })));

        assert!(page.contains("<title>Rust Programming Language | Web Search Gateway</title>"));
        assert!(page.contains(r#"content="A language empowering everyone""#));
        assert!(page.contains("<h1>Rust Programming Language</h1>"));
        assert!(page.contains("r.png?w=800&amp;h=400&amp;fit=crop"));
        assert!(page.contains(r#"<span class="tag">performance</span>"#));
        assert!(page.contains("<dd>95/100</dd>"));
        assert!(page.contains("<dd>January 15, 2024</dd>"));
        assert!(page.contains("Last indexed: 1/15/2024"));
        assert!(page.contains("Visit Site"));
    }

    #[test]
    fn test_detail_page_sparse_record() {
        let page = detail_page(&result(json!({ "domain": "a.com" })));

        assert!(page.contains("<title>Rust | Web Search Gateway</title>"));
        assert!(page.contains(r#"content="View details for Rust""#));
        assert!(!page.contains("Visit Site"));
        assert!(!page.contains("/100"));
        assert!(!page.contains("<img"));
    }

    #[test]
    fn test_detail_page_escapes_content() {
        let page = detail_page(&result(json!({
            "page_title": "<b>bold</b>",
            "url": "javascript:\"x\"",
        })));

        assert!(page.contains("<h1>&lt;b&gt;bold&lt;/b&gt;</h1>"));
        assert!(page.contains(r#"<p class="muted">javascript:"x"</p>"#));
        assert!(!page.contains(r#"href="javascript"#));
        assert!(!page.contains("Open Website"));
    }

    #[test]
    fn test_fallback_pages() {
        assert!(not_found_page().contains("<h1>Result Not Found</h1>"));
        assert!(error_page().contains("<h1>Something went wrong</h1>"));
    }
}
