// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Landing page: stats header, search form, filter bar, and result cards.

use super::{
    attr, external_href, filters_href, layout, result_href, short_date, status_badge, text,
    PageMeta, SITE_TITLE,
};
use crate::models::search::{SearchFilters, SearchResult, SearchStatus, SortBy, SortOrder};
use crate::services::search::HomeSnapshot;
use std::fmt::Write;

/// Keywords shown on a card before the "+N" overflow tag
const CARD_KEYWORDS: usize = 3;

pub fn home_page(home: &HomeSnapshot, filters: &SearchFilters) -> String {
    let mut body = String::new();
    body.push_str(&hero(home));
    body.push_str(&search_bar(filters));
    body.push_str(&filter_bar(filters, &home.domains));
    body.push_str(&result_count(home.results.len(), filters.query.as_deref()));
    body.push_str(&result_grid(&home.results));

    layout(&PageMeta::default(), &body)
}

fn hero(home: &HomeSnapshot) -> String {
    format!(
        r#"<header class="hero">
<h1>{title}</h1>
<p class="muted">Discover and explore indexed web content with advanced search capabilities and intelligent filtering</p>
<div class="stats">
<div><div class="stat-value">{active}</div><div class="muted">Active Results</div></div>
<div><div class="stat-value">{total}</div><div class="muted">Total Indexed</div></div>
<div><div class="stat-value">{domains}</div><div class="muted">Domains</div></div>
</div>
</header>
"#,
        title = SITE_TITLE,
        active = home.stats.active,
        total = home.stats.total,
        domains = home.domains.len(),
    )
}

/// Free-text form. The other filters ride along as hidden fields.
fn search_bar(filters: &SearchFilters) -> String {
    let mut hidden = String::new();
    if let Some(status) = filters.status {
        hidden_input(&mut hidden, "status", status.as_str());
    }
    if let Some(domain) = filters.domain.as_deref() {
        hidden_input(&mut hidden, "domain", domain);
    }
    hidden_input(&mut hidden, "sortBy", filters.sort_by.as_str());
    hidden_input(&mut hidden, "sortOrder", filters.sort_order.as_str());

    format!(
        r#"<form class="search-bar" method="get" action="/" role="search">
<input type="text" name="query" value="{query}" placeholder="Search indexed content...">
{hidden}<button type="submit">Search</button>
</form>
"#,
        query = attr(filters.query.as_deref().unwrap_or_default()),
    )
}

fn filter_bar(filters: &SearchFilters, domains: &[String]) -> String {
    let mut status_options = option("", "All Statuses", filters.status.is_none());
    for status in SearchStatus::ALL {
        status_options.push_str(&option(
            status.as_str(),
            status.label(),
            filters.status == Some(status),
        ));
    }

    let domain_select = if domains.is_empty() {
        String::new()
    } else {
        let mut options = option("", "All Domains", filters.domain.is_none());
        for domain in domains {
            options.push_str(&option(
                domain,
                domain,
                filters.domain.as_deref() == Some(domain.as_str()),
            ));
        }
        format!(
            r#"<label>Domain <select name="domain" onchange="this.form.submit()">{options}</select></label>
"#
        )
    };

    let mut sort_options = String::new();
    for (sort_by, label) in [
        (SortBy::Ranking, "Ranking"),
        (SortBy::Date, "Date"),
        (SortBy::Relevance, "Relevance"),
    ] {
        sort_options.push_str(&option(sort_by.as_str(), label, filters.sort_by == sort_by));
    }

    let mut hidden = String::new();
    if let Some(query) = filters.query.as_deref() {
        hidden_input(&mut hidden, "query", query);
    }
    hidden_input(&mut hidden, "sortOrder", filters.sort_order.as_str());

    let toggled = SearchFilters {
        sort_order: filters.sort_order.toggled(),
        ..filters.clone()
    };
    let (order_label, order_arrow) = match filters.sort_order {
        SortOrder::Asc => ("Ascending", "&uarr;"),
        SortOrder::Desc => ("Descending", "&darr;"),
    };

    let clear = if filters.has_active_filters() {
        let cleared = SearchFilters {
            query: filters.query.clone(),
            ..SearchFilters::default()
        };
        format!(
            r#"<a class="clear" href="{}">Clear filters</a>"#,
            attr(&filters_href(&cleared))
        )
    } else {
        String::new()
    };

    format!(
        r#"<form class="filter-bar" method="get" action="/">
<span>Filters:</span>
{hidden}<label>Status <select name="status" onchange="this.form.submit()">{status_options}</select></label>
{domain_select}<label>Sort by <select name="sortBy" onchange="this.form.submit()">{sort_options}</select></label>
<a class="order" href="{order_href}" title="Toggle sort order">{order_arrow} {order_label}</a>
<noscript><button type="submit">Apply</button></noscript>
{clear}
</form>
"#,
        order_href = attr(&filters_href(&toggled)),
    )
}

fn result_count(count: usize, query: Option<&str>) -> String {
    let plural = if count == 1 { "" } else { "s" };
    let suffix = query
        .map(|q| format!(r#" for "{}""#, text(q)))
        .unwrap_or_default();
    format!(r#"<p class="muted">{count} result{plural} found{suffix}</p>"#)
}

fn result_grid(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return r#"<div class="empty">
<h3>No results found</h3>
<p class="muted">Try adjusting your search query or filters to find what you're looking for.</p>
</div>
"#
        .to_string();
    }

    let mut grid = String::from("<div class=\"grid\">\n");
    for result in results {
        grid.push_str(&result_card(result));
    }
    grid.push_str("</div>\n");
    grid
}

/// One result card. Absent metadata fields omit their section.
pub fn result_card(result: &SearchResult) -> String {
    let meta = &result.metadata;
    let href = result_href(&result.slug);
    let mut card = String::from(r#"<article class="card">"#);

    if let Some(image) = &meta.featured_image {
        let _ = write!(
            card,
            r#"<div class="card-image"><img src="{}" alt="{}" width="600" height="300" loading="lazy">"#,
            attr(&image.rendition(600, 300)),
            attr(&result.title),
        );
        if let Some(status) = &meta.status {
            card.push_str(&status_badge(status.key, &status.value));
        }
        card.push_str("</div>");
    }

    card.push_str(r#"<div class="card-body">"#);
    if let Some(domain) = meta.domain.as_deref() {
        let _ = write!(card, r#"<div class="muted">{}</div>"#, text(domain));
    }
    let _ = write!(
        card,
        r#"<h3><a href="{}">{}</a></h3>"#,
        attr(&href),
        text(result.display_title())
    );
    if let Some(summary) = meta
        .description
        .as_deref()
        .or(meta.content_preview.as_deref())
    {
        let _ = write!(card, r#"<p class="muted">{}</p>"#, text(summary));
    }

    let keywords = result.keyword_list();
    if !keywords.is_empty() {
        card.push_str("<div>");
        for keyword in keywords.iter().take(CARD_KEYWORDS) {
            let _ = write!(card, r#"<span class="tag">{}</span>"#, text(keyword));
        }
        if keywords.len() > CARD_KEYWORDS {
            let _ = write!(
                card,
                r#"<span class="tag">+{}</span>"#,
                keywords.len() - CARD_KEYWORDS
            );
        }
        card.push_str("</div>");
    }

    card.push_str(r#"<div class="card-footer"><span>"#);
    if let Some(ranking) = meta.search_ranking.filter(|r| *r != 0.0) {
        let _ = write!(card, "Rank: {} ", ranking);
    }
    if let Some(raw) = meta.last_indexed.as_deref() {
        let _ = write!(card, "{}", text(&short_date(raw, result.indexed_at())));
    }
    let _ = write!(card, r#"</span><span><a href="{}">View Details</a>"#, attr(&href));
    if let Some(url) = meta.url.as_deref().and_then(external_href) {
        let _ = write!(
            card,
            r#" <a href="{}" target="_blank" rel="noopener noreferrer">Visit</a>"#,
            attr(&url)
        );
    }
    card.push_str("</span></div></div></article>\n");

    card
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        attr(value),
        if selected { " selected" } else { "" },
        text(label),
    )
}

fn hidden_input(out: &mut String, name: &str, value: &str) {
    let _ = writeln!(
        out,
        r#"<input type="hidden" name="{}" value="{}">"#,
        name,
        attr(value)
    );
}
