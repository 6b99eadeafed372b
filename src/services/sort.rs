// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::search::{SearchResult, SortBy, SortOrder};
use std::cmp::Ordering;

/// Return `results` ordered by the requested criterion.
///
/// The sort is stable: results with equal keys keep their input order.
/// Missing rankings count as zero and missing or unreadable `last_indexed`
/// values as the Unix epoch. `Relevance` has no score of its own and always
/// orders by descending ranking.
pub fn sort_results(
    results: &[SearchResult],
    sort_by: SortBy,
    order: SortOrder,
) -> Vec<SearchResult> {
    let mut sorted = results.to_vec();

    match sort_by {
        SortBy::Ranking => sorted.sort_by(|a, b| directed(compare_ranking(a, b), order)),
        SortBy::Date => {
            sorted.sort_by(|a, b| directed(indexed_millis(a).cmp(&indexed_millis(b)), order))
        }
        SortBy::Relevance => sorted.sort_by(|a, b| compare_ranking(b, a)),
    }

    sorted
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn compare_ranking(a: &SearchResult, b: &SearchResult) -> Ordering {
    a.ranking().total_cmp(&b.ranking())
}

fn indexed_millis(result: &SearchResult) -> i64 {
    result
        .indexed_at()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}
