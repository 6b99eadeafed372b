// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result counts per status, recomputed on every request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Stats {
    pub active: usize,
    pub pending: usize,
    pub blocked: usize,
    pub total: usize,
    /// Set when a status query failed and the counts were zeroed
    #[serde(default)]
    pub degraded: bool,
}

impl Stats {
    pub fn new(active: usize, pending: usize, blocked: usize) -> Self {
        Self {
            active,
            pending,
            blocked,
            total: active + pending + blocked,
            degraded: false,
        }
    }

    /// All-zero counts reported when the aggregation could not complete.
    pub fn degraded() -> Self {
        Self {
            degraded: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_of_statuses() {
        let stats = Stats::new(3, 2, 1);
        assert_eq!(stats.total, 6);
        assert!(!stats.degraded);
    }

    #[test]
    fn test_degraded_counts_are_zero() {
        let stats = Stats::degraded();
        assert_eq!(
            (stats.active, stats.pending, stats.blocked, stats.total),
            (0, 0, 0, 0)
        );
        assert!(stats.degraded);
    }
}
