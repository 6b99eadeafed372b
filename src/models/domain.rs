// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for listing the domains present in the catalog
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListDomainsResponse {
    /// Distinct domains in ascending order
    pub domains: Vec<String>,
    pub count: usize,
}

impl From<Vec<String>> for ListDomainsResponse {
    fn from(domains: Vec<String>) -> Self {
        let count = domains.len();
        Self { domains, count }
    }
}
