// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod domain;
pub mod search;
pub mod stats;
pub mod version;
