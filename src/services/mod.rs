// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod backend;
pub mod cosmic;
pub mod logging;
pub mod query;
pub mod search;
pub mod sort;
