// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use search_gateway::app::{create_router, AppState, VERSION};
use search_gateway::config::Config;
use search_gateway::services::backend::{ContentBackend, MemoryBackend};
use search_gateway::services::cosmic::CosmicClient;
use search_gateway::services::logging::init_tracing;
use search_gateway::services::search::SearchService;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    init_tracing(&config.log_level, config.log_format)?;

    let backend: Arc<dyn ContentBackend> = match &config.seed {
        Some(path) => {
            let backend = MemoryBackend::from_file(path)?;
            info!(path = %path.display(), objects = backend.len(), "Serving from seed file");
            Arc::new(backend)
        }
        None => Arc::new(CosmicClient::new(&config.cosmic()?)?),
    };

    let app = create_router(AppState::new(SearchService::new(backend)));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("search-gateway v{} listening on {}", VERSION, config.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
