use core_config::tracing::{init_tracing, install_color_eyre};
use domain_product_reviews::elasticsearch::ElasticsearchReviewSearch;
use domain_product_reviews::gateway::HttpReviewGateway;
use domain_product_reviews::redis::RedisProductStorage;
use jsonapi::{create_app, create_router, health_router};
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let storage = Arc::new(
        RedisProductStorage::connect(&config.storage)
            .await
            .map_err(|e| eyre::eyre!("Product storage connection failed: {}", e))?,
    );

    // One reqwest pool shared by the search and gateway clients
    let http_client = reqwest::Client::new();
    let search = Arc::new(ElasticsearchReviewSearch::new(
        http_client.clone(),
        &config.search,
    ));
    let gateway = Arc::new(HttpReviewGateway::new(http_client, &config.gateway));

    let state = AppState {
        config,
        storage,
        search,
        gateway,
    };

    // Build router with API routes (docs and middleware come from create_router)
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes);

    // Merge the /health liveness endpoint
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{}",
        state.config.app.name, state.config.app.version
    );

    create_app(app, &state.config.server).await?;

    info!("Storefront API shutdown complete");
    Ok(())
}
