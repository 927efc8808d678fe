use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};

use domain_product_reviews::config::ProductReviewsConfig;
use domain_product_reviews::elasticsearch::ElasticsearchConfig;
use domain_product_reviews::gateway::GatewayConfig;
use domain_product_reviews::redis::RedisStorageConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub storage: RedisStorageConfig,
    pub search: ElasticsearchConfig,
    pub gateway: GatewayConfig,
    pub reviews: ProductReviewsConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let storage = RedisStorageConfig::from_env()?; // Required - will fail if not set
        let search = ElasticsearchConfig::from_env()?; // Required - will fail if not set
        let gateway = GatewayConfig::from_env()?; // Required - will fail if not set
        let reviews = ProductReviewsConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            storage,
            search,
            gateway,
            reviews,
        })
    }
}
