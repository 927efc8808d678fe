//! Application state: configuration plus the shared backend clients.

use std::sync::Arc;

use domain_product_reviews::elasticsearch::ElasticsearchReviewSearch;
use domain_product_reviews::gateway::HttpReviewGateway;
use domain_product_reviews::redis::RedisProductStorage;

use crate::config::Config;

/// Shared application state.
///
/// The clients are cheap to share: the storage client wraps a Redis
/// connection manager and the HTTP clients share one reqwest pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<RedisProductStorage>,
    pub search: Arc<ElasticsearchReviewSearch>,
    pub gateway: Arc<HttpReviewGateway>,
}
