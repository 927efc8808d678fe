use core_config::{env_parse_or_default, ConfigError, FromEnv};

/// Resource type of abstract products on the wire.
pub const RESOURCE_ABSTRACT_PRODUCTS: &str = "abstract-products";

/// Resource type of concrete products on the wire.
pub const RESOURCE_CONCRETE_PRODUCTS: &str = "concrete-products";

/// Resource type of product reviews on the wire.
pub const RESOURCE_PRODUCT_REVIEWS: &str = "product-reviews";

/// Tunables of the product-reviews API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductReviewsConfig {
    /// Page size applied when a request carries no pagination parameters.
    pub default_reviews_per_page: u64,
    /// Upper bound on reviews fetched by one relationship expansion.
    pub maximum_number_of_results: u64,
}

impl Default for ProductReviewsConfig {
    fn default() -> Self {
        Self {
            default_reviews_per_page: 10,
            maximum_number_of_results: 10_000,
        }
    }
}

impl FromEnv for ProductReviewsConfig {
    /// Reads from environment variables with defaults:
    /// - REVIEWS_DEFAULT_PER_PAGE: defaults to 10
    /// - REVIEWS_MAX_EXPANSION_RESULTS: defaults to 10000
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            default_reviews_per_page: env_parse_or_default("REVIEWS_DEFAULT_PER_PAGE", 10)?,
            maximum_number_of_results: env_parse_or_default("REVIEWS_MAX_EXPANSION_RESULTS", 10_000)?,
        })
    }
}
