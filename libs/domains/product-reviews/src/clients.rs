//! Client traits for the backends this domain delegates to.
//!
//! The processors are generic over these traits; implementations can use
//! different transports (Redis, Elasticsearch, HTTP gateways, in-memory
//! fakes for tests).

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{
    AbstractProductRecord, ConcreteProductRecord, PageParams, ReviewSearchPage, ReviewSubmission,
    ReviewSubmissionResult,
};

/// Key-value product storage resolving SKUs to product records per locale.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStorageClient: Send + Sync {
    /// Resolve a single abstract product by its SKU.
    async fn find_abstract_product_by_sku(
        &self,
        sku: &str,
        locale: &str,
    ) -> ClientResult<Option<AbstractProductRecord>>;

    /// Resolve a batch of concrete products by SKU. SKUs without a record
    /// are silently absent from the result.
    async fn get_concrete_products_by_skus(
        &self,
        skus: &[String],
        locale: &str,
    ) -> ClientResult<Vec<ConcreteProductRecord>>;
}

/// Review search index executing paginated queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewSearchClient: Send + Sync {
    /// Reviews of a single abstract product.
    async fn find_reviews(
        &self,
        id_product_abstract: i64,
        page: &PageParams,
    ) -> ClientResult<ReviewSearchPage>;

    /// Reviews of several abstract products in one query.
    async fn find_reviews_bulk(
        &self,
        id_product_abstracts: &[i64],
        page: &PageParams,
    ) -> ClientResult<ReviewSearchPage>;
}

/// Backend accepting new customer reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewSubmissionClient: Send + Sync {
    /// Submit a review. A business-rule rejection is reported through
    /// `is_success`, not as an error.
    async fn submit(&self, submission: &ReviewSubmission) -> ClientResult<ReviewSubmissionResult>;
}
