//! Attaches review relationships to concrete-product resources.

use std::sync::Arc;
use tracing::instrument;

use jsonapi::RestResource;

use crate::clients::{ProductStorageClient, ReviewSearchClient};
use crate::config::ProductReviewsConfig;
use crate::error::ClientResult;
use crate::models::{ConcreteProductRecord, PageParams};
use crate::reader::ProductReviewReader;

/// Expands a batch of concrete-product resources with the reviews of their
/// abstract products.
pub struct ReviewRelationshipExpander<S, R> {
    reader: Arc<ProductReviewReader<S, R>>,
    storage_client: Arc<S>,
    config: ProductReviewsConfig,
}

impl<S: ProductStorageClient, R: ReviewSearchClient> ReviewRelationshipExpander<S, R> {
    pub fn new(
        reader: Arc<ProductReviewReader<S, R>>,
        storage_client: Arc<S>,
        config: ProductReviewsConfig,
    ) -> Self {
        Self {
            reader,
            storage_client,
            config,
        }
    }

    /// Resolve the resources' SKUs to concrete products, fetch the reviews
    /// of all referenced abstract products in one bulk query, and attach
    /// each review group to the resources whose SKU belongs to it.
    ///
    /// Resources whose SKU does not resolve are left untouched; an empty
    /// resolution leaves the whole batch unmodified.
    #[instrument(skip(self, resources), fields(resource_count = resources.len()))]
    pub async fn add_relationships_by_concrete_sku(
        &self,
        resources: &mut [RestResource],
        locale: &str,
    ) -> ClientResult<()> {
        let skus: Vec<String> = resources
            .iter()
            .map(|resource| resource.id().to_string())
            .collect();

        let concrete_products = self
            .storage_client
            .get_concrete_products_by_skus(&skus, locale)
            .await?;
        if concrete_products.is_empty() {
            return Ok(());
        }

        let mut abstract_ids: Vec<i64> = concrete_products
            .iter()
            .map(|product| product.id_product_abstract)
            .collect();
        abstract_ids.sort_unstable();
        abstract_ids.dedup();

        let page = PageParams {
            offset: 0,
            limit: self.config.maximum_number_of_results,
        };
        let review_collections = self
            .reader
            .get_reviews_by_abstract_ids(&page, &abstract_ids)
            .await?;

        for resource in resources.iter_mut() {
            for (id_product_abstract, review_resources) in &review_collections {
                attach_matching_reviews(
                    *id_product_abstract,
                    &concrete_products,
                    resource,
                    review_resources,
                );
            }
        }

        Ok(())
    }
}

/// Attach a review group to the resource if one of the concrete products
/// carrying that abstract id has the resource's SKU.
///
/// A SKU listed under several abstract ids (or listed twice) matches more
/// than once; every match attaches the full group, without deduplication.
fn attach_matching_reviews(
    id_product_abstract: i64,
    concrete_products: &[ConcreteProductRecord],
    resource: &mut RestResource,
    review_resources: &[RestResource],
) {
    for product in concrete_products {
        if product.id_product_abstract != id_product_abstract {
            continue;
        }
        if resource.id() != product.sku {
            continue;
        }
        for review_resource in review_resources {
            resource.add_relationship(review_resource.clone());
        }
    }
}
