//! Builds JSON:API resources and responses from review data.

use axum::http::StatusCode;
use jsonapi::{ErrorCode, PageMeta, RestResource, RestResponse};
use serde_json::json;
use std::collections::HashMap;

use crate::config::RESOURCE_PRODUCT_REVIEWS;
use crate::models::ProductReview;

/// Stateless helper turning review records and counters into wire objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewResponseBuilder;

impl ReviewResponseBuilder {
    pub fn new() -> Self {
        Self
    }

    /// A `product-reviews` resource for one review record.
    pub fn review_resource(&self, review: &ProductReview) -> RestResource {
        RestResource::new(
            RESOURCE_PRODUCT_REVIEWS,
            review.id_product_review.to_string(),
            json!({
                "rating": review.rating,
                "nickname": review.nickname,
                "summary": review.summary,
                "description": review.description,
            }),
        )
    }

    /// Collection response with pagination metadata derived from the total
    /// match count and the effective page limit.
    pub fn collection_response(
        &self,
        num_found: u64,
        limit: u64,
        reviews: &[ProductReview],
    ) -> RestResponse {
        let resources = reviews.iter().map(|r| self.review_resource(r)).collect();
        RestResponse::collection(StatusCode::OK, resources, Some(PageMeta::new(num_found, limit)))
    }

    /// 202 Accepted response for a freshly created review resource.
    pub fn created_response(&self, resource: RestResource) -> RestResponse {
        RestResponse::single(StatusCode::ACCEPTED, resource)
    }

    /// One resource collection per requested abstract product id. Ids
    /// without reviews map to an empty collection.
    pub fn resource_collections_by_abstract_id(
        &self,
        mut grouped: HashMap<i64, Vec<ProductReview>>,
        requested_ids: &[i64],
    ) -> HashMap<i64, Vec<RestResource>> {
        requested_ids
            .iter()
            .map(|id| {
                let resources = grouped
                    .remove(id)
                    .unwrap_or_default()
                    .iter()
                    .map(|review| self.review_resource(review))
                    .collect();
                (*id, resources)
            })
            .collect()
    }

    pub fn sku_missing_error(&self) -> RestResponse {
        RestResponse::error(ErrorCode::AbstractProductSkuMissing)
    }

    pub fn abstract_product_not_found_error(&self) -> RestResponse {
        RestResponse::error(ErrorCode::AbstractProductNotFound)
    }

    pub fn not_implemented_error(&self) -> RestResponse {
        RestResponse::error(ErrorCode::NotImplemented)
    }

    pub fn submission_failed_error(&self) -> RestResponse {
        RestResponse::error(ErrorCode::ReviewSubmissionFailed)
    }
}
