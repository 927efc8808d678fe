use jsonapi::ResourceAttributes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::RESOURCE_PRODUCT_REVIEWS;

/// A product review as stored in the search index. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductReview {
    pub id_product_review: i64,
    /// The abstract product this review belongs to.
    pub id_product_abstract: i64,
    pub rating: u8,
    pub nickname: String,
    pub summary: String,
    #[serde(default)]
    pub description: String,
}

/// One page of search results plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSearchPage {
    pub reviews: Vec<ProductReview>,
    /// Total number of reviews matching the query, across all pages.
    pub num_found: u64,
}

/// Abstract product record resolved from the storage key-value mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractProductRecord {
    pub id_product_abstract: i64,
    pub sku: String,
}

/// Concrete product record resolved from the storage key-value mapping.
///
/// Within one lookup batch the `sku` uniquely identifies the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcreteProductRecord {
    pub id_product_abstract: i64,
    pub sku: String,
}

/// Pagination window for a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub offset: u64,
    pub limit: u64,
}

/// Attributes of a review, both on created resources and in create payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReviewAttributes {
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(min = 1, max = 50))]
    pub nickname: String,
    #[validate(length(min = 1, max = 255))]
    pub summary: String,
    #[serde(default)]
    pub description: String,
}

impl ResourceAttributes for ReviewAttributes {
    const RESOURCE_TYPE: &'static str = RESOURCE_PRODUCT_REVIEWS;
}

/// A review being handed to the submission backend. Not persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSubmission {
    /// The parent abstract-product identifier exactly as it appears in the
    /// request path; resolution to an internal id is the backend's concern.
    pub abstract_sku: String,
    pub locale_name: String,
    pub customer_reference: String,
    pub attributes: ReviewAttributes,
}

/// Outcome reported by the submission backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewSubmissionResult {
    pub is_success: bool,
    pub review: Option<ProductReview>,
}

/// Request context for the review read and create flows, assembled by the
/// HTTP layer from path, query and header data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewsRequest {
    /// Identifier of the parent abstract-products resource, if present.
    pub parent_abstract_sku: Option<String>,
    /// Identifier of a single product-reviews resource, if the request
    /// targets one directly.
    pub review_id: Option<String>,
    pub locale: String,
    pub customer_reference: Option<String>,
    pub page: Option<PageParams>,
}
